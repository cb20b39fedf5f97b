// Rule-based study insights.
//
// Rules are checked in a fixed order and every rule that holds appends
// one insight; the tip and the closing success message are always present.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::logic::{days_until_due, PlannerProfile, PlannerTask};
use crate::models::{Level, Priority};

const HIGH_PRIORITY_WARNING_THRESHOLD: usize = 3;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    Warning,
    Tip,
    Success,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Insight {
    #[serde(rename = "type")]
    pub kind: InsightKind,
    pub title: String,
    pub message: String,
}

impl Insight {
    pub fn new(kind: InsightKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Produce insights for the given tasks.
///
/// `tasks` may contain completed tasks; they are ignored for the workload
/// and high-priority rules. The earliest due date over all tasks (an
/// undated task, or an empty list, counts as `now`) decides how many days
/// the pending workload is spread over.
pub fn generate_insights(
    profile: &PlannerProfile,
    tasks: &[PlannerTask],
    now: DateTime<FixedOffset>,
) -> Vec<Insight> {
    let mut insights = Vec::new();

    let pending = || tasks.iter().filter(|t| !t.completed);

    let total_pending_hours: f64 = pending().map(|t| t.estimated_hours).sum();
    let earliest_due = tasks
        .iter()
        .map(|t| t.due.unwrap_or(now))
        .min()
        .unwrap_or(now);
    let days_available = days_until_due(earliest_due, now).max(1);
    let daily_requirement = (total_pending_hours / days_available as f64).ceil();

    if daily_requirement > profile.available_hours_per_day {
        insights.push(Insight::new(
            InsightKind::Warning,
            "Heavy Workload Ahead",
            format!(
                "You have {} hours of work with only {} days. Consider extending deadlines or breaking tasks into smaller parts.",
                display_hours(total_pending_hours),
                days_available
            ),
        ));
    }

    let high_priority = pending().filter(|t| t.priority == Priority::High).count();
    if high_priority > HIGH_PRIORITY_WARNING_THRESHOLD {
        insights.push(Insight::new(
            InsightKind::Warning,
            "Multiple High-Priority Tasks",
            "You have several high-priority tasks. Focus on one subject at a time for better retention.",
        ));
    }

    insights.push(Insight::new(
        InsightKind::Tip,
        "Study Efficiently",
        "Follow the recommended break schedule. Studies show that 50-minute focused sessions with short breaks improve retention by 40%.",
    ));

    if profile.level == Level::Beginner {
        insights.push(Insight::new(
            InsightKind::Tip,
            "Start Small",
            "As a beginner, start with 2-3 hour study sessions. Gradually increase as you build stamina.",
        ));
    }

    insights.push(Insight::new(
        InsightKind::Success,
        "Plan Created",
        "Your personalized study plan is ready! Follow it for optimal results.",
    ));

    insights
}

// 6.0 -> "6", 2.5 -> "2.5"; float noise trimmed to two decimals
fn display_hours(hours: f64) -> String {
    format!("{}", (hours * 100.0).round() / 100.0)
}
