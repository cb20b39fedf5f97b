/*
Study session analytics.
Pure aggregation over recorded sessions and tasks; handlers load the data
and pass `now` in.
*/

use chrono::{DateTime, Duration, FixedOffset};
use serde::Serialize;

use crate::logic::SubjectTable;
use crate::models::{StudySession, Task};

pub const DEFAULT_WINDOW_DAYS: i64 = 7;
pub const MAX_WINDOW_DAYS: i64 = 3650;

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubjectTotals {
    pub subject: String,
    pub total_hours: f64,
    pub tasks_completed: u32,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Period {
    pub start_date: DateTime<FixedOffset>,
    pub end_date: DateTime<FixedOffset>,
    pub days: i64,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalyticsSummary {
    pub total_hours_studied: f64,
    pub total_tasks_completed: u32,
    pub completion_rate: u32, // percent
    pub avg_focus_score: u32,
    pub subject_performance: Vec<SubjectTotals>,
    pub daily_data: Vec<StudySession>, // newest first
    pub period: Period,
}

/// Summarize the sessions recorded in the last `days` days.
///
/// The completion rate is taken over every stored task, not only the
/// window, so it reflects overall progress. `days` is clamped to
/// `0..=MAX_WINDOW_DAYS`.
pub fn summarize(
    sessions: &[StudySession],
    tasks: &[Task],
    days: i64,
    now: DateTime<FixedOffset>,
) -> AnalyticsSummary {
    let days = days.clamp(0, MAX_WINDOW_DAYS);
    let start_date = now - Duration::days(days);

    let mut window: Vec<StudySession> = sessions
        .iter()
        .filter(|s| s.date >= start_date)
        .cloned()
        .collect();
    window.sort_by(|a, b| b.date.cmp(&a.date));

    let total_hours: f64 = window.iter().map(|s| s.hours_studied).sum();
    let total_tasks_completed = window.iter().map(|s| s.tasks_completed).sum();

    let avg_focus_score = if window.is_empty() {
        0
    } else {
        let sum: u32 = window.iter().map(|s| u32::from(s.focus_score)).sum();
        (f64::from(sum) / window.len() as f64).round() as u32
    };

    let mut table = SubjectTable::default();
    for perf in window.iter().flat_map(|s| s.subject_performance.iter()) {
        let totals = table.entry(&perf.subject, || SubjectTotals {
            subject: perf.subject.clone(),
            total_hours: 0.0,
            tasks_completed: 0,
        });
        totals.total_hours += perf.hours_spent;
        totals.tasks_completed += perf.tasks_completed;
    }
    let subject_performance = table.into_rows();

    let completed = tasks.iter().filter(|t| t.completed).count();
    let completion_rate = if tasks.is_empty() {
        0
    } else {
        (completed as f64 * 100.0 / tasks.len() as f64).round() as u32
    };

    AnalyticsSummary {
        total_hours_studied: (total_hours * 10.0).round() / 10.0,
        total_tasks_completed,
        completion_rate,
        avg_focus_score,
        subject_performance,
        daily_data: window,
        period: Period {
            start_date,
            end_date: now,
            days,
        },
    }
}
