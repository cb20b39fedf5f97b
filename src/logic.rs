/*
Study plan engine: urgency sorting, daily schedule, subject ranking,
break intervals and focus hours.
Module is independent from HTTP / Axum and never reads the clock itself;
callers pass `now` in.
*/

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::insights::{self, Insight};
use crate::models::{Level, Priority, Task, UserProfile};

pub const DEFAULT_AVAILABLE_HOURS: f64 = 4.0;
pub const DEFAULT_ESTIMATED_HOURS: f64 = 1.0;

const DAY_START_HOUR: f64 = 9.0;
const SESSION_GAP_HOURS: f64 = 0.25;
const MAX_SCHEDULED_TASKS: usize = 5;
const MAX_RANKED_SUBJECTS: usize = 5;
const URGENCY_HORIZON_DAYS: i64 = 10;

const FOCUS_SESSION_MIN: i64 = 50;
const SHORT_BREAK_MIN: i64 = 10;
const LONG_BREAK_MIN: i64 = 30;
const LONG_BREAK_EVERY: u32 = 4;
const MAX_HOURS_PER_DAY: f64 = 24.0;

const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

// Profile with every default resolved
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerProfile {
    pub available_hours_per_day: f64,
    pub level: Level,
    pub study_subjects: Vec<String>,
}

impl PlannerProfile {
    pub fn from_profile(profile: &UserProfile) -> Self {
        Self {
            available_hours_per_day: profile
                .available_hours_per_day
                .filter(|h| h.is_finite())
                .unwrap_or(DEFAULT_AVAILABLE_HOURS),
            level: profile.level.unwrap_or_default(),
            study_subjects: profile.study_subjects.clone(),
        }
    }
}

// Task as seen by the engine.
//     `due == None` means missing or unparsable, and counts as maximally urgent.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannerTask {
    pub title: String,
    pub subject: String,
    pub due: Option<DateTime<FixedOffset>>,
    pub priority: Priority,
    pub estimated_hours: f64,
    pub completed: bool,
}

impl PlannerTask {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            subject: task.subject.clone(),
            due: Some(task.due_date),
            priority: task.priority,
            estimated_hours: resolve_hours(task.estimated_hours),
            completed: task.completed,
        }
    }
}

fn resolve_hours(hours: Option<f64>) -> f64 {
    hours
        .filter(|h| h.is_finite() && *h > 0.0)
        .unwrap_or(DEFAULT_ESTIMATED_HOURS)
}

/// Parse an RFC 3339 due date; anything unparsable becomes `None`.
pub fn parse_due(raw: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw.trim()).ok()
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct StudyPlan {
    pub daily_schedule: Vec<ScheduleBlock>,
    pub prioritized_subjects: Vec<SubjectRanking>,
    pub recommended_breaks: Vec<BreakSlot>,
    pub focus_hours: Vec<FocusWindow>,
    pub insights: Vec<Insight>,
}

// One study session placed on today's timeline
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScheduleBlock {
    pub subject: String,
    pub task: String,
    pub start_time: String, // "H:MM", hour may exceed 23
    pub end_time: String,
    pub duration: f64, // hours
    pub priority: Priority,
    pub break_after: bool,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubjectRanking {
    pub subject: String,
    pub priority: Priority,
    pub pending_tasks: u32,
    pub estimated_hours: i64,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BreakSlot {
    pub session_number: u32,
    pub break_duration: i64, // minutes
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FocusWindow {
    pub time: String,
    pub description: String,
    pub productivity: u8,
}

/// Run the full pipeline for one user.
///
/// Tasks are sorted once; the schedule, subject and insight stages all
/// read the sorted copy. The caller's slice is left untouched.
pub fn generate_study_plan(
    profile: &PlannerProfile,
    tasks: &[PlannerTask],
    now: DateTime<FixedOffset>,
) -> StudyPlan {
    let sorted = sort_tasks_by_urgency(tasks);

    let plan = StudyPlan {
        daily_schedule: create_daily_schedule(profile, &sorted),
        prioritized_subjects: prioritize_subjects(&sorted, now),
        recommended_breaks: calculate_break_intervals(profile.available_hours_per_day),
        focus_hours: identify_focus_hours(profile),
        insights: insights::generate_insights(profile, &sorted, now),
    };

    tracing::debug!(
        tasks = tasks.len(),
        blocks = plan.daily_schedule.len(),
        subjects = plan.prioritized_subjects.len(),
        breaks = plan.recommended_breaks.len(),
        insights = plan.insights.len(),
        "study plan generated"
    );

    plan
}

// Sort tasks by urgency.
//
// Sorting rules:
// 1) Earlier due date first (no due date sorts before any date)
// 2) If tied, higher priority first
// Stable, so equal tasks keep their input order.
pub fn sort_tasks_by_urgency(tasks: &[PlannerTask]) -> Vec<PlannerTask> {
    let mut sorted = tasks.to_vec();
    sorted.sort_by(|a, b| {
        a.due
            .cmp(&b.due)
            .then_with(|| b.priority.weight().cmp(&a.priority.weight()))
    });
    sorted
}

/// Build today's schedule from the urgency-sorted tasks.
///
/// Process:
/// - Start at 9:00 and look at the first five tasks only
/// - Each task gets min(estimated hours, hours left in the budget)
/// - A 15 minute gap follows every session; the gap is not charged to the budget
/// - Stop once the budget is spent
pub fn create_daily_schedule(profile: &PlannerProfile, tasks: &[PlannerTask]) -> Vec<ScheduleBlock> {
    let mut schedule = Vec::new();
    let mut remaining = profile.available_hours_per_day;

    // also rejects NaN
    if !(remaining > 0.0) {
        return schedule;
    }

    let mut clock = DAY_START_HOUR;

    for task in tasks.iter().take(MAX_SCHEDULED_TASKS) {
        if remaining <= 0.0 {
            break;
        }

        let session = task.estimated_hours.min(remaining);

        schedule.push(ScheduleBlock {
            subject: task.subject.clone(),
            task: task.title.clone(),
            start_time: format_clock(clock),
            end_time: format_clock(clock + session),
            duration: session,
            priority: task.priority,
            break_after: session >= 2.0,
        });

        clock += session + SESSION_GAP_HOURS;
        remaining -= session;
    }

    schedule
}

// Render fractional hours as "H:MM", rounded to the nearest minute.
//     9.25 -> "9:15", 26.0 -> "26:00"
pub fn format_clock(hours: f64) -> String {
    let total_min = (hours * 60.0).round() as i64;
    format!("{}:{:02}", total_min / 60, total_min % 60)
}

// Whole days until `due`, rounded up. Negative when overdue.
pub fn days_until_due(due: DateTime<FixedOffset>, now: DateTime<FixedOffset>) -> i64 {
    let ms = (due - now).num_milliseconds();
    let days = ms.div_euclid(MILLIS_PER_DAY);
    if ms.rem_euclid(MILLIS_PER_DAY) != 0 {
        days + 1
    } else {
        days
    }
}

// urgency contribution (0..10):
// overdue, due today or undated -> 10
// n days left -> 10 - n, floored at 0
fn urgency_points(due: Option<DateTime<FixedOffset>>, now: DateTime<FixedOffset>) -> i64 {
    let days = due.map_or(0, |d| days_until_due(d, now));
    (URGENCY_HORIZON_DAYS - days.max(0)).max(0)
}

// Per-subject aggregate used for ranking
#[derive(Debug, Clone, PartialEq)]
pub struct SubjectMetrics {
    pub subject: String,
    pub tasks_count: u32,
    pub total_hours: f64,
    pub urgency_score: i64,
    pub high_priority_tasks: u32,
}

impl SubjectMetrics {
    fn new(subject: &str) -> Self {
        Self {
            subject: subject.to_string(),
            tasks_count: 0,
            total_hours: 0.0,
            urgency_score: 0,
            high_priority_tasks: 0,
        }
    }

    pub fn ranking_score(&self) -> i64 {
        self.urgency_score + 2 * i64::from(self.high_priority_tasks)
    }

    pub fn reason(&self) -> String {
        let mut reasons = Vec::new();

        if self.high_priority_tasks > 0 {
            reasons.push(format!("{} high-priority task(s)", self.high_priority_tasks));
        }
        if self.tasks_count >= 3 {
            reasons.push(format!("{} pending tasks", self.tasks_count));
        }

        if reasons.is_empty() {
            "Important subject".to_string()
        } else {
            reasons.join(", ")
        }
    }
}

// Subject name -> row, kept in first-seen order
#[derive(Debug)]
pub(crate) struct SubjectTable<T> {
    index: HashMap<String, usize>,
    rows: Vec<T>,
}

impl<T> Default for SubjectTable<T> {
    fn default() -> Self {
        Self {
            index: HashMap::new(),
            rows: Vec::new(),
        }
    }
}

impl<T> SubjectTable<T> {
    pub(crate) fn entry(&mut self, subject: &str, make: impl FnOnce() -> T) -> &mut T {
        let idx = match self.index.get(subject) {
            Some(&idx) => idx,
            None => {
                self.rows.push(make());
                self.index.insert(subject.to_string(), self.rows.len() - 1);
                self.rows.len() - 1
            }
        };
        &mut self.rows[idx]
    }

    pub(crate) fn into_rows(self) -> Vec<T> {
        self.rows
    }
}

/// Rank subjects by how pressing their pending work is.
///
/// Score = summed urgency points + 2 per high-priority task. Ties keep
/// the order in which subjects first appear in `tasks`. At most five
/// subjects are returned.
pub fn prioritize_subjects(tasks: &[PlannerTask], now: DateTime<FixedOffset>) -> Vec<SubjectRanking> {
    let mut table = SubjectTable::default();

    for task in tasks.iter().filter(|t| !t.completed) {
        let metrics = table.entry(&task.subject, || SubjectMetrics::new(&task.subject));
        metrics.tasks_count += 1;
        metrics.total_hours += task.estimated_hours;
        if task.priority == Priority::High {
            metrics.high_priority_tasks += 1;
        }
        metrics.urgency_score += urgency_points(task.due, now);
    }

    let mut rows = table.into_rows();
    rows.sort_by(|a, b| b.ranking_score().cmp(&a.ranking_score()));
    rows.truncate(MAX_RANKED_SUBJECTS);

    rows.into_iter()
        .map(|m| SubjectRanking {
            priority: if m.high_priority_tasks > 0 {
                Priority::High
            } else {
                Priority::Medium
            },
            pending_tasks: m.tasks_count,
            estimated_hours: m.total_hours.round() as i64,
            reason: m.reason(),
            subject: m.subject,
        })
        .collect()
}

// Pomodoro-style break plan for the day.
//     50 min focus sessions, 10 min short break, 30 min long break after
//     every 4th session; breaks are clipped to the time left in the day.
pub fn calculate_break_intervals(available_hours: f64) -> Vec<BreakSlot> {
    let mut breaks = Vec::new();

    if !(available_hours > 0.0) {
        return breaks;
    }

    let total_min = (available_hours.min(MAX_HOURS_PER_DAY) * 60.0).round() as i64;
    let mut elapsed = 0;
    let mut session = 0u32;

    while elapsed < total_min {
        session += 1;
        elapsed += FOCUS_SESSION_MIN;

        if elapsed >= total_min {
            break;
        }

        let long = session % LONG_BREAK_EVERY == 0;
        let wanted = if long { LONG_BREAK_MIN } else { SHORT_BREAK_MIN };
        let duration = wanted.min(total_min - elapsed);

        breaks.push(BreakSlot {
            session_number: session,
            break_duration: duration,
            reason: if long {
                "Long break - stretch and relax".to_string()
            } else {
                "Quick refresh break".to_string()
            },
        });

        elapsed += duration;
    }

    breaks
}

pub fn identify_focus_hours(profile: &PlannerProfile) -> Vec<FocusWindow> {
    let hours = profile.available_hours_per_day;

    let mut windows = vec![FocusWindow {
        time: "9:00 - 12:00".to_string(),
        description: "Morning focus hours - Peak mental clarity".to_string(),
        productivity: 95,
    }];

    if hours >= 4.0 {
        windows.push(FocusWindow {
            time: "14:00 - 16:00".to_string(),
            description: "Afternoon focus hours - Post-lunch recovery".to_string(),
            productivity: 80,
        });
    }

    if hours >= 6.0 {
        windows.push(FocusWindow {
            time: "18:00 - 19:30".to_string(),
            description: "Evening focus hours - Light review time".to_string(),
            productivity: 70,
        });
    }

    windows
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::insights::InsightKind;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    pub(crate) fn now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 4, 8, 0, 0)
            .unwrap()
    }

    pub(crate) fn task(subject: &str, priority: Priority, hours: f64, due_in_days: i64) -> PlannerTask {
        PlannerTask {
            title: format!("{subject} task"),
            subject: subject.to_string(),
            due: Some(now() + Duration::days(due_in_days)),
            priority,
            estimated_hours: hours,
            completed: false,
        }
    }

    pub(crate) fn profile(hours: f64, level: Level) -> PlannerProfile {
        PlannerProfile {
            available_hours_per_day: hours,
            level,
            study_subjects: vec![],
        }
    }

    #[test]
    fn test_profile_defaults_resolved_once() {
        let p = PlannerProfile::from_profile(&UserProfile::default());
        assert_eq!(p.available_hours_per_day, 4.0);
        assert_eq!(p.level, Level::Beginner);
    }

    #[test]
    fn test_task_hours_default_to_one() {
        let stored = Task {
            id: uuid::Uuid::new_v4(),
            title: "Essay".to_string(),
            subject: "History".to_string(),
            description: String::new(),
            due_date: now(),
            priority: Priority::Low,
            estimated_hours: None,
            completed: false,
            completed_at: None,
            created_at: now(),
        };
        assert_eq!(PlannerTask::from_task(&stored).estimated_hours, 1.0);

        let zero = Task { estimated_hours: Some(0.0), ..stored };
        assert_eq!(PlannerTask::from_task(&zero).estimated_hours, 1.0);
    }

    #[test]
    fn test_parse_due_rejects_garbage() {
        assert!(parse_due("2024-03-05T10:00:00+09:00").is_some());
        assert!(parse_due("next tuesday").is_none());
    }

    #[test]
    fn test_sort_by_due_then_priority() {
        let tasks = vec![
            task("Late", Priority::High, 1.0, 5),
            task("Low", Priority::Low, 1.0, 1),
            task("High", Priority::High, 1.0, 1),
            task("Medium", Priority::Medium, 1.0, 1),
        ];

        let sorted = sort_tasks_by_urgency(&tasks);
        let subjects: Vec<&str> = sorted.iter().map(|t| t.subject.as_str()).collect();
        assert_eq!(subjects, vec!["High", "Medium", "Low", "Late"]);

        // input untouched
        assert_eq!(tasks[0].subject, "Late");
    }

    #[test]
    fn test_sort_undated_first() {
        let mut undated = task("Undated", Priority::Low, 1.0, 0);
        undated.due = None;
        let tasks = vec![task("Overdue", Priority::High, 1.0, -3), undated];

        let sorted = sort_tasks_by_urgency(&tasks);
        assert_eq!(sorted[0].subject, "Undated");
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut a = task("Math", Priority::Medium, 1.0, 2);
        a.title = "first".to_string();
        let mut b = task("Math", Priority::Medium, 1.0, 2);
        b.title = "second".to_string();

        let sorted = sort_tasks_by_urgency(&[a, b]);
        assert_eq!(sorted[0].title, "first");
        assert_eq!(sorted[1].title, "second");
    }

    #[test]
    fn test_schedule_allocates_greedily_with_gaps() {
        let tasks = vec![
            task("Math", Priority::High, 2.0, 1),
            task("Physics", Priority::Medium, 1.5, 2),
            task("Art", Priority::Low, 3.0, 3),
        ];

        let schedule = create_daily_schedule(&profile(4.0, Level::Beginner), &tasks);
        assert_eq!(schedule.len(), 3);

        assert_eq!(schedule[0].start_time, "9:00");
        assert_eq!(schedule[0].end_time, "11:00");
        assert!(schedule[0].break_after);

        assert_eq!(schedule[1].start_time, "11:15");
        assert_eq!(schedule[1].end_time, "12:45");
        assert!(!schedule[1].break_after);

        // only half an hour of budget left
        assert_eq!(schedule[2].start_time, "13:00");
        assert_eq!(schedule[2].end_time, "13:30");
        assert_eq!(schedule[2].duration, 0.5);
    }

    #[test]
    fn test_schedule_caps_at_five_tasks() {
        let tasks: Vec<PlannerTask> = (0..8)
            .map(|i| task(&format!("S{i}"), Priority::Medium, 0.5, i))
            .collect();

        let schedule = create_daily_schedule(&profile(10.0, Level::Advanced), &tasks);
        assert_eq!(schedule.len(), 5);
        assert_eq!(schedule[4].subject, "S4");
    }

    #[test]
    fn test_schedule_empty_without_hours() {
        let tasks = vec![task("Math", Priority::High, 2.0, 1)];
        assert!(create_daily_schedule(&profile(0.0, Level::Beginner), &tasks).is_empty());
        assert!(create_daily_schedule(&profile(-2.0, Level::Beginner), &tasks).is_empty());
    }

    #[test]
    fn test_subject_table_keeps_first_seen_order() {
        let mut table: SubjectTable<u32> = SubjectTable::default();
        *table.entry("Math", || 0) += 1;
        *table.entry("Art", || 0) += 1;
        *table.entry("Math", || 0) += 1;

        assert_eq!(table.into_rows(), vec![2, 1]);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(9.0), "9:00");
        assert_eq!(format_clock(10.25), "10:15");
        assert_eq!(format_clock(12.5), "12:30");
        assert_eq!(format_clock(26.0), "26:00");
    }

    #[test]
    fn test_days_until_due_rounds_up() {
        assert_eq!(days_until_due(now() + Duration::hours(1), now()), 1);
        assert_eq!(days_until_due(now() + Duration::days(2), now()), 2);
        assert_eq!(days_until_due(now() - Duration::hours(1), now()), 0);
        assert_eq!(days_until_due(now() - Duration::hours(30), now()), -1);
    }

    #[test]
    fn test_prioritize_subjects_scores_and_reasons() {
        let tasks = vec![
            task("History", Priority::Low, 1.0, 9),
            task("Math", Priority::High, 2.0, 1),
            task("Math", Priority::Medium, 1.4, 2),
            task("Math", Priority::Low, 1.0, 3),
            task("Chem", Priority::Medium, 1.0, 30),
        ];

        let ranked = prioritize_subjects(&tasks, now());
        let subjects: Vec<&str> = ranked.iter().map(|r| r.subject.as_str()).collect();
        assert_eq!(subjects, vec!["Math", "History", "Chem"]);

        let math = &ranked[0];
        assert_eq!(math.priority, Priority::High);
        assert_eq!(math.pending_tasks, 3);
        assert_eq!(math.estimated_hours, 4);
        assert_eq!(math.reason, "1 high-priority task(s), 3 pending tasks");

        assert_eq!(ranked[1].priority, Priority::Medium);
        assert_eq!(ranked[1].reason, "Important subject");
    }

    #[test]
    fn test_prioritize_subjects_overdue_counts_full_ten() {
        let overdue = task("Bio", Priority::Low, 1.0, -20);
        let mut metrics_input = vec![overdue];
        let mut undated = task("Geo", Priority::Low, 1.0, 0);
        undated.due = None;
        metrics_input.push(undated);

        let ranked = prioritize_subjects(&metrics_input, now());
        // both score 10, so first-seen order holds
        assert_eq!(ranked[0].subject, "Bio");
        assert_eq!(ranked[1].subject, "Geo");
    }

    #[test]
    fn test_prioritize_subjects_skips_completed_and_caps_at_five() {
        let mut tasks: Vec<PlannerTask> = (0..7)
            .map(|i| task(&format!("S{i}"), Priority::Medium, 1.0, i))
            .collect();
        tasks[0].completed = true;

        let ranked = prioritize_subjects(&tasks, now());
        assert_eq!(ranked.len(), 5);
        assert!(ranked.iter().all(|r| r.subject != "S0"));
        assert_eq!(ranked[0].subject, "S1");
    }

    #[test]
    fn test_breaks_zero_hours() {
        assert!(calculate_break_intervals(0.0).is_empty());
        assert!(calculate_break_intervals(-1.0).is_empty());
    }

    #[test]
    fn test_breaks_four_hours() {
        let breaks = calculate_break_intervals(4.0);
        let sessions: Vec<u32> = breaks.iter().map(|b| b.session_number).collect();
        assert_eq!(sessions, vec![1, 2, 3, 4]);

        assert_eq!(breaks[0].break_duration, 10);
        assert_eq!(breaks[0].reason, "Quick refresh break");

        // long break, clipped to the 10 minutes left before 240
        assert_eq!(breaks[3].reason, "Long break - stretch and relax");
        assert_eq!(breaks[3].break_duration, 10);
    }

    #[test]
    fn test_breaks_full_long_break() {
        let breaks = calculate_break_intervals(6.0);
        assert_eq!(breaks[3].break_duration, 30);
        assert_eq!(breaks[4].break_duration, 10);
    }

    #[test]
    fn test_breaks_short_day_has_no_break() {
        // 45 minutes never completes a session
        assert!(calculate_break_intervals(0.75).is_empty());
    }

    #[test]
    fn test_focus_hours_by_budget() {
        assert_eq!(identify_focus_hours(&profile(3.0, Level::Beginner)).len(), 1);
        assert_eq!(identify_focus_hours(&profile(5.0, Level::Beginner)).len(), 2);

        let windows = identify_focus_hours(&profile(7.0, Level::Beginner));
        assert_eq!(windows.len(), 3);
        assert_eq!(windows[0].productivity, 95);
        assert_eq!(windows[2].time, "18:00 - 19:30");
    }

    #[test]
    fn test_generate_study_plan_fills_every_section() {
        let tasks = vec![
            task("Math", Priority::High, 2.0, 1),
            task("Physics", Priority::Medium, 1.0, 3),
        ];

        let plan = generate_study_plan(&profile(4.0, Level::Intermediate), &tasks, now());
        assert_eq!(plan.daily_schedule.len(), 2);
        assert_eq!(plan.prioritized_subjects[0].subject, "Math");
        assert_eq!(plan.recommended_breaks.len(), 4);
        assert_eq!(plan.focus_hours.len(), 2);
        assert_eq!(plan.insights.last().map(|i| i.kind), Some(InsightKind::Success));
    }

    #[test]
    fn test_plan_serializes_snake_case() {
        let plan = generate_study_plan(
            &profile(2.0, Level::Beginner),
            &[task("Math", Priority::High, 1.0, 1)],
            now(),
        );
        let json = serde_json::to_value(&plan).unwrap();

        assert_eq!(json["daily_schedule"][0]["priority"], "high");
        assert_eq!(json["daily_schedule"][0]["break_after"], false);
        assert_eq!(json["insights"][0]["type"], "tip");
    }

    fn arb_task() -> impl Strategy<Value = PlannerTask> {
        (
            0usize..4,
            0u8..3,
            1u32..16,
            -5i64..15,
        )
            .prop_map(|(s, p, quarters, days)| {
                let priority = match p {
                    0 => Priority::High,
                    1 => Priority::Medium,
                    _ => Priority::Low,
                };
                task(
                    ["Math", "Physics", "Art", "History"][s],
                    priority,
                    f64::from(quarters) * 0.25,
                    days,
                )
            })
    }

    proptest! {
        #[test]
        fn prop_sort_is_idempotent(tasks in prop::collection::vec(arb_task(), 1..20)) {
            let once = sort_tasks_by_urgency(&tasks);
            let twice = sort_tasks_by_urgency(&once);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_equal_due_dates_order_by_priority(tasks in prop::collection::vec(arb_task(), 1..20)) {
            let sorted = sort_tasks_by_urgency(&tasks);
            for pair in sorted.windows(2) {
                prop_assert!(pair[0].due <= pair[1].due);
                if pair[0].due == pair[1].due {
                    prop_assert!(pair[0].priority.weight() >= pair[1].priority.weight());
                }
            }
        }

        #[test]
        fn prop_schedule_respects_budget(
            tasks in prop::collection::vec(arb_task(), 0..12),
            quarters in 0u32..48,
        ) {
            let hours = f64::from(quarters) * 0.25;
            let schedule = create_daily_schedule(&profile(hours, Level::Beginner), &tasks);
            prop_assert!(schedule.len() <= 5);
            let allocated: f64 = schedule.iter().map(|b| b.duration).sum();
            prop_assert!(allocated <= hours + 1e-9);
        }

        #[test]
        fn prop_subjects_sorted_by_score(tasks in prop::collection::vec(arb_task(), 0..20)) {
            let ranked = prioritize_subjects(&tasks, now());
            prop_assert!(ranked.len() <= 5);

            let score = |subject: &str| -> i64 {
                tasks
                    .iter()
                    .filter(|t| t.subject == subject)
                    .map(|t| {
                        urgency_points(t.due, now())
                            + if t.priority == Priority::High { 2 } else { 0 }
                    })
                    .sum()
            };
            for pair in ranked.windows(2) {
                prop_assert!(score(&pair[0].subject) >= score(&pair[1].subject));
            }
        }

        #[test]
        fn prop_breaks_fit_inside_day(quarters in 0u32..96) {
            let hours = f64::from(quarters) * 0.25;
            let breaks = calculate_break_intervals(hours);
            let total = (hours * 60.0).round() as i64;
            let break_min: i64 = breaks.iter().map(|b| b.break_duration).sum();
            let sessions = breaks.len() as i64 * FOCUS_SESSION_MIN;
            prop_assert!(break_min + sessions <= total);
        }
    }
}
