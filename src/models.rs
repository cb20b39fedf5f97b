use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    // Tie-breaker weight when two tasks share a due date
    pub fn weight(self) -> u8 {
        match self {
            Priority::High => 3,
            Priority::Medium => 2,
            Priority::Low => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

// Study profile of the local user.
// Optional fields are resolved to defaults by the plan engine, not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub level: Option<Level>,
    #[serde(default)]
    pub available_hours_per_day: Option<f64>,
    #[serde(default)]
    pub study_subjects: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub subject: String,
    #[serde(default)]
    pub description: String,
    pub due_date: DateTime<FixedOffset>,
    #[serde(default)]
    pub priority: Priority,
    pub estimated_hours: Option<f64>,
    #[serde(default)]
    pub completed: bool,
    pub completed_at: Option<DateTime<FixedOffset>>,
    pub created_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimeSlot {
    pub day: Weekday,
    pub subject: String,
    pub start_time: String, // "HH:MM" (24-hour)
    pub end_time: String,   // "HH:MM" (24-hour)
    pub duration: i64,      // minutes, computed server-side
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Timetable {
    pub id: Uuid,
    pub title: String,
    pub slots: Vec<TimeSlot>,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubjectPerformance {
    pub subject: String,
    #[serde(default)]
    pub hours_spent: f64,
    #[serde(default)]
    pub tasks_completed: u32,
}

// One recorded study session (a day's log entry)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StudySession {
    pub id: Uuid,
    pub date: DateTime<FixedOffset>,
    pub hours_studied: f64,
    pub tasks_completed: u32,
    pub tasks_pending: u32,
    pub subject_performance: Vec<SubjectPerformance>,
    pub breaks_taken: u32,
    pub focus_score: u8, // 0..=100
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Db {
    #[serde(default)]
    pub profile: UserProfile,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub timetables: Vec<Timetable>,
    #[serde(default)]
    pub sessions: Vec<StudySession>,
}

impl Db {
    pub fn pending_tasks(&self) -> Vec<Task> {
        self.tasks.iter().filter(|t| !t.completed).cloned().collect()
    }
}
