// --------------------------------------------------
// Handles API endpoints related to task CRUD operations.
//
// Responsibilities:
// - Create / read / update / delete tasks
// - Toggle task completion
// - List the tasks due today
// -------------------------------------------------

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, FixedOffset};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::AppJson;
use crate::models::{Priority, Task};
use crate::{now_fixed_offset, AppState};

fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::bad_request("invalid id"))
}

fn parse_due_date(raw: &str) -> Result<DateTime<FixedOffset>, AppError> {
    DateTime::parse_from_rfc3339(raw.trim()).map_err(|_| AppError::bad_request("invalid due_date"))
}

fn check_hours(hours: Option<f64>) -> Result<Option<f64>, AppError> {
    match hours {
        Some(h) if !h.is_finite() || h <= 0.0 => {
            Err(AppError::bad_request("estimated_hours must be positive"))
        }
        other => Ok(other),
    }
}

fn not_found() -> AppError {
    AppError::not_found("task not found")
}

// -----------------------------
// GET /api/tasks
// Returns all tasks, earliest due first
// -----------------------------
pub async fn get_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, AppError> {
    let mut tasks = state.store.read().await?.tasks;
    tasks.sort_by(|a, b| a.due_date.cmp(&b.due_date));
    Ok(Json(tasks))
}

// Tasks due on `now`'s calendar day (in `now`'s offset), highest priority first
pub fn todays_tasks(tasks: Vec<Task>, now: DateTime<FixedOffset>) -> Vec<Task> {
    let today = now.date_naive();
    let mut due_today: Vec<Task> = tasks
        .into_iter()
        .filter(|t| t.due_date.with_timezone(now.offset()).date_naive() == today)
        .collect();
    due_today.sort_by(|a, b| b.priority.weight().cmp(&a.priority.weight()));
    due_today
}

// -----------------------------
// GET /api/tasks/today
// Includes completed tasks
// -----------------------------
pub async fn get_todays_tasks(State(state): State<AppState>) -> Result<Json<Vec<Task>>, AppError> {
    let tasks = state.store.read().await?.tasks;
    Ok(Json(todays_tasks(tasks, now_fixed_offset())))
}

// -----------------------------
// GET /api/tasks/:id
// -----------------------------
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, AppError> {
    let id = parse_id(&id)?;
    let db = state.store.read().await?;
    db.tasks
        .into_iter()
        .find(|t| t.id == id)
        .map(Json)
        .ok_or_else(not_found)
}

#[derive(Debug, Deserialize)]
pub struct CreateTaskInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub subject: String,
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: String, // RFC3339
    pub priority: Option<Priority>,
    pub estimated_hours: Option<f64>,
}

// -----------------------------
// POST /api/tasks
// Creates a new task and saves it to db.json
// -----------------------------
pub async fn create_task(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateTaskInput>,
) -> Result<impl IntoResponse, AppError> {
    if input.title.trim().is_empty()
        || input.subject.trim().is_empty()
        || input.due_date.trim().is_empty()
    {
        return Err(AppError::bad_request("title, subject and due_date are required"));
    }
    let due_date = parse_due_date(&input.due_date)?;
    let estimated_hours = check_hours(input.estimated_hours)?;

    let task = Task {
        id: Uuid::new_v4(),
        title: input.title,
        subject: input.subject,
        description: input.description.unwrap_or_default(),
        due_date,
        priority: input.priority.unwrap_or_default(),
        estimated_hours,
        completed: false,
        completed_at: None,
        created_at: now_fixed_offset(),
    };

    let saved = task.clone();
    state
        .store
        .update(move |db| {
            db.tasks.push(task);
            Ok::<_, AppError>(())
        })
        .await?;

    tracing::info!(task_id = %saved.id, subject = %saved.subject, "task created");
    Ok((StatusCode::CREATED, Json(saved)))
}

// Every field optional; only the ones present are applied
#[derive(Debug, Deserialize)]
pub struct UpdateTaskInput {
    pub title: Option<String>,
    pub subject: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>, // RFC3339
    pub priority: Option<Priority>,
    pub estimated_hours: Option<f64>,
    pub completed: Option<bool>,
}

// -----------------------------
// PUT /api/tasks/:id
// Updates an existing task by ID
// -----------------------------
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateTaskInput>,
) -> Result<Json<Task>, AppError> {
    let id = parse_id(&id)?;
    let due_date = input.due_date.as_deref().map(parse_due_date).transpose()?;
    let estimated_hours = check_hours(input.estimated_hours)?;
    let now = now_fixed_offset();

    let updated = state
        .store
        .update(|db| {
            let t = db.tasks.iter_mut().find(|t| t.id == id).ok_or_else(not_found)?;

            if let Some(title) = input.title.filter(|s| !s.trim().is_empty()) {
                t.title = title;
            }
            if let Some(subject) = input.subject.filter(|s| !s.trim().is_empty()) {
                t.subject = subject;
            }
            if let Some(description) = input.description {
                t.description = description;
            }
            if let Some(due_date) = due_date {
                t.due_date = due_date;
            }
            if let Some(priority) = input.priority {
                t.priority = priority;
            }
            if estimated_hours.is_some() {
                t.estimated_hours = estimated_hours;
            }
            if let Some(completed) = input.completed {
                set_completed(t, completed, now);
            }

            Ok::<_, AppError>(t.clone())
        })
        .await?;

    Ok(Json(updated))
}

fn set_completed(task: &mut Task, completed: bool, now: DateTime<FixedOffset>) {
    task.completed = completed;
    task.completed_at = if completed { Some(now) } else { None };
}

// -----------------------------
// DELETE /api/tasks/:id
// Removes a task permanently
// -----------------------------
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = parse_id(&id)?;

    state
        .store
        .update(|db| {
            let before = db.tasks.len();
            db.tasks.retain(|t| t.id != id);
            if db.tasks.len() == before {
                return Err(not_found());
            }
            Ok(())
        })
        .await?;

    tracing::info!(task_id = %id, "task deleted");
    Ok(Json(serde_json::json!({ "ok": true })))
}

// -----------------------------
// POST /api/tasks/:id/toggle
// Flips task completion
// -----------------------------
pub async fn toggle_task(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Task>, AppError> {
    let id = parse_id(&id)?;
    let now = now_fixed_offset();

    let updated = state
        .store
        .update(|db| {
            let t = db.tasks.iter_mut().find(|t| t.id == id).ok_or_else(not_found)?;
            let completed = !t.completed;
            set_completed(t, completed, now);
            Ok::<_, AppError>(t.clone())
        })
        .await?;

    Ok(Json(updated))
}
