use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::analytics::{self, AnalyticsSummary, DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};
use crate::error::AppError;
use crate::extractors::{AppJson, AppQuery};
use crate::models::{StudySession, SubjectPerformance};
use crate::{now_fixed_offset, AppState};

#[derive(Debug, Deserialize)]
pub struct AnalyticsQuery {
    pub days: Option<i64>,
}

// -----------------------------
// GET /api/analytics?days=N
// Summary of the last N days (default 7, at most ten years)
// -----------------------------
pub async fn get_analytics(
    State(state): State<AppState>,
    AppQuery(q): AppQuery<AnalyticsQuery>,
) -> Result<Json<AnalyticsSummary>, AppError> {
    let days = q.days.unwrap_or(DEFAULT_WINDOW_DAYS);
    if !(1..=MAX_WINDOW_DAYS).contains(&days) {
        return Err(AppError::bad_request(format!(
            "days must be between 1 and {MAX_WINDOW_DAYS}"
        )));
    }

    let db = state.store.read().await?;
    let summary = analytics::summarize(&db.sessions, &db.tasks, days, now_fixed_offset());
    Ok(Json(summary))
}

// Missing counters default to zero
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecordSessionInput {
    pub hours_studied: f64,
    pub tasks_completed: u32,
    pub tasks_pending: u32,
    pub subject_performance: Vec<SubjectPerformance>,
    pub breaks_taken: u32,
    pub focus_score: i64,
}

// -----------------------------
// POST /api/analytics/sessions
// Records one study session
// -----------------------------
pub async fn record_session(
    State(state): State<AppState>,
    AppJson(input): AppJson<RecordSessionInput>,
) -> Result<impl IntoResponse, AppError> {
    let focus_score = u8::try_from(input.focus_score)
        .ok()
        .filter(|s| *s <= 100)
        .ok_or_else(|| AppError::bad_request("focus_score must be between 0 and 100"))?;
    if !input.hours_studied.is_finite() || input.hours_studied < 0.0 {
        return Err(AppError::bad_request("hours_studied must not be negative"));
    }

    let session = StudySession {
        id: Uuid::new_v4(),
        date: now_fixed_offset(),
        hours_studied: input.hours_studied,
        tasks_completed: input.tasks_completed,
        tasks_pending: input.tasks_pending,
        subject_performance: input.subject_performance,
        breaks_taken: input.breaks_taken,
        focus_score,
    };

    let saved = session.clone();
    state
        .store
        .update(move |db| {
            db.sessions.push(session);
            Ok::<_, AppError>(())
        })
        .await?;

    tracing::info!(session_id = %saved.id, hours = saved.hours_studied, "study session recorded");
    Ok((StatusCode::CREATED, Json(saved)))
}
