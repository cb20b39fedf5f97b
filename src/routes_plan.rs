use axum::{extract::State, Json};
use serde::Serialize;

use crate::error::AppError;
use crate::insights::{Insight, InsightKind};
use crate::logic::{self, PlannerProfile, PlannerTask, StudyPlan};
use crate::{now_fixed_offset, AppState};

#[derive(Debug, Serialize)]
pub struct PlanResponse {
    pub message: String,
    pub plan: StudyPlan,
}

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub message: String,
    pub insights: Vec<Insight>,
}

// Plan returned when nothing is pending; the engine is not run
pub fn all_clear_plan() -> StudyPlan {
    StudyPlan {
        insights: vec![Insight::new(
            InsightKind::Success,
            "All Clear!",
            "You have no pending tasks. Great work!",
        )],
        ..StudyPlan::default()
    }
}

// -----------------------------
// GET /api/plan
// Builds today's study plan from the profile and pending tasks
// -----------------------------
pub async fn get_study_plan(State(state): State<AppState>) -> Result<Json<PlanResponse>, AppError> {
    let db = state.store.read().await?;
    let now = now_fixed_offset();

    let pending: Vec<PlannerTask> = db.pending_tasks().iter().map(PlannerTask::from_task).collect();

    if pending.is_empty() {
        tracing::debug!("no pending tasks, returning all-clear plan");
        return Ok(Json(PlanResponse {
            message: "No pending tasks".to_string(),
            plan: all_clear_plan(),
        }));
    }

    let profile = PlannerProfile::from_profile(&db.profile);
    let plan = logic::generate_study_plan(&profile, &pending, now);

    Ok(Json(PlanResponse {
        message: "Study plan generated successfully".to_string(),
        plan,
    }))
}

// -----------------------------
// GET /api/insights
// Insights only; runs even when nothing is pending
// -----------------------------
pub async fn get_insights(State(state): State<AppState>) -> Result<Json<InsightsResponse>, AppError> {
    let db = state.store.read().await?;
    let now = now_fixed_offset();

    let pending: Vec<PlannerTask> = db.pending_tasks().iter().map(PlannerTask::from_task).collect();
    let profile = PlannerProfile::from_profile(&db.profile);

    Ok(Json(InsightsResponse {
        message: "Insights generated successfully".to_string(),
        insights: crate::insights::generate_insights(&profile, &pending, now),
    }))
}
