// Define data modules
pub mod models; // Stored records (Task, UserProfile, Timetable, StudySession, Db)
pub mod store;  // Persistent storage (load/save db.json)
pub mod logic;  // Study plan engine: sorting, schedule, subjects, breaks, focus hours
pub mod insights; // Rule-based insights for the plan engine
pub mod analytics; // Study session aggregation
pub mod timetable; // Timetable slot validation
pub mod config;
pub mod error;
pub mod extractors; // JSON / query extractors with AppError rejections
pub mod routes_plan;      // HTTP handlers for plan and insights
pub mod routes_tasks;     // HTTP handlers for task CRUD
pub mod routes_profile;   // HTTP handlers for the study profile
pub mod routes_timetables; // HTTP handlers for timetables
pub mod routes_analytics; // HTTP handlers for study sessions

use std::{path::Path, sync::Arc};

use axum::{
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, FixedOffset};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::store::Store;

#[derive(Debug, Clone)]
pub struct AppState {
    pub store: Arc<Store>,
}

impl AppState {
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(store),
        }
    }
}

// Current local time with the system's UTC offset
pub fn now_fixed_offset() -> DateTime<FixedOffset> {
    chrono::Local::now().fixed_offset()
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Server is running" }))
}

pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        // plan
        .route("/plan", get(routes_plan::get_study_plan))
        .route("/insights", get(routes_plan::get_insights))
        // tasks
        .route("/tasks", get(routes_tasks::get_tasks).post(routes_tasks::create_task))
        .route("/tasks/today", get(routes_tasks::get_todays_tasks))
        .route(
            "/tasks/:id",
            get(routes_tasks::get_task)
                .put(routes_tasks::update_task)
                .delete(routes_tasks::delete_task),
        )
        .route("/tasks/:id/toggle", post(routes_tasks::toggle_task))
        // profile
        .route(
            "/profile",
            get(routes_profile::get_profile).put(routes_profile::put_profile),
        )
        // timetables
        .route(
            "/timetables",
            get(routes_timetables::get_timetables).post(routes_timetables::create_timetable),
        )
        .route(
            "/timetables/:id",
            get(routes_timetables::get_timetable)
                .put(routes_timetables::update_timetable)
                .delete(routes_timetables::delete_timetable),
        )
        // analytics
        .route("/analytics", get(routes_analytics::get_analytics))
        .route("/analytics/sessions", post(routes_analytics::record_session))
}

pub fn app(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .nest("/api", api_router())
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
