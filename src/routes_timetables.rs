// --------------------------------------------------
// Weekly timetables: named sets of recurring study slots.
// Slot durations are always computed here, never trusted from the client.
// -------------------------------------------------

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::AppError;
use crate::extractors::AppJson;
use crate::models::Timetable;
use crate::timetable::{build_slots, SlotInput};
use crate::{now_fixed_offset, AppState};

fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::bad_request("invalid id"))
}

fn not_found() -> AppError {
    AppError::not_found("timetable not found")
}

// -----------------------------
// GET /api/timetables
// Newest first
// -----------------------------
pub async fn get_timetables(State(state): State<AppState>) -> Result<Json<Vec<Timetable>>, AppError> {
    let mut timetables = state.store.read().await?.timetables;
    timetables.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(Json(timetables))
}

// -----------------------------
// GET /api/timetables/:id
// -----------------------------
pub async fn get_timetable(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Timetable>, AppError> {
    let id = parse_id(&id)?;
    state
        .store
        .read()
        .await?
        .timetables
        .into_iter()
        .find(|t| t.id == id)
        .map(Json)
        .ok_or_else(not_found)
}

#[derive(Debug, Deserialize)]
pub struct CreateTimetableInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub slots: Vec<SlotInput>,
}

// -----------------------------
// POST /api/timetables
// -----------------------------
pub async fn create_timetable(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateTimetableInput>,
) -> Result<impl IntoResponse, AppError> {
    if input.title.trim().is_empty() || input.slots.is_empty() {
        return Err(AppError::bad_request("title and slots are required"));
    }
    let slots = build_slots(input.slots).map_err(AppError::BadRequest)?;
    let now = now_fixed_offset();

    let timetable = Timetable {
        id: Uuid::new_v4(),
        title: input.title,
        slots,
        created_at: now,
        updated_at: now,
    };

    let saved = timetable.clone();
    state
        .store
        .update(move |db| {
            db.timetables.push(timetable);
            Ok::<_, AppError>(())
        })
        .await?;

    tracing::info!(timetable_id = %saved.id, slots = saved.slots.len(), "timetable created");
    Ok((StatusCode::CREATED, Json(saved)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateTimetableInput {
    pub title: Option<String>,
    pub slots: Option<Vec<SlotInput>>,
}

// -----------------------------
// PUT /api/timetables/:id
// Replaces title and/or slots
// -----------------------------
pub async fn update_timetable(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(input): AppJson<UpdateTimetableInput>,
) -> Result<Json<Timetable>, AppError> {
    let id = parse_id(&id)?;
    let slots = input
        .slots
        .map(build_slots)
        .transpose()
        .map_err(AppError::BadRequest)?;
    let now = now_fixed_offset();

    let updated = state
        .store
        .update(|db| {
            let t = db
                .timetables
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(not_found)?;

            if let Some(title) = input.title.filter(|s| !s.trim().is_empty()) {
                t.title = title;
            }
            if let Some(slots) = slots {
                t.slots = slots;
            }
            t.updated_at = now;

            Ok::<_, AppError>(t.clone())
        })
        .await?;

    Ok(Json(updated))
}

// -----------------------------
// DELETE /api/timetables/:id
// -----------------------------
pub async fn delete_timetable(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    let id = parse_id(&id)?;

    state
        .store
        .update(|db| {
            let before = db.timetables.len();
            db.timetables.retain(|t| t.id != id);
            if db.timetables.len() == before {
                return Err(not_found());
            }
            Ok(())
        })
        .await?;

    tracing::info!(timetable_id = %id, "timetable deleted");
    Ok(Json(serde_json::json!({ "ok": true })))
}
