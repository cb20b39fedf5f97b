use axum::{extract::State, Json};

use crate::error::AppError;
use crate::extractors::AppJson;
use crate::models::UserProfile;
use crate::AppState;

const MAX_HOURS_PER_DAY: f64 = 24.0;

// -----------------------------
// GET /api/profile
// -----------------------------
pub async fn get_profile(State(state): State<AppState>) -> Result<Json<UserProfile>, AppError> {
    Ok(Json(state.store.read().await?.profile))
}

// -----------------------------
// PUT /api/profile
// Replaces the study profile
// -----------------------------
pub async fn put_profile(
    State(state): State<AppState>,
    AppJson(profile): AppJson<UserProfile>,
) -> Result<Json<UserProfile>, AppError> {
    if let Some(hours) = profile.available_hours_per_day {
        if !(hours > 0.0 && hours <= MAX_HOURS_PER_DAY) {
            return Err(AppError::bad_request(
                "available_hours_per_day must be between 0 and 24",
            ));
        }
    }

    let saved = profile.clone();
    state
        .store
        .update(move |db| {
            db.profile = profile;
            Ok::<_, AppError>(())
        })
        .await?;

    tracing::info!(level = ?saved.level, hours = ?saved.available_hours_per_day, "profile updated");
    Ok(Json(saved))
}
