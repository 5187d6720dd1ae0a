use axum::{extract::State, Json};
use service_core::error::AppError;

use crate::models::{ItineraryResult, TripPreferences};
use crate::startup::AppState;
use crate::utils::ValidatedJson;

/// `POST /api/plan`: turn trip preferences into a generated itinerary.
#[tracing::instrument(skip(state, preferences))]
pub async fn create_plan(
    State(state): State<AppState>,
    ValidatedJson(preferences): ValidatedJson<TripPreferences>,
) -> Result<Json<ItineraryResult>, AppError> {
    let result = state.planner.plan(&preferences).await.map_err(|e| {
        tracing::error!(
            error = %e,
            kind = e.kind(),
            destination = %preferences.destination,
            "Itinerary generation failed"
        );
        AppError::GenerationFailed(anyhow::Error::new(e))
    })?;

    Ok(Json(result))
}
