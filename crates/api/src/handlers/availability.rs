//! # Availability Handlers
//!
//! `sync_availability` re-reads the schedule feed, unifies it and replaces the stored
//! availability. The remaining handlers read back what the last sync stored.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use clinicsync_core::{
    errors::ClinicError,
    models::availability::{PersistedAvailabilityDay, SyncAvailabilityResponse},
    sync,
    time::is_date_key,
};
use std::sync::Arc;
use tracing::{error, info};

use crate::{
    ApiState,
    middleware::error_handling::{AppError, SyncFailure},
};

pub const SYNC_SUCCESS_MESSAGE: &str = "Availability unified successfully";

/// Unifies the schedule feed and replaces the stored availability
///
/// # Endpoint
///
/// ```text
/// GET /doctors/availability
/// POST /doctors/availability
/// ```
///
/// # Returns
///
/// * `201 Created` with `{ "message", "availability" }` on success
/// * `500 Internal Server Error` with `{ "message" }` on any failure
#[axum::debug_handler]
pub async fn sync_availability(
    State(state): State<Arc<ApiState>>,
) -> Result<(StatusCode, Json<SyncAvailabilityResponse>), SyncFailure> {
    match sync::sync_availability(state.feed.as_ref(), state.store.as_ref()).await {
        Ok(availability) => {
            info!("Availability saved: {} days", availability.len());
            Ok((
                StatusCode::CREATED,
                Json(SyncAvailabilityResponse {
                    message: SYNC_SUCCESS_MESSAGE.to_string(),
                    availability,
                }),
            ))
        }
        Err(err) => {
            error!("Error processing availability: {}", err);
            Err(SyncFailure(err))
        }
    }
}

/// Lists every stored day, ascending by date
#[axum::debug_handler]
pub async fn list_days(
    State(state): State<Arc<ApiState>>,
) -> Result<Json<Vec<PersistedAvailabilityDay>>, AppError> {
    let days = state.store.list_days().await?;
    Ok(Json(days))
}

/// Returns the stored availability of one date
///
/// # Errors
///
/// * `ClinicError::Validation` - `date` is not `YYYY-MM-DD`
/// * `ClinicError::NotFound` - nothing stored for `date`
#[axum::debug_handler]
pub async fn get_day(
    State(state): State<Arc<ApiState>>,
    Path(date): Path<String>,
) -> Result<Json<PersistedAvailabilityDay>, AppError> {
    if !is_date_key(&date) {
        return Err(AppError(ClinicError::Validation(format!(
            "Invalid date {:?}, expected YYYY-MM-DD",
            date
        ))));
    }

    let day = state
        .store
        .find_day(&date)
        .await?
        .ok_or_else(|| ClinicError::NotFound(format!("No availability stored for {}", date)))?;

    Ok(Json(day))
}
