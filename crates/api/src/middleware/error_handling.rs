//! # Error Handling Middleware
//!
//! Maps domain errors to HTTP status codes and JSON error bodies so every endpoint reports
//! failures the same way.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use clinicsync_core::{errors::ClinicError, models::availability::MessageResponse};
use serde_json::json;

/// Message returned to clients whenever an availability sync fails.
pub const SYNC_FAILURE_MESSAGE: &str = "Error processing availability";

/// Application error wrapper that provides HTTP status code mapping
///
/// # Example
///
/// ```
/// use axum::Json;
/// use clinicsync_api::middleware::error_handling::AppError;
/// use clinicsync_core::errors::ClinicError;
///
/// async fn handler(date: String) -> Result<Json<String>, AppError> {
///     if date.is_empty() {
///         return Err(AppError(ClinicError::Validation("Date is required".to_string())));
///     }
///     Ok(Json(date))
/// }
/// # fn main() {}
/// ```
#[derive(Debug)]
pub struct AppError(pub ClinicError);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            ClinicError::NotFound(_) => StatusCode::NOT_FOUND,
            ClinicError::Validation(_) => StatusCode::BAD_REQUEST,
            ClinicError::MalformedFeed(_)
            | ClinicError::ParseFailure(_)
            | ClinicError::InvalidTimestamp { .. }
            | ClinicError::FeedUnavailable(_)
            | ClinicError::Persistence(_)
            | ClinicError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.0.to_string() }));

        (status, body).into_response()
    }
}

/// Automatic conversion from ClinicError to AppError
impl From<ClinicError> for AppError {
    fn from(err: ClinicError) -> Self {
        AppError(err)
    }
}

/// Store failures surface as persistence errors.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(ClinicError::Persistence(err))
    }
}

/// Failure of the availability sync endpoint.
///
/// Whatever went wrong, clients get a 500 with a fixed message; the cause is only logged.
#[derive(Debug)]
pub struct SyncFailure(pub ClinicError);

impl IntoResponse for SyncFailure {
    fn into_response(self) -> Response {
        let body = Json(MessageResponse {
            message: SYNC_FAILURE_MESSAGE.to_string(),
        });

        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl From<ClinicError> for SyncFailure {
    fn from(err: ClinicError) -> Self {
        SyncFailure(err)
    }
}

/// Maps a ClinicError to an HTTP response
pub fn map_error(err: ClinicError) -> Response {
    AppError(err).into_response()
}
