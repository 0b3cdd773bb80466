use axum::{http::StatusCode, response::IntoResponse};
use clinicsync_api::middleware::error_handling::{SyncFailure, map_error};
use clinicsync_core::errors::{ClinicError, MISSING_SCHEDULES_MESSAGE};
use rstest::rstest;

#[rstest]
#[case(ClinicError::NotFound("Resource not found".to_string()), StatusCode::NOT_FOUND)]
#[case(ClinicError::Validation("Invalid input".to_string()), StatusCode::BAD_REQUEST)]
#[case(
    ClinicError::MalformedFeed(MISSING_SCHEDULES_MESSAGE.to_string()),
    StatusCode::INTERNAL_SERVER_ERROR
)]
#[case(
    ClinicError::Persistence(eyre::eyre!("Database error")),
    StatusCode::INTERNAL_SERVER_ERROR
)]
#[case(
    ClinicError::FeedUnavailable(eyre::eyre!("No such file")),
    StatusCode::INTERNAL_SERVER_ERROR
)]
#[case(
    ClinicError::InvalidTimestamp { value: "x".to_string(), location: "schedules[0]".to_string() },
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_mapping(#[case] error: ClinicError, #[case] expected: StatusCode) {
    let response = map_error(error);
    assert_eq!(response.status(), expected);
}

#[test]
fn test_sync_failure_is_always_500() {
    let response = SyncFailure(ClinicError::Validation("anything".to_string())).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
