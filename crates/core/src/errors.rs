use thiserror::Error;

/// Message carried by [`ClinicError::MalformedFeed`] when the feed has no `schedules` array.
pub const MISSING_SCHEDULES_MESSAGE: &str =
    r#"invalid feed format: expected an object with a "schedules" array"#;

#[derive(Error, Debug)]
pub enum ClinicError {
    #[error("Malformed feed: {0}")]
    MalformedFeed(String),

    #[error("Feed is not valid JSON: {0}")]
    ParseFailure(#[from] serde_json::Error),

    #[error("Invalid timestamp {value:?} at {location}")]
    InvalidTimestamp { value: String, location: String },

    #[error("Feed unavailable: {0}")]
    FeedUnavailable(#[source] eyre::Report),

    #[error("Persistence error: {0}")]
    Persistence(#[source] eyre::Report),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl ClinicError {
    /// True for errors raised while reading or decoding the schedule feed.
    pub fn is_feed_error(&self) -> bool {
        matches!(
            self,
            ClinicError::MalformedFeed(_)
                | ClinicError::ParseFailure(_)
                | ClinicError::InvalidTimestamp { .. }
                | ClinicError::FeedUnavailable(_)
        )
    }
}

pub type ClinicResult<T> = Result<T, ClinicError>;
