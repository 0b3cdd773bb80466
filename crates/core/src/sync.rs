//! # Availability Store Sync
//!
//! Reads the schedule feed, unifies it and replaces the persisted availability collection.
//! Steps run strictly in sequence; the first failure aborts the rest and nothing is retried.

use tracing::{debug, info};

use crate::{
    errors::{ClinicError, ClinicResult},
    feed::{FeedSource, decode_feed},
    models::availability::UnifiedAvailability,
    store::AvailabilityStore,
    time::{TimestampNormalizer, UtcNormalizer},
    unify::unify,
};

/// Runs a sync with the default [`UtcNormalizer`].
pub async fn sync_availability(
    feed: &dyn FeedSource,
    store: &dyn AvailabilityStore,
) -> ClinicResult<UnifiedAvailability> {
    sync_availability_with(feed, store, &UtcNormalizer).await
}

/// Runs a sync, normalizing feed timestamps with `normalizer`.
///
/// The feed is fully read and validated before the store is touched, so a malformed feed
/// leaves the persisted availability as it was.
///
/// # Errors
///
/// * `ClinicError::FeedUnavailable` - the feed source could not be read
/// * `ClinicError::ParseFailure`, `ClinicError::MalformedFeed`,
///   `ClinicError::InvalidTimestamp` - see [`decode_feed`]
/// * `ClinicError::Persistence` - the delete or any insert failed
pub async fn sync_availability_with(
    feed: &dyn FeedSource,
    store: &dyn AvailabilityStore,
    normalizer: &dyn TimestampNormalizer,
) -> ClinicResult<UnifiedAvailability> {
    debug!("Reading availability feed from {}", feed.describe());
    let bytes = feed.read().await.map_err(ClinicError::FeedUnavailable)?;

    let schedules = decode_feed(&bytes, normalizer)?;
    let unified = unify(&schedules);
    debug!(
        "Unified {} schedules into {} days ({} slots)",
        schedules.len(),
        unified.len(),
        unified.slot_count()
    );

    store
        .replace_all(&unified.to_days())
        .await
        .map_err(ClinicError::Persistence)?;

    info!("Replaced stored availability with {} days", unified.len());
    Ok(unified)
}
