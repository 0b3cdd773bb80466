use async_trait::async_trait;
use eyre::Result;

use crate::models::availability::PersistedAvailabilityDay;

/// Persistence sink for per-day availability records.
///
/// Implementations hold a single collection of [`PersistedAvailabilityDay`] records with at
/// most one record per date.
#[async_trait]
pub trait AvailabilityStore: Send + Sync {
    async fn delete_all(&self) -> Result<()>;

    async fn insert(&self, day: &PersistedAvailabilityDay) -> Result<()>;

    /// Replaces the whole collection with `days`.
    ///
    /// The default deletes everything, then inserts one record at a time, stopping at the
    /// first failure. It is not atomic: a failure after the delete leaves the collection
    /// partially filled, and concurrent callers can interleave. Stores with transactions
    /// should override it.
    async fn replace_all(&self, days: &[PersistedAvailabilityDay]) -> Result<()> {
        self.delete_all().await?;
        for day in days {
            self.insert(day).await?;
        }
        Ok(())
    }

    /// All records, ascending by date.
    async fn list_days(&self) -> Result<Vec<PersistedAvailabilityDay>>;

    async fn find_day(&self, date: &str) -> Result<Option<PersistedAvailabilityDay>>;
}
