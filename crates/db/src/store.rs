use async_trait::async_trait;
use clinicsync_core::{models::availability::PersistedAvailabilityDay, store::AvailabilityStore};
use eyre::Result;

use crate::{DbPool, repositories::availability};

/// Postgres-backed availability store.
///
/// `replace_all` runs the delete and every insert in a single transaction, so a failed
/// sync leaves the previous availability in place.
#[derive(Debug, Clone)]
pub struct PgAvailabilityStore {
    pool: DbPool,
}

impl PgAvailabilityStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AvailabilityStore for PgAvailabilityStore {
    async fn delete_all(&self) -> Result<()> {
        availability::delete_all_days(&self.pool).await?;
        Ok(())
    }

    async fn insert(&self, day: &PersistedAvailabilityDay) -> Result<()> {
        availability::insert_day(&self.pool, &day.date, &day.availability).await?;
        Ok(())
    }

    async fn replace_all(&self, days: &[PersistedAvailabilityDay]) -> Result<()> {
        availability::replace_all_days(&self.pool, days).await
    }

    async fn list_days(&self) -> Result<Vec<PersistedAvailabilityDay>> {
        let rows = availability::list_days(&self.pool).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_day(&self, date: &str) -> Result<Option<PersistedAvailabilityDay>> {
        let row = availability::get_day_by_date(&self.pool, date).await?;
        Ok(row.map(Into::into))
    }
}
