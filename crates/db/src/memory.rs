use std::collections::BTreeMap;

use async_trait::async_trait;
use clinicsync_core::{
    models::availability::{AvailabilitySlot, PersistedAvailabilityDay},
    store::AvailabilityStore,
};
use eyre::{Result, bail};
use tokio::sync::RwLock;

/// In-process availability store keyed by date.
///
/// Used by tests and by the server when no `DATABASE_URL` is configured. Contents are lost
/// on restart. `replace_all` swaps the whole collection under one write lock.
#[derive(Debug, Default)]
pub struct MemoryAvailabilityStore {
    days: RwLock<BTreeMap<String, Vec<AvailabilitySlot>>>,
}

impl MemoryAvailabilityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_days(days: impl IntoIterator<Item = PersistedAvailabilityDay>) -> Self {
        let days = days
            .into_iter()
            .map(|day| (day.date, day.availability))
            .collect();
        Self {
            days: RwLock::new(days),
        }
    }

    pub async fn len(&self) -> usize {
        self.days.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.days.read().await.is_empty()
    }
}

#[async_trait]
impl AvailabilityStore for MemoryAvailabilityStore {
    async fn delete_all(&self) -> Result<()> {
        self.days.write().await.clear();
        Ok(())
    }

    async fn insert(&self, day: &PersistedAvailabilityDay) -> Result<()> {
        let mut days = self.days.write().await;
        if days.contains_key(&day.date) {
            bail!("Availability for {} already exists", day.date);
        }
        days.insert(day.date.clone(), day.availability.clone());
        Ok(())
    }

    async fn replace_all(&self, days: &[PersistedAvailabilityDay]) -> Result<()> {
        let mut replacement = BTreeMap::new();
        for day in days {
            if replacement
                .insert(day.date.clone(), day.availability.clone())
                .is_some()
            {
                bail!("Availability for {} appears twice", day.date);
            }
        }

        *self.days.write().await = replacement;
        Ok(())
    }

    async fn list_days(&self) -> Result<Vec<PersistedAvailabilityDay>> {
        let days = self.days.read().await;
        Ok(days
            .iter()
            .map(|(date, availability)| PersistedAvailabilityDay {
                date: date.clone(),
                availability: availability.clone(),
            })
            .collect())
    }

    async fn find_day(&self, date: &str) -> Result<Option<PersistedAvailabilityDay>> {
        let days = self.days.read().await;
        Ok(days.get(date).map(|availability| PersistedAvailabilityDay {
            date: date.to_string(),
            availability: availability.clone(),
        }))
    }
}
