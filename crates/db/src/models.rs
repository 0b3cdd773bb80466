use chrono::{DateTime, Utc};
use clinicsync_core::models::availability::{AvailabilitySlot, PersistedAvailabilityDay};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, types::Json};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAvailabilityDay {
    pub id: Uuid,
    pub date: String,
    pub availability: Json<Vec<AvailabilitySlot>>,
    pub created_at: DateTime<Utc>,
}

impl From<DbAvailabilityDay> for PersistedAvailabilityDay {
    fn from(row: DbAvailabilityDay) -> Self {
        PersistedAvailabilityDay {
            date: row.date,
            availability: row.availability.0,
        }
    }
}
