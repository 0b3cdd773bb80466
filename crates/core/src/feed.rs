//! Schedule feed sources and decoding.
//!
//! A feed is a JSON document shaped `{ "schedules": [...] }`. Decoding checks the whole
//! document once, up front: the top-level shape, every entry's fields and every timestamp.
//! A feed that passes [`decode_feed`] cannot fail later during unification.

use std::path::PathBuf;

use async_trait::async_trait;
use eyre::{Result, WrapErr};
use serde::Deserialize;
use serde_json::Value;

use crate::{
    errors::{ClinicError, ClinicResult, MISSING_SCHEDULES_MESSAGE},
    models::schedule::{RawScheduleEntry, RawTimestamp, ScheduleEntry, Slot, SlotDate},
    time::TimestampNormalizer,
};

/// Where raw feed bytes come from.
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn read(&self) -> Result<Vec<u8>>;

    /// Human-readable origin used in log lines.
    fn describe(&self) -> String;
}

/// Feed stored as a JSON file on disk.
#[derive(Debug, Clone)]
pub struct FileFeedSource {
    path: PathBuf,
}

impl FileFeedSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl FeedSource for FileFeedSource {
    async fn read(&self) -> Result<Vec<u8>> {
        tokio::fs::read(&self.path)
            .await
            .wrap_err_with(|| format!("Failed to read feed file {}", self.path.display()))
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// Feed held in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticFeedSource {
    bytes: Vec<u8>,
}

impl StaticFeedSource {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self { bytes: bytes.into() }
    }
}

#[async_trait]
impl FeedSource for StaticFeedSource {
    async fn read(&self) -> Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }

    fn describe(&self) -> String {
        format!("static:{} bytes", self.bytes.len())
    }
}

/// Parses and validates raw feed bytes into typed schedule entries.
///
/// # Errors
///
/// * `ClinicError::ParseFailure` - the bytes are not JSON
/// * `ClinicError::MalformedFeed` - no `schedules` array, or an entry with missing or
///   mistyped fields
/// * `ClinicError::InvalidTimestamp` - a `date` or `dateTime` the normalizer rejects
pub fn decode_feed(
    bytes: &[u8],
    normalizer: &dyn TimestampNormalizer,
) -> ClinicResult<Vec<ScheduleEntry>> {
    let document: Value = serde_json::from_slice(bytes)?;

    let schedules = match document.get("schedules") {
        Some(Value::Array(schedules)) => schedules,
        _ => return Err(ClinicError::MalformedFeed(MISSING_SCHEDULES_MESSAGE.to_string())),
    };

    schedules
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let raw = RawScheduleEntry::deserialize(value)
                .map_err(|e| ClinicError::MalformedFeed(format!("schedules[{}]: {}", index, e)))?;
            normalize_entry(index, raw, normalizer)
        })
        .collect()
}

fn normalize_entry(
    index: usize,
    raw: RawScheduleEntry,
    normalizer: &dyn TimestampNormalizer,
) -> ClinicResult<ScheduleEntry> {
    let mut slot_dates = Vec::with_capacity(raw.slot_dates.len());

    for (date_index, raw_date) in raw.slot_dates.into_iter().enumerate() {
        let location = format!("schedules[{}].slotdates[{}]", index, date_index);
        let date = normalize(normalizer, &raw_date.date, || format!("{}.date", location))?;

        let slots = match raw_date.slots {
            Some(raw_slots) => Some(
                raw_slots
                    .iter()
                    .enumerate()
                    .map(|(slot_index, raw_slot)| {
                        normalize(normalizer, &raw_slot.date_time, || {
                            format!("{}.slots[{}].dateTime", location, slot_index)
                        })
                        .map(|date_time| Slot { date_time })
                    })
                    .collect::<ClinicResult<Vec<_>>>()?,
            ),
            None => None,
        };

        slot_dates.push(SlotDate { date, slots });
    }

    Ok(ScheduleEntry {
        doctor_id: raw.doctor_id,
        clinic_id: raw.clinic_id,
        slot_dates,
    })
}

fn normalize(
    normalizer: &dyn TimestampNormalizer,
    raw: &RawTimestamp,
    location: impl FnOnce() -> String,
) -> ClinicResult<chrono::DateTime<chrono::Utc>> {
    normalizer
        .normalize(raw)
        .ok_or_else(|| ClinicError::InvalidTimestamp {
            value: raw.to_string(),
            location: location(),
        })
}
