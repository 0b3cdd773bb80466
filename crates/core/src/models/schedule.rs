//! Schedule feed records.
//!
//! `Raw*` types mirror the JSON feed as delivered: timestamps are kept in whatever form the
//! source produced them. [`crate::feed::decode_feed`] validates them once and turns them into
//! the typed [`ScheduleEntry`] tree consumed by the unifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A timestamp as it appears in the feed: text or epoch milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTimestamp {
    Text(String),
    Millis(i64),
}

impl fmt::Display for RawTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawTimestamp::Text(text) => f.write_str(text),
            RawTimestamp::Millis(millis) => write!(f, "{}", millis),
        }
    }
}

impl From<&str> for RawTimestamp {
    fn from(value: &str) -> Self {
        RawTimestamp::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawScheduleEntry {
    #[serde(rename = "idDoctor", alias = "doctorId")]
    pub doctor_id: String,
    #[serde(rename = "idClinic", alias = "clinicId")]
    pub clinic_id: String,
    #[serde(rename = "slotdates", alias = "slotDates")]
    pub slot_dates: Vec<RawSlotDate>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSlotDate {
    pub date: RawTimestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<Vec<RawSlot>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawSlot {
    #[serde(rename = "dateTime")]
    pub date_time: RawTimestamp,
}

/// One doctor-clinic pairing with its bookable dates, timestamps already in UTC.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleEntry {
    pub doctor_id: String,
    pub clinic_id: String,
    pub slot_dates: Vec<SlotDate>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotDate {
    pub date: DateTime<Utc>,
    /// `None` when the feed omitted the field; unifies the same as an empty list.
    pub slots: Option<Vec<Slot>>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub date_time: DateTime<Utc>,
}
