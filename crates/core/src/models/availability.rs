use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A bookable slot for one doctor at one clinic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    pub doctor_id: String,
    pub clinic_id: String,
    /// `HH:MM:SS`, UTC.
    pub time: String,
}

impl AvailabilitySlot {
    pub fn new(
        doctor_id: impl Into<String>,
        clinic_id: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            doctor_id: doctor_id.into(),
            clinic_id: clinic_id.into(),
            time: time.into(),
        }
    }
}

/// Date-keyed availability directory produced by [`crate::unify::unify`].
///
/// Keys are `YYYY-MM-DD` (UTC) and keep the order in which each date was first seen in the
/// feed; nothing is re-sorted. Each value keeps the order in which slots were encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnifiedAvailability(IndexMap<String, Vec<AvailabilitySlot>>);

impl UnifiedAvailability {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the slot list for `date`, creating an empty one if needed.
    pub fn day_mut(&mut self, date: String) -> &mut Vec<AvailabilitySlot> {
        self.0.entry(date).or_default()
    }

    pub fn get(&self, date: &str) -> Option<&[AvailabilitySlot]> {
        self.0.get(date).map(Vec::as_slice)
    }

    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[AvailabilitySlot])> {
        self.0.iter().map(|(date, slots)| (date.as_str(), slots.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of slots across all dates.
    pub fn slot_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }

    /// One storage record per date, in first-seen order.
    pub fn to_days(&self) -> Vec<PersistedAvailabilityDay> {
        self.0
            .iter()
            .map(|(date, slots)| PersistedAvailabilityDay {
                date: date.clone(),
                availability: slots.clone(),
            })
            .collect()
    }
}

/// Storage representation of one day of availability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedAvailabilityDay {
    pub date: String,
    pub availability: Vec<AvailabilitySlot>,
}

/// Body returned by a successful availability sync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncAvailabilityResponse {
    pub message: String,
    pub availability: UnifiedAvailability,
}

/// Body carrying only a human-readable message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
