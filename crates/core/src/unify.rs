//! # Availability Unification
//!
//! Collapses per-doctor nested schedules into one date-keyed availability directory.
//!
//! For every entry, every slot-date and every slot, in input order:
//!
//! 1. The slot-date's UTC calendar date becomes the key; the key is created even when the
//!    slot-date has no slots, so a date with nothing bookable still maps to `[]`.
//! 2. Each slot appends `{doctorId, clinicId, time}` under that key, `time` being the slot's
//!    UTC `HH:MM:SS`.
//!
//! Entries sharing a date accumulate into one list in encounter order. Nothing is sorted
//! or deduplicated.

use crate::{
    models::{
        availability::{AvailabilitySlot, UnifiedAvailability},
        schedule::ScheduleEntry,
    },
    time::{date_key, time_of_day},
};

pub fn unify(schedules: &[ScheduleEntry]) -> UnifiedAvailability {
    let mut unified = UnifiedAvailability::new();

    for schedule in schedules {
        for slot_date in &schedule.slot_dates {
            let day = unified.day_mut(date_key(&slot_date.date));

            // Slots are filed under the slot-date's key, not their own date.
            for slot in slot_date.slots.iter().flatten() {
                day.push(AvailabilitySlot {
                    doctor_id: schedule.doctor_id.clone(),
                    clinic_id: schedule.clinic_id.clone(),
                    time: time_of_day(&slot.date_time),
                });
            }
        }
    }

    unified
}
