//! # ClinicSync Core
//!
//! Domain types and the doctor-availability pipeline: feed decoding, unification into a
//! date-keyed directory, and full replacement of the persisted availability.

pub mod errors;
pub mod feed;
pub mod models;
pub mod store;
pub mod sync;
pub mod time;
pub mod unify;
