//! # ClinicSync DB
//!
//! Persistence for unified doctor availability: the Postgres pool and schema, repository
//! queries, and the [`AvailabilityStore`](clinicsync_core::store::AvailabilityStore)
//! implementations used by the API and the CLI.

pub mod memory;
pub mod models;
pub mod repositories;
pub mod schema;
pub mod store;

pub mod mock;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub use memory::MemoryAvailabilityStore;
pub use store::PgAvailabilityStore;

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(database_url)
        .await?;

    Ok(pool)
}
