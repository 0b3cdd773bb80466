use std::sync::Arc;

use clinicsync_api::config::ApiConfig;
use clinicsync_core::store::AvailabilityStore;
use clinicsync_db::{
    MemoryAvailabilityStore, PgAvailabilityStore, create_pool, schema::initialize_database,
};
use color_eyre::eyre::Result;
use dotenv::dotenv;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;

    // Pick the availability store
    let store: Arc<dyn AvailabilityStore> = match &config.database_url {
        Some(database_url) => {
            let db_pool = create_pool(database_url).await?;
            initialize_database(&db_pool).await?;
            Arc::new(PgAvailabilityStore::new(db_pool))
        }
        None => {
            eprintln!("DATABASE_URL is not set; availability is kept in memory only");
            Arc::new(MemoryAvailabilityStore::new())
        }
    };

    // Start API server
    clinicsync_api::start_server(config, store).await?;

    Ok(())
}
