use eyre::Result;
use sqlx::{Pool, Postgres};
use tracing::info;

pub async fn initialize_database(pool: &Pool<Postgres>) -> Result<()> {
    info!("Initializing database schema...");

    // One row per calendar date; rows are replaced wholesale on every sync
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS doctor_availability (
            id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
            date VARCHAR(10) NOT NULL UNIQUE,
            availability JSONB NOT NULL DEFAULT '[]'::jsonb,
            created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT NOW(),
            CONSTRAINT availability_is_array CHECK (jsonb_typeof(availability) = 'array')
        );
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema initialized successfully.");
    Ok(())
}
