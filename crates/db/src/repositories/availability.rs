use crate::models::DbAvailabilityDay;
use chrono::Utc;
use clinicsync_core::models::availability::{AvailabilitySlot, PersistedAvailabilityDay};
use eyre::{Result, WrapErr};
use sqlx::{Executor, Pool, Postgres, types::Json};
use uuid::Uuid;

pub async fn delete_all_days<'e, E>(executor: E) -> Result<u64>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        r#"
        DELETE FROM doctor_availability
        "#,
    )
    .execute(executor)
    .await?;

    Ok(result.rows_affected())
}

pub async fn insert_day<'e, E>(
    executor: E,
    date: &str,
    availability: &[AvailabilitySlot],
) -> Result<DbAvailabilityDay>
where
    E: Executor<'e, Database = Postgres>,
{
    let id = Uuid::new_v4();
    let now = Utc::now();

    let day = sqlx::query_as::<_, DbAvailabilityDay>(
        r#"
        INSERT INTO doctor_availability (id, date, availability, created_at)
        VALUES ($1, $2, $3, $4)
        RETURNING id, date, availability, created_at
        "#,
    )
    .bind(id)
    .bind(date)
    .bind(Json(availability))
    .bind(now)
    .fetch_one(executor)
    .await
    .wrap_err_with(|| format!("Failed to insert availability for {}", date))?;

    Ok(day)
}

/// Deletes every day and inserts `days` inside one transaction.
pub async fn replace_all_days(
    pool: &Pool<Postgres>,
    days: &[PersistedAvailabilityDay],
) -> Result<()> {
    let mut tx = pool.begin().await?;

    let deleted = delete_all_days(&mut *tx).await?;
    tracing::debug!("Deleted {} availability days", deleted);

    for day in days {
        insert_day(&mut *tx, &day.date, &day.availability).await?;
    }

    tx.commit().await?;
    Ok(())
}

pub async fn list_days(pool: &Pool<Postgres>) -> Result<Vec<DbAvailabilityDay>> {
    let days = sqlx::query_as::<_, DbAvailabilityDay>(
        r#"
        SELECT id, date, availability, created_at
        FROM doctor_availability
        ORDER BY date ASC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(days)
}

pub async fn get_day_by_date(
    pool: &Pool<Postgres>,
    date: &str,
) -> Result<Option<DbAvailabilityDay>> {
    let day = sqlx::query_as::<_, DbAvailabilityDay>(
        r#"
        SELECT id, date, availability, created_at
        FROM doctor_availability
        WHERE date = $1
        "#,
    )
    .bind(date)
    .fetch_optional(pool)
    .await?;

    Ok(day)
}
