use crate::error::DbError;
use crate::store::ObservationStore;
use async_trait::async_trait;
use core_types::{NewObservation, Observation, StoredObservation};
use sqlx::postgres::PgPool;

/// The PostgreSQL-backed record store. All SQL lives here.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ObservationStore for DbRepository {
    async fn list_all(&self) -> Result<Vec<StoredObservation>, DbError> {
        let records = sqlx::query_as::<_, StoredObservation>(
            r#"
            SELECT id, datetime, open, high, low, close, volume
            FROM stock_data
            ORDER BY datetime ASC, id ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(records)
    }

    async fn insert(&self, record: NewObservation) -> Result<StoredObservation, DbError> {
        let observation = record.validate()?;
        let stored = sqlx::query_as::<_, StoredObservation>(
            r#"
            INSERT INTO stock_data (datetime, open, high, low, close, volume)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, datetime, open, high, low, close, volume
            "#,
        )
        .bind(observation.timestamp)
        .bind(observation.open)
        .bind(observation.high)
        .bind(observation.low)
        .bind(observation.close)
        .bind(observation.volume)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = stored.id, "Inserted observation");
        Ok(stored)
    }

    async fn insert_many(&self, records: &[NewObservation]) -> Result<u64, DbError> {
        // Validate the whole batch before opening a transaction.
        let observations = records
            .iter()
            .map(NewObservation::validate)
            .collect::<Result<Vec<Observation>, _>>()?;

        let mut tx = self.pool.begin().await?;
        for observation in &observations {
            sqlx::query(
                r#"
                INSERT INTO stock_data (datetime, open, high, low, close, volume)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(observation.timestamp)
            .bind(observation.open)
            .bind(observation.high)
            .bind(observation.low)
            .bind(observation.close)
            .bind(observation.volume)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;

        Ok(observations.len() as u64)
    }

    async fn clear(&self) -> Result<u64, DbError> {
        let result = sqlx::query("DELETE FROM stock_data")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
