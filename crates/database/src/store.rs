use crate::error::DbError;
use async_trait::async_trait;
use core_types::{NewObservation, StoredObservation, TimeSeries};

/// The record store the web server and the CLI read observations from.
///
/// Implementations validate every record they accept and always return records in
/// ascending timestamp order, ties broken by id.
#[async_trait]
pub trait ObservationStore: Send + Sync {
    /// Every stored record, oldest first.
    async fn list_all(&self) -> Result<Vec<StoredObservation>, DbError>;

    /// Validates and stores one record, returning it with its assigned id.
    async fn insert(&self, record: NewObservation) -> Result<StoredObservation, DbError>;

    /// Stores a batch of records. Either every record is stored or none is.
    async fn insert_many(&self, records: &[NewObservation]) -> Result<u64, DbError>;

    /// Removes every record and returns how many there were.
    async fn clear(&self) -> Result<u64, DbError>;

    /// A snapshot of the full history, ready for evaluation.
    async fn snapshot(&self) -> Result<TimeSeries, DbError> {
        Ok(TimeSeries::from(self.list_all().await?))
    }
}
