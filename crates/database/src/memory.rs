use crate::error::DbError;
use crate::store::ObservationStore;
use async_trait::async_trait;
use core_types::{NewObservation, Observation, StoredObservation};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Records {
    next_id: i64,
    rows: Vec<StoredObservation>,
}

/// A process-local record store with the same ordering and validation rules as the
/// database. Used for offline evaluation and in tests.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    records: RwLock<Records>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Records {
    fn push(&mut self, observation: Observation) -> StoredObservation {
        self.next_id += 1;
        let stored = StoredObservation {
            id: self.next_id,
            observation,
        };
        self.rows.push(stored.clone());
        stored
    }
}

#[async_trait]
impl ObservationStore for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<StoredObservation>, DbError> {
        let mut rows = self.records.read().await.rows.clone();
        // Ids grow with insertion order, so a stable sort keeps ties in id order.
        rows.sort_by_key(|row| row.observation.timestamp);
        Ok(rows)
    }

    async fn insert(&self, record: NewObservation) -> Result<StoredObservation, DbError> {
        let observation = record.validate()?;
        Ok(self.records.write().await.push(observation))
    }

    async fn insert_many(&self, records: &[NewObservation]) -> Result<u64, DbError> {
        let observations = records
            .iter()
            .map(NewObservation::validate)
            .collect::<Result<Vec<_>, _>>()?;

        let mut guard = self.records.write().await;
        for observation in observations {
            guard.push(observation);
        }
        Ok(records.len() as u64)
    }

    async fn clear(&self) -> Result<u64, DbError> {
        let mut guard = self.records.write().await;
        let removed = guard.rows.len() as u64;
        guard.rows.clear();
        Ok(removed)
    }
}
