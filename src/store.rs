//! # Registration store
//!
//! The collection is a single Redis list, newest registration first. Each
//! element is one JSON-encoded record.
//!
//! ## Why a list and not one JSON blob
//!
//! The first cut of this service kept the whole collection as one value and
//! did read-modify-write on every registration. Two submissions landing close
//! together would both read the same snapshot and the second write silently
//! dropped the first. `LPUSH` is atomic on the server, prepends in one round
//! trip, and returns the new length, so concurrent registrations are all
//! retained and the running total comes back for free.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use redis::{
    aio::{ConnectionManager, ConnectionManagerConfig},
    AsyncCommands, Client,
};
use thiserror::Error;
use tracing::info;

use crate::registration::Registration;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Backend(#[from] redis::RedisError),

    #[error("Corrupt record in store: {0}")]
    Decode(#[from] serde_json::Error),
}

#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Full collection, newest first.
    async fn all(&self) -> Result<Vec<Registration>, StoreError>;

    /// Atomically prepends a record and returns the new total count.
    async fn prepend(&self, registration: &Registration) -> Result<u64, StoreError>;
}

pub struct RedisStore {
    connection: ConnectionManager,
    key: String,
}

impl RedisStore {
    pub async fn connect(redis_url: &str, key: &str) -> Result<Self, StoreError> {
        let config = ConnectionManagerConfig::new()
            .set_number_of_retries(1)
            .set_connection_timeout(Duration::from_millis(500));

        let client = Client::open(redis_url)?;
        let connection = client.get_connection_manager_with_config(config).await?;

        info!("Connected to store at {redis_url}");

        Ok(Self {
            connection,
            key: key.to_string(),
        })
    }
}

#[async_trait]
impl RegistrationStore for RedisStore {
    async fn all(&self) -> Result<Vec<Registration>, StoreError> {
        let mut connection = self.connection.clone();
        let raw: Vec<String> = connection.lrange(&self.key, 0, -1).await?;

        raw.iter()
            .map(|record| serde_json::from_str(record).map_err(StoreError::from))
            .collect()
    }

    async fn prepend(&self, registration: &Registration) -> Result<u64, StoreError> {
        let payload = serde_json::to_string(registration)?;

        let mut connection = self.connection.clone();
        let total: u64 = connection.lpush(&self.key, payload).await?;

        Ok(total)
    }
}

/// Store backed by process memory. Used by the test suite and for running the
/// server locally without Redis.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Registration>>,
}

#[async_trait]
impl RegistrationStore for MemoryStore {
    async fn all(&self) -> Result<Vec<Registration>, StoreError> {
        Ok(self.records.lock().unwrap().clone())
    }

    async fn prepend(&self, registration: &Registration) -> Result<u64, StoreError> {
        let mut records = self.records.lock().unwrap();
        records.insert(0, registration.clone());
        Ok(records.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> Registration {
        Registration::from_submission(name, &format!("{name}@example.com")).unwrap()
    }

    #[tokio::test]
    async fn prepend_keeps_newest_first() {
        let store = MemoryStore::default();

        store.prepend(&record("first")).await.unwrap();
        store.prepend(&record("second")).await.unwrap();

        let all = store.all().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].name, "second");
        assert_eq!(all[1].name, "first");
    }

    #[tokio::test]
    async fn prepend_returns_running_total() {
        let store = MemoryStore::default();

        assert_eq!(store.prepend(&record("a")).await.unwrap(), 1);
        assert_eq!(store.prepend(&record("b")).await.unwrap(), 2);
        assert_eq!(store.prepend(&record("c")).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn reads_are_idempotent() {
        let store = MemoryStore::default();
        store.prepend(&record("a")).await.unwrap();

        let first = store.all().await.unwrap();
        let second = store.all().await.unwrap();

        assert_eq!(first.len(), second.len());
        assert_eq!(first[0].id, second[0].id);
    }
}
