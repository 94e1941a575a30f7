//! In-memory record store backend.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use itemstore_core::store::{Precondition, Record, RecordKey, RecordStore, Result, StoreError};

/// In-memory storage backend for local development and tests.
///
/// Records live in an ordered map wrapped in `Arc<RwLock<_>>`; the key
/// order stands in for the remote store's scan order. Data is not
/// persisted and is lost when the store is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    records: Arc<RwLock<BTreeMap<RecordKey, Record>>>,
}

impl InMemoryRecordStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn put_conditional(
        &self,
        key: RecordKey,
        record: Record,
        precondition: Option<Precondition>,
    ) -> Result<()> {
        let mut records = self.records.write().await;
        let exists = records.contains_key(&key);
        match precondition {
            Some(Precondition::KeyAbsent) if exists => {
                return Err(StoreError::ConditionFailed { key })
            }
            Some(Precondition::KeyExists) if !exists => {
                return Err(StoreError::ConditionFailed { key })
            }
            _ => {}
        }
        records.insert(key, record);
        Ok(())
    }

    async fn get(&self, key: &RecordKey) -> Result<Option<Record>> {
        let records = self.records.read().await;
        Ok(records.get(key).cloned())
    }

    async fn delete_conditional(
        &self,
        key: &RecordKey,
        precondition: Option<Precondition>,
    ) -> Result<()> {
        let mut records = self.records.write().await;
        let exists = records.contains_key(key);
        match precondition {
            Some(Precondition::KeyAbsent) if exists => {
                return Err(StoreError::ConditionFailed { key: key.clone() })
            }
            Some(Precondition::KeyExists) if !exists => {
                return Err(StoreError::ConditionFailed { key: key.clone() })
            }
            _ => {}
        }
        records.remove(key);
        Ok(())
    }

    async fn scan(
        &self,
        limit: usize,
        start_after: Option<&RecordKey>,
    ) -> Result<Vec<(RecordKey, Record)>> {
        let records = self.records.read().await;
        let range = match start_after {
            Some(after) => records.range((Bound::Excluded(after), Bound::Unbounded)),
            None => records.range::<RecordKey, _>(..),
        };
        Ok(range
            .take(limit)
            .map(|(key, record)| (key.clone(), record.clone()))
            .collect())
    }
}
