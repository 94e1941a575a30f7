//! The item lifecycle engine.
//!
//! Owns the `created → in_progress` state machine over a [`RecordStore`].
//! Each operation is stateless; the store's per-key conditional writes are
//! the only coordination primitive between concurrent calls.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use crate::cursor;
use crate::store::{Precondition, RecordKey, RecordStore, StoreError};

use super::mapping::{item_to_record, record_to_item};
use super::{Item, ItemError, ItemPage, ItemStatus};

/// Page size used when the caller does not supply a limit.
pub const DEFAULT_PAGE_LIMIT: i64 = 50;
/// Upper bound a supplied limit is clamped to.
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// Lifecycle operations over items stored under composite (id, status) keys.
pub struct ItemEngine {
    store: Arc<dyn RecordStore>,
}

impl ItemEngine {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Creates a new item in `created` status.
    ///
    /// Ids are unique across both statuses: an id currently parked at
    /// `in_progress` is rejected up front, and the conditional write
    /// guarantees at most one `created` record wins a concurrent race.
    pub async fn create_item(
        &self,
        id: &str,
        attributes: HashMap<String, String>,
    ) -> Result<Item, ItemError> {
        tracing::debug!(%id, "creating item");

        let in_progress_key = RecordKey::new(id, ItemStatus::InProgress);
        if self.store.get(&in_progress_key).await?.is_some() {
            return Err(ItemError::AlreadyExists(id.to_string()));
        }

        let item = Item::new(id, attributes);
        let result = self
            .store
            .put_conditional(item.key(), item_to_record(&item), Some(Precondition::KeyAbsent))
            .await;

        match result {
            Ok(()) => {
                tracing::info!(%id, "created item");
                Ok(item)
            }
            Err(StoreError::ConditionFailed { .. }) => {
                tracing::warn!(%id, "attempt to create item that already exists");
                Err(ItemError::AlreadyExists(id.to_string()))
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Moves an item from `created` to `in_progress`.
    ///
    /// The status is the sort-key component of the record's identity, so
    /// the move is a conditional delete of the old key followed by an
    /// insert at the new one. The pair is not atomic: a crash between the
    /// two writes leaves the item absent until the caller retries.
    pub async fn transition_item(&self, id: &str) -> Result<Item, ItemError> {
        tracing::debug!(%id, "transitioning item");

        let created_key = RecordKey::new(id, ItemStatus::Created);
        let Some(record) = self.store.get(&created_key).await? else {
            let in_progress_key = RecordKey::new(id, ItemStatus::InProgress);
            return if self.store.get(&in_progress_key).await?.is_some() {
                Err(ItemError::AlreadyInProgress(id.to_string()))
            } else {
                Err(ItemError::NotFound(id.to_string()))
            };
        };

        let mut item = record_to_item(&created_key, &record)?;

        match self
            .store
            .delete_conditional(&created_key, Some(Precondition::KeyExists))
            .await
        {
            Ok(()) => {}
            // Lost the race: a concurrent transition or delete got there
            // first, indistinguishable from the item never existing.
            Err(StoreError::ConditionFailed { .. }) => {
                tracing::warn!(%id, "conditional delete lost a transition race");
                return Err(ItemError::NotFound(id.to_string()));
            }
            Err(err) => return Err(err.into()),
        }

        item.status = ItemStatus::InProgress;
        item.updated_at = Utc::now();
        self.store
            .put_conditional(item.key(), item_to_record(&item), None)
            .await?;

        tracing::info!(%id, "transitioned item to in_progress");
        Ok(item)
    }

    /// Deletes an item in whichever status it currently holds.
    ///
    /// Deleting an id with no record in either status is `NotFound`;
    /// callers driving cleanup are expected to treat that as the goal
    /// already being achieved.
    pub async fn delete_item(&self, id: &str) -> Result<(), ItemError> {
        tracing::debug!(%id, "deleting item");

        for status in [ItemStatus::Created, ItemStatus::InProgress] {
            let key = RecordKey::new(id, status);
            if self.store.get(&key).await?.is_none() {
                continue;
            }

            return match self
                .store
                .delete_conditional(&key, Some(Precondition::KeyExists))
                .await
            {
                Ok(()) => {
                    tracing::info!(%id, %status, "deleted item");
                    Ok(())
                }
                Err(StoreError::ConditionFailed { .. }) => {
                    Err(ItemError::NotFound(id.to_string()))
                }
                Err(err) => Err(err.into()),
            };
        }

        Err(ItemError::NotFound(id.to_string()))
    }

    /// Lists items with cursor-based pagination over the store's scan order.
    ///
    /// `limit` defaults to [`DEFAULT_PAGE_LIMIT`] and is clamped to
    /// [`MAX_PAGE_LIMIT`]; non-positive values are rejected. One extra
    /// record is requested to decide `has_more` without a second scan.
    pub async fn list_items(
        &self,
        cursor: Option<&str>,
        limit: Option<i64>,
    ) -> Result<ItemPage, ItemError> {
        let limit = match limit {
            None => DEFAULT_PAGE_LIMIT,
            Some(value) if value <= 0 => return Err(ItemError::InvalidLimit),
            Some(value) => value.min(MAX_PAGE_LIMIT),
        } as usize;

        let start_after = match cursor {
            Some(token) if !token.trim().is_empty() => Some(cursor::decode(token)?),
            _ => None,
        };

        tracing::debug!(limit, resuming = start_after.is_some(), "listing items");

        let mut rows = self.store.scan(limit + 1, start_after.as_ref()).await?;

        let has_more = rows.len() > limit;
        if has_more {
            rows.truncate(limit);
        }
        let next_cursor = if has_more {
            rows.last().map(|(key, _)| cursor::encode(key))
        } else {
            None
        };

        let mut items = Vec::with_capacity(rows.len());
        for (key, record) in &rows {
            match record_to_item(key, record) {
                Ok(item) => items.push(item),
                Err(err) => tracing::warn!(%key, %err, "skipping record that failed to map"),
            }
        }

        tracing::info!(count = items.len(), has_more, "listed items");
        Ok(ItemPage {
            items,
            next_cursor,
            has_more,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet};
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::store::Record;

    /// Minimal fake of the store contract: an ordered map behind a mutex,
    /// with exact precondition semantics.
    #[derive(Default)]
    struct MemoryStore {
        records: Mutex<BTreeMap<RecordKey, Record>>,
    }

    impl MemoryStore {
        fn insert_raw(&self, key: RecordKey, record: Record) {
            self.records.lock().unwrap().insert(key, record);
        }

        fn contains(&self, key: &RecordKey) -> bool {
            self.records.lock().unwrap().contains_key(key)
        }
    }

    #[async_trait]
    impl RecordStore for MemoryStore {
        async fn put_conditional(
            &self,
            key: RecordKey,
            record: Record,
            precondition: Option<Precondition>,
        ) -> crate::store::Result<()> {
            let mut records = self.records.lock().unwrap();
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

        async fn get(&self, key: &RecordKey) -> crate::store::Result<Option<Record>> {
            Ok(self.records.lock().unwrap().get(key).cloned())
        }

        async fn delete_conditional(
            &self,
            key: &RecordKey,
            precondition: Option<Precondition>,
        ) -> crate::store::Result<()> {
            let mut records = self.records.lock().unwrap();
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
        ) -> crate::store::Result<Vec<(RecordKey, Record)>> {
            let records = self.records.lock().unwrap();
            Ok(records
                .iter()
                .filter(|(key, _)| start_after.is_none_or(|after| *key > after))
                .take(limit)
                .map(|(key, record)| (key.clone(), record.clone()))
                .collect())
        }
    }

    /// Store whose conditional delete always loses, simulating a concurrent
    /// transition winning the race between the lookup and the delete.
    struct LostRaceStore {
        inner: MemoryStore,
    }

    #[async_trait]
    impl RecordStore for LostRaceStore {
        async fn put_conditional(
            &self,
            key: RecordKey,
            record: Record,
            precondition: Option<Precondition>,
        ) -> crate::store::Result<()> {
            self.inner.put_conditional(key, record, precondition).await
        }

        async fn get(&self, key: &RecordKey) -> crate::store::Result<Option<Record>> {
            self.inner.get(key).await
        }

        async fn delete_conditional(
            &self,
            key: &RecordKey,
            _precondition: Option<Precondition>,
        ) -> crate::store::Result<()> {
            Err(StoreError::ConditionFailed { key: key.clone() })
        }

        async fn scan(
            &self,
            limit: usize,
            start_after: Option<&RecordKey>,
        ) -> crate::store::Result<Vec<(RecordKey, Record)>> {
            self.inner.scan(limit, start_after).await
        }
    }

    /// Store where every call fails, for surfacing lower-level faults.
    struct FaultStore;

    #[async_trait]
    impl RecordStore for FaultStore {
        async fn put_conditional(
            &self,
            _key: RecordKey,
            _record: Record,
            _precondition: Option<Precondition>,
        ) -> crate::store::Result<()> {
            Err(StoreError::Fault("store unavailable".to_string()))
        }

        async fn get(&self, _key: &RecordKey) -> crate::store::Result<Option<Record>> {
            Err(StoreError::Fault("store unavailable".to_string()))
        }

        async fn delete_conditional(
            &self,
            _key: &RecordKey,
            _precondition: Option<Precondition>,
        ) -> crate::store::Result<()> {
            Err(StoreError::Fault("store unavailable".to_string()))
        }

        async fn scan(
            &self,
            _limit: usize,
            _start_after: Option<&RecordKey>,
        ) -> crate::store::Result<Vec<(RecordKey, Record)>> {
            Err(StoreError::Fault("store unavailable".to_string()))
        }
    }

    fn engine() -> (ItemEngine, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        (ItemEngine::new(store.clone()), store)
    }

    fn attrs(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_create_then_read_back() {
        let (engine, store) = engine();
        let attributes = attrs(&[("color", "blue"), ("size", "large")]);

        let item = engine.create_item("order-1", attributes.clone()).await.unwrap();

        assert_eq!(item.status, ItemStatus::Created);
        assert_eq!(item.attributes, attributes);
        assert_eq!(item.created_at, item.updated_at);

        let key = RecordKey::new("order-1", ItemStatus::Created);
        let record = store.get(&key).await.unwrap().expect("record stored");
        let stored = record_to_item(&key, &record).unwrap();
        assert_eq!(stored, item);
    }

    #[tokio::test]
    async fn test_create_twice_is_already_exists() {
        let (engine, _) = engine();
        engine.create_item("a", attrs(&[("k", "v")])).await.unwrap();

        let result = engine.create_item("a", attrs(&[("k", "v2")])).await;
        assert!(matches!(result, Err(ItemError::AlreadyExists(id)) if id == "a"));
    }

    #[tokio::test]
    async fn test_create_over_in_progress_is_already_exists() {
        // Id uniqueness holds across both statuses, not just `created`.
        let (engine, _) = engine();
        engine.create_item("a", attrs(&[("k", "v")])).await.unwrap();
        engine.transition_item("a").await.unwrap();

        let result = engine.create_item("a", attrs(&[("k", "v")])).await;
        assert!(matches!(result, Err(ItemError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_transition_moves_record_across_keys() {
        let (engine, store) = engine();
        let attributes = attrs(&[("color", "blue")]);
        let created = engine.create_item("a", attributes.clone()).await.unwrap();

        let updated = engine.transition_item("a").await.unwrap();

        assert_eq!(updated.status, ItemStatus::InProgress);
        assert_eq!(updated.attributes, attributes);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= updated.created_at);

        assert!(!store.contains(&RecordKey::new("a", ItemStatus::Created)));
        assert!(store.contains(&RecordKey::new("a", ItemStatus::InProgress)));
    }

    #[tokio::test]
    async fn test_transition_twice_is_already_in_progress() {
        let (engine, _) = engine();
        engine.create_item("a", attrs(&[("k", "v")])).await.unwrap();
        engine.transition_item("a").await.unwrap();

        let result = engine.transition_item("a").await;
        assert!(matches!(result, Err(ItemError::AlreadyInProgress(id)) if id == "a"));
    }

    #[tokio::test]
    async fn test_transition_missing_is_not_found() {
        let (engine, _) = engine();
        let result = engine.transition_item("ghost").await;
        assert!(matches!(result, Err(ItemError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_transition_lost_race_is_not_found() {
        // The delete+insert pair is a known race window: when the
        // conditional delete loses to a concurrent transition, the loser
        // reports NotFound. Documented behavior, not a desirable one.
        let inner = MemoryStore::default();
        let item = Item::new("a", attrs(&[("k", "v")]));
        inner.insert_raw(item.key(), item_to_record(&item));

        let engine = ItemEngine::new(Arc::new(LostRaceStore { inner }));
        let result = engine.transition_item("a").await;
        assert!(matches!(result, Err(ItemError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_in_created_status() {
        let (engine, store) = engine();
        engine.create_item("a", attrs(&[("k", "v")])).await.unwrap();

        engine.delete_item("a").await.unwrap();
        assert!(!store.contains(&RecordKey::new("a", ItemStatus::Created)));
    }

    #[tokio::test]
    async fn test_delete_in_progress_status() {
        let (engine, store) = engine();
        engine.create_item("a", attrs(&[("k", "v")])).await.unwrap();
        engine.transition_item("a").await.unwrap();

        engine.delete_item("a").await.unwrap();
        assert!(!store.contains(&RecordKey::new("a", ItemStatus::InProgress)));
    }

    #[tokio::test]
    async fn test_delete_twice_is_not_found() {
        let (engine, _) = engine();
        engine.create_item("a", attrs(&[("k", "v")])).await.unwrap();
        engine.delete_item("a").await.unwrap();

        let result = engine.delete_item("a").await;
        assert!(matches!(result, Err(ItemError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_paginates_without_overlap() {
        let (engine, _) = engine();
        for id in ["a", "b", "c", "d", "e"] {
            engine.create_item(id, attrs(&[("k", "v")])).await.unwrap();
        }

        let mut seen = BTreeSet::new();
        let mut cursor: Option<String> = None;
        let mut pages = 0;

        loop {
            let page = engine.list_items(cursor.as_deref(), Some(2)).await.unwrap();
            pages += 1;
            assert!(page.items.len() <= 2);
            for item in &page.items {
                assert!(seen.insert(item.id.clone()), "item listed twice");
            }
            match page.next_cursor {
                Some(next) => {
                    assert!(page.has_more);
                    cursor = Some(next);
                }
                None => {
                    assert!(!page.has_more);
                    break;
                }
            }
        }

        assert_eq!(pages, 3);
        assert_eq!(seen.len(), 5);
    }

    #[tokio::test]
    async fn test_list_exact_page_has_no_cursor() {
        let (engine, _) = engine();
        for id in ["a", "b"] {
            engine.create_item(id, attrs(&[("k", "v")])).await.unwrap();
        }

        let page = engine.list_items(None, Some(2)).await.unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(!page.has_more);
        assert!(page.next_cursor.is_none());
    }

    #[tokio::test]
    async fn test_list_defaults_and_clamps_limit() {
        let (engine, _) = engine();
        for id in ["a", "b", "c"] {
            engine.create_item(id, attrs(&[("k", "v")])).await.unwrap();
        }

        let page = engine.list_items(None, None).await.unwrap();
        assert_eq!(page.items.len(), 3);
        assert!(!page.has_more);

        // Values above the cap behave like the cap rather than failing.
        let page = engine.list_items(None, Some(5000)).await.unwrap();
        assert_eq!(page.items.len(), 3);
    }

    #[tokio::test]
    async fn test_list_rejects_non_positive_limit() {
        let (engine, _) = engine();
        assert!(matches!(
            engine.list_items(None, Some(0)).await,
            Err(ItemError::InvalidLimit)
        ));
        assert!(matches!(
            engine.list_items(None, Some(-5)).await,
            Err(ItemError::InvalidLimit)
        ));
    }

    #[tokio::test]
    async fn test_list_rejects_bad_cursor() {
        let (engine, _) = engine();
        let result = engine.list_items(Some("!!!not-a-cursor!!!"), None).await;
        assert!(matches!(result, Err(ItemError::InvalidCursor(_))));
    }

    #[tokio::test]
    async fn test_list_ignores_blank_cursor() {
        let (engine, _) = engine();
        engine.create_item("a", attrs(&[("k", "v")])).await.unwrap();

        let page = engine.list_items(Some("   "), None).await.unwrap();
        assert_eq!(page.items.len(), 1);
    }

    #[tokio::test]
    async fn test_list_skips_unmappable_records() {
        let (engine, store) = engine();
        engine.create_item("a", attrs(&[("k", "v")])).await.unwrap();

        // A record with no timestamps cannot map back into an item.
        store.insert_raw(
            RecordKey::new("broken", ItemStatus::Created),
            Record::from([("k".to_string(), "v".to_string())]),
        );

        let page = engine.list_items(None, None).await.unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "a");
    }

    #[tokio::test]
    async fn test_store_faults_surface_unchanged() {
        let engine = ItemEngine::new(Arc::new(FaultStore));

        let result = engine.create_item("a", attrs(&[("k", "v")])).await;
        assert!(matches!(result, Err(ItemError::Store(StoreError::Fault(_)))));

        let result = engine.list_items(None, None).await;
        assert!(matches!(result, Err(ItemError::Store(StoreError::Fault(_)))));
    }
}
