//! Application state shared by all request handlers.
//!
//! The state holds the lifecycle engine plus the record store it runs on,
//! behind trait objects so backends are swappable. Backends are selected
//! by mutually exclusive cargo features.

use std::sync::Arc;

use itemstore_core::item::ItemEngine;
use itemstore_core::store::RecordStore;

// ============================================================================
// Compile-time feature validation
// ============================================================================

// Storage features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "inmemory", feature = "dynamodb"))]
compile_error!("Cannot enable both 'inmemory' and 'dynamodb' storage features");

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!("Must enable exactly one storage feature: 'inmemory' or 'dynamodb'");

/// Shared application state, cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    /// Item lifecycle engine over the configured store.
    pub engine: Arc<ItemEngine>,
    /// The store itself, used directly by the health probes.
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    /// Builds state over an arbitrary store implementation.
    pub fn with_store(store: Arc<dyn RecordStore>) -> Self {
        Self {
            engine: Arc::new(ItemEngine::new(store.clone())),
            store,
        }
    }

    /// State backed by the in-memory store.
    #[cfg(any(feature = "inmemory", test))]
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(crate::storage::inmemory::InMemoryRecordStore::new()))
    }

    /// State backed by DynamoDB, configured from the environment.
    #[cfg(feature = "dynamodb")]
    pub async fn dynamodb(config: &crate::config::Config) -> Self {
        Self::with_store(Arc::new(
            crate::storage::dynamodb::DynamoDbRecordStore::from_config(config).await,
        ))
    }
}
