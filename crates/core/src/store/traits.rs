use async_trait::async_trait;

use super::{Precondition, Record, RecordKey, Result};

/// Contract over a remote attribute-value store with per-key conditional
/// writes and a resumable table scan.
///
/// The conditional writes are the only concurrency primitive the engine
/// relies on; implementations must evaluate the precondition atomically
/// with the write.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Writes a record at the key, optionally guarded by a precondition.
    async fn put_conditional(
        &self,
        key: RecordKey,
        record: Record,
        precondition: Option<Precondition>,
    ) -> Result<()>;

    /// Reads the record at the key, if any.
    async fn get(&self, key: &RecordKey) -> Result<Option<Record>>;

    /// Deletes the record at the key, optionally guarded by a precondition.
    async fn delete_conditional(
        &self,
        key: &RecordKey,
        precondition: Option<Precondition>,
    ) -> Result<()>;

    /// Returns up to `limit` records in store-defined order, starting
    /// strictly after `start_after` when given. Callers must not assume
    /// any semantic ordering beyond resumability.
    async fn scan(
        &self,
        limit: usize,
        start_after: Option<&RecordKey>,
    ) -> Result<Vec<(RecordKey, Record)>>;
}
