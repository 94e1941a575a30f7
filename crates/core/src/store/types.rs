use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::item::ItemStatus;

/// The composite key addressing a stored record.
///
/// The item id is the partition component and the lifecycle status is the
/// sort component. Changing either part changes the record's identity in
/// the store, which is why a status transition moves the record across two
/// physical keys instead of rewriting a field in place.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordKey {
    pub id: String,
    pub status: ItemStatus,
}

impl RecordKey {
    /// Creates a key for the given id and status.
    pub fn new(id: impl Into<String>, status: ItemStatus) -> Self {
        Self {
            id: id.into(),
            status,
        }
    }
}

impl fmt::Display for RecordKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.id, self.status)
    }
}

/// A stored record: a flat string attribute map.
///
/// Caller attributes live alongside the reserved `created_at`/`updated_at`
/// entries; the composite key is held separately by the store.
pub type Record = HashMap<String, String>;

/// Precondition for a conditional write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    /// The write succeeds only if no record exists at the key.
    KeyAbsent,
    /// The write succeeds only if a record exists at the key.
    KeyExists,
}
