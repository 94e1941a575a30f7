use thiserror::Error;

use super::RecordKey;

/// Errors that can occur during record store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A conditional write was rejected because its precondition did not
    /// hold at write time.
    #[error("Condition failed for record {key}")]
    ConditionFailed { key: RecordKey },
    /// Any other failure of the underlying store. Never retried here;
    /// retry policy belongs to the caller.
    #[error("Store request failed: {0}")]
    Fault(String),
}

/// Result type for record store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
