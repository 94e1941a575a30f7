use thiserror::Error;

use crate::cursor::CursorError;
use crate::store::{RecordKey, StoreError};

/// Errors that can occur during item lifecycle operations.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item with id '{0}' already exists")]
    AlreadyExists(String),
    #[error("Item with id '{0}' not found")]
    NotFound(String),
    #[error("Item with id '{0}' is already in progress")]
    AlreadyInProgress(String),
    #[error("Limit must be a positive integer")]
    InvalidLimit,
    #[error("Invalid cursor format: {0}")]
    InvalidCursor(#[from] CursorError),
    /// A stored record could not be mapped back into an item.
    #[error("Stored record {key} is malformed: {reason}")]
    MalformedRecord { key: RecordKey, reason: String },
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemStatus;

    #[test]
    fn test_already_exists_display() {
        let error = ItemError::AlreadyExists("abc-123".to_string());
        assert_eq!(error.to_string(), "Item with id 'abc-123' already exists");
    }

    #[test]
    fn test_not_found_display() {
        let error = ItemError::NotFound("abc-123".to_string());
        assert_eq!(error.to_string(), "Item with id 'abc-123' not found");
    }

    #[test]
    fn test_already_in_progress_display() {
        let error = ItemError::AlreadyInProgress("abc-123".to_string());
        assert_eq!(
            error.to_string(),
            "Item with id 'abc-123' is already in progress"
        );
    }

    #[test]
    fn test_store_error_is_transparent() {
        let error = ItemError::from(StoreError::Fault("boom".to_string()));
        assert_eq!(error.to_string(), "Store request failed: boom");
    }

    #[test]
    fn test_malformed_record_display() {
        let error = ItemError::MalformedRecord {
            key: RecordKey::new("x", ItemStatus::Created),
            reason: "missing field created_at".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Stored record x/created is malformed: missing field created_at"
        );
    }
}
