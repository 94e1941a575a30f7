use std::collections::HashMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::RecordKey;

/// Lifecycle status of an item. Doubles as the sort-key component of the
/// record's composite key.
///
/// The lifecycle is `created → in_progress`; `in_progress` is terminal
/// short of deletion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Created,
    InProgress,
}

impl ItemStatus {
    /// The stored string form of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Created => "created",
            ItemStatus::InProgress => "in_progress",
        }
    }

    /// Parses the stored string form back into a status.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "created" => Some(ItemStatus::Created),
            "in_progress" => Some(ItemStatus::InProgress),
            _ => None,
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The sole domain entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Caller-supplied identifier, acts as partition key.
    pub id: String,
    pub status: ItemStatus,
    /// Free-form payload, set at creation and immutable thereafter.
    pub attributes: HashMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Builds a freshly created item with `created_at == updated_at`.
    pub fn new(id: impl Into<String>, attributes: HashMap<String, String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            status: ItemStatus::Created,
            attributes,
            created_at: now,
            updated_at: now,
        }
    }

    /// The composite key this item is stored under.
    pub fn key(&self) -> RecordKey {
        RecordKey::new(self.id.clone(), self.status)
    }
}

/// One page of a paged scan over all items.
#[derive(Debug, Clone)]
pub struct ItemPage {
    pub items: Vec<Item>,
    /// Resume token for the next page; absent on the last page.
    pub next_cursor: Option<String>,
    pub has_more: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_round_trip() {
        assert_eq!(ItemStatus::parse("created"), Some(ItemStatus::Created));
        assert_eq!(ItemStatus::parse("in_progress"), Some(ItemStatus::InProgress));
        assert_eq!(ItemStatus::parse(ItemStatus::Created.as_str()), Some(ItemStatus::Created));
        assert_eq!(ItemStatus::parse("CREATED"), None);
        assert_eq!(ItemStatus::parse("done"), None);
    }

    #[test]
    fn test_status_serializes_as_snake_case() {
        assert_eq!(
            serde_json::to_string(&ItemStatus::InProgress).unwrap(),
            "\"in_progress\""
        );
    }

    #[test]
    fn test_new_item_timestamps_match() {
        let item = Item::new("a", HashMap::from([("k".to_string(), "v".to_string())]));
        assert_eq!(item.status, ItemStatus::Created);
        assert_eq!(item.created_at, item.updated_at);
    }

    #[test]
    fn test_item_key_tracks_status() {
        let mut item = Item::new("a", HashMap::new());
        assert_eq!(item.key(), RecordKey::new("a", ItemStatus::Created));

        item.status = ItemStatus::InProgress;
        assert_eq!(item.key(), RecordKey::new("a", ItemStatus::InProgress));
    }
}
