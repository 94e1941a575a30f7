use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use itemstore_core::item::{Item, ItemPage, ItemStatus};

/// Request payload for creating an item.
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    /// Free-form payload. Optional so the handler can tell a missing field
    /// apart from malformed JSON.
    pub attributes: Option<HashMap<String, String>>,
}

/// A single item as returned by the API.
#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub id: String,
    pub status: ItemStatus,
    pub attributes: HashMap<String, String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            id: item.id,
            status: item.status,
            attributes: item.attributes,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

/// Response payload for the list operation.
#[derive(Debug, Serialize)]
pub struct ListItemsResponse {
    pub items: Vec<ItemResponse>,
    /// Resume token for the next page; `null` on the last page.
    pub next_cursor: Option<String>,
    pub has_more: bool,
    pub count: usize,
}

impl From<ItemPage> for ListItemsResponse {
    fn from(page: ItemPage) -> Self {
        let items: Vec<ItemResponse> = page.items.into_iter().map(ItemResponse::from).collect();
        Self {
            count: items.len(),
            items,
            next_cursor: page.next_cursor,
            has_more: page.has_more,
        }
    }
}

/// Structured error body carried by every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: &'static str,
    pub message: String,
    pub code: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_response_serializes_status_as_string() {
        let item = Item::new("a", HashMap::from([("k".to_string(), "v".to_string())]));
        let json = serde_json::to_value(ItemResponse::from(item)).unwrap();

        assert_eq!(json["id"], "a");
        assert_eq!(json["status"], "created");
        assert_eq!(json["attributes"]["k"], "v");
        assert!(json["created_at"].is_string());
    }

    #[test]
    fn test_list_response_count_matches_items() {
        let page = ItemPage {
            items: vec![Item::new("a", HashMap::new()), Item::new("b", HashMap::new())],
            next_cursor: None,
            has_more: false,
        };
        let response = ListItemsResponse::from(page);

        assert_eq!(response.count, 2);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["next_cursor"], serde_json::Value::Null);
    }

    #[test]
    fn test_create_request_tolerates_missing_attributes() {
        let request: CreateItemRequest = serde_json::from_str("{}").unwrap();
        assert!(request.attributes.is_none());
    }
}
