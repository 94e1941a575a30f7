mod item;

pub use item::{CreateItemRequest, ErrorResponse, ItemResponse, ListItemsResponse};
