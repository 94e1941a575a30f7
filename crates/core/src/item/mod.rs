mod engine;
mod error;
mod http_mapping;
mod mapping;
mod types;

pub use engine::{ItemEngine, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
pub use error::ItemError;
pub use http_mapping::{error_code, item_error_to_status_code};
pub use mapping::{
    item_to_record, record_to_item, CREATED_AT_ATTRIBUTE, UPDATED_AT_ATTRIBUTE,
};
pub use types::{Item, ItemPage, ItemStatus};
