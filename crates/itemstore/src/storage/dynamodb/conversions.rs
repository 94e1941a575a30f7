//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and
//! record maps. Testable in isolation without DynamoDB access.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;

use itemstore_core::item::ItemStatus;
use itemstore_core::store::{Record, RecordKey, StoreError};

/// Partition key attribute: the item id.
pub const PK_ATTRIBUTE: &str = "PK";
/// Sort key attribute: the item status.
pub const SK_ATTRIBUTE: &str = "SK";

/// Builds the DynamoDB key map for a record key.
pub fn key_to_attributes(key: &RecordKey) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (PK_ATTRIBUTE.to_string(), AttributeValue::S(key.id.clone())),
        (
            SK_ATTRIBUTE.to_string(),
            AttributeValue::S(key.status.as_str().to_string()),
        ),
    ])
}

/// Builds the full item map stored by a put: key plus record attributes.
pub fn record_to_attributes(
    key: &RecordKey,
    record: &Record,
) -> HashMap<String, AttributeValue> {
    let mut item = key_to_attributes(key);
    for (name, value) in record {
        item.insert(name.clone(), AttributeValue::S(value.clone()));
    }
    item
}

/// Reads a stored item map back into a record, dropping the key attributes.
pub fn attributes_to_record(
    item: &HashMap<String, AttributeValue>,
) -> Result<Record, StoreError> {
    let mut record = Record::new();
    for (name, value) in item {
        if name == PK_ATTRIBUTE || name == SK_ATTRIBUTE {
            continue;
        }
        let value = value
            .as_s()
            .map_err(|_| StoreError::Fault(format!("non-string attribute: {name}")))?;
        record.insert(name.clone(), value.clone());
    }
    Ok(record)
}

/// Extracts the composite key from a scanned item.
///
/// Returns `None` for rows that do not belong to this schema (missing key
/// attributes or an unrecognized status sort key).
pub fn attributes_to_key(item: &HashMap<String, AttributeValue>) -> Option<RecordKey> {
    let id = item.get(PK_ATTRIBUTE)?.as_s().ok()?;
    let status = ItemStatus::parse(item.get(SK_ATTRIBUTE)?.as_s().ok()?)?;
    Some(RecordKey::new(id.clone(), status))
}
