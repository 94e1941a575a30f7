//! Conversion between items and stored attribute maps.
//!
//! Pure functions, testable without a store. A record carries the caller
//! attributes plus the two reserved timestamp entries; id and status live
//! in the composite key, never in the map.

use chrono::{DateTime, Utc};

use crate::store::{Record, RecordKey};

use super::{Item, ItemError};

/// Reserved attribute holding the creation timestamp (RFC 3339).
pub const CREATED_AT_ATTRIBUTE: &str = "created_at";
/// Reserved attribute holding the last-transition timestamp (RFC 3339).
pub const UPDATED_AT_ATTRIBUTE: &str = "updated_at";

/// Converts an item to its stored attribute map.
///
/// Reserved entries are written last, so a caller attribute reusing a
/// reserved name cannot clobber the timestamps.
pub fn item_to_record(item: &Item) -> Record {
    let mut record = Record::new();
    for (key, value) in &item.attributes {
        record.insert(key.clone(), value.clone());
    }
    record.insert(
        CREATED_AT_ATTRIBUTE.to_string(),
        item.created_at.to_rfc3339(),
    );
    record.insert(
        UPDATED_AT_ATTRIBUTE.to_string(),
        item.updated_at.to_rfc3339(),
    );
    record
}

/// Converts a stored attribute map back into an item.
pub fn record_to_item(key: &RecordKey, record: &Record) -> Result<Item, ItemError> {
    let created_at = get_datetime(key, record, CREATED_AT_ATTRIBUTE)?;
    let updated_at = get_datetime(key, record, UPDATED_AT_ATTRIBUTE)?;

    let attributes = record
        .iter()
        .filter(|(k, _)| k.as_str() != CREATED_AT_ATTRIBUTE && k.as_str() != UPDATED_AT_ATTRIBUTE)
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();

    Ok(Item {
        id: key.id.clone(),
        status: key.status,
        attributes,
        created_at,
        updated_at,
    })
}

fn get_datetime(
    key: &RecordKey,
    record: &Record,
    attribute: &str,
) -> Result<DateTime<Utc>, ItemError> {
    let value = record
        .get(attribute)
        .ok_or_else(|| ItemError::MalformedRecord {
            key: key.clone(),
            reason: format!("missing attribute {attribute}"),
        })?;

    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| ItemError::MalformedRecord {
            key: key.clone(),
            reason: format!("invalid timestamp {attribute}: {e}"),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::item::ItemStatus;

    fn sample_item() -> Item {
        Item {
            id: "order-42".to_string(),
            status: ItemStatus::Created,
            attributes: HashMap::from([
                ("color".to_string(), "blue".to_string()),
                ("size".to_string(), "large".to_string()),
            ]),
            created_at: DateTime::parse_from_rfc3339("2024-01-15T10:30:00Z")
                .unwrap()
                .with_timezone(&Utc),
            updated_at: DateTime::parse_from_rfc3339("2024-01-15T11:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        }
    }

    #[test]
    fn test_round_trip() {
        let item = sample_item();
        let record = item_to_record(&item);
        let parsed = record_to_item(&item.key(), &record).unwrap();

        assert_eq!(parsed, item);
    }

    #[test]
    fn test_record_keeps_timestamps_as_rfc3339() {
        let record = item_to_record(&sample_item());

        assert_eq!(
            record.get(CREATED_AT_ATTRIBUTE).map(String::as_str),
            Some("2024-01-15T10:30:00+00:00")
        );
        assert_eq!(record.len(), 4);
    }

    #[test]
    fn test_reserved_names_win_over_caller_attributes() {
        let mut item = sample_item();
        item.attributes
            .insert(CREATED_AT_ATTRIBUTE.to_string(), "bogus".to_string());

        let record = item_to_record(&item);
        assert_eq!(
            record.get(CREATED_AT_ATTRIBUTE).map(String::as_str),
            Some("2024-01-15T10:30:00+00:00")
        );
    }

    #[test]
    fn test_missing_timestamp_is_malformed() {
        let item = sample_item();
        let mut record = item_to_record(&item);
        record.remove(CREATED_AT_ATTRIBUTE);

        let result = record_to_item(&item.key(), &record);
        assert!(matches!(result, Err(ItemError::MalformedRecord { .. })));
    }

    #[test]
    fn test_unparseable_timestamp_is_malformed() {
        let item = sample_item();
        let mut record = item_to_record(&item);
        record.insert(UPDATED_AT_ATTRIBUTE.to_string(), "yesterday".to_string());

        let result = record_to_item(&item.key(), &record);
        assert!(matches!(result, Err(ItemError::MalformedRecord { .. })));
    }

    #[test]
    fn test_status_comes_from_the_key() {
        let item = sample_item();
        let record = item_to_record(&item);
        let key = RecordKey::new(item.id.clone(), ItemStatus::InProgress);

        let parsed = record_to_item(&key, &record).unwrap();
        assert_eq!(parsed.status, ItemStatus::InProgress);
    }
}
