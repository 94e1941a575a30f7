//! Pagination cursor codec.
//!
//! A cursor is an opaque token encoding the composite key of the last
//! record a scan returned: URL-safe unpadded base64 of `id|status`, so the
//! token survives a query string without percent-encoding. Decoding is
//! deterministic and rejects anything that does not round-trip.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use thiserror::Error;

use crate::item::ItemStatus;
use crate::store::RecordKey;

/// Separator between the id and status parts of a decoded cursor. Not a
/// valid character in either field.
const SEPARATOR: char = '|';

/// Errors that can occur when decoding a cursor token.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CursorError {
    #[error("cursor is not valid base64: {0}")]
    Encoding(String),
    #[error("cursor must decode to exactly two non-empty parts")]
    Malformed,
    #[error("cursor references unknown status '{0}'")]
    UnknownStatus(String),
}

/// Encodes a record key as an opaque resume token.
pub fn encode(key: &RecordKey) -> String {
    URL_SAFE_NO_PAD.encode(format!("{}{}{}", key.id, SEPARATOR, key.status.as_str()))
}

/// Decodes a resume token back into a record key.
pub fn decode(token: &str) -> Result<RecordKey, CursorError> {
    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|e| CursorError::Encoding(e.to_string()))?;
    let decoded = String::from_utf8(bytes).map_err(|_| CursorError::Malformed)?;

    let mut parts = decoded.split(SEPARATOR);
    let (Some(id), Some(status), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(CursorError::Malformed);
    };
    if id.is_empty() || status.is_empty() {
        return Err(CursorError::Malformed);
    }

    let status =
        ItemStatus::parse(status).ok_or_else(|| CursorError::UnknownStatus(status.to_string()))?;

    Ok(RecordKey::new(id, status))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_created() {
        let key = RecordKey::new("order-42", ItemStatus::Created);
        assert_eq!(decode(&encode(&key)).unwrap(), key);
    }

    #[test]
    fn test_round_trip_in_progress() {
        let key = RecordKey::new("a b c", ItemStatus::InProgress);
        assert_eq!(decode(&encode(&key)).unwrap(), key);
    }

    #[test]
    fn test_token_is_opaque() {
        let key = RecordKey::new("order-42", ItemStatus::Created);
        let token = encode(&key);
        assert!(!token.contains("order-42"));
        assert_eq!(URL_SAFE_NO_PAD.decode(&token).unwrap(), b"order-42|created");
    }

    #[test]
    fn test_rejects_non_base64() {
        assert!(matches!(
            decode("not base64 at all!"),
            Err(CursorError::Encoding(_))
        ));
    }

    #[test]
    fn test_rejects_missing_separator() {
        let token = URL_SAFE_NO_PAD.encode("no-separator-here");
        assert_eq!(decode(&token), Err(CursorError::Malformed));
    }

    #[test]
    fn test_rejects_too_many_parts() {
        let token = URL_SAFE_NO_PAD.encode("a|created|extra");
        assert_eq!(decode(&token), Err(CursorError::Malformed));
    }

    #[test]
    fn test_rejects_empty_parts() {
        assert_eq!(decode(&URL_SAFE_NO_PAD.encode("|created")), Err(CursorError::Malformed));
        assert_eq!(decode(&URL_SAFE_NO_PAD.encode("id|")), Err(CursorError::Malformed));
        assert_eq!(decode(&URL_SAFE_NO_PAD.encode("|")), Err(CursorError::Malformed));
    }

    #[test]
    fn test_rejects_unknown_status() {
        let token = URL_SAFE_NO_PAD.encode("id|done");
        assert_eq!(
            decode(&token),
            Err(CursorError::UnknownStatus("done".to_string()))
        );
    }

    #[test]
    fn test_rejects_non_utf8_payload() {
        let token = URL_SAFE_NO_PAD.encode([0xff, 0xfe, 0x7c, 0xff]);
        assert_eq!(decode(&token), Err(CursorError::Malformed));
    }
}
