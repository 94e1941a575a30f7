//! Pure functions for mapping item errors to the HTTP contract.
//!
//! Kept free of any HTTP framework types so the service crate (and its
//! tests) can depend on the mapping without pulling axum into this crate.

use crate::store::StoreError;

use super::ItemError;

/// Maps an [`ItemError`] to an HTTP status code.
///
/// - `AlreadyExists` -> 409 (Conflict)
/// - `NotFound` -> 404 (Not Found)
/// - `AlreadyInProgress` -> 400 (Bad Request)
/// - `InvalidLimit` / `InvalidCursor` -> 400 (Bad Request)
/// - `MalformedRecord` / `Store` -> 500 (Internal Server Error)
pub fn item_error_to_status_code(error: &ItemError) -> u16 {
    match error {
        ItemError::AlreadyExists(_) => 409,
        ItemError::NotFound(_) => 404,
        ItemError::AlreadyInProgress(_) => 400,
        ItemError::InvalidLimit => 400,
        ItemError::InvalidCursor(_) => 400,
        ItemError::MalformedRecord { .. } => 500,
        ItemError::Store(_) => 500,
    }
}

/// Maps an [`ItemError`] to the stable machine-readable code carried in
/// error response bodies.
pub fn error_code(error: &ItemError) -> &'static str {
    match error {
        ItemError::AlreadyExists(_) => "ITEM_EXISTS",
        ItemError::NotFound(_) => "ITEM_NOT_FOUND",
        ItemError::AlreadyInProgress(_) => "INVALID_STATUS_TRANSITION",
        ItemError::InvalidLimit => "INVALID_LIMIT",
        ItemError::InvalidCursor(_) => "INVALID_CURSOR",
        ItemError::MalformedRecord { .. } => "INTERNAL_ERROR",
        ItemError::Store(StoreError::Fault(_)) => "STORE_FAULT",
        // A condition failure reaching this layer means the engine did not
        // translate it into a domain error; treat it as a store fault.
        ItemError::Store(StoreError::ConditionFailed { .. }) => "STORE_FAULT",
    }
}
