//! DynamoDB storage backend.
//!
//! Implements the record store contract from `itemstore_core::store` using
//! `aws-sdk-dynamodb` against a table with string `PK`/`SK` keys.

mod conversions;
mod error;
mod store;

pub use store::DynamoDbRecordStore;
