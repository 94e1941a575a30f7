//! Core domain library for the itemstore project.
//!
//! Contains the record store contract, the item lifecycle engine, and the
//! pagination cursor codec. This crate has no HTTP or AWS SDK dependencies;
//! backends implementing [`store::RecordStore`] live in the service crate.

pub mod cursor;
pub mod item;
pub mod store;
