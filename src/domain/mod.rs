//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains:
//! - `mod.rs`: Rich domain types (validated, view-ready)
//! - `wire.rs`: Raw serde structs matching upstream responses
//! - `convert.rs`: `TryFrom` conversions with validation
//! - `client.rs`: Sub-client with HTTP methods

pub mod coin;
pub mod price_history;
