// Test code patterns:
#![cfg_attr(test, allow(clippy::expect_used))]
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Switchdesk Shared Library
//!
//! Account storage consumed by the API server. The store is an in-process
//! map; anything that wants durable accounts swaps in behind this interface.

pub mod accounts;

pub use accounts::{AccountRecord, AccountStore, StoreError, DEFAULT_ACCESS_LEVEL};
