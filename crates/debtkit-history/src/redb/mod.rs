//! Redb history backend.
//!
//! This module provides [`RedbHistoryStore`], which keeps calculation history
//! in a [redb](https://crates.io/crates/redb) file so it survives restarts.

mod store;

pub use store::RedbHistoryStore;
