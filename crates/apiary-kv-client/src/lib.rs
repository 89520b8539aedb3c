//! Client surface for the apiary store
//!
//! Exposes the [`StoreClient`] trait (the call contract every backend
//! implements), the in-process [`MemoryCluster`] backend, and the
//! blocking read operations built on top of the trait.

mod client;
mod memory;
pub mod ops;

pub use client::StoreClient;
pub use memory::MemoryCluster;
pub use ops::ReadOutcome;

// Re-export the native model for callers of this crate
pub use apiary_kv::{
    Batch, BatchRead, Key, KeyPolicy, ReadPolicy, Record, RecordMeta, Replica, StatusCode,
    StoreError, StoreValue, UserKey,
};
