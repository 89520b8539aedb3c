//! Native data model for the apiary store
//!
//! Shared by the client crate and the Python bindings: keys, bin values,
//! records, read policies and status codes.

pub mod error;
pub mod policy;
pub mod types;

pub use error::{StatusCode, StoreError};
pub use policy::{KeyPolicy, ReadPolicy, Replica};
pub use types::{Batch, BatchRead, Key, Record, RecordMeta, StoreValue, UserKey};
