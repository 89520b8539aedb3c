//! Blocking read operations over a store client
//!
//! Single reads map record-not-found into a distinct successful outcome;
//! batch reads aggregate callback-delivered results behind a mutex and
//! keep successes only.

use parking_lot::Mutex;
use tracing::debug;

use apiary_kv::{Batch, Key, ReadPolicy, Record, StatusCode, StoreError, UserKey};

use crate::client::StoreClient;

/// Outcome of a single-key read.
///
/// Absence is not an error here: `Missing` carries the key so the caller
/// can still identify which record was not there.
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome {
    Found(Record),
    Missing(Key),
}

/// Read one record. Exactly one store call, no retries; retry policy
/// belongs to the backend.
pub fn read_one(
    store: &dyn StoreClient,
    policy: Option<&ReadPolicy>,
    key: &Key,
) -> Result<ReadOutcome, StoreError> {
    match store.get(policy, key) {
        Ok(record) => Ok(ReadOutcome::Found(record)),
        Err(err) if err.is_not_found() => Ok(ReadOutcome::Missing(key.clone())),
        Err(err) => Err(err),
    }
}

/// Read many records sharing one namespace and set.
///
/// Validation happens entirely before dispatch: a byte-sequence key or an
/// empty namespace fails the whole batch with `InvalidParam` and the
/// store is never called. After dispatch, per-key outcomes arrive through
/// the backend's callback, possibly concurrently; OK results are appended
/// to a mutex-guarded container in delivery order and everything else
/// (not-found included) is omitted from the output. Only a dispatch-level
/// failure is returned as an error, and then no partial container
/// surfaces.
pub fn read_batch(
    store: &dyn StoreClient,
    policy: Option<&ReadPolicy>,
    namespace: &str,
    set: &str,
    user_keys: Vec<UserKey>,
) -> Result<Vec<Record>, StoreError> {
    let batch = Batch::new(namespace, set, user_keys)?;
    debug!(namespace, set, keys = batch.len(), "batch read");

    let results = Mutex::new(Vec::with_capacity(batch.len()));
    store.batch_get(policy, &batch, &|read| {
        if read.status == StatusCode::Ok {
            if let Some(record) = read.record {
                results.lock().push(record);
            }
        }
    })?;

    Ok(results.into_inner())
}
