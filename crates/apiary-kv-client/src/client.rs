//! Store client call contract

use apiary_kv::{Batch, BatchRead, Key, ReadPolicy, Record, StoreError};

/// Read surface of a connected cluster.
///
/// `get` performs one blocking request for a single key; a missing record
/// is reported as an error with [`apiary_kv::StatusCode::RecordNotFound`]
/// and the caller decides what absence means.
///
/// `batch_get` dispatches one multi-key request and delivers per-key
/// outcomes through `on_result`. Delivery order is unspecified and the
/// callback may be invoked from several worker threads at once, so
/// implementations require it to be `Send + Sync` and callers must
/// serialize their own aggregation.
///
/// A `None` policy means "apply the store defaults"; implementations must
/// not observe a difference between an absent policy and one the caller
/// never constructed.
pub trait StoreClient: Send + Sync {
    fn get(&self, policy: Option<&ReadPolicy>, key: &Key) -> Result<Record, StoreError>;

    fn batch_get(
        &self,
        policy: Option<&ReadPolicy>,
        batch: &Batch,
        on_result: &(dyn Fn(BatchRead) + Send + Sync),
    ) -> Result<(), StoreError>;
}
