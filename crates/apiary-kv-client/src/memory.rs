//! In-process cluster backend
//!
//! Partitions the keyspace into shards behind `parking_lot` locks and
//! serves batch sub-requests from one worker thread per non-empty shard
//! group, so batch callbacks genuinely arrive concurrently and out of
//! request order, the way a networked cluster delivers them.

use parking_lot::RwLock;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::thread;
use std::time::{Duration, Instant};
use tracing::debug;

use apiary_kv::{
    Batch, BatchRead, Key, ReadPolicy, Record, RecordMeta, StatusCode, StoreError, StoreValue,
};

use crate::client::StoreClient;

/// Number of shards (power of 2 for cheap modulo)
const NUM_SHARDS: usize = 16;

/// Stored record state plus expiry bookkeeping
#[derive(Debug, Clone)]
struct Entry {
    bins: HashMap<String, StoreValue>,
    generation: u32,
    expires_at: Option<Instant>,
}

impl Entry {
    fn is_expired(&self) -> bool {
        self.expires_at
            .map(|exp| Instant::now() >= exp)
            .unwrap_or(false)
    }

    /// Remaining TTL in whole seconds; 0 means no expiry.
    fn remaining_ttl(&self) -> u32 {
        self.expires_at
            .map(|exp| exp.saturating_duration_since(Instant::now()).as_secs() as u32)
            .unwrap_or(0)
    }
}

struct Shard {
    data: RwLock<HashMap<Key, Entry>>,
}

impl Shard {
    fn new() -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
        }
    }
}

/// Sharded in-memory cluster implementing [`StoreClient`].
///
/// This is the backend behind the default connect path, and what tests
/// and benches run against. The write surface (`put`) is Rust-level
/// seeding only; the Python bindings expose reads exclusively.
pub struct MemoryCluster {
    shards: Vec<Shard>,
}

impl MemoryCluster {
    pub fn new() -> Self {
        Self {
            shards: (0..NUM_SHARDS).map(|_| Shard::new()).collect(),
        }
    }

    fn shard_index(&self, key: &Key) -> usize {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        (hasher.finish() as usize) % NUM_SHARDS
    }

    /// Seed or overwrite a record. `ttl` is in seconds, 0 stores without
    /// expiry. Returns the record's new generation.
    pub fn put(&self, key: &Key, bins: HashMap<String, StoreValue>, ttl: u32) -> u32 {
        let shard = &self.shards[self.shard_index(key)];
        let mut guard = shard.data.write();
        let generation = match guard.get(key) {
            Some(existing) if !existing.is_expired() => existing.generation + 1,
            _ => 1,
        };
        let expires_at = (ttl > 0).then(|| Instant::now() + Duration::from_secs(u64::from(ttl)));
        guard.insert(
            key.clone(),
            Entry {
                bins,
                generation,
                expires_at,
            },
        );
        generation
    }

    /// Live record count across all shards.
    pub fn len(&self) -> usize {
        self.shards.iter().map(|s| s.data.read().len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Fetch a record, treating expired entries as absent.
    fn fetch(&self, key: &Key) -> Option<Record> {
        let shard = &self.shards[self.shard_index(key)];
        let guard = shard.data.read();
        let entry = guard.get(key)?;
        if entry.is_expired() {
            return None;
        }
        Some(Record {
            key: key.clone(),
            meta: RecordMeta {
                generation: entry.generation,
                ttl: entry.remaining_ttl(),
            },
            bins: entry.bins.clone(),
        })
    }

    fn read_key(&self, key: &Key) -> BatchRead {
        match self.fetch(key) {
            Some(record) => BatchRead {
                key: key.clone(),
                status: StatusCode::Ok,
                record: Some(record),
            },
            None => BatchRead {
                key: key.clone(),
                status: StatusCode::RecordNotFound,
                record: None,
            },
        }
    }
}

impl Default for MemoryCluster {
    fn default() -> Self {
        Self::new()
    }
}

impl StoreClient for MemoryCluster {
    fn get(&self, _policy: Option<&ReadPolicy>, key: &Key) -> Result<Record, StoreError> {
        self.fetch(key).ok_or_else(StoreError::not_found)
    }

    fn batch_get(
        &self,
        _policy: Option<&ReadPolicy>,
        batch: &Batch,
        on_result: &(dyn Fn(BatchRead) + Send + Sync),
    ) -> Result<(), StoreError> {
        debug!(keys = batch.len(), "dispatching batch read");

        // One sub-request per shard group, mirroring per-node dispatch
        let mut groups: Vec<Vec<&Key>> = vec![Vec::new(); NUM_SHARDS];
        for key in batch.keys() {
            groups[self.shard_index(key)].push(key);
        }

        thread::scope(|scope| {
            for group in groups.iter().filter(|g| !g.is_empty()) {
                scope.spawn(move || {
                    for key in group {
                        on_result(self.read_key(key));
                    }
                });
            }
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apiary_kv::UserKey;

    fn key(user: &str) -> Key {
        Key::new("test", "demo", UserKey::from(user)).unwrap()
    }

    fn bins(value: i64) -> HashMap<String, StoreValue> {
        HashMap::from([("n".to_string(), StoreValue::Int(value))])
    }

    #[test]
    fn test_put_then_get() {
        let cluster = MemoryCluster::new();
        cluster.put(&key("a"), bins(1), 0);

        let record = cluster.get(None, &key("a")).unwrap();
        assert_eq!(record.key, key("a"));
        assert_eq!(record.meta.generation, 1);
        assert_eq!(record.meta.ttl, 0);
        assert_eq!(record.bins.get("n"), Some(&StoreValue::Int(1)));
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let cluster = MemoryCluster::new();
        let err = cluster.get(None, &key("nope")).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_overwrite_bumps_generation() {
        let cluster = MemoryCluster::new();
        assert_eq!(cluster.put(&key("a"), bins(1), 0), 1);
        assert_eq!(cluster.put(&key("a"), bins(2), 0), 2);

        let record = cluster.get(None, &key("a")).unwrap();
        assert_eq!(record.meta.generation, 2);
        assert_eq!(record.bins.get("n"), Some(&StoreValue::Int(2)));
    }

    #[test]
    fn test_ttl_reported_in_meta() {
        let cluster = MemoryCluster::new();
        cluster.put(&key("a"), bins(1), 120);

        let record = cluster.get(None, &key("a")).unwrap();
        assert!(record.meta.ttl > 0 && record.meta.ttl <= 120);
    }

    #[test]
    fn test_batch_reports_per_key_status() {
        let cluster = MemoryCluster::new();
        cluster.put(&key("hit"), bins(1), 0);

        let batch = Batch::new(
            "test",
            "demo",
            vec![UserKey::from("hit"), UserKey::from("miss")],
        )
        .unwrap();

        let results = parking_lot::Mutex::new(Vec::new());
        cluster
            .batch_get(None, &batch, &|read| results.lock().push(read))
            .unwrap();

        let results = results.into_inner();
        assert_eq!(results.len(), 2);
        for read in &results {
            match read.key.user_key {
                UserKey::Str(ref s) if s == "hit" => {
                    assert_eq!(read.status, StatusCode::Ok);
                    assert!(read.record.is_some());
                }
                _ => {
                    assert_eq!(read.status, StatusCode::RecordNotFound);
                    assert!(read.record.is_none());
                }
            }
        }
    }

    #[test]
    fn test_len_counts_records() {
        let cluster = MemoryCluster::new();
        assert!(cluster.is_empty());
        cluster.put(&key("a"), bins(1), 0);
        cluster.put(&key("b"), bins(2), 0);
        assert_eq!(cluster.len(), 2);
    }
}
