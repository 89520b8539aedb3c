//! Keys, bin values and records
//!
//! A record is addressed by (namespace, set, user key). The store derives
//! the wire digest from set + user key itself; this model keeps the
//! original triple intact so it can.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{StatusCode, StoreError};

/// User-supplied portion of a key.
///
/// `Bytes` keys are valid for single-key operations only; batch requests
/// reject them (see [`Batch::new`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserKey {
    /// UTF-8 string
    Str(String),
    /// 64-bit signed integer
    Int(i64),
    /// Raw byte sequence
    Bytes(Vec<u8>),
}

impl UserKey {
    /// Human-readable kind name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            UserKey::Str(_) => "string",
            UserKey::Int(_) => "integer",
            UserKey::Bytes(_) => "bytes",
        }
    }
}

impl From<&str> for UserKey {
    fn from(s: &str) -> Self {
        UserKey::Str(s.to_string())
    }
}

impl From<String> for UserKey {
    fn from(s: String) -> Self {
        UserKey::Str(s)
    }
}

impl From<i64> for UserKey {
    fn from(i: i64) -> Self {
        UserKey::Int(i)
    }
}

impl From<Vec<u8>> for UserKey {
    fn from(b: Vec<u8>) -> Self {
        UserKey::Bytes(b)
    }
}

/// Fully-qualified record address. A value object: identity is the tuple
/// contents, nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Key {
    pub namespace: String,
    /// Set name; may be empty, but is never defaulted silently.
    pub set: String,
    pub user_key: UserKey,
}

impl Key {
    /// Build a key. The namespace must be non-empty.
    pub fn new(
        namespace: impl Into<String>,
        set: impl Into<String>,
        user_key: UserKey,
    ) -> Result<Self, StoreError> {
        let namespace = namespace.into();
        if namespace.is_empty() {
            return Err(StoreError::invalid_param("namespace must not be empty"));
        }
        Ok(Self {
            namespace,
            set: set.into(),
            user_key,
        })
    }
}

/// Value types a bin can hold. Opaque to the read path beyond recursive
/// conversion at the Python boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StoreValue {
    Null,
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point
    Float(f64),
    /// 128-bit fixed-point decimal for financial precision
    Decimal(Decimal),
    /// UTF-8 string
    Str(String),
    /// Binary data
    Bytes(Vec<u8>),
    /// Ordered list of values
    List(Vec<StoreValue>),
    /// Key-value map
    Map(HashMap<String, StoreValue>),
}

/// Write counter and remaining time-to-live of a record.
///
/// `ttl` is in seconds; 0 means the record does not expire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordMeta {
    pub generation: u32,
    pub ttl: u32,
}

/// A fetched record. Constructed fresh per store response and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub key: Key,
    pub meta: RecordMeta,
    pub bins: HashMap<String, StoreValue>,
}

/// Ordered sequence of keys sharing one namespace and set, built before a
/// multi-key dispatch and immutable once submitted.
#[derive(Debug, Clone)]
pub struct Batch {
    keys: Vec<Key>,
}

impl Batch {
    /// Build a batch from user keys. Any invalid key aborts the whole
    /// batch: a partially-built batch can not be safely submitted.
    ///
    /// Byte-sequence keys are rejected unconditionally here; the store
    /// does not support them in multi-key mode.
    pub fn new(
        namespace: &str,
        set: &str,
        user_keys: Vec<UserKey>,
    ) -> Result<Self, StoreError> {
        let mut keys = Vec::with_capacity(user_keys.len());
        for user_key in user_keys {
            if matches!(user_key, UserKey::Bytes(_)) {
                return Err(StoreError::invalid_param(
                    "key as a byte sequence is not supported in batch requests",
                ));
            }
            keys.push(Key::new(namespace, set, user_key)?);
        }
        Ok(Self { keys })
    }

    pub fn keys(&self) -> &[Key] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// One per-key outcome of a batch dispatch.
///
/// Self-describing: carries its own key, because delivery order need not
/// match request order and callers correlate independently.
#[derive(Debug, Clone)]
pub struct BatchRead {
    pub key: Key,
    pub status: StatusCode,
    /// Present iff `status` is [`StatusCode::Ok`].
    pub record: Option<Record>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_preserves_triple() {
        for user_key in [
            UserKey::from("user-1"),
            UserKey::from(42i64),
            UserKey::from(vec![0u8, 1, 2]),
        ] {
            let key = Key::new("test", "demo", user_key.clone()).unwrap();
            assert_eq!(key.namespace, "test");
            assert_eq!(key.set, "demo");
            assert_eq!(key.user_key, user_key);
        }
    }

    #[test]
    fn test_user_key_kind_names() {
        assert_eq!(UserKey::from("k").kind(), "string");
        assert_eq!(UserKey::from(1i64).kind(), "integer");
        assert_eq!(UserKey::from(vec![1u8]).kind(), "bytes");
    }

    #[test]
    fn test_key_rejects_empty_namespace() {
        let err = Key::new("", "demo", UserKey::from("k")).unwrap_err();
        assert_eq!(err.code, StatusCode::InvalidParam);
    }

    #[test]
    fn test_key_allows_empty_set() {
        let key = Key::new("test", "", UserKey::from(1i64)).unwrap();
        assert_eq!(key.set, "");
    }

    #[test]
    fn test_batch_preserves_input_order() {
        let batch = Batch::new(
            "test",
            "demo",
            vec![UserKey::from("a"), UserKey::from(7i64), UserKey::from("b")],
        )
        .unwrap();
        assert_eq!(batch.len(), 3);
        assert_eq!(batch.keys()[0].user_key, UserKey::from("a"));
        assert_eq!(batch.keys()[1].user_key, UserKey::from(7i64));
        assert_eq!(batch.keys()[2].user_key, UserKey::from("b"));
    }

    #[test]
    fn test_batch_rejects_byte_keys() {
        let err = Batch::new(
            "test",
            "demo",
            vec![UserKey::from("ok"), UserKey::from(vec![1u8, 2])],
        )
        .unwrap_err();
        assert_eq!(err.code, StatusCode::InvalidParam);
    }

    #[test]
    fn test_batch_rejects_empty_namespace() {
        let err = Batch::new("", "demo", vec![UserKey::from("a")]).unwrap_err();
        assert_eq!(err.code, StatusCode::InvalidParam);
    }

    #[test]
    fn test_empty_batch() {
        let batch = Batch::new("test", "demo", Vec::new()).unwrap();
        assert!(batch.is_empty());
    }
}
