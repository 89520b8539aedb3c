//! Read-policy configuration

use serde::{Deserialize, Serialize};

/// Whether the store keeps the full user key with the record or only its
/// digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeyPolicy {
    #[default]
    Digest,
    Send,
}

impl KeyPolicy {
    /// Decode the caller-visible numeric constant.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(KeyPolicy::Digest),
            1 => Some(KeyPolicy::Send),
            _ => None,
        }
    }
}

/// Which replica serves a read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Replica {
    #[default]
    Master,
    Any,
}

impl Replica {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Replica::Master),
            1 => Some(Replica::Any),
            _ => None,
        }
    }
}

/// Per-call read configuration.
///
/// A call site that has no caller-supplied policy passes `None` to the
/// store, never a constructed default: the store keeps its own defaults
/// and per-call override semantics stay intact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadPolicy {
    pub key: KeyPolicy,
    /// Request deadline in milliseconds.
    pub timeout_ms: u32,
    pub replica: Replica,
}

impl Default for ReadPolicy {
    fn default() -> Self {
        Self {
            key: KeyPolicy::default(),
            timeout_ms: 1000,
            replica: Replica::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let policy = ReadPolicy::default();
        assert_eq!(policy.key, KeyPolicy::Digest);
        assert_eq!(policy.timeout_ms, 1000);
        assert_eq!(policy.replica, Replica::Master);
    }

    #[test]
    fn test_key_policy_codes() {
        assert_eq!(KeyPolicy::from_code(0), Some(KeyPolicy::Digest));
        assert_eq!(KeyPolicy::from_code(1), Some(KeyPolicy::Send));
        assert_eq!(KeyPolicy::from_code(2), None);
    }

    #[test]
    fn test_replica_codes() {
        assert_eq!(Replica::from_code(0), Some(Replica::Master));
        assert_eq!(Replica::from_code(1), Some(Replica::Any));
        assert_eq!(Replica::from_code(-1), None);
    }
}
