//! Status codes and the store error type

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Enumerated operation status.
///
/// Discriminants are part of the caller contract and are passed through
/// to Python unchanged. `Ok` is the "no error" sentinel and never appears
/// inside a raised error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum StatusCode {
    /// Malformed key, policy or batch input, detected before dispatch
    InvalidParam = -2,
    /// Internal invariant violation in the client library
    ClientInternal = -1,
    Ok = 0,
    /// Store-reported failure
    ServerError = 1,
    RecordNotFound = 2,
    Timeout = 9,
    /// Handle is invalid or closed
    NotConnected = 11,
}

impl StatusCode {
    /// Numeric code as seen by callers.
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Error raised by store operations: the original status code plus a
/// human-readable message.
///
/// Constructed fresh at each failure site and never mutated afterwards,
/// so a stale code can not leak between branches.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} (code {})", .message, .code.code())]
pub struct StoreError {
    pub code: StatusCode,
    pub message: String,
}

impl StoreError {
    pub fn new(code: StatusCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn invalid_param(message: impl Into<String>) -> Self {
        Self::new(StatusCode::InvalidParam, message)
    }

    pub fn not_connected() -> Self {
        Self::new(StatusCode::NotConnected, "not connected to the cluster")
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::RecordNotFound, "record not found")
    }

    pub fn server(message: impl Into<String>) -> Self {
        Self::new(StatusCode::ServerError, message)
    }

    /// Internal invariant violation, e.g. a malformed native record.
    pub fn fatal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::ClientInternal, message)
    }

    pub fn is_not_found(&self) -> bool {
        self.code == StatusCode::RecordNotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_numbers() {
        assert_eq!(StatusCode::InvalidParam.code(), -2);
        assert_eq!(StatusCode::ClientInternal.code(), -1);
        assert_eq!(StatusCode::Ok.code(), 0);
        assert_eq!(StatusCode::ServerError.code(), 1);
        assert_eq!(StatusCode::RecordNotFound.code(), 2);
        assert_eq!(StatusCode::Timeout.code(), 9);
        assert_eq!(StatusCode::NotConnected.code(), 11);
    }

    #[test]
    fn test_error_display_carries_code() {
        let err = StoreError::invalid_param("key is invalid");
        assert_eq!(err.to_string(), "key is invalid (code -2)");
    }

    #[test]
    fn test_not_found_predicate() {
        assert!(StoreError::not_found().is_not_found());
        assert!(!StoreError::server("boom").is_not_found());
    }

    #[test]
    fn test_fatal_maps_to_client_internal() {
        let err = StoreError::fatal("malformed native record");
        assert_eq!(err.code, StatusCode::ClientInternal);
    }

    #[test]
    fn test_errors_are_fresh_values() {
        let a = StoreError::not_connected();
        let b = StoreError::not_connected();
        assert_eq!(a, b);
        assert_eq!(a.code, StatusCode::NotConnected);
    }
}
