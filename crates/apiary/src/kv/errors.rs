//! Error codec: native store errors to Python exceptions

use pyo3::create_exception;
use pyo3::exceptions::PyException;
use pyo3::PyErr;

use apiary_kv::StoreError;

use crate::config::get_config;

create_exception!(
    apiary,
    KvError,
    PyException,
    "Store operation failure; `args` is `(code, message)`."
);

/// Convert a store error into the module exception, preserving the
/// original status code and message as the exception args. Code 0 never
/// reaches this point: errors are only constructed for failures.
pub fn store_error_to_py(err: StoreError) -> PyErr {
    let message = if get_config().sanitize_errors {
        err.message.lines().next().unwrap_or_default().to_string()
    } else {
        err.message
    };
    KvError::new_err((err.code.code(), message))
}

/// Caller-error shorthand used by the codecs.
pub fn invalid_param(message: impl Into<String>) -> PyErr {
    store_error_to_py(StoreError::invalid_param(message))
}
