//! apiary: Python bindings for the apiary key-value store
//!
//! Key, policy and record marshaling happens in Rust; Python sees plain
//! tuples, dicts and the module-level `KvError` exception.
//!
//! # Usage
//! ```python
//! import apiary
//!
//! client = apiary.client({'hosts': [('127.0.0.1', 3000)]}).connect()
//!
//! (key, meta, bins) = client.get(('test', 'demo', 'user-1'))
//! records = client.bulk_get('test', 'demo', ['user-1', 'user-2'])
//! ```

use pyo3::prelude::*;

pub mod config;
mod kv;

/// apiary Python module
#[pymodule]
fn apiary(py: Python, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    config::register_functions(m)?;
    kv::register_module(py, m)?;

    Ok(())
}
