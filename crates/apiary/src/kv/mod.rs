//! Python bindings for the key-value read path

use pyo3::prelude::*;

pub mod client;
pub mod conversion;
pub mod errors;
pub mod key;
pub mod policy;
pub mod record;

/// Register the kv surface on the module
pub fn register_module(py: Python<'_>, m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(client::client, m)?)?;
    m.add_class::<client::Client>()?;
    m.add("KvError", py.get_type::<errors::KvError>())?;
    policy::register_constants(m)?;
    Ok(())
}
