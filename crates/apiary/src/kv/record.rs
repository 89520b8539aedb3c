//! Record codec: native records to caller triples

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyTuple};

use apiary_kv::{Record, RecordMeta};

use super::conversion::store_value_to_py;
use super::key::key_to_py;

/// `{'gen': int, 'ttl': int}` for a record's metadata.
pub fn meta_to_py(py: Python<'_>, meta: &RecordMeta) -> PyResult<Py<PyDict>> {
    let dict = PyDict::new(py);
    dict.set_item("gen", meta.generation)?;
    dict.set_item("ttl", meta.ttl)?;
    Ok(dict.unbind())
}

/// `(key, meta, bins)` triple for a fetched record.
pub fn record_to_py(py: Python<'_>, record: &Record) -> PyResult<Py<PyTuple>> {
    let key = key_to_py(py, &record.key)?;
    let meta = meta_to_py(py, &record.meta)?;

    let bins = PyDict::new(py);
    for (name, value) in &record.bins {
        bins.set_item(name, store_value_to_py(py, value)?)?;
    }

    let items: Vec<PyObject> = vec![key.into_any(), meta.into_any(), bins.into_any().unbind()];
    Ok(PyTuple::new(py, items)?.unbind())
}
