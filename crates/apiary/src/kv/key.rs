//! Key codec: caller tuples to native keys and back
//!
//! The caller representation is a `(namespace, set, key)` tuple where the
//! key element is a string, an int or a bytes-like object. Decoding back
//! to Python reuses the retained user key, never a digest.

use pyo3::prelude::*;
use pyo3::types::{PyBool, PyByteArray, PyBytes, PyInt, PyString, PyTuple};

use apiary_kv::{Key, UserKey};

use super::errors::{invalid_param, store_error_to_py};

/// Convert a Python key value to a [`UserKey`].
pub fn user_key_from_py(obj: &Bound<'_, PyAny>) -> PyResult<UserKey> {
    // bool is an int subclass in Python; a True/False key is a caller error
    if obj.is_instance_of::<PyBool>() {
        return Err(invalid_param("key is invalid: bool is not a supported key type"));
    }

    if let Ok(s) = obj.downcast::<PyString>() {
        return Ok(UserKey::Str(s.extract()?));
    }

    if obj.is_instance_of::<PyInt>() {
        return obj
            .extract::<i64>()
            .map(UserKey::Int)
            .map_err(|_| invalid_param("integer key exceeds the 64-bit signed range"));
    }

    if let Ok(b) = obj.downcast::<PyBytes>() {
        return Ok(UserKey::Bytes(b.as_bytes().to_vec()));
    }

    if let Ok(b) = obj.downcast::<PyByteArray>() {
        return Ok(UserKey::Bytes(b.to_vec()));
    }

    let type_name = obj
        .get_type()
        .name()
        .map(|n| n.to_string())
        .unwrap_or_else(|_| "unknown".to_string());
    Err(invalid_param(format!(
        "key is invalid: unsupported type {type_name}"
    )))
}

/// Convert a Python `(namespace, set, key)` tuple to a native [`Key`].
pub fn key_from_py(obj: &Bound<'_, PyAny>) -> PyResult<Key> {
    let tuple = obj
        .downcast::<PyTuple>()
        .map_err(|_| invalid_param("key must be a (namespace, set, key) tuple"))?;
    if tuple.len() != 3 {
        return Err(invalid_param(format!(
            "key tuple must have 3 elements, got {}",
            tuple.len()
        )));
    }

    let namespace: String = tuple
        .get_item(0)?
        .extract()
        .map_err(|_| invalid_param("namespace must be a string"))?;
    let set: String = tuple
        .get_item(1)?
        .extract()
        .map_err(|_| invalid_param("set name must be a string"))?;
    let user_key = user_key_from_py(&tuple.get_item(2)?)?;

    Key::new(namespace, set, user_key).map_err(store_error_to_py)
}

/// Reproduce the caller tuple for a native key, exactly as supplied.
pub fn key_to_py(py: Python<'_>, key: &Key) -> PyResult<Py<PyTuple>> {
    let user: PyObject = match &key.user_key {
        UserKey::Str(s) => s.as_str().into_pyobject(py)?.into_any().unbind(),
        UserKey::Int(i) => (*i).into_pyobject(py)?.into_any().unbind(),
        UserKey::Bytes(b) => PyBytes::new(py, b).into_any().unbind(),
    };
    let items: Vec<PyObject> = vec![
        key.namespace.as_str().into_pyobject(py)?.into_any().unbind(),
        key.set.as_str().into_pyobject(py)?.into_any().unbind(),
        user,
    ];
    Ok(PyTuple::new(py, items)?.unbind())
}
