//! Dynamic value conversion from native bin values to Python objects
//!
//! Recursion mirrors the store's nesting. The reverse direction belongs
//! to the write path, which this module does not expose.

use pyo3::prelude::*;
use pyo3::types::{PyBytes, PyDict, PyList};

use apiary_kv::StoreValue;

/// Convert a bin value to the corresponding Python object.
pub fn store_value_to_py(py: Python<'_>, value: &StoreValue) -> PyResult<PyObject> {
    match value {
        StoreValue::Null => Ok(py.None()),
        StoreValue::Int(i) => Ok((*i).into_pyobject(py)?.into_any().unbind()),
        StoreValue::Float(f) => Ok((*f).into_pyobject(py)?.into_any().unbind()),
        StoreValue::Str(s) => Ok(s.as_str().into_pyobject(py)?.into_any().unbind()),
        StoreValue::Bytes(b) => Ok(PyBytes::new(py, b).into_any().unbind()),
        StoreValue::Decimal(d) => {
            let decimal_mod = py.import("decimal")?;
            let decimal_class = decimal_mod.getattr("Decimal")?;
            let py_decimal = decimal_class.call1((d.to_string(),))?;
            Ok(py_decimal.unbind())
        }
        StoreValue::List(items) => {
            let py_list = PyList::empty(py);
            for item in items {
                py_list.append(store_value_to_py(py, item)?)?;
            }
            Ok(py_list.into_any().unbind())
        }
        StoreValue::Map(map) => {
            let py_dict = PyDict::new(py);
            for (k, v) in map {
                py_dict.set_item(k, store_value_to_py(py, v)?)?;
            }
            Ok(py_dict.into_any().unbind())
        }
    }
}
