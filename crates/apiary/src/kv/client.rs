//! Client pyclass: single and batch reads against a connected cluster

use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList, PyTuple};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

use apiary_kv::StoreError;
use apiary_kv_client::{ops, MemoryCluster, ReadOutcome, StoreClient};

use super::errors::{invalid_param, store_error_to_py};
use super::key::{key_from_py, key_to_py, user_key_from_py};
use super::policy::read_policy_from_py;
use super::record::{meta_to_py, record_to_py};

/// Parse the caller configuration mapping. Unknown options fail fast,
/// like unknown policy options do.
fn parse_config(config: &Bound<'_, PyDict>) -> PyResult<Vec<(String, u16)>> {
    let mut hosts = Vec::new();
    for (name, value) in config.iter() {
        let name: String = name
            .extract()
            .map_err(|_| invalid_param("config keys must be strings"))?;
        match name.as_str() {
            "hosts" => {
                hosts = value.extract::<Vec<(String, u16)>>().map_err(|_| {
                    invalid_param("config option 'hosts' must be a list of (address, port) tuples")
                })?;
            }
            other => {
                return Err(invalid_param(format!(
                    "unrecognized config option '{other}'"
                )))
            }
        }
    }
    Ok(hosts)
}

/// Handle to a cluster.
///
/// The handle is an explicit capability passed around by the caller;
/// there is no process-wide client. Operations raise `KvError` with code
/// 11 once the handle is closed.
#[pyclass]
pub struct Client {
    store: Arc<dyn StoreClient>,
    hosts: Vec<(String, u16)>,
    connected: AtomicBool,
}

impl Client {
    fn ensure_connected(&self) -> PyResult<()> {
        if !self.connected.load(Ordering::SeqCst) {
            return Err(store_error_to_py(StoreError::not_connected()));
        }
        Ok(())
    }
}

/// Build a client from a configuration mapping.
///
/// The handle is unusable until `connect` is called:
///
/// ```python
/// client = apiary.client({'hosts': [('127.0.0.1', 3000)]}).connect()
/// ```
#[pyfunction]
#[pyo3(signature = (config = None))]
pub fn client(config: Option<&Bound<'_, PyDict>>) -> PyResult<Client> {
    let hosts = match config {
        Some(config) => parse_config(config)?,
        None => Vec::new(),
    };
    Ok(Client {
        store: Arc::new(MemoryCluster::new()),
        hosts,
        connected: AtomicBool::new(false),
    })
}

#[pymethods]
impl Client {
    /// Mark the handle usable and return it, so construction chains:
    /// `apiary.client(config).connect()`. The in-process backend has no
    /// sockets to open; network transports hook their setup here.
    fn connect(slf: PyRef<'_, Self>) -> PyRef<'_, Self> {
        if !slf.connected.swap(true, Ordering::SeqCst) {
            info!(hosts = ?slf.hosts, "client connected");
        }
        slf
    }

    /// Invalidate the handle. Further operations raise `KvError`.
    fn close(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Read one record.
    ///
    /// Returns `(key, meta, bins)`. A missing record is not an error:
    /// meta and bins come back as `None` and the key still identifies
    /// what was asked for.
    #[pyo3(signature = (key, policy = None))]
    fn get<'py>(
        &self,
        py: Python<'py>,
        key: &Bound<'py, PyAny>,
        policy: Option<&Bound<'py, PyDict>>,
    ) -> PyResult<Py<PyTuple>> {
        self.ensure_connected()?;
        let native_key = key_from_py(key)?;
        let read_policy = read_policy_from_py(policy)?;

        let store = Arc::clone(&self.store);
        let outcome = py
            .allow_threads(|| ops::read_one(store.as_ref(), read_policy.as_ref(), &native_key))
            .map_err(store_error_to_py)?;

        match outcome {
            ReadOutcome::Found(record) => record_to_py(py, &record),
            ReadOutcome::Missing(missing) => {
                let items: Vec<PyObject> =
                    vec![key_to_py(py, &missing)?.into_any(), py.None(), py.None()];
                Ok(PyTuple::new(py, items)?.unbind())
            }
        }
    }

    /// Check for a record without fetching its bins.
    ///
    /// Returns `(key, meta)`; meta is `None` when the record is absent.
    #[pyo3(signature = (key, policy = None))]
    fn exists<'py>(
        &self,
        py: Python<'py>,
        key: &Bound<'py, PyAny>,
        policy: Option<&Bound<'py, PyDict>>,
    ) -> PyResult<Py<PyTuple>> {
        self.ensure_connected()?;
        let native_key = key_from_py(key)?;
        let read_policy = read_policy_from_py(policy)?;

        let store = Arc::clone(&self.store);
        let outcome = py
            .allow_threads(|| ops::read_one(store.as_ref(), read_policy.as_ref(), &native_key))
            .map_err(store_error_to_py)?;

        let items: Vec<PyObject> = match outcome {
            ReadOutcome::Found(record) => vec![
                key_to_py(py, &record.key)?.into_any(),
                meta_to_py(py, &record.meta)?.into_any(),
            ],
            ReadOutcome::Missing(missing) => {
                vec![key_to_py(py, &missing)?.into_any(), py.None()]
            }
        };
        Ok(PyTuple::new(py, items)?.unbind())
    }

    /// Read many records sharing one namespace and set.
    ///
    /// Returns successes only, in delivery order; callers must not rely
    /// on positional correspondence with `keys`. A single invalid key
    /// value fails the whole batch before anything is dispatched.
    #[pyo3(signature = (namespace, set, keys, policy = None))]
    fn bulk_get<'py>(
        &self,
        py: Python<'py>,
        namespace: String,
        set: String,
        keys: &Bound<'py, PyAny>,
        policy: Option<&Bound<'py, PyDict>>,
    ) -> PyResult<Py<PyList>> {
        self.ensure_connected()?;

        let items: Vec<Bound<'py, PyAny>> = keys
            .extract()
            .map_err(|_| invalid_param("keys must be a sequence of key values"))?;
        let mut user_keys = Vec::with_capacity(items.len());
        for item in &items {
            user_keys.push(user_key_from_py(item)?);
        }
        let read_policy = read_policy_from_py(policy)?;

        let store = Arc::clone(&self.store);
        let records = py
            .allow_threads(|| {
                ops::read_batch(
                    store.as_ref(),
                    read_policy.as_ref(),
                    &namespace,
                    &set,
                    user_keys,
                )
            })
            .map_err(store_error_to_py)?;

        let out = PyList::empty(py);
        for record in &records {
            out.append(record_to_py(py, record)?)?;
        }
        Ok(out.unbind())
    }

    fn __repr__(&self) -> String {
        format!(
            "Client(hosts={:?}, connected={})",
            self.hosts,
            self.is_connected()
        )
    }
}
