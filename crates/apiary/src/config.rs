//! Runtime configuration and logging setup

use once_cell::sync::OnceCell;
use pyo3::exceptions::PyRuntimeError;
use pyo3::prelude::*;
use std::sync::RwLock;
use tracing_subscriber::EnvFilter;

/// Process-wide bridge configuration
#[derive(Debug, Clone, Default)]
pub struct BridgeConfig {
    /// Trim store error messages to their first line before they reach
    /// Python exceptions.
    pub sanitize_errors: bool,
}

static GLOBAL_CONFIG: RwLock<BridgeConfig> = RwLock::new(BridgeConfig {
    sanitize_errors: false,
});

/// Snapshot of the current configuration.
pub fn get_config() -> BridgeConfig {
    GLOBAL_CONFIG
        .read()
        .map(|guard| guard.clone())
        .unwrap_or_default()
}

/// Update configuration options. Only the options passed change.
#[pyfunction]
#[pyo3(signature = (sanitize_errors = None))]
pub fn configure(sanitize_errors: Option<bool>) -> PyResult<()> {
    let mut guard = GLOBAL_CONFIG
        .write()
        .map_err(|e| PyRuntimeError::new_err(format!("config lock poisoned: {e}")))?;
    if let Some(sanitize) = sanitize_errors {
        guard.sanitize_errors = sanitize;
    }
    Ok(())
}

static LOGGING: OnceCell<()> = OnceCell::new();

/// Install the process-wide tracing subscriber.
///
/// `filter` follows `RUST_LOG` syntax; when absent, the `RUST_LOG`
/// environment variable wins, then `"info"`. Subsequent calls are
/// no-ops.
#[pyfunction]
#[pyo3(signature = (filter = None))]
pub fn enable_logging(filter: Option<String>) -> PyResult<()> {
    LOGGING.get_or_init(|| {
        let filter = filter.map(EnvFilter::new).unwrap_or_else(|| {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
        });
        let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
    });
    Ok(())
}

/// Register the configuration functions
pub fn register_functions(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(configure, m)?)?;
    m.add_function(wrap_pyfunction!(enable_logging, m)?)?;
    Ok(())
}
