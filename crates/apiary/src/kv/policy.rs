//! Policy codec: caller dicts to typed read policies

use pyo3::prelude::*;
use pyo3::types::PyDict;

use apiary_kv::{KeyPolicy, ReadPolicy, Replica};

use super::errors::invalid_param;

pub const POLICY_KEY_DIGEST: i64 = 0;
pub const POLICY_KEY_SEND: i64 = 1;
pub const POLICY_REPLICA_MASTER: i64 = 0;
pub const POLICY_REPLICA_ANY: i64 = 1;

pub fn register_constants(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("POLICY_KEY_DIGEST", POLICY_KEY_DIGEST)?;
    m.add("POLICY_KEY_SEND", POLICY_KEY_SEND)?;
    m.add("POLICY_REPLICA_MASTER", POLICY_REPLICA_MASTER)?;
    m.add("POLICY_REPLICA_ANY", POLICY_REPLICA_ANY)?;
    Ok(())
}

/// Convert an optional caller policy dict.
///
/// Absent and empty dicts both yield `None`: the store must see "no
/// override", not a constructed default. Unrecognized option names fail
/// fast instead of masking caller typos.
pub fn read_policy_from_py(policy: Option<&Bound<'_, PyDict>>) -> PyResult<Option<ReadPolicy>> {
    let Some(dict) = policy else {
        return Ok(None);
    };
    if dict.is_empty() {
        return Ok(None);
    }

    let mut out = ReadPolicy::default();
    for (name, value) in dict.iter() {
        let name: String = name
            .extract()
            .map_err(|_| invalid_param("policy option names must be strings"))?;
        match name.as_str() {
            "key" => {
                let code: i64 = value
                    .extract()
                    .map_err(|_| invalid_param("policy option 'key' must be an integer"))?;
                out.key = KeyPolicy::from_code(code).ok_or_else(|| {
                    invalid_param(format!("policy option 'key' has no meaning for value {code}"))
                })?;
            }
            "timeout" => {
                out.timeout_ms = value.extract().map_err(|_| {
                    invalid_param("policy option 'timeout' must be milliseconds as a non-negative integer")
                })?;
            }
            "replica" => {
                let code: i64 = value
                    .extract()
                    .map_err(|_| invalid_param("policy option 'replica' must be an integer"))?;
                out.replica = Replica::from_code(code).ok_or_else(|| {
                    invalid_param(format!(
                        "policy option 'replica' has no meaning for value {code}"
                    ))
                })?;
            }
            other => {
                return Err(invalid_param(format!(
                    "unrecognized policy option '{other}'"
                )))
            }
        }
    }
    Ok(Some(out))
}
