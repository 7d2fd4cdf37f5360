//! Per-profile stores over a [`KeyValueStore`].
//!
//! Reads never fail: a missing key or malformed value degrades to the typed
//! default. Writes are best-effort: a rejected write is logged and dropped,
//! and the caller carries on with its in-memory value.
//!
//! [`KeyValueStore`]: crate::backend::KeyValueStore

pub mod checkpoints;
pub mod identity;
pub mod level;
pub mod progress;
pub mod rewards;

use serde_json::Value;

use crate::backend::KeyValueStore;

/// Read and parse a JSON value. `None` when absent or malformed.
pub(crate) fn read_json<S: KeyValueStore + ?Sized>(store: &S, key: &str) -> Option<Value> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring malformed value at {}: {}", key, e);
            None
        }
    }
}

/// Write a value, swallowing failures. Returns whether it was persisted.
pub(crate) fn write<S: KeyValueStore + ?Sized>(store: &mut S, key: &str, value: &str) -> bool {
    match store.set(key, value) {
        Ok(()) => {
            log::debug!("Persisted {} ({} bytes)", key, value.len());
            true
        }
        Err(e) => {
            log::warn!("Write to {} dropped: {}", key, e);
            false
        }
    }
}

/// Serialize and write, swallowing failures.
pub(crate) fn write_json<S, T>(store: &mut S, key: &str, value: &T) -> bool
where
    S: KeyValueStore + ?Sized,
    T: serde::Serialize + ?Sized,
{
    match serde_json::to_string(value) {
        Ok(json) => write(store, key, &json),
        Err(e) => {
            log::warn!("Could not serialize value for {}: {}", key, e);
            false
        }
    }
}

/// Strings of a JSON array; anything else yields nothing.
pub(crate) fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}
