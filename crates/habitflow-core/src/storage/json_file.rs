//! The single JSON read/write path shared by every store.
//!
//! Corrupt or missing data is never fatal: loading falls back to the
//! default value and reports which of the two happened, so callers and
//! tests can tell a legitimately empty store from one recovered after a
//! parse failure.

use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};

use crate::error::StoreError;

/// How a load resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// File existed and parsed.
    Loaded,
    /// File absent; started from the default value.
    Missing,
    /// File existed but did not parse; contents discarded.
    Recovered,
}

/// Load a value from a JSON file, falling back to `T::default()` on a
/// missing file or a parse failure. Parse failures are logged and
/// reported as [`LoadOutcome::Recovered`].
pub fn load_or_default<T>(path: &Path) -> (T, LoadOutcome)
where
    T: DeserializeOwned + Default,
{
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(_) => return (T::default(), LoadOutcome::Missing),
    };

    match serde_json::from_str(&content) {
        Ok(value) => (value, LoadOutcome::Loaded),
        Err(err) => {
            tracing::warn!(path = %path.display(), %err, "discarding corrupt store file");
            (T::default(), LoadOutcome::Recovered)
        }
    }
}

/// Persist a value as pretty-printed JSON.
///
/// # Errors
/// Returns an error if serialization or the filesystem write fails.
pub fn save<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let content = serde_json::to_string_pretty(value).map_err(|source| StoreError::EncodeFailed {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, content).map_err(|source| StoreError::WriteFailed {
        path: path.to_path_buf(),
        source,
    })
}
