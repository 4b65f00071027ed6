// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Parse helper functions for configuration.

use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Print a warning for an unrecognized config key.
pub(super) fn warn_unknown_key(path: &Path, key: &str) {
    eprintln!(
        "vouch: warning: {}: unrecognized field `{}` (ignored)",
        path.display(),
        key
    );
}

/// Warn about every key in `table` not listed in `known`.
pub(super) fn warn_unknown_fields(path: &Path, prefix: &str, table: &toml::Table, known: &[&str]) {
    for key in table.keys() {
        if !known.contains(&key.as_str()) {
            warn_unknown_key(path, &format!("{}.{}", prefix, key));
        }
    }
}

/// Deserialize an optional `[section]`, warning on unknown keys.
///
/// A missing section yields the type's default.
pub(super) fn table_section<T>(
    path: &Path,
    name: &str,
    value: Option<toml::Value>,
    known: &[&str],
) -> Result<T>
where
    T: DeserializeOwned + Default,
{
    match value {
        None => Ok(T::default()),
        Some(toml::Value::Table(t)) => {
            warn_unknown_fields(path, name, &t, known);
            toml::Value::Table(t).try_into().map_err(|e: toml::de::Error| {
                Error::Config {
                    message: format!("{}: {}", name, e.message()),
                    path: Some(path.to_path_buf()),
                }
            })
        }
        Some(_) => Err(Error::Config {
            message: format!("`{}` must be a table", name),
            path: Some(path.to_path_buf()),
        }),
    }
}
