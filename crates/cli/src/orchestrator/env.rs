// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Snapshot of the process environment used by setup.

use std::collections::BTreeMap;

use crate::error::{Error, Result};

/// Immutable view of environment variables.
///
/// Setup reads through this snapshot rather than `std::env`, so tests can
/// supply their own variables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    vars: BTreeMap<String, String>,
}

impl Environment {
    /// Capture the current process environment. Non-UTF-8 entries are skipped.
    pub fn from_process() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect();
        Self { vars }
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Value of `name`, treating an empty or blank value as unset.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars
            .get(name)
            .map(String::as_str)
            .filter(|v| !v.trim().is_empty())
    }

    /// Fail with every missing variable, in the order given.
    pub fn require(&self, required: &[String]) -> Result<()> {
        let missing: Vec<String> = required
            .iter()
            .filter(|name| self.get(name).is_none())
            .cloned()
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::MissingEnv { missing })
        }
    }
}
