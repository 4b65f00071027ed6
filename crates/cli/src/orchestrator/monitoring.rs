// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Scratch monitoring record for the duration of a run.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Written at setup, read and deleted at teardown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub response_times: Vec<f64>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default)]
    pub resource_samples: Vec<serde_json::Value>,
}

impl MonitoringContext {
    pub fn new(run_id: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            run_id: run_id.into(),
            started_at,
            response_times: Vec::new(),
            errors: Vec::new(),
            resource_samples: Vec::new(),
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Internal(format!("serialize monitoring context: {}", e)))?;
        std::fs::write(path, json + "\n").map_err(|e| Error::io(path, e))
    }

    /// Load the record, returning None if not found.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let ctx = serde_json::from_str(&content).map_err(|e| Error::Results {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Some(ctx))
    }
}
