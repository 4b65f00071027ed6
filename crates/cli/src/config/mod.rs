// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles vouch.toml parsing with version validation and unknown key warnings.

pub mod duration;
mod parse;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::recovery::{DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, RecoveryOptions};
use crate::registry::{CategoryRegistry, TestCategory, Thresholds};
use parse::{table_section, warn_unknown_fields, warn_unknown_key};

/// Supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Default artifact tree root, relative to the config file.
pub const DEFAULT_ROOT: &str = ".vouch";

/// Environment variables required by default.
pub const DEFAULT_REQUIRED_ENV: &[&str] = &["BACKEND_URL", "BACKEND_SERVICE_KEY"];

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Config with flexible parsing that captures unknown keys.
#[derive(Deserialize)]
struct FlexibleConfig {
    version: i64,

    #[serde(default)]
    run: Option<toml::Value>,

    #[serde(default)]
    env: Option<toml::Value>,

    #[serde(default)]
    database: Option<toml::Value>,

    #[serde(default)]
    thresholds: Option<toml::Value>,

    #[serde(default)]
    recovery: Option<toml::Value>,

    #[serde(default)]
    category: Option<toml::Value>,

    #[serde(flatten)]
    unknown: std::collections::BTreeMap<String, toml::Value>,
}

/// Full configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Artifact tree locations.
    #[serde(default)]
    pub run: RunConfig,

    /// Required process environment.
    #[serde(default)]
    pub env: EnvConfig,

    /// Database initialization.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Readiness gating thresholds.
    #[serde(default)]
    pub thresholds: Thresholds,

    /// Recovery wait timings.
    #[serde(default)]
    pub recovery: RecoveryConfig,

    /// Custom categories; empty means the built-in registry.
    #[serde(default)]
    pub category: Vec<TestCategory>,
}

impl Config {
    /// Build the category registry this config describes.
    pub fn registry(&self) -> Result<CategoryRegistry> {
        if self.category.is_empty() {
            Ok(CategoryRegistry::builtin())
        } else {
            CategoryRegistry::new(self.category.clone())
        }
    }
}

/// Paths for a run's artifact tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RunConfig {
    /// Artifact tree root.
    #[serde(default = "RunConfig::default_root")]
    pub root: PathBuf,

    /// Raw result tree written by the execution layer, relative to root.
    #[serde(default = "RunConfig::default_results")]
    pub results: PathBuf,

    /// Optional explicit category scores, relative to root.
    #[serde(default = "RunConfig::default_scores")]
    pub scores: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            root: Self::default_root(),
            results: Self::default_results(),
            scores: Self::default_scores(),
        }
    }
}

impl RunConfig {
    pub(crate) fn default_root() -> PathBuf {
        PathBuf::from(DEFAULT_ROOT)
    }

    pub(crate) fn default_results() -> PathBuf {
        PathBuf::from("results/raw-results.json")
    }

    pub(crate) fn default_scores() -> PathBuf {
        PathBuf::from("results/category-scores.json")
    }
}

/// Environment validation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnvConfig {
    /// Variables that must be set and non-empty before setup proceeds.
    #[serde(default = "EnvConfig::default_required")]
    pub required: Vec<String>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            required: Self::default_required(),
        }
    }
}

impl EnvConfig {
    pub(crate) fn default_required() -> Vec<String> {
        DEFAULT_REQUIRED_ENV.iter().map(|s| s.to_string()).collect()
    }
}

/// Database initialization settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DatabaseConfig {
    /// Shell command that prepares the database under test.
    #[serde(default)]
    pub init: Option<String>,
}

/// Recovery wait timings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RecoveryConfig {
    /// Hard ceiling on total wait time (default 30s).
    #[serde(default, deserialize_with = "duration::deserialize_option")]
    pub timeout: Option<Duration>,

    /// Spacing between probes (default 2s), never zero.
    #[serde(default, deserialize_with = "duration::deserialize_interval_option")]
    pub interval: Option<Duration>,
}

impl RecoveryConfig {
    pub fn options(&self) -> RecoveryOptions {
        RecoveryOptions {
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
            poll_interval: self.interval.unwrap_or(DEFAULT_POLL_INTERVAL),
        }
    }
}

/// Known top-level keys in the config.
const KNOWN_KEYS: &[&str] = &[
    "version",
    "run",
    "env",
    "database",
    "thresholds",
    "recovery",
    "category",
];

const KNOWN_RUN_KEYS: &[&str] = &["root", "results", "scores"];
const KNOWN_ENV_KEYS: &[&str] = &["required"];
const KNOWN_DATABASE_KEYS: &[&str] = &["init"];
const KNOWN_THRESHOLD_KEYS: &[&str] = &[
    "overall_pass_rate",
    "critical_category_pass_rate",
    "max_critical_failures",
    "max_high_severity_warnings",
];
const KNOWN_RECOVERY_KEYS: &[&str] = &["timeout", "interval"];

/// Load and validate config from a file path.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse(&content, path)
}

/// Load config with warnings for unknown keys.
pub fn load_with_warnings(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_with_warnings(&content, path)
}

fn config_error(path: &Path, message: impl Into<String>) -> Error {
    Error::Config {
        message: message.into(),
        path: Some(path.to_path_buf()),
    }
}

fn check_version(version: i64, path: &Path) -> Result<()> {
    if version != SUPPORTED_VERSION {
        return Err(config_error(
            path,
            format!(
                "unsupported config version {} (supported: {})\n  Upgrade vouch to use this config.",
                version, SUPPORTED_VERSION
            ),
        ));
    }
    Ok(())
}

/// Parse config from string content (strict mode).
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let version_check: VersionOnly =
        toml::from_str(content).map_err(|e| config_error(path, e.to_string()))?;

    let version = version_check
        .version
        .ok_or_else(|| config_error(path, "missing required field: version"))?;
    check_version(version, path)?;

    toml::from_str(content).map_err(|e| config_error(path, e.to_string()))
}

/// Parse config, warning on unknown keys.
pub fn parse_with_warnings(content: &str, path: &Path) -> Result<Config> {
    let version_check: VersionOnly =
        toml::from_str(content).map_err(|e| config_error(path, e.to_string()))?;
    let version = version_check
        .version
        .ok_or_else(|| config_error(path, "missing required field: version"))?;
    check_version(version, path)?;

    let flexible: FlexibleConfig =
        toml::from_str(content).map_err(|e| config_error(path, e.to_string()))?;

    for key in flexible.unknown.keys() {
        if !KNOWN_KEYS.contains(&key.as_str()) {
            warn_unknown_key(path, key);
        }
    }

    let run: RunConfig = table_section(path, "run", flexible.run, KNOWN_RUN_KEYS)?;
    let env: EnvConfig = table_section(path, "env", flexible.env, KNOWN_ENV_KEYS)?;
    let database: DatabaseConfig =
        table_section(path, "database", flexible.database, KNOWN_DATABASE_KEYS)?;
    let thresholds: Thresholds =
        table_section(path, "thresholds", flexible.thresholds, KNOWN_THRESHOLD_KEYS)?;
    let recovery: RecoveryConfig =
        table_section(path, "recovery", flexible.recovery, KNOWN_RECOVERY_KEYS)?;

    let category: Vec<TestCategory> = match flexible.category {
        Some(toml::Value::Array(items)) => {
            for (i, item) in items.iter().enumerate() {
                if let toml::Value::Table(t) = item {
                    warn_unknown_fields(
                        path,
                        &format!("category[{}]", i),
                        t,
                        &["id", "name", "description", "weight", "critical_path", "tests"],
                    );
                }
            }
            toml::Value::Array(items)
                .try_into()
                .map_err(|e: toml::de::Error| config_error(path, format!("category: {}", e)))?
        }
        Some(_) => return Err(config_error(path, "`category` must be an array of tables")),
        None => Vec::new(),
    };

    Ok(Config {
        version: flexible.version,
        run,
        env,
        database,
        thresholds,
        recovery,
        category,
    })
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
