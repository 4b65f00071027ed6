//! Config file discovery.
//!
//! Walks from the current directory up to the git root looking for vouch.toml.
//! Relative paths in a discovered config resolve against the directory that
//! holds it.

use std::path::{Path, PathBuf};

use crate::config::{self, Config};
use crate::error::{Error, Result};
use crate::orchestrator::RunLayout;

/// Config file name.
pub const CONFIG_FILE: &str = "vouch.toml";

/// Find vouch.toml starting from `start_dir` and walking up to git root.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .find_map(|dir| {
            let candidate = dir.join(CONFIG_FILE);
            if candidate.is_file() {
                Some(Some(candidate))
            } else if dir.join(".git").exists() {
                Some(None)
            } else {
                None
            }
        })
        .flatten()
}

/// Resolve config path from CLI arg, env var, or discovery.
///
/// Priority:
/// 1. CLI flag `-C`/`--config` (handled by clap with env = "VOUCH_CONFIG")
/// 2. Discovery from current directory up to git root
/// 3. None (use defaults)
pub fn resolve_config(explicit: Option<&Path>, cwd: &Path) -> Result<Option<PathBuf>> {
    match explicit {
        Some(path) if path.is_file() => Ok(Some(path.to_path_buf())),
        Some(path) => Err(Error::Config {
            message: format!("config file not found: {}", path.display()),
            path: Some(path.to_path_buf()),
        }),
        None => Ok(find_config(cwd)),
    }
}

/// Directory that relative run paths resolve against.
///
/// The config file's parent when there is one, otherwise `cwd`.
pub fn base_dir(config: Option<&Path>, cwd: &Path) -> PathBuf {
    match config.and_then(Path::parent) {
        Some(parent) if parent.as_os_str().is_empty() => cwd.to_path_buf(),
        Some(parent) if parent.is_relative() => cwd.join(parent),
        Some(parent) => parent.to_path_buf(),
        None => cwd.to_path_buf(),
    }
}

/// A config as a command sees it.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub config: Config,
    /// The file it was loaded from; None means defaults.
    pub path: Option<PathBuf>,
    pub base: PathBuf,
}

impl ResolvedConfig {
    /// Artifact tree layout, with an optional root override relative to `cwd`.
    pub fn layout(&self, root: Option<&Path>, cwd: &Path) -> RunLayout {
        match root {
            Some(root) => {
                let mut run = self.config.run.clone();
                run.root = cwd.join(root);
                RunLayout::from_config(&self.base, &run)
            }
            None => RunLayout::from_config(&self.base, &self.config.run),
        }
    }
}

/// Resolve and load the config for a command, falling back to defaults.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<ResolvedConfig> {
    let path = resolve_config(explicit, cwd)?;
    let config = match &path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            config::load_with_warnings(path)?
        }
        None => Config::default(),
    };
    let base = base_dir(path.as_deref(), cwd);
    Ok(ResolvedConfig { config, path, base })
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
