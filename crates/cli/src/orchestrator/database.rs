// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Database initialization before a run.

use std::path::PathBuf;
use std::process::Stdio;

use super::StepOutcome;
use crate::recovery::shell;

/// Prepares the database under test.
///
/// Errors are reported as a degraded setup step, never as a setup failure.
pub trait DatabaseInit {
    fn initialize(&self) -> anyhow::Result<StepOutcome>;
}

/// Runs a configured shell command, or does nothing when none is set.
#[derive(Debug, Clone, Default)]
pub struct CommandDatabaseInit {
    command: Option<String>,
    root: PathBuf,
}

impl CommandDatabaseInit {
    pub fn new(command: Option<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            command,
            root: root.into(),
        }
    }
}

impl DatabaseInit for CommandDatabaseInit {
    fn initialize(&self) -> anyhow::Result<StepOutcome> {
        let Some(command) = self.command.as_deref() else {
            return Ok(StepOutcome::Skipped(
                "no database init command configured".to_string(),
            ));
        };

        tracing::debug!("running database init: {}", command);
        let output = shell(command)
            .current_dir(&self.root)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| anyhow::anyhow!("failed to run `{}`: {}", command, e))?;

        if output.status.success() {
            return Ok(StepOutcome::Completed);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        match stderr.lines().map(str::trim).find(|l| !l.is_empty()) {
            Some(line) => anyhow::bail!("`{}` exited with {}: {}", command, output.status, line),
            None => anyhow::bail!("`{}` exited with {}", command, output.status),
        }
    }
}
