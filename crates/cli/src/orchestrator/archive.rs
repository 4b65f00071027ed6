// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Per-run archive of reports and fixtures, and artifact counting.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use super::RunLayout;
use crate::error::{Error, Result};
use crate::report::ArtifactCounts;

/// Archive directory name for a run finishing at `at`.
pub fn archive_stamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d-%H%M%S").to_string()
}

/// What an archive pass copied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveSummary {
    pub dir: PathBuf,
    pub copied: Vec<PathBuf>,
    /// Sources that did not exist.
    pub missing: Vec<PathBuf>,
}

/// Copy reports and key fixtures into `archive/<stamp>/`.
///
/// Missing sources are recorded and skipped; any other I/O error stops the
/// pass.
pub fn archive_run(layout: &RunLayout, stamp: &str) -> Result<ArchiveSummary> {
    let dir = layout.archive_dir().join(stamp);
    std::fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;

    let mut summary = ArchiveSummary {
        dir: dir.clone(),
        ..ArchiveSummary::default()
    };

    for source in layout.archived_files() {
        let Some(name) = source.file_name() else {
            continue;
        };
        if !source.is_file() {
            tracing::debug!("archive: skipping missing {}", source.display());
            summary.missing.push(source);
            continue;
        }
        let target = dir.join(name);
        std::fs::copy(&source, &target).map_err(|e| Error::io(&source, e))?;
        summary.copied.push(target);
    }

    Ok(summary)
}

/// Count captured artifacts under `dir`, recursively. A missing directory
/// counts as empty.
pub fn count_artifacts(dir: &Path) -> Result<ArtifactCounts> {
    let mut counts = ArtifactCounts::default();
    if dir.is_dir() {
        visit(dir, &mut counts)?;
    }
    Ok(counts)
}

fn visit(dir: &Path, counts: &mut ArtifactCounts) -> Result<()> {
    let entries = std::fs::read_dir(dir).map_err(|e| Error::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| Error::io(dir, e))?;
        let path = entry.path();
        let file_type = entry.file_type().map_err(|e| Error::io(&path, e))?;
        if file_type.is_dir() {
            visit(&path, counts)?;
        } else if file_type.is_file() {
            counts.record(path.extension().and_then(|e| e.to_str()));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "archive_tests.rs"]
mod tests;
