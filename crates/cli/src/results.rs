// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Raw test result tree and per-category tallies.
//!
//! The execution layer writes a suite → spec → check tree. Each leaf check is
//! classified into a registry category, preferring an explicit `category`
//! tag and falling back to matching suite titles against category ids and
//! names.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::registry::CategoryRegistry;
use crate::score::CategoryScore;

/// Tally key for checks that match no category.
pub const UNCATEGORIZED: &str = "uncategorized";

/// Root of a raw result tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResults {
    #[serde(default)]
    pub suites: Vec<RawSuite>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSuite {
    pub title: String,
    #[serde(default)]
    pub specs: Vec<RawSpec>,
    #[serde(default)]
    pub suites: Vec<RawSuite>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSpec {
    pub title: String,
    #[serde(default)]
    pub tests: Vec<RawCheck>,
}

/// One executed check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCheck {
    /// Project or variant name (e.g. a browser); may be empty.
    #[serde(default)]
    pub title: String,
    pub status: CheckStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub duration_ms: u64,
    /// Explicit category id, set at emission time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<Severity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckStatus {
    Passed,
    Failed,
    #[serde(alias = "timed_out")]
    TimedOut,
    Skipped,
    /// Passed after a retry.
    Flaky,
}

impl CheckStatus {
    pub fn is_failure(self) -> bool {
        matches!(self, CheckStatus::Failed | CheckStatus::TimedOut)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

/// A leaf check with the titles of its enclosing suites, outermost first.
#[derive(Debug, Clone)]
pub struct Leaf<'a> {
    pub suite_path: Vec<&'a str>,
    pub spec: &'a str,
    pub check: &'a RawCheck,
}

impl Leaf<'_> {
    /// Display name: `suite › spec`, plus the check title when present.
    pub fn name(&self) -> String {
        let mut parts: Vec<&str> = self.suite_path.clone();
        parts.push(self.spec);
        if !self.check.title.is_empty() {
            parts.push(&self.check.title);
        }
        parts.join(" › ")
    }
}

impl RawResults {
    /// Load a result tree, returning None if the file does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let results = serde_json::from_str(&content).map_err(|e| Error::Results {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Some(results))
    }

    /// Flatten the tree into leaf checks, depth-first in file order.
    pub fn leaves(&self) -> Vec<Leaf<'_>> {
        let mut out = Vec::new();
        let mut path = Vec::new();
        for suite in &self.suites {
            collect_leaves(suite, &mut path, &mut out);
        }
        out
    }
}

fn collect_leaves<'a>(suite: &'a RawSuite, path: &mut Vec<&'a str>, out: &mut Vec<Leaf<'a>>) {
    path.push(suite.title.as_str());
    for spec in &suite.specs {
        for check in &spec.tests {
            out.push(Leaf {
                suite_path: path.clone(),
                spec: spec.title.as_str(),
                check,
            });
        }
    }
    for child in &suite.suites {
        collect_leaves(child, path, out);
    }
    path.pop();
}

/// Maps leaf checks onto registry categories.
pub struct Classifier<'a> {
    registry: &'a CategoryRegistry,
}

impl<'a> Classifier<'a> {
    pub fn new(registry: &'a CategoryRegistry) -> Self {
        Self { registry }
    }

    /// Category id for a leaf, or None if nothing matches.
    pub fn classify(&self, leaf: &Leaf<'_>) -> Option<&'a str> {
        if let Some(ref tag) = leaf.check.category {
            match self.registry.get(tag) {
                Ok(category) => return Some(category.id.as_str()),
                Err(e) => tracing::warn!("{}: {}", leaf.name(), e),
            }
        }

        leaf.suite_path
            .iter()
            .find_map(|title| self.match_title(title))
    }

    fn match_title(&self, title: &str) -> Option<&'a str> {
        let title = title.trim().to_lowercase();
        self.registry
            .categories()
            .iter()
            .find(|c| {
                has_word_prefix(&title, &c.id.to_lowercase())
                    || has_word_prefix(&title, &c.name.to_lowercase())
            })
            .map(|c| c.id.as_str())
    }
}

/// True if `text` starts with `prefix` followed by a non-alphanumeric
/// character or the end of the string.
fn has_word_prefix(text: &str, prefix: &str) -> bool {
    if prefix.is_empty() {
        return false;
    }
    match text.strip_prefix(prefix) {
        Some(rest) => rest.chars().next().is_none_or(|c| !c.is_alphanumeric()),
        None => false,
    }
}

/// Counts for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryTally {
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
    pub flaky: u32,
    pub critical_failures: u32,
}

impl CategoryTally {
    /// Checks that produced a pass/fail outcome.
    pub fn total(&self) -> u32 {
        self.passed + self.failed
    }

    fn record(&mut self, check: &RawCheck) {
        match check.status {
            CheckStatus::Passed => self.passed += 1,
            CheckStatus::Flaky => {
                self.passed += 1;
                self.flaky += 1;
            }
            CheckStatus::Skipped => self.skipped += 1,
            CheckStatus::Failed | CheckStatus::TimedOut => {
                self.failed += 1;
                if check.severity == Some(Severity::Critical) {
                    self.critical_failures += 1;
                }
            }
        }
    }

    /// Convert to a category score; flaky and skipped checks count as warnings.
    pub fn to_score(&self, category_id: &str) -> CategoryScore {
        CategoryScore::from_tally(
            category_id,
            self.passed,
            self.total(),
            self.critical_failures,
            self.flaky + self.skipped,
        )
    }
}

/// A failing leaf check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedCheck {
    pub name: String,
    pub category: Option<String>,
    pub error: Option<String>,
}

/// Per-category tallies for a whole result tree.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultTally {
    /// Keyed by category id; only categories with at least one leaf.
    pub categories: BTreeMap<String, CategoryTally>,
    pub uncategorized: CategoryTally,
    /// Failing checks in tree order.
    pub failures: Vec<FailedCheck>,
}

impl ResultTally {
    /// Classify and count every leaf in `results`.
    pub fn from_results(results: &RawResults, registry: &CategoryRegistry) -> Self {
        let classifier = Classifier::new(registry);
        let mut tally = Self::default();

        for leaf in results.leaves() {
            let category = classifier.classify(&leaf);
            match category {
                Some(id) => tally
                    .categories
                    .entry(id.to_string())
                    .or_default()
                    .record(leaf.check),
                None => {
                    tracing::debug!("unclassified check: {}", leaf.name());
                    tally.uncategorized.record(leaf.check);
                }
            }

            if leaf.check.status.is_failure() {
                tally.failures.push(FailedCheck {
                    name: leaf.name(),
                    category: category.map(String::from),
                    error: leaf.check.error.clone(),
                });
            }
        }

        tally
    }

    /// Tally for a category, zero if it had no checks.
    pub fn category(&self, id: &str) -> CategoryTally {
        self.categories.get(id).copied().unwrap_or_default()
    }

    /// Sum over all categories, including uncategorized checks.
    pub fn overall(&self) -> CategoryTally {
        let mut sum = self.uncategorized;
        for t in self.categories.values() {
            sum.passed += t.passed;
            sum.failed += t.failed;
            sum.skipped += t.skipped;
            sum.flaky += t.flaky;
            sum.critical_failures += t.critical_failures;
        }
        sum
    }

    /// Category scores in registry order, omitting categories with no
    /// pass/fail outcome.
    pub fn category_scores(&self, registry: &CategoryRegistry) -> Vec<CategoryScore> {
        registry
            .categories()
            .iter()
            .filter_map(|c| {
                let t = self.categories.get(&c.id)?;
                (t.total() > 0).then(|| t.to_score(&c.id))
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "results_tests.rs"]
mod tests;
