// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Category registry: the weighted test categories a readiness run is scored
//! against, plus the gating thresholds.
//!
//! The registry is immutable once built and is passed by reference to the
//! aggregator, report generator, and orchestrator. Lookups by id go through
//! an index built at construction time.

mod builtin;

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Minimum normalized overall score for readiness.
pub const OVERALL_PASS_RATE: u32 = 95;

/// Minimum score a critical-path category must reach.
pub const CRITICAL_CATEGORY_PASS_RATE: u32 = 100;

/// Critical failures tolerated in any single category.
pub const MAX_CRITICAL_FAILURES: u32 = 0;

/// Per-category warnings tolerated before a run-level warning is raised.
pub const MAX_HIGH_SEVERITY_WARNINGS: u32 = 3;

/// How a test is carried out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TestKind {
    Automated,
    Manual,
    Hybrid,
}

impl TestKind {
    pub fn as_str(self) -> &'static str {
        match self {
            TestKind::Automated => "automated",
            TestKind::Manual => "manual",
            TestKind::Hybrid => "hybrid",
        }
    }
}

/// One named check within a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestDefinition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub kind: TestKind,
    /// Estimated duration in seconds.
    #[serde(default)]
    pub estimated_duration: u64,
    /// Human-readable; never evaluated.
    #[serde(default)]
    pub success_criteria: String,
    /// Advisory ordering only.
    #[serde(default)]
    pub dependencies: BTreeSet<String>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl TestDefinition {
    /// Create a definition with empty description, criteria, and tags.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: TestKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            kind,
            estimated_duration: 0,
            success_criteria: String::new(),
            dependencies: BTreeSet::new(),
            tags: BTreeSet::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_duration(mut self, seconds: u64) -> Self {
        self.estimated_duration = seconds;
        self
    }

    pub fn with_criteria(mut self, criteria: impl Into<String>) -> Self {
        self.success_criteria = criteria.into();
        self
    }

    pub fn with_dependencies(mut self, deps: &[&str]) -> Self {
        self.dependencies = deps.iter().map(|d| d.to_string()).collect();
        self
    }

    pub fn with_tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }
}

/// A named, weighted grouping of test definitions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Relative weight; the aggregator normalizes by the total.
    pub weight: f64,
    /// Must score 100% for the run to be release-ready.
    #[serde(default)]
    pub critical_path: bool,
    /// Presentation order only.
    #[serde(default)]
    pub tests: Vec<TestDefinition>,
}

impl TestCategory {
    pub fn new(id: impl Into<String>, name: impl Into<String>, weight: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            weight,
            critical_path: false,
            tests: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn critical(mut self) -> Self {
        self.critical_path = true;
        self
    }

    pub fn with_tests(mut self, tests: Vec<TestDefinition>) -> Self {
        self.tests = tests;
        self
    }
}

/// Gating thresholds applied by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    pub overall_pass_rate: u32,
    pub critical_category_pass_rate: u32,
    pub max_critical_failures: u32,
    pub max_high_severity_warnings: u32,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            overall_pass_rate: OVERALL_PASS_RATE,
            critical_category_pass_rate: CRITICAL_CATEGORY_PASS_RATE,
            max_critical_failures: MAX_CRITICAL_FAILURES,
            max_high_severity_warnings: MAX_HIGH_SEVERITY_WARNINGS,
        }
    }
}

/// Test-definition counts by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct KindCounts {
    pub automated: usize,
    pub manual: usize,
    pub hybrid: usize,
}

impl KindCounts {
    pub fn total(&self) -> usize {
        self.automated + self.manual + self.hybrid
    }
}

/// Immutable, id-indexed set of test categories.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    categories: Vec<TestCategory>,
    index: HashMap<String, usize>,
}

impl CategoryRegistry {
    /// Build a registry, validating ids and weights.
    ///
    /// Fails on duplicate category ids, duplicate test ids, and weights that
    /// are negative or not finite.
    pub fn new(categories: Vec<TestCategory>) -> Result<Self> {
        let mut test_ids = BTreeSet::new();
        for category in &categories {
            if !category.weight.is_finite() || category.weight < 0.0 {
                return Err(Error::Config {
                    message: format!(
                        "category `{}` has invalid weight {}",
                        category.id, category.weight
                    ),
                    path: None,
                });
            }
            for test in &category.tests {
                if !test_ids.insert(test.id.as_str()) {
                    return Err(Error::Config {
                        message: format!("duplicate test id `{}`", test.id),
                        path: None,
                    });
                }
            }
        }

        let mut index = HashMap::with_capacity(categories.len());
        for (i, category) in categories.iter().enumerate() {
            if index.insert(category.id.clone(), i).is_some() {
                return Err(Error::Config {
                    message: format!("duplicate category id `{}`", category.id),
                    path: None,
                });
            }
        }

        Ok(Self { categories, index })
    }

    /// The built-in production readiness categories.
    pub fn builtin() -> Self {
        let categories = builtin::categories();
        let index = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.id.clone(), i))
            .collect();
        Self { categories, index }
    }

    /// Look up a category by id.
    pub fn get(&self, id: &str) -> Result<&TestCategory> {
        self.index
            .get(id)
            .map(|&i| &self.categories[i])
            .ok_or_else(|| Error::CategoryNotFound(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// All categories in registration order.
    pub fn categories(&self) -> &[TestCategory] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.categories.iter().map(|c| c.weight).sum()
    }

    /// Count test definitions across all categories by kind.
    pub fn kind_counts(&self) -> KindCounts {
        let mut counts = KindCounts::default();
        for test in self.categories.iter().flat_map(|c| &c.tests) {
            match test.kind {
                TestKind::Automated => counts.automated += 1,
                TestKind::Manual => counts.manual += 1,
                TestKind::Hybrid => counts.hybrid += 1,
            }
        }
        counts
    }

    /// Sum of estimated durations, in seconds.
    pub fn estimated_duration(&self) -> u64 {
        self.categories
            .iter()
            .flat_map(|c| &c.tests)
            .map(|t| t.estimated_duration)
            .sum()
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
