// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Final run metrics written at the end of teardown.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::registry::CategoryRegistry;
use crate::results::ResultTally;
use crate::score::CategoryScore;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalMetrics {
    pub generated_at: DateTime<Utc>,
    pub run_id: Option<String>,
    /// Registry categories with at least one pass/fail outcome.
    pub categories_covered: usize,
    pub categories_total: usize,
    /// Leaf checks observed, skipped ones included.
    pub total_checks: u32,
    pub automated_tests: usize,
    pub manual_tests: usize,
    pub hybrid_tests: usize,
    /// Sum of test-definition estimates, in seconds.
    pub estimated_duration_secs: u64,
    /// Flaky tracking: counts from this run only, no cross-run history.
    pub flaky_tests: u32,
    pub flaky_rate: f64,
    /// Seconds since setup, when the monitoring record survived.
    pub run_duration_secs: Option<i64>,
    pub ready_for_production: Option<bool>,
}

/// What teardown knows when metrics are computed.
#[derive(Debug, Default)]
pub struct MetricsInput<'a> {
    pub tally: Option<&'a ResultTally>,
    pub scores: Option<&'a [CategoryScore]>,
    pub run_id: Option<&'a str>,
    pub started_at: Option<DateTime<Utc>>,
    pub ready_for_production: Option<bool>,
}

impl FinalMetrics {
    pub fn compute(
        registry: &CategoryRegistry,
        input: &MetricsInput<'_>,
        now: DateTime<Utc>,
    ) -> Self {
        let kinds = registry.kind_counts();

        let categories_covered = match (input.tally, input.scores) {
            (Some(tally), _) => registry
                .categories()
                .iter()
                .filter(|c| tally.category(&c.id).total() > 0)
                .count(),
            (None, Some(scores)) => registry
                .categories()
                .iter()
                .filter(|c| scores.iter().any(|s| s.category_id == c.id && s.total > 0))
                .count(),
            (None, None) => 0,
        };

        let (total_checks, flaky_tests) = match input.tally {
            Some(tally) => {
                let overall = tally.overall();
                (overall.total() + overall.skipped, overall.flaky)
            }
            None => (0, 0),
        };
        let flaky_rate = if total_checks == 0 {
            0.0
        } else {
            f64::from(flaky_tests) / f64::from(total_checks)
        };

        Self {
            generated_at: now,
            run_id: input.run_id.map(String::from),
            categories_covered,
            categories_total: registry.len(),
            total_checks,
            automated_tests: kinds.automated,
            manual_tests: kinds.manual,
            hybrid_tests: kinds.hybrid,
            estimated_duration_secs: registry.estimated_duration(),
            flaky_tests,
            flaky_rate,
            run_duration_secs: input.started_at.map(|s| (now - s).num_seconds()),
            ready_for_production: input.ready_for_production,
        }
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| Error::Internal(format!("serialize final metrics: {}", e)))?;
        std::fs::write(path, json + "\n").map_err(|e| Error::io(path, e))
    }
}
