// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Weighted score aggregation and the release gate.
//!
//! Pure and deterministic: the caller supplies the registry, thresholds,
//! category scores, and the timestamp to stamp on the verdict.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::registry::{CategoryRegistry, Thresholds};

/// Observed outcome for one category in one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category_id: String,
    /// Pass rate, 0-100.
    pub score: u32,
    pub passed: u32,
    pub total: u32,
    #[serde(default)]
    pub critical_failures: u32,
    #[serde(default)]
    pub warnings: u32,
}

impl CategoryScore {
    /// Build a score from pass/total counts, rounding the pass rate half-up.
    ///
    /// A category with no observed checks scores 0.
    pub fn from_tally(
        category_id: impl Into<String>,
        passed: u32,
        total: u32,
        critical_failures: u32,
        warnings: u32,
    ) -> Self {
        Self {
            category_id: category_id.into(),
            score: percent(passed, total),
            passed,
            total,
            critical_failures,
            warnings,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        self.score <= 100 && self.passed <= self.total
    }
}

/// Integer percentage rounded half-up; 0 when `total` is 0.
pub fn percent(passed: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let passed = u64::from(passed.min(total));
    let total = u64::from(total);
    ((passed * 200 + total) / (total * 2)) as u32
}

/// Run-level verdict.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionReadinessScore {
    /// Weight-normalized aggregate, 0-100.
    pub overall: u32,
    /// Inputs, kept as an audit trail.
    pub categories: Vec<CategoryScore>,
    pub timestamp: DateTime<Utc>,
    pub ready_for_production: bool,
    pub blockers: Vec<String>,
    pub warnings: Vec<String>,
}

/// Computes readiness verdicts against a registry and thresholds.
pub struct ScoreAggregator<'a> {
    registry: &'a CategoryRegistry,
    thresholds: Thresholds,
}

impl<'a> ScoreAggregator<'a> {
    pub fn new(registry: &'a CategoryRegistry, thresholds: Thresholds) -> Self {
        Self {
            registry,
            thresholds,
        }
    }

    /// Compute the verdict for a set of category scores.
    ///
    /// Scores naming an unknown category, malformed scores, and repeated
    /// category ids are skipped: they contribute nothing to the overall
    /// score and are reported as run-level warnings.
    pub fn compute(
        &self,
        scores: &[CategoryScore],
        timestamp: DateTime<Utc>,
    ) -> ProductionReadinessScore {
        let thresholds = &self.thresholds;
        let mut weighted_sum = 0.0_f64;
        let mut total_weight = 0.0_f64;
        let mut blockers = Vec::new();
        let mut warnings = Vec::new();
        let mut seen = HashSet::new();

        for score in scores {
            let category = match self.registry.get(&score.category_id) {
                Ok(category) => category,
                Err(e) => {
                    tracing::warn!("skipping score: {}", e);
                    warnings.push(format!(
                        "Ignored score for unknown category `{}`",
                        score.category_id
                    ));
                    continue;
                }
            };

            if !score.is_well_formed() {
                tracing::warn!(
                    "skipping malformed score for {}: score={} passed={} total={}",
                    score.category_id,
                    score.score,
                    score.passed,
                    score.total
                );
                warnings.push(format!(
                    "Ignored malformed score for {} (score {}, {}/{})",
                    category.name, score.score, score.passed, score.total
                ));
                continue;
            }

            if !seen.insert(score.category_id.as_str()) {
                tracing::warn!("skipping repeated score for {}", score.category_id);
                warnings.push(format!("Ignored repeated score for {}", category.name));
                continue;
            }

            weighted_sum += f64::from(score.score) * category.weight;
            total_weight += category.weight;

            if category.critical_path && score.score < thresholds.critical_category_pass_rate {
                blockers.push(format!(
                    "Critical category {} scored {}% (requires {}%)",
                    category.name, score.score, thresholds.critical_category_pass_rate
                ));
            }

            if score.critical_failures > thresholds.max_critical_failures {
                blockers.push(format!(
                    "{} critical failure(s) in {}",
                    score.critical_failures, category.name
                ));
            }

            if score.warnings > thresholds.max_high_severity_warnings {
                warnings.push(format!(
                    "{} warnings in {} (max {})",
                    score.warnings, category.name, thresholds.max_high_severity_warnings
                ));
            }
        }

        let overall = if total_weight > 0.0 {
            (weighted_sum / total_weight).round().clamp(0.0, 100.0) as u32
        } else {
            blockers.push("No valid category scores".to_string());
            0
        };

        let ready_for_production = overall >= thresholds.overall_pass_rate && blockers.is_empty();

        tracing::debug!(
            overall,
            ready_for_production,
            blockers = blockers.len(),
            warnings = warnings.len(),
            "computed readiness"
        );

        ProductionReadinessScore {
            overall,
            categories: scores.to_vec(),
            timestamp,
            ready_for_production,
            blockers,
            warnings,
        }
    }
}

/// Load a JSON list of category scores, returning None if not found.
pub fn load_scores(path: &Path) -> Result<Option<Vec<CategoryScore>>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let scores = serde_json::from_str(&content).map_err(|e| Error::Results {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;
    Ok(Some(scores))
}

/// Compute readiness with the default thresholds.
pub fn compute_readiness(
    registry: &CategoryRegistry,
    scores: &[CategoryScore],
    timestamp: DateTime<Utc>,
) -> ProductionReadinessScore {
    ScoreAggregator::new(registry, Thresholds::default()).compute(scores, timestamp)
}

#[cfg(test)]
#[path = "score_tests.rs"]
mod tests;
