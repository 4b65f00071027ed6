// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test utilities for report formatter tests.

// Test helpers that use unwrap for clarity (tests should panic on unexpected failures).
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use chrono::{DateTime, TimeZone, Utc};

use crate::registry::{CategoryRegistry, Thresholds};
use crate::results::{RawResults, ResultTally};
use crate::score::{ProductionReadinessScore, compute_readiness};

use super::{ArtifactCounts, MachineReport, ReportFormatter, render_report};

/// A run with one critical security failure and a flaky UX check.
pub const FAILING_RUN: &str = r#"{
  "suites": [
    {
      "title": "Security",
      "specs": [
        { "title": "rejects forged session", "tests": [ { "status": "passed" } ] },
        { "title": "blocks sql injection", "tests": [
          { "status": "failed", "severity": "critical", "error": "payload reflected\n  at login.spec.ts:42" }
        ] }
      ]
    },
    {
      "title": "UX",
      "specs": [
        { "title": "onboarding", "tests": [ { "status": "flaky" } ] },
        { "title": "menu", "tests": [ { "status": "passed" } ] }
      ]
    }
  ]
}"#;

/// A run where every registry category passes.
pub fn passing_run(registry: &CategoryRegistry) -> RawResults {
    let suites = registry
        .categories()
        .iter()
        .map(|c| {
            serde_json::json!({
                "title": c.name,
                "specs": [ { "title": "works", "tests": [ { "status": "passed" } ] } ]
            })
        })
        .collect::<Vec<_>>();
    serde_json::from_value(serde_json::json!({ "suites": suites })).unwrap()
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 9, 26, 53).unwrap()
}

pub fn readiness_for(raw: &RawResults, registry: &CategoryRegistry) -> ProductionReadinessScore {
    let scores = ResultTally::from_results(raw, registry).category_scores(registry);
    compute_readiness(registry, &scores, fixed_time())
}

pub fn artifacts() -> ArtifactCounts {
    ArtifactCounts {
        screenshots: 3,
        videos: 1,
        traces: 1,
        other: 0,
    }
}

/// Render the failing run against the built-in registry.
pub fn failing_report() -> MachineReport {
    let registry = CategoryRegistry::builtin();
    let raw: RawResults = serde_json::from_str(FAILING_RUN).unwrap();
    let readiness = readiness_for(&raw, &registry);
    render_report(
        &raw,
        &readiness,
        &registry,
        &Thresholds::default(),
        artifacts(),
    )
    .unwrap()
    .0
}

/// Render a fully passing run against the built-in registry.
pub fn passing_report() -> MachineReport {
    let registry = CategoryRegistry::builtin();
    let raw = passing_run(&registry);
    let readiness = readiness_for(&raw, &registry);
    render_report(
        &raw,
        &readiness,
        &registry,
        &Thresholds::default(),
        ArtifactCounts::default(),
    )
    .unwrap()
    .0
}

/// Assert that buffered and streamed output match for a formatter.
pub fn assert_buffered_matches_streamed<F: ReportFormatter>(formatter: &F, report: &MachineReport) {
    let buffered = formatter.format(report).unwrap();
    let mut streamed = Vec::new();
    formatter.format_to(&mut streamed, report).unwrap();
    let streamed_str = String::from_utf8(streamed).unwrap();
    similar_asserts::assert_eq!(buffered, streamed_str);
}
