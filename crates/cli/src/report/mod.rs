// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report generation.
//!
//! Turns the raw result tree and the readiness verdict into a machine-readable
//! report, then renders it as JSON, markdown, or terminal text. Rendering is
//! deterministic: the report carries the verdict's timestamp, never the
//! current time.

mod json;
mod markdown;
mod text;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cli::OutputFormat;
use crate::registry::{CategoryRegistry, TestCategory, Thresholds};
use crate::results::{CategoryTally, RawResults, ResultTally};
use crate::score::{ProductionReadinessScore, percent};

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Current machine report format version.
pub const REPORT_VERSION: u32 = 1;

/// Structured readiness report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MachineReport {
    pub metadata: ReportMetadata,
    pub summary: ReportSummary,
    pub readiness: ReadinessSummary,
    /// Every registry category, in registry order.
    pub categories: Vec<CategoryBreakdown>,
    pub recommendations: Vec<String>,
    pub artifacts: ArtifactCounts,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub tool: String,
}

/// Leaf-check counts across the whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub total: u32,
    pub passed: u32,
    pub failed: u32,
    pub skipped: u32,
    pub flaky: u32,
    pub uncategorized: u32,
    /// Passed over passed + failed, 0-100.
    pub pass_rate: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessSummary {
    pub overall: u32,
    pub required: u32,
    pub ready_for_production: bool,
    pub blockers: Vec<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub id: String,
    pub name: String,
    pub weight: f64,
    pub critical_path: bool,
    pub passed: u32,
    pub failed: u32,
    pub total: u32,
    /// None when the category had no pass/fail outcome.
    pub score: Option<u32>,
}

impl CategoryBreakdown {
    pub fn status(&self) -> CategoryStatus {
        if self.total == 0 {
            CategoryStatus::NoData
        } else if self.failed == 0 {
            CategoryStatus::Pass
        } else {
            CategoryStatus::Fail
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryStatus {
    Pass,
    Fail,
    NoData,
}

impl CategoryStatus {
    pub fn glyph(self) -> &'static str {
        match self {
            CategoryStatus::Pass => "✅",
            CategoryStatus::Fail => "❌",
            CategoryStatus::NoData => "➖",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CategoryStatus::Pass => "PASS",
            CategoryStatus::Fail => "FAIL",
            CategoryStatus::NoData => "N/A",
        }
    }
}

/// Files captured by the execution layer, by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactCounts {
    pub screenshots: u32,
    pub videos: u32,
    pub traces: u32,
    pub other: u32,
}

impl ArtifactCounts {
    /// Count one file by its extension.
    pub fn record(&mut self, extension: Option<&str>) {
        match extension.map(|e| e.to_ascii_lowercase()).as_deref() {
            Some("png" | "jpg" | "jpeg") => self.screenshots += 1,
            Some("webm" | "mp4") => self.videos += 1,
            Some("zip" | "trace") => self.traces += 1,
            _ => self.other += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.screenshots + self.videos + self.traces + self.other
    }
}

/// Human-readable narrative report (markdown).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HumanReport(pub String);

impl HumanReport {
    /// Report stating that no verdict could be computed.
    pub fn unavailable(reason: &str) -> Self {
        HumanReport(format!(
            "# Production Readiness Report\n\n\
             **Verdict:** ⚠️ UNAVAILABLE\n\n\
             The readiness verdict could not be computed: {reason}\n"
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Build the machine report and its markdown rendering.
pub fn render_report(
    raw: &RawResults,
    readiness: &ProductionReadinessScore,
    registry: &CategoryRegistry,
    thresholds: &Thresholds,
    artifacts: ArtifactCounts,
) -> anyhow::Result<(MachineReport, HumanReport)> {
    let tally = ResultTally::from_results(raw, registry);
    let report = build_report(&tally, readiness, registry, thresholds, artifacts);
    let human = HumanReport(MarkdownFormatter.format(&report)?);
    Ok((report, human))
}

fn build_report(
    tally: &ResultTally,
    readiness: &ProductionReadinessScore,
    registry: &CategoryRegistry,
    thresholds: &Thresholds,
    artifacts: ArtifactCounts,
) -> MachineReport {
    let overall = tally.overall();

    let categories: Vec<_> = registry
        .categories()
        .iter()
        .map(|c| breakdown(c, tally, readiness))
        .collect();

    MachineReport {
        metadata: ReportMetadata {
            version: REPORT_VERSION,
            generated_at: readiness.timestamp,
            tool: format!("vouch {}", env!("CARGO_PKG_VERSION")),
        },
        summary: ReportSummary {
            total: overall.total() + overall.skipped,
            passed: overall.passed,
            failed: overall.failed,
            skipped: overall.skipped,
            flaky: overall.flaky,
            uncategorized: tally.uncategorized.total() + tally.uncategorized.skipped,
            pass_rate: percent(overall.passed, overall.total()),
        },
        readiness: ReadinessSummary {
            overall: readiness.overall,
            required: thresholds.overall_pass_rate,
            ready_for_production: readiness.ready_for_production,
            blockers: readiness.blockers.clone(),
            warnings: readiness.warnings.clone(),
        },
        recommendations: recommendations(tally, &categories, readiness, thresholds),
        categories,
        artifacts,
    }
}

/// A category's row, taken from the verdict's score when it has one and
/// from the result tally otherwise.
fn breakdown(
    category: &TestCategory,
    tally: &ResultTally,
    readiness: &ProductionReadinessScore,
) -> CategoryBreakdown {
    let scored = readiness
        .categories
        .iter()
        .find(|s| s.category_id == category.id && s.is_well_formed());
    let (passed, failed, total, score) = match scored {
        Some(s) => (
            s.passed,
            s.total - s.passed,
            s.total,
            (s.total > 0).then_some(s.score),
        ),
        None => {
            let t: CategoryTally = tally.category(&category.id);
            (
                t.passed,
                t.failed,
                t.total(),
                (t.total() > 0).then(|| percent(t.passed, t.total())),
            )
        }
    };
    CategoryBreakdown {
        id: category.id.clone(),
        name: category.name.clone(),
        weight: category.weight,
        critical_path: category.critical_path,
        passed,
        failed,
        total,
        score,
    }
}

/// One line per failing check; otherwise the verdict's blockers, or an
/// all-clear when the run is ready.
fn recommendations(
    tally: &ResultTally,
    categories: &[CategoryBreakdown],
    readiness: &ProductionReadinessScore,
    thresholds: &Thresholds,
) -> Vec<String> {
    // Failures in a category whose reported row shows none are superseded
    let failures: Vec<_> = tally
        .failures
        .iter()
        .filter(|f| match f.category.as_deref() {
            Some(id) => categories.iter().any(|c| c.id == id && c.failed > 0),
            None => true,
        })
        .collect();
    if !failures.is_empty() {
        return failures
            .iter()
            .map(|f| match f.error.as_deref() {
                Some(error) => format!("Fix \"{}\": {}", f.name, first_line(error)),
                None => format!("Fix \"{}\": no error captured", f.name),
            })
            .collect();
    }

    if readiness.ready_for_production {
        return vec!["All checks passed. Ready for production deployment.".to_string()];
    }

    if !readiness.blockers.is_empty() {
        return readiness
            .blockers
            .iter()
            .map(|b| format!("Resolve blocker: {b}"))
            .collect();
    }

    vec![format!(
        "Raise the overall score from {}% to at least {}%",
        readiness.overall, thresholds.overall_pass_rate
    )]
}

fn first_line(text: &str) -> &str {
    text.lines().next().unwrap_or("").trim()
}

/// Trait for rendering a machine report into an output format.
pub trait ReportFormatter {
    /// Format the report into the target format.
    fn format(&self, report: &MachineReport) -> anyhow::Result<String>;

    /// Format the report directly to a writer (streaming).
    fn format_to(
        &self,
        writer: &mut dyn std::io::Write,
        report: &MachineReport,
    ) -> anyhow::Result<()>;

    /// Output when no report exists.
    fn format_empty(&self) -> String;

    /// Write empty output to a writer.
    fn format_empty_to(&self, writer: &mut dyn std::io::Write) -> std::io::Result<()> {
        write!(writer, "{}", self.format_empty())
    }
}

/// Create formatter based on output format.
fn create_formatter(format: OutputFormat, compact: bool) -> Box<dyn ReportFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter),
        OutputFormat::Json => Box::new(JsonFormatter::new(compact)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter),
    }
}

/// Format a report directly to a writer.
///
/// If `report` is None, writes the format-specific empty output.
pub fn format_report_to(
    writer: &mut dyn std::io::Write,
    format: OutputFormat,
    report: Option<&MachineReport>,
    compact: bool,
) -> anyhow::Result<()> {
    let formatter = create_formatter(format, compact);

    match report {
        Some(r) => formatter.format_to(writer, r),
        None => Ok(formatter.format_empty_to(writer)?),
    }
}

impl MachineReport {
    /// Load a previously written report, returning None if not found.
    pub fn load(path: &std::path::Path) -> crate::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(path).map_err(|e| crate::Error::io(path, e))?;
        let report = serde_json::from_str(&content).map_err(|e| crate::Error::Results {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Some(report))
    }
}

#[cfg(test)]
pub mod test_support;

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
