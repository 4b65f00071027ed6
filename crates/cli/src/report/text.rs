// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text format report output.

use std::fmt::Write;

use super::{MachineReport, ReportFormatter};

/// Text format report formatter.
pub struct TextFormatter;

/// Size estimation constants for pre-allocation.
const TEXT_HEADER_SIZE: usize = 200;
const TEXT_LINE_SIZE: usize = 60;

impl ReportFormatter for TextFormatter {
    fn format(&self, report: &MachineReport) -> anyhow::Result<String> {
        let lines = report.categories.len()
            + report.readiness.blockers.len()
            + report.readiness.warnings.len()
            + report.recommendations.len();
        let mut output = String::with_capacity(TEXT_HEADER_SIZE + lines * TEXT_LINE_SIZE);
        write_text(&mut output, report)?;
        Ok(output)
    }

    fn format_to(
        &self,
        writer: &mut dyn std::io::Write,
        report: &MachineReport,
    ) -> anyhow::Result<()> {
        let output = self.format(report)?;
        writer.write_all(output.as_bytes())?;
        Ok(())
    }

    fn format_empty(&self) -> String {
        "No report found.\n".to_string()
    }
}

fn write_text(output: &mut String, report: &MachineReport) -> std::fmt::Result {
    let readiness = &report.readiness;

    writeln!(output, "Production Readiness")?;
    writeln!(output, "====================")?;
    writeln!(
        output,
        "Verdict: {}",
        if readiness.ready_for_production {
            "READY"
        } else {
            "NOT READY"
        }
    )?;
    writeln!(
        output,
        "Overall: {}% (requires {}%)",
        readiness.overall, readiness.required
    )?;
    writeln!(
        output,
        "Checks: {} passed, {} failed, {} skipped, {} flaky",
        report.summary.passed, report.summary.failed, report.summary.skipped, report.summary.flaky
    )?;
    writeln!(output)?;

    let width = report
        .categories
        .iter()
        .map(|c| c.name.chars().count())
        .max()
        .unwrap_or(0);
    for c in &report.categories {
        let score = c.score.map_or_else(|| "-".to_string(), |s| format!("{s}%"));
        writeln!(
            output,
            "{:<4} {:<width$}  {:>3}/{:<3} {:>4}{}",
            c.status().label(),
            c.name,
            c.passed,
            c.total,
            score,
            if c.critical_path { "  critical" } else { "" },
        )?;
    }

    if !readiness.blockers.is_empty() {
        writeln!(output)?;
        writeln!(output, "Blockers:")?;
        for b in &readiness.blockers {
            writeln!(output, "  {b}")?;
        }
    }

    if !readiness.warnings.is_empty() {
        writeln!(output)?;
        writeln!(output, "Warnings:")?;
        for w in &readiness.warnings {
            writeln!(output, "  {w}")?;
        }
    }

    if !report.recommendations.is_empty() {
        writeln!(output)?;
        writeln!(output, "Recommendations:")?;
        for r in &report.recommendations {
            writeln!(output, "  {r}")?;
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
