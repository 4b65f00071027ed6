// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Markdown format report output (the human-readable narrative).

use super::{MachineReport, ReportFormatter};

/// Markdown format report formatter.
pub struct MarkdownFormatter;

/// Write markdown report content. This macro handles the common formatting logic
/// for both fmt::Write (String) and io::Write (stdout, files).
macro_rules! write_markdown_report {
    ($writer:expr, $report:expr) => {
        let report: &MachineReport = $report;
        let readiness = &report.readiness;

        // Header
        writeln!($writer, "# Production Readiness Report\n")?;
        writeln!(
            $writer,
            "**Generated:** {}\n",
            report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        if readiness.ready_for_production {
            writeln!($writer, "**Verdict:** ✅ READY FOR PRODUCTION\n")?;
        } else {
            writeln!($writer, "**Verdict:** ❌ NOT READY FOR PRODUCTION\n")?;
        }
        writeln!(
            $writer,
            "**Overall score:** {}% (requires {}%)\n",
            readiness.overall, readiness.required
        )?;

        // Summary table
        let summary = &report.summary;
        writeln!($writer, "## Summary\n")?;
        writeln!($writer, "| Metric | Value |")?;
        writeln!($writer, "|--------|------:|")?;
        writeln!($writer, "| Total checks | {} |", summary.total)?;
        writeln!($writer, "| Passed | {} |", summary.passed)?;
        writeln!($writer, "| Failed | {} |", summary.failed)?;
        writeln!($writer, "| Skipped | {} |", summary.skipped)?;
        writeln!($writer, "| Flaky | {} |", summary.flaky)?;
        if summary.uncategorized > 0 {
            writeln!($writer, "| Uncategorized | {} |", summary.uncategorized)?;
        }
        writeln!($writer, "| Pass rate | {}% |", summary.pass_rate)?;
        writeln!($writer)?;

        // Category breakdown
        writeln!($writer, "## Categories\n")?;
        writeln!($writer, "| | Category | Weight | Passed | Score |")?;
        writeln!($writer, "|---|----------|-------:|-------:|------:|")?;
        for c in &report.categories {
            let name = if c.critical_path {
                format!("{} (critical)", c.name)
            } else {
                c.name.clone()
            };
            let score = match c.score {
                Some(s) => format!("{}%", s),
                None => "-".to_string(),
            };
            writeln!(
                $writer,
                "| {} | {} | {} | {}/{} | {} |",
                c.status().glyph(),
                name,
                c.weight,
                c.passed,
                c.total,
                score
            )?;
        }
        writeln!($writer)?;

        if !readiness.blockers.is_empty() {
            writeln!($writer, "## Blockers\n")?;
            for b in &readiness.blockers {
                writeln!($writer, "- {}", b)?;
            }
            writeln!($writer)?;
        }

        if !readiness.warnings.is_empty() {
            writeln!($writer, "## Warnings\n")?;
            for w in &readiness.warnings {
                writeln!($writer, "- {}", w)?;
            }
            writeln!($writer)?;
        }

        writeln!($writer, "## Recommendations\n")?;
        for (i, r) in report.recommendations.iter().enumerate() {
            writeln!($writer, "{}. {}", i + 1, r)?;
        }
        writeln!($writer)?;

        // Artifacts
        let artifacts = &report.artifacts;
        writeln!($writer, "## Artifacts\n")?;
        writeln!($writer, "| Kind | Count |")?;
        writeln!($writer, "|------|------:|")?;
        writeln!($writer, "| Screenshots | {} |", artifacts.screenshots)?;
        writeln!($writer, "| Videos | {} |", artifacts.videos)?;
        writeln!($writer, "| Traces | {} |", artifacts.traces)?;
        writeln!($writer, "| Other | {} |", artifacts.other)?;
    };
}

impl ReportFormatter for MarkdownFormatter {
    fn format(&self, report: &MachineReport) -> anyhow::Result<String> {
        use std::fmt::Write;

        let mut output = String::with_capacity(2048);
        write_markdown_report!(&mut output, report);
        Ok(output)
    }

    fn format_to(
        &self,
        writer: &mut dyn std::io::Write,
        report: &MachineReport,
    ) -> anyhow::Result<()> {
        write_markdown_report!(writer, report);
        Ok(())
    }

    fn format_empty(&self) -> String {
        "# Production Readiness Report\n\n*No report found.*\n".to_string()
    }
}

#[cfg(test)]
#[path = "markdown_tests.rs"]
mod tests;
