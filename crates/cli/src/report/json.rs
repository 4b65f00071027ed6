// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON format report output.

use super::{MachineReport, ReportFormatter};

/// JSON format report formatter.
pub struct JsonFormatter {
    compact: bool,
}

impl JsonFormatter {
    /// Create a new JSON formatter.
    ///
    /// If `compact` is true, outputs single-line JSON without whitespace.
    pub fn new(compact: bool) -> Self {
        Self { compact }
    }
}

impl Default for JsonFormatter {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ReportFormatter for JsonFormatter {
    fn format(&self, report: &MachineReport) -> anyhow::Result<String> {
        if self.compact {
            Ok(serde_json::to_string(report)?)
        } else {
            Ok(serde_json::to_string_pretty(report)?)
        }
    }

    fn format_to(
        &self,
        writer: &mut dyn std::io::Write,
        report: &MachineReport,
    ) -> anyhow::Result<()> {
        if self.compact {
            serde_json::to_writer(writer, report)?;
        } else {
            serde_json::to_writer_pretty(writer, report)?;
        }
        Ok(())
    }

    fn format_empty(&self) -> String {
        "null".to_string()
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
