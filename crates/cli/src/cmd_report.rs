// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Report command implementation.

use std::io::Write;

use vouch::cli::{Cli, OutputFormat, ReportArgs};
use vouch::discovery;
use vouch::error::ExitCode;
use vouch::report::{self, MachineReport};

/// Run the report command.
///
/// Prints the report the last teardown wrote. Exits non-zero when there is
/// none or it is not release-ready.
pub fn run(cli: &Cli, args: &ReportArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let resolved = discovery::load_config(cli.config.as_deref(), &cwd)?;
    let layout = resolved.layout(args.root.as_deref(), &cwd);

    if args.compact && !matches!(args.output, OutputFormat::Json) {
        eprintln!("vouch: warning: --compact only applies to JSON output, ignoring");
    }

    let machine = MachineReport::load(&layout.report_json())?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    report::format_report_to(&mut handle, args.output, machine.as_ref(), args.compact)?;
    // Add trailing newline for JSON output
    if matches!(args.output, OutputFormat::Json) {
        writeln!(handle)?;
    }

    let ready = machine.is_some_and(|m| m.readiness.ready_for_production);
    Ok(ExitCode::from_verdict(ready))
}
