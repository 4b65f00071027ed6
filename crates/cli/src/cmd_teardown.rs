// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Teardown command implementation.

use std::io::Write;

use chrono::Utc;
use termcolor::{StandardStream, WriteColor};

use vouch::cli::{Cli, OutputFormat, TeardownArgs};
use vouch::color::{resolve_color_with, scheme};
use vouch::discovery;
use vouch::error::ExitCode;
use vouch::orchestrator::{Orchestrator, TeardownReport};
use vouch::report;

use crate::cmd_setup::{warn_degraded, write_steps};

/// Run the teardown command.
///
/// Teardown never fails on a degraded step; the exit code carries the
/// verdict.
pub fn run(cli: &Cli, args: &TeardownArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let resolved = discovery::load_config(cli.config.as_deref(), &cwd)?;
    let config = &resolved.config;
    let registry = config.registry()?;
    let layout = resolved.layout(args.root.as_deref(), &cwd);

    let orchestrator = Orchestrator::new(layout, &registry).with_thresholds(config.thresholds);
    let teardown = orchestrator.teardown(Utc::now());

    warn_degraded("teardown", &teardown.steps);
    let exit_code = ExitCode::from_verdict(teardown.ready());

    if let Err(e) = print_teardown(cli, args, &teardown) {
        eprintln!("vouch: warning: could not print teardown output: {e:#}");
    }

    Ok(exit_code)
}

/// Print the reports rendered by this teardown, never the files on disk.
fn print_teardown(
    cli: &Cli,
    args: &TeardownArgs,
    teardown: &TeardownReport,
) -> anyhow::Result<()> {
    match args.output {
        OutputFormat::Json => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            report::format_report_to(
                &mut handle,
                args.output,
                teardown.report.as_ref(),
                args.compact,
            )?;
            writeln!(handle)?;
        }
        OutputFormat::Markdown => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            write!(handle, "{}", teardown.human.as_str())?;
        }
        OutputFormat::Text => {
            let mut stdout = StandardStream::stdout(resolve_color_with(cli.color, cli.no_color));
            write_steps(&mut stdout, &teardown.steps)?;
            writeln!(stdout)?;

            match teardown.report {
                Some(ref machine) => {
                    report::format_report_to(&mut stdout, args.output, Some(machine), false)?;
                }
                None => {
                    write!(stdout, "Verdict: ")?;
                    stdout.set_color(&scheme::warn())?;
                    write!(stdout, "UNAVAILABLE")?;
                    stdout.reset()?;
                    writeln!(stdout, " (no results to score)")?;
                }
            }

            writeln!(stdout)?;
            write!(stdout, "Report: ")?;
            stdout.set_color(&scheme::path())?;
            write!(stdout, "{}", teardown.human_report.display())?;
            stdout.reset()?;
            writeln!(stdout)?;
        }
    }
    Ok(())
}
