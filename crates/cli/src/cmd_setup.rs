// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Setup command implementation.

use std::io::Write;

use chrono::Utc;
use termcolor::{StandardStream, WriteColor};

use vouch::cli::{Cli, SetupArgs};
use vouch::color::{resolve_color_with, scheme};
use vouch::discovery;
use vouch::orchestrator::{
    CommandDatabaseInit, Environment, Orchestrator, StepOutcome, StepRecord,
};

/// Run the setup command.
pub fn run(cli: &Cli, args: &SetupArgs) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let resolved = discovery::load_config(cli.config.as_deref(), &cwd)?;
    let config = &resolved.config;
    let registry = config.registry()?;
    let layout = resolved.layout(args.root.as_deref(), &cwd);

    let database = CommandDatabaseInit::new(config.database.init.clone(), resolved.base.clone());
    let orchestrator = Orchestrator::new(layout, &registry)
        .with_thresholds(config.thresholds)
        .with_required_env(config.env.required.clone())
        .with_database(database);

    let report = orchestrator.setup(&Environment::from_process(), Utc::now())?;

    warn_degraded("setup", &report.steps);

    let mut stdout = StandardStream::stdout(resolve_color_with(cli.color, cli.no_color));
    stdout.set_color(&scheme::heading())?;
    write!(stdout, "Run {}", report.run_id)?;
    stdout.reset()?;
    writeln!(stdout)?;
    write_steps(&mut stdout, &report.steps)?;
    write!(stdout, "Artifacts: ")?;
    stdout.set_color(&scheme::path())?;
    write!(stdout, "{}", orchestrator.layout().root().display())?;
    stdout.reset()?;
    writeln!(stdout)?;
    Ok(())
}

/// Print one line per step, colored by outcome.
pub fn write_steps(out: &mut dyn WriteColor, steps: &[StepRecord]) -> std::io::Result<()> {
    let width = steps.iter().map(|s| s.name.len()).max().unwrap_or(0);
    for record in steps {
        write!(out, "  {:<width$}  ", record.name)?;
        let spec = match record.outcome {
            StepOutcome::Completed => scheme::pass(),
            StepOutcome::Skipped(_) => scheme::skip(),
            StepOutcome::Degraded(_) => scheme::warn(),
        };
        out.set_color(&spec)?;
        write!(out, "{}", record.outcome)?;
        out.reset()?;
        writeln!(out)?;
    }
    Ok(())
}

/// Report degraded steps on stderr.
pub fn warn_degraded(phase: &str, steps: &[StepRecord]) {
    for record in steps {
        if let StepOutcome::Degraded(ref message) = record.outcome {
            eprintln!("vouch: warning: {} {}: {}", phase, record.name, message);
        }
    }
}
