// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Score command implementation.

use std::io::Write;

use chrono::Utc;
use termcolor::{StandardStream, WriteColor};

use vouch::cli::{Cli, OutputFormat, ScoreArgs};
use vouch::color::{resolve_color_with, scheme};
use vouch::discovery;
use vouch::error::{Error, ExitCode};
use vouch::registry::{CategoryRegistry, Thresholds};
use vouch::score::{self, ProductionReadinessScore, ScoreAggregator};

/// Run the score command.
pub fn run(cli: &Cli, args: &ScoreArgs) -> anyhow::Result<ExitCode> {
    if matches!(args.output, OutputFormat::Markdown) {
        return Err(Error::Argument("score supports text and json output".to_string()).into());
    }

    let cwd = std::env::current_dir()?;
    let resolved = discovery::load_config(cli.config.as_deref(), &cwd)?;
    let config = &resolved.config;
    let registry = config.registry()?;

    let path = match args.file {
        Some(ref file) => cwd.join(file),
        None => resolved.layout(None, &cwd).scores().to_path_buf(),
    };
    let scores = score::load_scores(&path)?.ok_or_else(|| {
        Error::Argument(format!("scores file not found: {}", path.display()))
    })?;

    let verdict = ScoreAggregator::new(&registry, config.thresholds).compute(&scores, Utc::now());

    match args.output {
        OutputFormat::Json => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            if args.compact {
                serde_json::to_writer(&mut handle, &verdict)?;
            } else {
                serde_json::to_writer_pretty(&mut handle, &verdict)?;
            }
            writeln!(handle)?;
        }
        OutputFormat::Text | OutputFormat::Markdown => {
            let mut stdout = StandardStream::stdout(resolve_color_with(cli.color, cli.no_color));
            write_verdict(&mut stdout, &verdict, &registry, &config.thresholds)?;
        }
    }

    Ok(ExitCode::from_verdict(verdict.ready_for_production))
}

fn write_verdict(
    out: &mut dyn WriteColor,
    verdict: &ProductionReadinessScore,
    registry: &CategoryRegistry,
    thresholds: &Thresholds,
) -> std::io::Result<()> {
    write!(out, "Verdict: ")?;
    if verdict.ready_for_production {
        out.set_color(&scheme::pass())?;
        write!(out, "READY")?;
    } else {
        out.set_color(&scheme::fail())?;
        write!(out, "NOT READY")?;
    }
    out.reset()?;
    writeln!(out)?;
    writeln!(
        out,
        "Overall: {}% (requires {}%)",
        verdict.overall, thresholds.overall_pass_rate
    )?;

    if !verdict.categories.is_empty() {
        writeln!(out)?;
    }
    for s in &verdict.categories {
        let (name, critical) = match registry.get(&s.category_id) {
            Ok(c) => (c.name.as_str(), c.critical_path),
            Err(_) => (s.category_id.as_str(), false),
        };
        write!(out, "  {:<20} {:>3}/{:<3} {:>4}%", name, s.passed, s.total, s.score)?;
        if critical {
            write!(out, "  critical")?;
        }
        writeln!(out)?;
    }

    write_list(out, "Blockers:", &verdict.blockers, scheme::fail())?;
    write_list(out, "Warnings:", &verdict.warnings, scheme::warn())?;
    Ok(())
}

fn write_list(
    out: &mut dyn WriteColor,
    title: &str,
    items: &[String],
    spec: termcolor::ColorSpec,
) -> std::io::Result<()> {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(out)?;
    out.set_color(&spec)?;
    write!(out, "{title}")?;
    out.reset()?;
    writeln!(out)?;
    for item in items {
        writeln!(out, "  {item}")?;
    }
    Ok(())
}
