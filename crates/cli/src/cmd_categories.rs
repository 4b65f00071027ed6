// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Categories command implementation.

use std::io::Write;

use vouch::cli::{Cli, CategoriesArgs, OutputFormat};
use vouch::discovery;
use vouch::registry::CategoryRegistry;

/// Run the categories command.
pub fn run(cli: &Cli, args: &CategoriesArgs) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let resolved = discovery::load_config(cli.config.as_deref(), &cwd)?;
    let registry = resolved.config.registry()?;

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    match args.output {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut handle, registry.categories())?;
            writeln!(handle)?;
        }
        OutputFormat::Markdown => write_markdown(&mut handle, &registry)?,
        OutputFormat::Text => write_text(&mut handle, &registry)?,
    }
    Ok(())
}

/// Share of the total weight, rounded to a whole percent.
fn share(weight: f64, total: f64) -> f64 {
    if total > 0.0 {
        (weight / total * 100.0).round()
    } else {
        0.0
    }
}

fn write_text(out: &mut dyn Write, registry: &CategoryRegistry) -> std::io::Result<()> {
    let total = registry.total_weight();
    let width = registry
        .categories()
        .iter()
        .map(|c| c.id.len())
        .max()
        .unwrap_or(0);
    for c in registry.categories() {
        write!(
            out,
            "{:<width$}  {:<18} {:>3}%  {:>2} tests",
            c.id,
            c.name,
            share(c.weight, total),
            c.tests.len()
        )?;
        if c.critical_path {
            write!(out, "  critical")?;
        }
        writeln!(out)?;
    }

    let counts = registry.kind_counts();
    writeln!(out)?;
    writeln!(
        out,
        "{} tests: {} automated, {} manual, {} hybrid (~{} min)",
        counts.total(),
        counts.automated,
        counts.manual,
        counts.hybrid,
        registry.estimated_duration().div_ceil(60)
    )
}

fn write_markdown(out: &mut dyn Write, registry: &CategoryRegistry) -> std::io::Result<()> {
    let total = registry.total_weight();
    writeln!(out, "| Category | Weight | Tests | Critical |")?;
    writeln!(out, "|----------|--------|-------|----------|")?;
    for c in registry.categories() {
        writeln!(
            out,
            "| {} (`{}`) | {}% | {} | {} |",
            c.name,
            c.id,
            share(c.weight, total),
            c.tests.len(),
            if c.critical_path { "yes" } else { "no" }
        )?;
    }
    Ok(())
}
