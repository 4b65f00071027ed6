// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::config::duration::{parse_duration, parse_interval};

/// A production readiness gate that turns test results into a release verdict
#[derive(Parser)]
#[command(name = "vouch")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "VOUCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Force color output
    #[arg(long, global = true)]
    pub color: bool,

    /// Disable color output
    #[arg(long, global = true, conflicts_with = "color")]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Prepare the artifact tree, fixtures, and auth state before a run
    Setup(SetupArgs),
    /// Score results, write reports, and archive the run
    Teardown(TeardownArgs),
    /// Compute a verdict from a category scores file
    Score(ScoreArgs),
    /// Show the most recent readiness report
    Report(ReportArgs),
    /// List the test categories and their weights
    Categories(CategoriesArgs),
    /// Wait for a health command to succeed
    Recover(RecoverArgs),
}

#[derive(clap::Args)]
pub struct SetupArgs {
    /// Artifact tree root (overrides [run].root)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

#[derive(clap::Args)]
pub struct TeardownArgs {
    /// Artifact tree root (overrides [run].root)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Compact JSON output (no whitespace)
    #[arg(long)]
    pub compact: bool,
}

#[derive(clap::Args)]
pub struct ScoreArgs {
    /// Category scores file (defaults to [run].scores)
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Compact JSON output (no whitespace)
    #[arg(long)]
    pub compact: bool,
}

#[derive(clap::Args)]
pub struct ReportArgs {
    /// Artifact tree root (overrides [run].root)
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Compact JSON output (no whitespace)
    #[arg(long)]
    pub compact: bool,
}

#[derive(clap::Args)]
pub struct CategoriesArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct RecoverArgs {
    /// Give up after this long (e.g. 30s, 2m)
    #[arg(long, value_name = "DURATION", value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// Wait between attempts (e.g. 500ms, 2s)
    #[arg(long, value_name = "DURATION", value_parser = parse_interval)]
    pub interval: Option<Duration>,

    /// Health command; exit status 0 means healthy
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND"
    )]
    pub command: Vec<String>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Markdown,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
