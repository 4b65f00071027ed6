// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Vouch CLI entry point.

use clap::{CommandFactory, Parser};
use tracing_subscriber::{EnvFilter, fmt};

use vouch::cli::{Cli, Command};
use vouch::error::ExitCode;

mod cmd_categories;
mod cmd_recover;
mod cmd_report;
mod cmd_score;
mod cmd_setup;
mod cmd_teardown;

fn init_logging() {
    let filter = EnvFilter::try_from_env("VOUCH_LOG").unwrap_or_else(|_| EnvFilter::new("off"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_logging();

    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("vouch: {}", e);
            match e.downcast_ref::<vouch::Error>() {
                Some(err) => ExitCode::from(err),
                None => ExitCode::InternalError,
            }
        }
    };

    std::process::exit(exit_code as i32);
}

fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    match &cli.command {
        None => {
            // Show help for bare invocation
            Cli::command().print_help()?;
            println!();
            Ok(ExitCode::Success)
        }
        Some(Command::Setup(args)) => {
            cmd_setup::run(&cli, args)?;
            Ok(ExitCode::Success)
        }
        Some(Command::Teardown(args)) => cmd_teardown::run(&cli, args),
        Some(Command::Score(args)) => cmd_score::run(&cli, args),
        Some(Command::Report(args)) => cmd_report::run(&cli, args),
        Some(Command::Categories(args)) => {
            cmd_categories::run(&cli, args)?;
            Ok(ExitCode::Success)
        }
        Some(Command::Recover(args)) => cmd_recover::run(&cli, args),
    }
}
