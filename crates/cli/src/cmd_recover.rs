// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Recover command implementation.

use std::io::Write;

use termcolor::{StandardStream, WriteColor};

use vouch::cli::{Cli, RecoverArgs};
use vouch::color::{resolve_color_with, scheme};
use vouch::discovery;
use vouch::error::ExitCode;
use vouch::recovery::{CancelToken, CommandProbe, command_line, wait_for_recovery};

/// Run the recover command.
pub fn run(cli: &Cli, args: &RecoverArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let resolved = discovery::load_config(cli.config.as_deref(), &cwd)?;

    let mut options = resolved.config.recovery.options();
    if let Some(timeout) = args.timeout {
        options.timeout = timeout;
    }
    if let Some(interval) = args.interval {
        options.poll_interval = interval;
    }

    let command = command_line(&args.command);
    let mut probe = CommandProbe::new(&command, &cwd);
    let result = wait_for_recovery(&mut probe, options, &CancelToken::never());

    let mut stdout = StandardStream::stdout(resolve_color_with(cli.color, cli.no_color));
    if result.recovered {
        stdout.set_color(&scheme::pass())?;
        write!(stdout, "recovered")?;
        stdout.reset()?;
    } else {
        stdout.set_color(&scheme::fail())?;
        write!(stdout, "not recovered")?;
        stdout.reset()?;
    }
    writeln!(
        stdout,
        " after {} attempt(s) in {:.1}s",
        result.attempts,
        result.elapsed.as_secs_f64()
    )?;
    if !result.recovered
        && let Some(ref error) = result.last_error
    {
        writeln!(stdout, "  last error: {}", error)?;
    }

    Ok(ExitCode::from_verdict(result.recovered))
}
