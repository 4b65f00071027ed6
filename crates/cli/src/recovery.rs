// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Bounded recovery-time validation.
//!
//! Polls a health probe until it reports healthy, the timeout elapses, or the
//! wait is cancelled. The timeout is measured by wall clock, so a slow probe
//! can overshoot it by at most its own duration.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender, TryRecvError, after, bounded, never, select};

/// Default recovery time objective.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default spacing between probe attempts.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Floor on the spacing between attempts.
pub const MIN_POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Outcome of a single probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    Healthy,
    /// Not healthy yet, with optional detail.
    Unhealthy(Option<String>),
}

/// A health check, abstracted away from transport.
///
/// Errors are treated as an unhealthy attempt and retried.
pub trait HealthProbe {
    fn probe(&mut self) -> anyhow::Result<HealthStatus>;
}

impl<F> HealthProbe for F
where
    F: FnMut() -> anyhow::Result<HealthStatus>,
{
    fn probe(&mut self) -> anyhow::Result<HealthStatus> {
        self()
    }
}

/// Timing bounds for a recovery wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryOptions {
    /// Hard ceiling on total wait time.
    pub timeout: Duration,
    /// Minimum spacing between attempts.
    pub poll_interval: Duration,
}

impl Default for RecoveryOptions {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Aggregate outcome of a probe session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecoveryProbeResult {
    pub recovered: bool,
    pub elapsed: Duration,
    pub attempts: u32,
    pub last_error: Option<String>,
    /// True if the wait was stopped by a cancellation signal.
    pub cancelled: bool,
}

/// Signals cancellation to every [`CancelToken`] cloned from its pair.
///
/// Cancelling drops the underlying sender, so dropping a `Canceller` also
/// cancels.
pub struct Canceller {
    _tx: Sender<()>,
}

impl Canceller {
    pub fn cancel(self) {}
}

/// Observes a cancellation signal.
#[derive(Debug, Clone)]
pub struct CancelToken {
    rx: Receiver<()>,
}

impl CancelToken {
    /// Create a linked canceller/token pair.
    pub fn new() -> (Canceller, CancelToken) {
        let (tx, rx) = bounded(0);
        (Canceller { _tx: tx }, CancelToken { rx })
    }

    /// A token that is never cancelled.
    pub fn never() -> Self {
        Self { rx: never() }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.rx.try_recv(), Err(TryRecvError::Disconnected))
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::never()
    }
}

/// Poll `probe` until healthy, timed out, or cancelled.
///
/// The first attempt runs immediately; later attempts are spaced by
/// `poll_interval`, with the final wait shortened so no attempt starts after
/// the deadline.
pub fn wait_for_recovery<P>(
    probe: &mut P,
    options: RecoveryOptions,
    cancel: &CancelToken,
) -> RecoveryProbeResult
where
    P: HealthProbe + ?Sized,
{
    let start = Instant::now();
    let mut attempts = 0u32;
    let mut last_error = None;

    let finish = |recovered, attempts, last_error, cancelled| RecoveryProbeResult {
        recovered,
        elapsed: start.elapsed(),
        attempts,
        last_error,
        cancelled,
    };

    loop {
        if cancel.is_cancelled() {
            tracing::debug!(attempts, "recovery wait cancelled");
            return finish(false, attempts, last_error, true);
        }

        attempts += 1;
        match probe.probe() {
            Ok(HealthStatus::Healthy) => {
                tracing::debug!(attempts, elapsed = ?start.elapsed(), "recovered");
                return finish(true, attempts, last_error, false);
            }
            Ok(HealthStatus::Unhealthy(detail)) => {
                tracing::trace!(attempts, ?detail, "probe unhealthy");
                if detail.is_some() {
                    last_error = detail;
                }
            }
            Err(e) => {
                tracing::trace!(attempts, "probe failed: {:#}", e);
                last_error = Some(format!("{e:#}"));
            }
        }

        let elapsed = start.elapsed();
        if elapsed >= options.timeout {
            tracing::debug!(attempts, ?elapsed, "recovery timed out");
            return finish(false, attempts, last_error, false);
        }

        let wait = options
            .poll_interval
            .max(MIN_POLL_INTERVAL)
            .min(options.timeout - elapsed);
        select! {
            recv(cancel.rx) -> _ => {
                tracing::debug!(attempts, "recovery wait cancelled");
                return finish(false, attempts, last_error, true);
            }
            recv(after(wait)) -> _ => {}
        }
    }
}

/// Probe that runs a shell command; exit status 0 means healthy.
pub struct CommandProbe<'a> {
    command: &'a str,
    root: &'a Path,
}

impl<'a> CommandProbe<'a> {
    pub fn new(command: &'a str, root: &'a Path) -> Self {
        Self { command, root }
    }
}

impl HealthProbe for CommandProbe<'_> {
    fn probe(&mut self) -> anyhow::Result<HealthStatus> {
        let output = shell(self.command)
            .current_dir(self.root)
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()?;

        if output.status.success() {
            return Ok(HealthStatus::Healthy);
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail: String = stderr.lines().take(5).collect::<Vec<_>>().join("\n");
        Ok(HealthStatus::Unhealthy(Some(if detail.trim().is_empty() {
            format!("`{}` exited with {}", self.command, output.status)
        } else {
            detail
        })))
    }
}

/// Join command words into one shell command line.
///
/// A single word is taken as a complete command line. Several words are
/// quoted individually so each reaches the program as one argument.
pub fn command_line<S: AsRef<str>>(words: &[S]) -> String {
    match words {
        [only] => only.as_ref().to_string(),
        _ => words
            .iter()
            .map(|w| shell_quote(w.as_ref()))
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn shell_quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./:=@%+,".contains(c));
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', "'\\''"))
    }
}

/// Build a platform shell invocation for `command`.
pub(crate) fn shell(command: &str) -> Command {
    if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command]);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command]);
        cmd
    }
}

#[cfg(test)]
#[path = "recovery_tests.rs"]
mod tests;
