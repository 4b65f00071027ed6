//! Behavioral specs for terminal output and logging.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

/// > Piped output carries no ANSI codes by default
#[test]
fn piped_output_has_no_color() {
    vouch("score")
        .on("scores")
        .args(&["ready.json"])
        .passes()
        .stdout_lacks("\x1b[");
}

/// > --color forces ANSI codes
#[test]
fn color_flag_forces_ansi() {
    vouch("score")
        .on("scores")
        .args(&["ready.json", "--color"])
        .passes()
        .stdout_has("\x1b[");
}

/// > NO_COLOR disables color even when COLOR is set
#[test]
fn no_color_env_wins() {
    vouch("score")
        .on("scores")
        .args(&["ready.json"])
        .env("COLOR", "1")
        .env("NO_COLOR", "1")
        .passes()
        .stdout_lacks("\x1b[");
}

/// > COLOR forces ANSI codes
#[test]
fn color_env_forces_ansi() {
    vouch("recover")
        .on("scores")
        .args(&["--", "true"])
        .env("COLOR", "1")
        .passes()
        .stdout_has("\x1b[");
}

/// > VOUCH_LOG enables debug logging to stderr
#[test]
fn vouch_log_enables_debug() {
    vouch("score")
        .on("scores")
        .args(&["ready.json"])
        .env("VOUCH_LOG", "debug")
        .passes()
        .stderr_has("computed readiness");
}

/// > Logging is off by default
#[test]
fn logging_off_by_default() {
    vouch("score")
        .on("scores")
        .args(&["ready.json"])
        .passes()
        .stderr_lacks("DEBUG");
}

/// > JSON output is a single document ending in a newline
#[test]
fn compact_json_is_one_line() {
    let run = vouch("score")
        .on("scores")
        .args(&["ready.json", "-o", "json", "--compact"])
        .passes();
    let stdout = run.stdout();

    assert!(stdout.ends_with("}\n"));
    assert_eq!(stdout.lines().count(), 1);
}
