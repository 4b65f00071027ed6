//! Behavioral specs for the recover command.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

/// > A healthy command recovers on the first attempt
#[test]
fn recovers_immediately() {
    vouch("recover")
        .on("scores")
        .args(&["--", "true"])
        .passes()
        .stdout_has("recovered after 1 attempt(s)");
}

/// > A command that never succeeds times out with exit 1
#[test]
fn times_out() {
    vouch("recover")
        .on("scores")
        .args(&["--timeout", "300ms", "--interval", "50ms", "--", "false"])
        .not_ready()
        .stdout_has("not recovered after");
}

/// > The last failure detail is reported
#[test]
fn reports_last_error() {
    vouch("recover")
        .on("scores")
        .args(&[
            "--timeout",
            "100ms",
            "--interval",
            "50ms",
            "--",
            "sh",
            "-c",
            "echo backend down >&2; exit 1",
        ])
        .not_ready()
        .stdout_has("last error: backend down");
}

/// > Recovery succeeds once the probe turns healthy
#[test]
fn recovers_after_retries() {
    let temp = default_project();

    // Healthy from the third attempt on
    let script = "n=$(cat count 2>/dev/null || echo 0); n=$((n+1)); echo $n > count; [ $n -ge 3 ]";
    vouch("recover")
        .pwd(temp.path())
        .args(&["--timeout", "5s", "--interval", "20ms", "--", script])
        .passes()
        .stdout_has("recovered after 3 attempt(s)");
}

/// > Timings default from the [recovery] config section
#[test]
fn config_timeout_applies() {
    let temp = default_project();
    temp.config("[env]\nrequired = []\n[recovery]\ntimeout = \"100ms\"\ninterval = \"50ms\"\n");

    vouch("recover")
        .pwd(temp.path())
        .args(&["--", "false"])
        .not_ready();
}

/// > A zero interval is rejected before any probe runs
#[test]
fn zero_interval_is_rejected() {
    vouch("recover")
        .on("scores")
        .args(&["--interval", "0s", "--", "true"])
        .exits(2);
}
