//! Behavioral specs for config discovery and validation.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

/// > Unknown keys are warnings (forward compatibility)
#[test]
fn unknown_config_key_warns() {
    let temp = Project::empty();
    temp.config("unknown_key = true\n[env]\nrequired = []\n");

    vouch("categories")
        .pwd(temp.path())
        .passes()
        .stderr_has("vouch: warning:")
        .stderr_has("unrecognized field `unknown_key`");
}

/// > Unknown nested keys are warnings
#[test]
fn unknown_nested_config_key_warns() {
    let temp = default_project();
    temp.config("[thresholds]\noverall_pass_rate = 90\nstrictness = 3\n");

    vouch("categories")
        .pwd(temp.path())
        .passes()
        .stderr_has("thresholds")
        .stderr_has("strictness");
}

/// > Valid config produces no warnings
#[test]
fn valid_config_no_warnings() {
    vouch("categories")
        .on("scores")
        .passes()
        .stderr_lacks("warning");
}

/// > Unsupported config versions are rejected
#[test]
fn unsupported_version_fails() {
    let temp = Project::empty();
    temp.config("version = 7\n");

    vouch("categories")
        .pwd(temp.path())
        .exits(2)
        .stderr_has("unsupported config version 7");
}

/// > Malformed durations are rejected
#[test]
fn bad_duration_fails() {
    let temp = default_project();
    temp.config("[recovery]\ntimeout = \"soon\"\n");

    vouch("categories").pwd(temp.path()).exits(2);
}

/// > Config is found from a nested directory
#[test]
fn config_discovered_from_subdirectory() {
    let temp = default_project();
    temp.file("e2e/specs/.keep", "");

    vouch("setup")
        .pwd(temp.path().join("e2e/specs"))
        .passes();

    // Run paths resolve against the config's directory
    assert!(temp.artifact("fixtures/users.json").is_file());
}

/// > -C selects an explicit config
#[test]
fn explicit_config_flag() {
    let temp = Project::empty();
    temp.file(
        "ci/vouch.toml",
        "version = 1\n[env]\nrequired = []\n[run]\nroot = \"ci-out\"\n",
    );

    vouch("setup")
        .pwd(temp.path())
        .args(&["-C", "ci/vouch.toml"])
        .passes();

    assert!(temp.path().join("ci/ci-out/auth/admin.json").is_file());
}

/// > VOUCH_CONFIG sets config file location
#[test]
fn env_config_sets_path() {
    let temp = Project::empty();
    let path = temp.path().join("custom.toml");
    std::fs::write(&path, "version = 1\n[env]\nrequired = [\"VOUCH_SPEC_TOKEN\"]\n").unwrap();

    vouch("setup")
        .pwd(temp.path())
        .env("VOUCH_CONFIG", path.to_str().unwrap())
        .exits(2)
        .stderr_has("VOUCH_SPEC_TOKEN");
}

/// > A missing explicit config is an error
#[test]
fn missing_explicit_config_fails() {
    let temp = Project::empty();

    vouch("categories")
        .pwd(temp.path())
        .args(&["-C", "absent.toml"])
        .exits(2)
        .stderr_has("config file not found");
}
