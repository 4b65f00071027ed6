//! Behavioral specs for the score command.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

/// > Scores meeting every threshold are release-ready
#[test]
fn score_ready() {
    vouch("score")
        .on("scores")
        .args(&["ready.json"])
        .passes()
        .stdout_has("Verdict: READY")
        .stdout_has("Overall: 98% (requires 95%)")
        .stdout_lacks("Blockers:");
}

/// > Critical failures block, unknown categories warn
#[test]
fn score_blocked() {
    vouch("score")
        .on("scores")
        .args(&["blocked.json"])
        .not_ready()
        .stdout_has("Verdict: NOT READY")
        .stdout_has("Critical category Security scored 96% (requires 100%)")
        .stdout_has("1 critical failure(s) in Security")
        .stdout_has("Ignored score for unknown category `mobile`");
}

/// > -o json serializes the verdict
#[test]
fn score_json() {
    let run = vouch("score")
        .on("scores")
        .args(&["ready.json", "-o", "json"])
        .passes();
    let json = run.json();

    assert_eq!(json["overall"], 98);
    assert_eq!(json["ready_for_production"], true);
    assert_eq!(json["categories"].as_array().unwrap().len(), 8);
    assert!(json["blockers"].as_array().unwrap().is_empty());
}

/// > Thresholds come from vouch.toml
#[test]
fn score_uses_configured_thresholds() {
    let temp = default_project();
    temp.config("[env]\nrequired = []\n[thresholds]\noverall_pass_rate = 99\n");
    temp.file(
        "scores.json",
        &std::fs::read_to_string(fixture("scores/ready.json")).unwrap(),
    );

    vouch("score")
        .pwd(temp.path())
        .args(&["scores.json"])
        .not_ready()
        .stdout_has("Overall: 98% (requires 99%)");
}

/// > Without a file argument the configured scores path is used
#[test]
fn score_defaults_to_run_scores() {
    let temp = default_project();
    temp.file(
        ".vouch/results/category-scores.json",
        &std::fs::read_to_string(fixture("scores/ready.json")).unwrap(),
    );

    vouch("score").pwd(temp.path()).passes();
}

/// > A missing scores file is an argument error
#[test]
fn score_missing_file() {
    vouch("score")
        .on("scores")
        .args(&["absent.json"])
        .exits(2)
        .stderr_has("scores file not found");
}

/// > A scores file that is not a list cannot be scored
#[test]
fn score_malformed_file() {
    vouch("score")
        .on("scores")
        .args(&["malformed.json"])
        .exits(1)
        .stderr_has("results error");
}

/// > Markdown is not a score output
#[test]
fn score_rejects_markdown() {
    vouch("score")
        .on("scores")
        .args(&["ready.json", "-o", "markdown"])
        .exits(2);
}
