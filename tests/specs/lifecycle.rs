//! Behavioral specs for the setup and teardown lifecycle.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::prelude::*;

// =============================================================================
// SETUP
// =============================================================================

/// > Setup fails before touching fixtures when required variables are missing
#[test]
fn setup_lists_every_missing_variable() {
    let temp = Project::empty();
    temp.config("");

    vouch("setup")
        .pwd(temp.path())
        .exits(2)
        .stderr_has("missing required environment variables: BACKEND_URL, BACKEND_SERVICE_KEY");

    assert!(!temp.artifact("fixtures/users.json").exists());
}

/// > A blank variable counts as missing
#[test]
fn setup_treats_blank_variable_as_missing() {
    let temp = Project::empty();
    temp.config("");

    vouch("setup")
        .pwd(temp.path())
        .env("BACKEND_URL", "http://localhost:8080")
        .env("BACKEND_SERVICE_KEY", "  ")
        .exits(2)
        .stderr_has("BACKEND_SERVICE_KEY")
        .stderr_lacks("BACKEND_URL,");
}

/// > Setup builds the artifact tree, fixtures and auth state
#[test]
fn setup_prepares_artifact_tree() {
    let temp = Project::empty();
    temp.config("");

    vouch("setup")
        .pwd(temp.path())
        .backend_env()
        .passes()
        .stdout_has("Run ")
        .stdout_has("fixtures")
        .stdout_has("skipped");

    for dir in ["results", "fixtures", "auth", "artifacts", "archive"] {
        assert!(temp.artifact(dir).is_dir(), "{dir} should exist");
    }
    assert!(temp.artifact("monitoring.json").is_file());

    let users: serde_json::Value =
        serde_json::from_str(&temp.read(".vouch/fixtures/users.json")).unwrap();
    assert_eq!(users.as_array().unwrap().len(), 4);

    let admin: serde_json::Value =
        serde_json::from_str(&temp.read(".vouch/auth/admin.json")).unwrap();
    assert_eq!(admin["cookies"][0]["domain"], "localhost");
    assert_eq!(admin["origins"][0]["origin"], "http://localhost:8080");
}

/// > A failing database init degrades setup but does not abort it
#[test]
fn setup_warns_on_database_failure() {
    let temp = default_project();
    temp.config("[env]\nrequired = []\n[database]\ninit = \"exit 3\"\n");

    vouch("setup")
        .pwd(temp.path())
        .passes()
        .stderr_has("vouch: warning: setup database:");

    assert!(temp.artifact("auth/viewer.json").is_file());
}

/// > --root overrides the configured artifact tree
#[test]
fn setup_root_override() {
    let temp = default_project();

    vouch("setup").pwd(temp.path()).args(&["--root", "out"]).passes();

    assert!(temp.path().join("out/fixtures/scenarios.json").is_file());
    assert!(!temp.artifact("fixtures").exists());
}

// =============================================================================
// TEARDOWN
// =============================================================================

/// > A clean run is release-ready and exits 0
#[test]
fn teardown_ready_run() {
    let temp = default_project();
    vouch("setup").pwd(temp.path()).passes();
    temp.results(PASSING_RESULTS);

    vouch("teardown")
        .pwd(temp.path())
        .passes()
        .stdout_has("Verdict: READY")
        .stdout_has("report.md");

    let human = temp.read(".vouch/results/report.md");
    assert!(human.contains("READY FOR PRODUCTION"));
    assert!(!temp.artifact("monitoring.json").exists());
    assert!(temp.artifact("results/final-metrics.json").is_file());
}

/// > A critical failure blocks the release and exits 1
#[test]
fn teardown_failing_run() {
    let temp = default_project();
    vouch("setup").pwd(temp.path()).passes();
    temp.results(FAILING_RESULTS);

    vouch("teardown")
        .pwd(temp.path())
        .not_ready()
        .stdout_has("Verdict: NOT READY")
        .stdout_has("Critical category Security scored 50% (requires 100%)")
        .stdout_has("Fix \"Security › blocks sql injection\": payload reflected");

    let human = temp.read(".vouch/results/report.md");
    assert!(human.contains("NOT READY FOR PRODUCTION"));
}

/// > With nothing to score, teardown still writes a human report
#[test]
fn teardown_without_results_is_unavailable() {
    let temp = default_project();
    vouch("setup").pwd(temp.path()).passes();

    vouch("teardown")
        .pwd(temp.path())
        .not_ready()
        .stdout_has("UNAVAILABLE");

    assert!(temp.read(".vouch/results/report.md").contains("UNAVAILABLE"));
    assert!(!temp.artifact("results/report.json").exists());
}

/// > Teardown without a prior setup still completes
#[test]
fn teardown_without_setup() {
    let temp = default_project();
    temp.results(PASSING_RESULTS);

    vouch("teardown").pwd(temp.path()).passes();
}

/// > -o json prints the machine report
#[test]
fn teardown_json_output() {
    let temp = default_project();
    temp.results(FAILING_RESULTS);

    let run = vouch("teardown")
        .pwd(temp.path())
        .args(&["-o", "json"])
        .not_ready();
    let json = run.json();

    assert_eq!(json["readiness"]["ready_for_production"], false);
    assert_eq!(json["summary"]["failed"], 1);
    assert!(json["metadata"]["tool"].as_str().unwrap().starts_with("vouch "));
}

/// > -o markdown prints the human report
#[test]
fn teardown_markdown_output() {
    let temp = default_project();
    temp.results(PASSING_RESULTS);

    vouch("teardown")
        .pwd(temp.path())
        .args(&["-o", "markdown"])
        .passes()
        .stdout_has("| Metric | Value |")
        .stdout_lacks("directories");
}

/// > Corrupt raw results degrade teardown with a warning
#[test]
fn teardown_corrupt_results_warn() {
    let temp = default_project();
    temp.results("{ not json");

    vouch("teardown")
        .pwd(temp.path())
        .not_ready()
        .stderr_has("vouch: warning: teardown results:");
}

/// > An unwritable report still prints this run's verdict, not the last one
#[test]
fn teardown_unwritable_report_prints_current_verdict() {
    let temp = default_project();
    temp.results(FAILING_RESULTS);
    vouch("teardown").pwd(temp.path()).not_ready();

    std::fs::remove_file(temp.artifact("results/report.md")).unwrap();
    std::fs::create_dir(temp.artifact("results/report.md")).unwrap();
    temp.results(PASSING_RESULTS);

    let run = vouch("teardown")
        .pwd(temp.path())
        .args(&["-o", "json"])
        .passes()
        .stderr_has("vouch: warning: teardown report:");
    assert_eq!(run.json()["readiness"]["ready_for_production"], true);
}

/// > A scores file alone fills the report's category table
#[test]
fn teardown_scores_file_fills_category_table() {
    let temp = default_project();
    temp.file(
        ".vouch/results/category-scores.json",
        r#"[{"category_id":"security","score":100,"passed":12,"total":12}]"#,
    );

    let run = vouch("teardown")
        .pwd(temp.path())
        .args(&["-o", "json"])
        .passes();
    let json = run.json();

    assert_eq!(json["categories"][0]["id"], "security");
    assert_eq!(json["categories"][0]["passed"], 12);
    assert_eq!(json["categories"][0]["score"], 100);
    assert_eq!(json["categories"][1]["total"], 0);
}

/// > Each teardown archives the reports
#[test]
fn teardown_archives_reports() {
    let temp = default_project();
    temp.results(PASSING_RESULTS);

    vouch("teardown").pwd(temp.path()).passes();

    let archives: Vec<_> = std::fs::read_dir(temp.artifact("archive"))
        .unwrap()
        .map(|e| e.unwrap().path())
        .collect();
    assert_eq!(archives.len(), 1);
    assert!(archives[0].join("report.json").is_file());
    assert!(archives[0].join("report.md").is_file());
}

// =============================================================================
// REPORT
// =============================================================================

/// > report shows the last teardown's verdict
#[test]
fn report_after_teardown() {
    let temp = default_project();
    temp.results(PASSING_RESULTS);
    vouch("teardown").pwd(temp.path()).passes();

    vouch("report")
        .pwd(temp.path())
        .passes()
        .stdout_has("Production Readiness")
        .stdout_has("Verdict: READY");
}

/// > report without a prior teardown
#[test]
fn report_without_teardown() {
    let temp = default_project();

    vouch("report")
        .pwd(temp.path())
        .not_ready()
        .stdout_eq("No report found.\n");

    vouch("report")
        .pwd(temp.path())
        .args(&["-o", "json"])
        .not_ready()
        .stdout_eq("null\n");
}
