//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for testing vouch CLI behavior.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Environment variables the built-in config requires.
pub const REQUIRED_ENV: &[&str] = &["BACKEND_URL", "BACKEND_SERVICE_KEY"];

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Returns a Command configured to run the vouch binary, isolated from
/// the caller's vouch and backend environment.
pub fn vouch_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("vouch"));
    cmd.env_remove("VOUCH_CONFIG")
        .env_remove("VOUCH_LOG")
        .env_remove("COLOR")
        .env_remove("NO_COLOR");
    for var in REQUIRED_ENV {
        cmd.env_remove(var);
    }
    cmd
}

/// Create a command builder for a subcommand
pub fn vouch(subcommand: &str) -> VouchBuilder {
    VouchBuilder {
        args: vec![subcommand.to_string()],
        dir: None,
        envs: Vec::new(),
    }
}

/// Command builder for fluent test assertions
pub struct VouchBuilder {
    args: Vec<String>,
    dir: Option<PathBuf>,
    envs: Vec<(String, String)>,
}

#[allow(dead_code)]
impl VouchBuilder {
    /// Set fixture directory by name
    pub fn on(mut self, fixture_name: &str) -> Self {
        self.dir = Some(fixture(fixture_name));
        self
    }

    /// Set working directory (alternative to fixture)
    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Set the backend variables the default config requires
    pub fn backend_env(self) -> Self {
        self.env("BACKEND_URL", "http://localhost:8080")
            .env("BACKEND_SERVICE_KEY", "service-key")
    }

    /// Run and assert exit code 0
    pub fn passes(self) -> RunAssert {
        run_exits(self.command(), 0)
    }

    /// Run and assert a negative verdict (exit code 1)
    pub fn not_ready(self) -> RunAssert {
        run_exits(self.command(), 1)
    }

    /// Run and assert the given exit code
    pub fn exits(self, code: i32) -> RunAssert {
        run_exits(self.command(), code)
    }

    /// Build the command without running it
    fn command(self) -> Command {
        let mut cmd = vouch_cmd();
        cmd.args(&self.args);

        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }

        for (key, value) in &self.envs {
            cmd.env(key, value);
        }

        cmd
    }
}

fn run_exits(mut cmd: Command, code: i32) -> RunAssert {
    let output = cmd.output().expect("command should run");
    assert_eq!(
        output.status.code(),
        Some(code),
        "expected exit code {}, got {:?}\nstdout: {}\nstderr: {}",
        code,
        output.status.code(),
        String::from_utf8_lossy(&output.stdout),
        String::from_utf8_lossy(&output.stderr)
    );
    RunAssert { output }
}

/// Result of a command run for chaining assertions
pub struct RunAssert {
    output: std::process::Output,
}

#[allow(dead_code)]
impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Parse stdout as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.output.stdout).unwrap_or_else(|e| {
            panic!(
                "stdout should be valid JSON: {}\n{}",
                e,
                String::from_utf8_lossy(&self.output.stdout)
            )
        })
    }

    /// Assert stdout equals expected (with diff on failure)
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout matches predicate.
    ///
    /// ```ignore
    /// .stdout_has("NOT READY")  // contains
    /// .stdout_has(predicates::str::is_match(r"\d+%").unwrap())
    /// ```
    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            predicate.into_predicate().eval(&stdout),
            "stdout predicate failed:\n{}",
            stdout
        );
        self
    }

    /// Assert stdout does not match predicate.
    pub fn stdout_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            !predicate.into_predicate().eval(&stdout),
            "stdout should NOT match predicate:\n{}",
            stdout
        );
        self
    }

    /// Assert stderr matches predicate.
    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            predicate.into_predicate().eval(&stderr),
            "stderr predicate failed:\n{}",
            stderr
        );
        self
    }

    /// Assert stderr does not match predicate.
    pub fn stderr_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            !predicate.into_predicate().eval(&stderr),
            "stderr should NOT match predicate:\n{}",
            stderr
        );
        self
    }
}

/// Get path to a test fixture directory
pub fn fixture(name: &str) -> PathBuf {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR should be set");
    PathBuf::from(manifest_dir)
        .parent()
        .expect("parent should exist")
        .parent()
        .expect("grandparent should exist")
        .join("tests")
        .join("fixtures")
        .join(name)
}

// =============================================================================
// Raw results
// =============================================================================

/// One passing check in every built-in category.
pub const PASSING_RESULTS: &str = r#"{
  "suites": [
    { "title": "Security", "specs": [ { "title": "rejects forged session", "tests": [ { "status": "passed" } ] } ] },
    { "title": "Performance", "specs": [ { "title": "p95 under budget", "tests": [ { "status": "passed" } ] } ] },
    { "title": "Reliability", "specs": [ { "title": "recovers from restart", "tests": [ { "status": "passed" } ] } ] },
    { "title": "Compliance", "specs": [ { "title": "exports user data", "tests": [ { "status": "passed" } ] } ] },
    { "title": "User Experience", "specs": [ { "title": "onboarding", "tests": [ { "status": "passed" } ] } ] },
    { "title": "DevOps", "specs": [ { "title": "health endpoint", "tests": [ { "status": "passed" } ] } ] },
    { "title": "Data Integrity", "specs": [ { "title": "no orphaned rows", "tests": [ { "status": "passed" } ] } ] },
    { "title": "Integration", "specs": [ { "title": "webhook delivered", "tests": [ { "status": "passed" } ] } ] }
  ]
}"#;

/// A critical security failure next to a passing check.
pub const FAILING_RESULTS: &str = r#"{
  "suites": [
    {
      "title": "Security",
      "specs": [
        { "title": "rejects forged session", "tests": [ { "status": "passed" } ] },
        { "title": "blocks sql injection", "tests": [
          { "status": "failed", "severity": "critical", "error": "payload reflected\n  at login.spec.ts:42" }
        ] }
      ]
    }
  ]
}"#;

// =============================================================================
// Project
// =============================================================================

/// Temporary project directory with helper methods.
///
/// The directory carries a `.git` marker so config discovery never escapes
/// into the host's directories.
///
/// ```ignore
/// let temp = Project::with_defaults();
/// temp.results(FAILING_RESULTS);
/// vouch("teardown").pwd(temp.path()).not_ready();
/// ```
pub struct Project {
    dir: tempfile::TempDir,
}

#[allow(dead_code)]
impl Project {
    /// Create an empty project with no config
    pub fn empty() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join(".git")).unwrap();
        Self { dir }
    }

    /// Create a project whose vouch.toml requires no environment
    pub fn with_defaults() -> Self {
        let temp = Self::empty();
        temp.config("[env]\nrequired = []\n");
        temp
    }

    /// Get the project path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Path inside the default artifact tree
    pub fn artifact(&self, path: impl AsRef<Path>) -> PathBuf {
        self.dir.path().join(".vouch").join(path)
    }

    /// Write vouch.toml (auto-prefixes with `version = 1` if not present)
    pub fn config(&self, content: &str) {
        let content = if content.contains("version") {
            content.to_string()
        } else {
            format!("version = 1\n{}", content)
        };
        std::fs::write(self.dir.path().join("vouch.toml"), content).unwrap();
    }

    /// Write the raw result tree at its default location
    pub fn results(&self, content: &str) {
        self.file(".vouch/results/raw-results.json", content);
    }

    /// Write a file at the given path (parent directories created automatically)
    pub fn file(&self, path: impl AsRef<Path>, content: &str) {
        let full_path = self.dir.path().join(path.as_ref());
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(full_path, content).unwrap();
    }

    /// Read a file relative to the project
    pub fn read(&self, path: impl AsRef<Path>) -> String {
        std::fs::read_to_string(self.dir.path().join(path.as_ref())).unwrap()
    }
}

/// Creates a temp project with a vouch.toml that requires no environment
pub fn default_project() -> Project {
    Project::with_defaults()
}
