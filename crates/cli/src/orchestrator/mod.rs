// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test-run lifecycle: setup before any check runs, teardown after.
//!
//! Setup fails fast on missing environment and unwritable directories; only
//! database initialization may degrade. Teardown never fails: each step is
//! attempted and its outcome recorded, so reporting, archiving, cleanup and
//! metrics all run even when an earlier step could not.

pub mod archive;
pub mod auth;
pub mod database;
pub mod env;
pub mod fixtures;
pub mod metrics;
pub mod monitoring;

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::config::RunConfig;
use crate::error::{Error, Result};
use crate::registry::{CategoryRegistry, Thresholds};
use crate::report::{HumanReport, JsonFormatter, MachineReport, ReportFormatter, render_report};
use crate::results::{RawResults, ResultTally};
use crate::score::{CategoryScore, ProductionReadinessScore, ScoreAggregator, load_scores};

pub use archive::{ArchiveSummary, archive_run, archive_stamp, count_artifacts};
pub use auth::{AuthContext, Authenticator, StorageState, TokenAuthenticator};
pub use database::{CommandDatabaseInit, DatabaseInit};
pub use env::Environment;
pub use fixtures::{FixtureSet, UserFixture};
pub use metrics::{FinalMetrics, MetricsInput};
pub use monitoring::MonitoringContext;

/// Environment variable holding the backend origin for auth state.
pub const BACKEND_URL_VAR: &str = "BACKEND_URL";

/// File locations of one run's artifact tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunLayout {
    root: PathBuf,
    raw_results: PathBuf,
    scores: PathBuf,
}

impl RunLayout {
    /// Layout with the default results and scores locations.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let defaults = RunConfig::default();
        let root = root.into();
        Self {
            raw_results: root.join(defaults.results),
            scores: root.join(defaults.scores),
            root,
        }
    }

    /// Layout from config, with relative paths resolved against `base`.
    pub fn from_config(base: &Path, run: &RunConfig) -> Self {
        let root = base.join(&run.root);
        Self {
            raw_results: root.join(&run.results),
            scores: root.join(&run.scores),
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn results_dir(&self) -> PathBuf {
        self.root.join("results")
    }

    pub fn fixtures_dir(&self) -> PathBuf {
        self.root.join("fixtures")
    }

    pub fn auth_dir(&self) -> PathBuf {
        self.root.join("auth")
    }

    pub fn artifacts_dir(&self) -> PathBuf {
        self.root.join("artifacts")
    }

    pub fn archive_dir(&self) -> PathBuf {
        self.root.join("archive")
    }

    pub fn raw_results(&self) -> &Path {
        &self.raw_results
    }

    pub fn scores(&self) -> &Path {
        &self.scores
    }

    pub fn monitoring_file(&self) -> PathBuf {
        self.root.join("monitoring.json")
    }

    pub fn report_json(&self) -> PathBuf {
        self.results_dir().join("report.json")
    }

    pub fn report_markdown(&self) -> PathBuf {
        self.results_dir().join("report.md")
    }

    pub fn final_metrics(&self) -> PathBuf {
        self.results_dir().join("final-metrics.json")
    }

    pub fn auth_state(&self, role: &str) -> PathBuf {
        self.auth_dir().join(format!("{role}.json"))
    }

    /// Directories created at setup.
    pub fn directories(&self) -> [PathBuf; 5] {
        [
            self.results_dir(),
            self.fixtures_dir(),
            self.auth_dir(),
            self.artifacts_dir(),
            self.archive_dir(),
        ]
    }

    /// Files copied into each run archive.
    pub fn archived_files(&self) -> [PathBuf; 4] {
        let dir = self.fixtures_dir();
        [
            self.report_json(),
            self.report_markdown(),
            dir.join(fixtures::USERS_FILE),
            dir.join(fixtures::SCENARIOS_FILE),
        ]
    }
}

/// How a lifecycle step ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Completed,
    /// Not applicable to this run.
    Skipped(String),
    /// Attempted and failed; the lifecycle continued.
    Degraded(String),
}

impl StepOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, StepOutcome::Degraded(_))
    }
}

impl fmt::Display for StepOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepOutcome::Completed => write!(f, "done"),
            StepOutcome::Skipped(reason) => write!(f, "skipped ({reason})"),
            StepOutcome::Degraded(message) => write!(f, "degraded: {message}"),
        }
    }
}

/// A named step and its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub name: &'static str,
    pub outcome: StepOutcome,
}

/// Result of a successful setup.
#[derive(Debug, Clone, PartialEq)]
pub struct SetupReport {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub steps: Vec<StepRecord>,
}

impl SetupReport {
    pub fn step(&self, name: &str) -> Option<&StepOutcome> {
        find_step(&self.steps, name)
    }
}

/// Result of teardown. Never an error; degraded steps are listed.
#[derive(Debug, Clone, PartialEq)]
pub struct TeardownReport {
    /// None when neither raw results nor explicit scores were available.
    pub verdict: Option<ProductionReadinessScore>,
    pub steps: Vec<StepRecord>,
    /// Machine report rendered for this run; None without a verdict.
    pub report: Option<MachineReport>,
    /// Markdown rendered for this run, written or not.
    pub human: HumanReport,
    pub human_report: PathBuf,
}

impl TeardownReport {
    /// True only for an available, positive verdict.
    pub fn ready(&self) -> bool {
        self.verdict
            .as_ref()
            .is_some_and(|v| v.ready_for_production)
    }

    pub fn step(&self, name: &str) -> Option<&StepOutcome> {
        find_step(&self.steps, name)
    }

    pub fn degraded(&self) -> impl Iterator<Item = &StepRecord> {
        self.steps.iter().filter(|s| s.outcome.is_degraded())
    }
}

fn find_step<'a>(steps: &'a [StepRecord], name: &str) -> Option<&'a StepOutcome> {
    steps.iter().find(|s| s.name == name).map(|s| &s.outcome)
}

/// Drives setup and teardown for one artifact tree.
pub struct Orchestrator<'a> {
    layout: RunLayout,
    registry: &'a CategoryRegistry,
    thresholds: Thresholds,
    required_env: Vec<String>,
    database: Box<dyn DatabaseInit + 'a>,
    authenticator: Box<dyn Authenticator + 'a>,
}

impl<'a> Orchestrator<'a> {
    /// Orchestrator with default thresholds, no required environment, no
    /// database command, and the offline token authenticator.
    pub fn new(layout: RunLayout, registry: &'a CategoryRegistry) -> Self {
        let database = CommandDatabaseInit::new(None, layout.root());
        Self {
            layout,
            registry,
            thresholds: Thresholds::default(),
            required_env: Vec::new(),
            database: Box::new(database),
            authenticator: Box::new(TokenAuthenticator),
        }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn with_required_env(mut self, required: Vec<String>) -> Self {
        self.required_env = required;
        self
    }

    pub fn with_database(mut self, database: impl DatabaseInit + 'a) -> Self {
        self.database = Box::new(database);
        self
    }

    pub fn with_authenticator(mut self, authenticator: impl Authenticator + 'a) -> Self {
        self.authenticator = Box::new(authenticator);
        self
    }

    pub fn layout(&self) -> &RunLayout {
        &self.layout
    }

    /// Prepare the artifact tree before any check runs.
    pub fn setup(&self, env: &Environment, now: DateTime<Utc>) -> Result<SetupReport> {
        let run_id = archive_stamp(now);
        let mut steps = Vec::new();
        let mut record = |name: &'static str, outcome: StepOutcome| {
            tracing::debug!("setup {}: {}", name, outcome);
            steps.push(StepRecord { name, outcome });
        };

        for dir in self.layout.directories() {
            std::fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
        }
        record(step::DIRECTORIES, StepOutcome::Completed);

        env.require(&self.required_env)?;
        record(step::ENVIRONMENT, StepOutcome::Completed);

        let fixtures = FixtureSet::generate();
        fixtures.write(&self.layout.fixtures_dir())?;
        record(step::FIXTURES, StepOutcome::Completed);

        MonitoringContext::new(run_id.as_str(), now).write(&self.layout.monitoring_file())?;
        record(step::MONITORING, StepOutcome::Completed);

        let database = self.database.initialize().unwrap_or_else(|e| {
            tracing::warn!("database initialization failed: {:#}", e);
            StepOutcome::Degraded(format!("{e:#}"))
        });
        record(step::DATABASE, database);

        let ctx = AuthContext {
            run_id: &run_id,
            backend_url: env.get(BACKEND_URL_VAR),
        };
        for user in &fixtures.users {
            let state = self
                .authenticator
                .storage_state(user, &ctx)
                .map_err(|e| Error::Fixture {
                    message: format!("auth state for {}: {:#}", user.role, e),
                })?;
            let path = self.layout.auth_state(&user.role);
            let json = serde_json::to_string_pretty(&state).map_err(|e| Error::Fixture {
                message: format!("auth state for {}: {}", user.role, e),
            })?;
            std::fs::write(&path, json + "\n").map_err(|e| Error::io(&path, e))?;
        }
        record(step::AUTH, StepOutcome::Completed);

        Ok(SetupReport {
            run_id,
            started_at: now,
            steps,
        })
    }

    /// Score, report, archive and clean up after all checks completed.
    pub fn teardown(&self, now: DateTime<Utc>) -> TeardownReport {
        let mut steps = Vec::new();
        let mut record = |name: &'static str, result: anyhow::Result<StepOutcome>| {
            let outcome = result.unwrap_or_else(|e| StepOutcome::Degraded(format!("{e:#}")));
            if let StepOutcome::Degraded(ref message) = outcome {
                tracing::warn!("teardown {} degraded: {}", name, message);
            } else {
                tracing::debug!("teardown {}: {}", name, outcome);
            }
            steps.push(StepRecord { name, outcome });
        };

        let monitoring = MonitoringContext::load(&self.layout.monitoring_file())
            .unwrap_or_else(|e| {
                tracing::warn!("unreadable monitoring record: {}", e);
                None
            });

        // 1. Raw results
        let mut raw = None;
        record(
            step::RESULTS,
            match RawResults::load(self.layout.raw_results()) {
                Ok(Some(r)) => {
                    raw = Some(r);
                    Ok(StepOutcome::Completed)
                }
                Ok(None) => Ok(StepOutcome::Skipped(format!(
                    "{} not found",
                    self.layout.raw_results().display()
                ))),
                Err(e) => Err(e.into()),
            },
        );

        // 2. Classification and scoring
        let tally = raw
            .as_ref()
            .map(|r| ResultTally::from_results(r, self.registry));
        let mut scores: Option<Vec<CategoryScore>> = None;
        record(
            step::SCORE,
            match load_scores(self.layout.scores()) {
                Ok(Some(explicit)) => {
                    scores = Some(explicit);
                    Ok(StepOutcome::Completed)
                }
                Ok(None) => match tally.as_ref() {
                    Some(t) => {
                        scores = Some(t.category_scores(self.registry));
                        Ok(StepOutcome::Completed)
                    }
                    None => Ok(StepOutcome::Skipped("no results to score".to_string())),
                },
                Err(e) => match tally.as_ref() {
                    Some(t) => {
                        scores = Some(t.category_scores(self.registry));
                        Ok(StepOutcome::Degraded(format!("{e}; scored raw results instead")))
                    }
                    None => Err(e.into()),
                },
            },
        );
        let verdict = scores.as_ref().map(|s| {
            ScoreAggregator::new(self.registry, self.thresholds).compute(s, now)
        });

        // 3-4. Recommendations and reports
        let (report, human) = match self.render_reports(raw.as_ref(), verdict.as_ref()) {
            Ok((report, human)) => {
                record(step::REPORT, self.write_reports(report.as_ref(), &human));
                (report, human)
            }
            Err(e) => {
                let human = HumanReport::unavailable(&format!("report rendering failed: {e:#}"));
                record(step::REPORT, Err(e));
                (None, human)
            }
        };

        // 5. Archive, under the setup run id when known
        let stamp = monitoring
            .as_ref()
            .map_or_else(|| archive_stamp(now), |m| m.run_id.clone());
        record(
            step::ARCHIVE,
            archive_run(&self.layout, &stamp)
                .map(|summary| {
                    tracing::debug!(
                        "archived {} file(s) to {}",
                        summary.copied.len(),
                        summary.dir.display()
                    );
                    StepOutcome::Completed
                })
                .map_err(Into::into),
        );

        // 6. Transient files
        let monitoring_file = self.layout.monitoring_file();
        record(
            step::CLEANUP,
            match std::fs::remove_file(&monitoring_file) {
                Ok(()) => Ok(StepOutcome::Completed),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(StepOutcome::Skipped(
                    "no monitoring record".to_string(),
                )),
                Err(e) => Err(Error::io(&monitoring_file, e).into()),
            },
        );

        // 7. Final metrics
        let input = MetricsInput {
            tally: tally.as_ref(),
            scores: scores.as_deref(),
            run_id: monitoring.as_ref().map(|m| m.run_id.as_str()),
            started_at: monitoring.as_ref().map(|m| m.started_at),
            ready_for_production: verdict.as_ref().map(|v| v.ready_for_production),
        };
        record(
            step::METRICS,
            FinalMetrics::compute(self.registry, &input, now)
                .write(&self.layout.final_metrics())
                .map(|()| StepOutcome::Completed)
                .map_err(Into::into),
        );

        TeardownReport {
            verdict,
            steps,
            report,
            human,
            human_report: self.layout.report_markdown(),
        }
    }

    fn unavailable_reason(&self) -> String {
        format!(
            "no raw results at {} and no category scores at {}",
            self.layout.raw_results().display(),
            self.layout.scores().display()
        )
    }

    /// Render the machine and human reports, or an "unavailable" human
    /// report when there is no verdict.
    fn render_reports(
        &self,
        raw: Option<&RawResults>,
        verdict: Option<&ProductionReadinessScore>,
    ) -> anyhow::Result<(Option<MachineReport>, HumanReport)> {
        let Some(verdict) = verdict else {
            return Ok((None, HumanReport::unavailable(&self.unavailable_reason())));
        };

        let empty = RawResults::default();
        let artifacts = count_artifacts(&self.layout.artifacts_dir())?;
        let (machine, human) = render_report(
            raw.unwrap_or(&empty),
            verdict,
            self.registry,
            &self.thresholds,
            artifacts,
        )?;
        Ok((Some(machine), human))
    }

    fn write_reports(
        &self,
        machine: Option<&MachineReport>,
        human: &HumanReport,
    ) -> anyhow::Result<StepOutcome> {
        let results_dir = self.layout.results_dir();
        std::fs::create_dir_all(&results_dir).map_err(|e| Error::io(&results_dir, e))?;
        let md_path = self.layout.report_markdown();
        std::fs::write(&md_path, human.as_str()).map_err(|e| Error::io(&md_path, e))?;

        let json_path = self.layout.report_json();
        let Some(machine) = machine else {
            // A machine report from an earlier run must not outlive this one
            match std::fs::remove_file(&json_path) {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => return Err(Error::io(&json_path, e).into()),
            }
            return Ok(StepOutcome::Skipped(self.unavailable_reason()));
        };

        let json = JsonFormatter::default().format(machine)?;
        std::fs::write(&json_path, json + "\n").map_err(|e| Error::io(&json_path, e))?;
        Ok(StepOutcome::Completed)
    }
}

/// Lifecycle step names.
pub mod step {
    pub const DIRECTORIES: &str = "directories";
    pub const ENVIRONMENT: &str = "environment";
    pub const FIXTURES: &str = "fixtures";
    pub const MONITORING: &str = "monitoring";
    pub const DATABASE: &str = "database";
    pub const AUTH: &str = "auth";

    pub const RESULTS: &str = "results";
    pub const SCORE: &str = "score";
    pub const REPORT: &str = "report";
    pub const ARCHIVE: &str = "archive";
    pub const CLEANUP: &str = "cleanup";
    pub const METRICS: &str = "metrics";
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
