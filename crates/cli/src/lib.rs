pub mod cli;
pub mod color;
pub mod config;
pub mod discovery;
pub mod error;
pub mod orchestrator;
pub mod recovery;
pub mod registry;
pub mod report;
pub mod results;
pub mod score;

pub use cli::{Cli, Command, OutputFormat};
pub use config::Config;
pub use error::{Error, ExitCode, Result};
pub use orchestrator::{Orchestrator, RunLayout, SetupReport, TeardownReport};
pub use recovery::{RecoveryOptions, RecoveryProbeResult, wait_for_recovery};
pub use registry::{CategoryRegistry, TestCategory, TestDefinition, Thresholds};
pub use score::{CategoryScore, ProductionReadinessScore, ScoreAggregator};
