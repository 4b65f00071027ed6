use std::path::PathBuf;

/// Vouch error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Internal error (bug)
    #[error("internal error: {0}")]
    Internal(String),

    /// Required environment variables are not set.
    #[error("missing required environment variables: {}", .missing.join(", "))]
    MissingEnv { missing: Vec<String> },

    /// A category id that the registry does not know.
    #[error("category not found: {0}")]
    CategoryNotFound(String),

    /// Fixture generation or persistence failed.
    #[error("fixture error: {message}")]
    Fixture { message: String },

    /// Raw result tree could not be read or parsed.
    #[error("results error: {}: {message}", .path.display())]
    Results { path: PathBuf, message: String },
}

impl Error {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type using vouch Error
pub type Result<T> = std::result::Result<T, Error>;

/// Exit codes per CLI contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Release-ready (or the command succeeded)
    Success = 0,
    /// Verdict is negative or unavailable
    NotReady = 1,
    /// Configuration, argument, or environment error
    ConfigError = 2,
    /// Internal error
    InternalError = 3,
}

impl ExitCode {
    /// Exit code for a readiness verdict.
    pub fn from_verdict(ready: bool) -> Self {
        if ready {
            ExitCode::Success
        } else {
            ExitCode::NotReady
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Config { .. } | Error::Argument(_) | Error::MissingEnv { .. } => {
                ExitCode::ConfigError
            }
            Error::CategoryNotFound(_) => ExitCode::ConfigError,
            Error::Io { .. } => ExitCode::InternalError,
            Error::Internal(_) => ExitCode::InternalError,
            Error::Fixture { .. } => ExitCode::InternalError,
            Error::Results { .. } => ExitCode::NotReady,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
