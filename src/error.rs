//! Error types for atcoder-cli
//!
//! This module provides the error handling for the library:
//! - A crate-wide [`Error`] covering configuration, I/O, HTTP and extraction failures
//! - [`HarnessError`] for failures while running a solution against its samples
//! - A distinct [`Error::ClientClosed`] kind for requests racing a serializer shutdown

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for atcoder-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for atcoder-cli
///
/// Each variant includes enough context to diagnose the failure from a log line.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "workdir")
        key: Option<String>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Transport-level HTTP error (DNS, connection, timeout), passed through verbatim
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("HTTP {status} from {url}")]
    HttpStatus {
        /// Response status code
        status: u16,
        /// The URL that was requested
        url: String,
    },

    /// A URL could not be built or resolved
    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// The request serializer has been shut down and no longer accepts requests
    #[error("client is shut down")]
    ClientClosed,

    /// No node in the searched subtree matched the query
    #[error("node not found")]
    NodeNotFound,

    /// Contest family arguments do not name a real contest
    #[error("invalid contest: {0}")]
    InvalidContest(String),

    /// Running a solution against its samples failed
    #[error("test harness error: {0}")]
    Harness(#[from] HarnessError),

    /// Operation not supported (missing binary, unknown family, etc.)
    #[error("not supported: {0}")]
    NotSupported(String),
}

/// Test harness errors
///
/// Any of these aborts the whole harness run. A wrong answer is not an error.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// The configured interpreter could not be found on `PATH`
    #[error("interpreter {interpreter} not found: {reason}")]
    InterpreterNotFound {
        /// The interpreter name from the configuration
        interpreter: String,
        /// Why the lookup failed
        reason: String,
    },

    /// The interpreter process could not be started
    #[error("failed to spawn {program} for test case {sample}: {source}")]
    Spawn {
        /// The sample id being executed
        sample: String,
        /// The program that failed to start
        program: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The solution exited unsuccessfully
    #[error("test case {sample} exited with {status}: {stderr}")]
    NonZeroExit {
        /// The sample id being executed
        sample: String,
        /// Exit status as reported by the OS
        status: String,
        /// Captured standard error of the solution
        stderr: String,
    },

    /// A sample file could not be read
    #[error("failed to read {path} for test case {sample}: {source}")]
    ReadSample {
        /// The sample id being executed
        sample: String,
        /// The file that could not be read
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Shorthand for a configuration error without a specific key
    pub fn config(message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: None,
        }
    }

    /// Returns true for the "client is shut down" kind
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self, Error::ClientClosed)
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closed_error_is_distinguishable_from_transport_errors() {
        assert!(Error::ClientClosed.is_closed());
        assert!(!Error::NodeNotFound.is_closed());
        assert!(!Error::config("bad").is_closed());
    }

    #[test]
    fn non_zero_exit_message_embeds_stderr() {
        let err: Error = HarnessError::NonZeroExit {
            sample: "01".to_string(),
            status: "exit status: 1".to_string(),
            stderr: "Traceback: boom".to_string(),
        }
        .into();

        let message = err.to_string();
        assert!(message.contains("test case 01"));
        assert!(message.contains("Traceback: boom"));
    }

    #[test]
    fn config_error_carries_key() {
        let err = Error::Config {
            message: "unknown level".to_string(),
            key: Some("adt.default_level".to_string()),
        };
        match err {
            Error::Config { key, .. } => assert_eq!(key.as_deref(), Some("adt.default_level")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
