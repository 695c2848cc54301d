//! # atcoder-cli
//!
//! Fetch AtCoder task samples into a local workspace and check solutions against them.
//!
//! ## Pieces
//!
//! - [`client::RequestSerializer`] - runs HTTP requests one at a time with a minimum spacing
//! - [`tree`] - breadth-first structural queries over parsed HTML
//! - [`extract`] - task listing and example section extractors built on [`tree`]
//! - [`FetchPipeline`] - listing, then each task page, then sample files on disk
//! - [`harness::TestHarness`] - runs a solution against the sample files and diffs output
//!
//! ## Quick Start
//!
//! ```no_run
//! use atcoder_cli::{Client, Config, FetchPipeline, contests};
//! use std::path::Path;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load()?;
//!     let family = Arc::new(contests::dp::Family);
//!     let base_dir = atcoder_cli::workspace::enter_base_dir(family.as_ref(), &config.workdir)?;
//!
//!     let client = Client::new(family, &config.http)?;
//!     let summary = FetchPipeline::new(&client).run(Path::new(".")).await?;
//!     println!("{} tasks written to {}", summary.tasks, base_dir.display());
//!
//!     client.shutdown().await;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Contest site client and request serializer
pub mod client;
/// Configuration types
pub mod config;
/// Contest families
pub mod contests;
/// Error types
pub mod error;
/// Page extractors
pub mod extract;
/// Solution test harness
pub mod harness;
/// Fetch pipeline and sample file layout
pub mod pipeline;
/// Structural HTML queries
pub mod tree;
/// Core types
pub mod types;
/// Contest workspace directory
pub mod workspace;

// Re-export commonly used types
pub use client::{Client, RequestSerializer};
pub use config::Config;
pub use contests::{ContestFamily, FamilyKind};
pub use error::{Error, HarnessError, Result};
pub use harness::{TestHarness, TestOptions, TestSummary};
pub use pipeline::{FetchPipeline, FetchSummary};
pub use types::{SampleIo, Task};

/// Drive `work` to completion unless a termination signal arrives first
///
/// On a signal the client is shut down, so no further requests are started, and
/// [`Error::ClientClosed`] is returned. A request already in flight is left to finish.
///
/// Ctrl+C is honored everywhere, SIGTERM on Unix as well.
pub async fn run_until_signal<F, T>(client: &Client, work: F) -> Result<T>
where
    F: std::future::Future<Output = Result<T>>,
{
    tokio::select! {
        result = work => result,
        _ = wait_for_signal() => {
            client.shutdown().await;
            Err(Error::ClientClosed)
        }
    }
}

#[cfg(unix)]
async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut sigterm) => {
            tokio::select! {
                _ = interrupted() => {}
                _ = sigterm.recv() => tracing::info!("received SIGTERM"),
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not register SIGTERM handler");
            interrupted().await;
        }
    }
}

#[cfg(not(unix))]
async fn wait_for_signal() {
    interrupted().await;
}

/// Resolves on Ctrl+C; never resolves when the handler cannot be installed
async fn interrupted() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("received SIGINT"),
        Err(e) => {
            tracing::warn!(error = %e, "could not listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    }
}
