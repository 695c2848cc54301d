//! Fetch pipeline
//!
//! Listing first, then every task page in listing order, one after another. The first
//! fetch failure aborts the run; a sample file that cannot be written is only logged.
//!
//! On disk each task gets its own directory named after its label:
//!
//! ```text
//! <base>/A/input-00.txt
//! <base>/A/output-00.txt
//! <base>/A/input-01.txt
//! ...
//! ```

use crate::client::Client;
use crate::error::Result;
use crate::types::{SampleIo, Task};
use std::path::{Path, PathBuf};

/// Prefix of sample input files
pub const INPUT_PREFIX: &str = "input-";
/// Prefix of expected output files
pub const OUTPUT_PREFIX: &str = "output-";

/// Counts reported by [`FetchPipeline::run`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FetchSummary {
    /// Tasks found in the listing
    pub tasks: usize,
    /// Sample files written
    pub files: usize,
}

/// Fetches a contest's tasks and their examples
pub struct FetchPipeline<'a> {
    client: &'a Client,
}

impl<'a> FetchPipeline<'a> {
    /// Create a pipeline over `client`
    pub fn new(client: &'a Client) -> Self {
        Self { client }
    }

    /// Fetch the listing and every task's examples
    ///
    /// Task pages are fetched sequentially in listing order.
    ///
    /// # Errors
    ///
    /// The first listing or task page failure is returned and no further pages are requested.
    pub async fn fetch_all(&self) -> Result<Vec<Task>> {
        let mut tasks = self.client.fetch_task_list().await?;
        for task in &mut tasks {
            self.client.fetch_sample_ios(task).await?;
        }
        Ok(tasks)
    }

    /// Fetch everything and write each task's examples under `base_dir`
    ///
    /// Each task's directory is created before its page is fetched.
    pub async fn run(&self, base_dir: &Path) -> Result<FetchSummary> {
        let mut tasks = self.client.fetch_task_list().await?;
        let mut summary = FetchSummary {
            tasks: tasks.len(),
            files: 0,
        };

        for task in &mut tasks {
            let task_dir = base_dir.join(&task.index);
            tokio::fs::create_dir_all(&task_dir).await.inspect_err(|e| {
                tracing::error!(path = %task_dir.display(), error = %e, "failed to create task directory");
            })?;

            self.client.fetch_sample_ios(task).await?;
            summary.files += write_samples(task, &task_dir).await;
        }

        tracing::info!(
            contest = %self.client.family().contest_name(),
            tasks = summary.tasks,
            files = summary.files,
            "fetched contest"
        );
        Ok(summary)
    }
}

/// Path of the sample file for 0-based example `position`
pub fn sample_path(task_dir: &Path, prefix: &str, position: usize) -> PathBuf {
    task_dir.join(format!("{}{:02}.txt", prefix, position))
}

/// Write both sides of every example of `task` into `task_dir`
///
/// An absent side, including both sides of a placeholder, is written as a lone newline so
/// positions stay aligned on disk. Returns the number of files written. Failures are logged
/// and skipped.
pub async fn write_samples(task: &Task, task_dir: &Path) -> usize {
    let mut written = 0;
    for (position, sample) in task.sample_ios.iter().enumerate() {
        let SampleIo { input, output } = sample;
        for (prefix, lines) in [(INPUT_PREFIX, input), (OUTPUT_PREFIX, output)] {
            let path = sample_path(task_dir, prefix, position);
            let contents = format!("{}\n", lines.as_deref().unwrap_or_default().join("\n"));
            match tokio::fs::write(&path, contents).await {
                Ok(()) => {
                    tracing::debug!(path = %path.display(), "wrote sample file");
                    written += 1;
                }
                Err(e) => {
                    tracing::error!(path = %path.display(), error = %e, "failed to write sample file");
                }
            }
        }
    }
    written
}
