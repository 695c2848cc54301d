//! Test harness
//!
//! Runs a solution against the sample files of one task and reports each sample as
//! accepted, wrong or skipped.
//!
//! Samples are discovered by walking the task directory: `input-<id>.*` and
//! `output-<id>.*` files pair up on the exact `<id>` string. For every complete pair the
//! configured interpreter runs the entry point with the input file on stdin, and stdout is
//! compared line by line with the expected output.
//!
//! A spawn failure or a non-zero exit aborts the whole run. A wrong answer does not.

pub mod diff;
pub mod report;

pub use diff::{DiffLine, diff_lines};
pub use report::{Badge, ReportStyle};

use crate::config::TestConfig;
use crate::error::{HarnessError, Result};
use crate::pipeline::{INPUT_PREFIX, OUTPUT_PREFIX};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use walkdir::WalkDir;

/// Per-run options
#[derive(Clone, Debug, Default)]
pub struct TestOptions {
    /// Only run the sample with this id
    pub testcase: Option<String>,
    /// Show details for accepted samples and list filtered ones
    pub verbose: bool,
}

/// Paths of one sample as found on disk
///
/// Either side may be missing; nothing is validated at discovery time.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sample {
    /// Opaque id shared by the input and output file names
    pub id: String,
    /// The `input-<id>.*` file
    pub input: Option<PathBuf>,
    /// The `output-<id>.*` file
    pub output: Option<PathBuf>,
}

/// Outcome of one sample
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Output matched
    Accepted,
    /// Output differed
    WrongAnswer,
    /// Not executed
    Skipped,
}

/// Aggregate counts for a run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TestSummary {
    /// Samples whose output matched
    pub accepted: usize,
    /// Samples whose output differed
    pub wrong_answer: usize,
    /// Samples filtered out or incomplete
    pub skipped: usize,
}

impl TestSummary {
    fn record(&mut self, verdict: Verdict) {
        match verdict {
            Verdict::Accepted => self.accepted += 1,
            Verdict::WrongAnswer => self.wrong_answer += 1,
            Verdict::Skipped => self.skipped += 1,
        }
    }

    /// True when every executed sample was accepted
    pub fn all_accepted(&self) -> bool {
        self.wrong_answer == 0
    }
}

/// Captured streams of one execution
#[derive(Clone, Debug, Default)]
struct Execution {
    /// Bytes actually written to the solution's stdin
    input: Vec<u8>,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

/// Find every sample under `task_dir`, keyed and ordered by id
///
/// Only regular files whose name starts with `input-` or `output-` count. The id is the
/// file stem after that prefix, so `input-01.txt` and `output-01.out` pair up as `01`.
pub fn discover_samples(task_dir: &Path) -> Result<BTreeMap<String, Sample>> {
    let mut samples: BTreeMap<String, Sample> = BTreeMap::new();

    for entry in WalkDir::new(task_dir) {
        let entry = entry.map_err(|e| {
            tracing::error!(path = %task_dir.display(), error = %e, "failed to walk task directory");
            std::io::Error::other(e)
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };

        if let Some(id) = stem.strip_prefix(INPUT_PREFIX) {
            let sample = samples.entry(id.to_string()).or_insert_with(|| Sample {
                id: id.to_string(),
                ..Sample::default()
            });
            sample.input = Some(path.to_path_buf());
        } else if let Some(id) = stem.strip_prefix(OUTPUT_PREFIX) {
            let sample = samples.entry(id.to_string()).or_insert_with(|| Sample {
                id: id.to_string(),
                ..Sample::default()
            });
            sample.output = Some(path.to_path_buf());
        }
    }

    Ok(samples)
}

/// Runs one task's samples and writes the report to `out`
pub struct TestHarness<W: Write> {
    interpreter: String,
    entry_point: PathBuf,
    task_dir: PathBuf,
    style: ReportStyle,
    out: W,
}

impl<W: Write> TestHarness<W> {
    /// Create a harness for the task in `task_dir`
    pub fn new(
        config: &TestConfig,
        task_dir: impl Into<PathBuf>,
        style: ReportStyle,
        out: W,
    ) -> Self {
        let task_dir = task_dir.into();
        Self {
            interpreter: config.interpreter.clone(),
            entry_point: task_dir.join(&config.entry_point),
            task_dir,
            style,
            out,
        }
    }

    /// Consume the harness and return its report sink
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Run every discovered sample in id order
    ///
    /// # Errors
    ///
    /// Stops at the first sample whose execution fails ([`HarnessError::Spawn`],
    /// [`HarnessError::NonZeroExit`]) or whose files cannot be read. Samples already
    /// reported stay reported.
    pub async fn run(&mut self, options: &TestOptions) -> Result<TestSummary> {
        let samples = discover_samples(&self.task_dir)?;
        tracing::debug!(task = %self.task_dir.display(), samples = samples.len(), "discovered samples");

        let mut summary = TestSummary::default();
        for sample in samples.values() {
            let verdict = self.run_sample(sample, options).await?;
            summary.record(verdict);
        }

        tracing::info!(
            task = %self.task_dir.display(),
            accepted = summary.accepted,
            wrong_answer = summary.wrong_answer,
            skipped = summary.skipped,
            "test run finished"
        );
        Ok(summary)
    }

    async fn run_sample(&mut self, sample: &Sample, options: &TestOptions) -> Result<Verdict> {
        let id = sample.id.as_str();

        if options.testcase.as_deref().is_some_and(|wanted| wanted != id) {
            if options.verbose {
                report::write_verdict(&mut self.out, &self.style, Badge::Skip, id)?;
            }
            return Ok(Verdict::Skipped);
        }

        let (Some(input_path), Some(output_path)) = (&sample.input, &sample.output) else {
            tracing::warn!(
                sample = %id,
                has_input = sample.input.is_some(),
                has_output = sample.output.is_some(),
                "sample is missing a file, skipping"
            );
            report::write_verdict(&mut self.out, &self.style, Badge::Skip, id)?;
            return Ok(Verdict::Skipped);
        };

        if !tokio::fs::try_exists(&self.entry_point).await.unwrap_or(false) {
            tracing::warn!(path = %self.entry_point.display(), "entry point does not exist");
            report::write_missing_entry_point(
                &mut self.out,
                &self.style,
                &self.entry_point.display().to_string(),
            )?;
        }

        let input = read_sample(id, input_path).await?;
        let execution = match self.execute(id, input).await {
            Ok(execution) => execution,
            Err((execution, e)) => {
                self.write_failure(id, &execution)?;
                return Err(e.into());
            }
        };

        let expected = read_sample(id, output_path).await?;
        let expected = String::from_utf8_lossy(&expected);
        let actual = String::from_utf8_lossy(&execution.stdout);
        let expected_lines: Vec<&str> = expected.split('\n').collect();
        let actual_lines: Vec<&str> = actual.split('\n').collect();
        let diff = diff_lines(&expected_lines, &actual_lines);

        let (verdict, badge) = if diff.is_empty() {
            (Verdict::Accepted, Badge::Accepted)
        } else {
            (Verdict::WrongAnswer, Badge::WrongAnswer)
        };
        tracing::debug!(sample = %id, verdict = ?verdict, "sample checked");

        report::write_verdict(&mut self.out, &self.style, badge, id)?;
        if verdict == Verdict::WrongAnswer || options.verbose {
            let style = self.style;
            let out = &mut self.out;
            report::write_block(out, &style, "Input", &String::from_utf8_lossy(&execution.input))?;
            report::write_block(out, &style, "Debug", &String::from_utf8_lossy(&execution.stderr))?;
            report::write_block(out, &style, "Output", &actual)?;
            writeln!(out, "{}: {}", style.title("Result"), style.badge(badge))?;
            report::write_diff(out, &style, &diff)?;
        }
        writeln!(self.out)?;

        Ok(verdict)
    }

    /// Run the entry point with `input` on stdin
    ///
    /// On failure the streams captured so far are returned with the error.
    async fn execute(
        &self,
        id: &str,
        input: Vec<u8>,
    ) -> std::result::Result<Execution, (Execution, HarnessError)> {
        let mut execution = Execution {
            input,
            ..Execution::default()
        };

        let interpreter = match which::which(&self.interpreter) {
            Ok(path) => path,
            Err(e) => {
                let err = HarnessError::InterpreterNotFound {
                    interpreter: self.interpreter.clone(),
                    reason: e.to_string(),
                };
                return Err((execution, err));
            }
        };

        let spawned = tokio::process::Command::new(&interpreter)
            .arg(&self.entry_point)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn();
        let mut child = match spawned {
            Ok(child) => child,
            Err(e) => {
                tracing::error!(sample = %id, program = %interpreter.display(), error = %e, "failed to spawn");
                let err = HarnessError::Spawn {
                    sample: id.to_string(),
                    program: interpreter.display().to_string(),
                    source: e,
                };
                return Err((execution, err));
            }
        };

        // Feed stdin from its own task so a solution that writes before reading cannot deadlock
        let feeder = child.stdin.take().map(|stdin| {
            let input = std::mem::take(&mut execution.input);
            tokio::spawn(feed_stdin(stdin, input))
        });

        let waited = child.wait_with_output().await;
        if let Some(feeder) = feeder {
            execution.input = feeder.await.unwrap_or_default();
        }
        let output = match waited {
            Ok(output) => output,
            Err(e) => {
                let err = HarnessError::Spawn {
                    sample: id.to_string(),
                    program: interpreter.display().to_string(),
                    source: e,
                };
                return Err((execution, err));
            }
        };

        execution.stdout = output.stdout;
        execution.stderr = output.stderr;

        if !output.status.success() {
            tracing::error!(sample = %id, status = %output.status, "solution exited unsuccessfully");
            let err = HarnessError::NonZeroExit {
                sample: id.to_string(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&execution.stderr).into_owned(),
            };
            return Err((execution, err));
        }

        Ok(execution)
    }

    fn write_failure(&mut self, id: &str, execution: &Execution) -> std::io::Result<()> {
        let style = self.style;
        let out = &mut self.out;
        writeln!(out, "{}: Test case {}:", style.badge(Badge::Error), id)?;
        report::write_block(out, &style, "Input", &String::from_utf8_lossy(&execution.input))?;
        report::write_block(out, &style, "Output", &String::from_utf8_lossy(&execution.stdout))?;
        writeln!(out, "{}:", style.badge(Badge::Error))?;
        writeln!(out, "{}", String::from_utf8_lossy(&execution.stderr))
    }
}

/// Write `input` to the child's stdin and return the prefix the pipe accepted
///
/// A solution that exits without reading everything closes the pipe; the bytes after that
/// point were never offered to it and are dropped from the returned buffer.
async fn feed_stdin(mut stdin: tokio::process::ChildStdin, mut input: Vec<u8>) -> Vec<u8> {
    let mut written = 0;
    while written < input.len() {
        match stdin.write(&input[written..]).await {
            Ok(0) => break,
            Ok(n) => written += n,
            Err(e) => {
                tracing::debug!(written, total = input.len(), error = %e, "solution closed stdin early");
                break;
            }
        }
    }
    input.truncate(written);
    input
}

async fn read_sample(id: &str, path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path).await.map_err(|source| {
        HarnessError::ReadSample {
            sample: id.to_string(),
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}
