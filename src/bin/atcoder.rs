//! `atcoder` command line
//!
//! ```text
//! atcoder init dp
//! atcoder init adt --date 20250107 --time 1730 --level easy
//! atcoder test dp A --testcase 00 -v
//! atcoder config
//! ```

use atcoder_cli::contests::{self, ContestFamily, FamilyKind};
use atcoder_cli::contests::adt::Level;
use atcoder_cli::harness::{ReportStyle, TestHarness, TestOptions};
use atcoder_cli::{Client, Config, FetchPipeline, workspace};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "atcoder", about = "Fetch AtCoder samples and test solutions against them")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch every task of a contest and write its samples
    Init {
        #[command(flatten)]
        contest: ContestArgs,
    },
    /// Run a task's solution against its samples
    Test {
        #[command(flatten)]
        contest: ContestArgs,
        /// Task label, e.g. A
        task: String,
        /// Only run this test case
        #[arg(short, long)]
        testcase: Option<String>,
        /// Show details for accepted and skipped test cases
        #[arg(short, long)]
        verbose: bool,
    },
    /// Print the effective configuration
    Config,
}

#[derive(Args)]
struct ContestArgs {
    /// Contest type (adt or dp)
    family: FamilyKind,
    /// ADT date as YYYYMMDD
    #[arg(short, long)]
    date: Option<String>,
    /// ADT start time as HHMM
    #[arg(long)]
    time: Option<String>,
    /// ADT level (easy, medium, hard or all); defaults to the configured level
    #[arg(short, long)]
    level: Option<Level>,
}

impl ContestArgs {
    fn resolve(&self, config: &Config) -> atcoder_cli::Result<Arc<dyn ContestFamily>> {
        contests::resolve(
            self.family,
            self.date.as_deref(),
            self.time.as_deref(),
            self.level.unwrap_or(config.adt.default_level),
        )
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> atcoder_cli::Result<ExitCode> {
    let config = Config::load()?;

    match cli.command {
        Commands::Init { contest } => {
            let family = contest.resolve(&config)?;
            workspace::enter_base_dir(family.as_ref(), &config.workdir)?;

            let client = Client::new(family, &config.http)?;
            let pipeline = FetchPipeline::new(&client);
            let result =
                atcoder_cli::run_until_signal(&client, pipeline.run(Path::new("."))).await;
            client.shutdown().await;

            let summary = result?;
            println!("Fetched {} tasks ({} files)", summary.tasks, summary.files);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Test {
            contest,
            task,
            testcase,
            verbose,
        } => {
            let family = contest.resolve(&config)?;
            workspace::enter_base_dir(family.as_ref(), &config.workdir)?;

            let options = TestOptions { testcase, verbose };
            let style = ReportStyle::new(config.test.color);
            let mut harness =
                TestHarness::new(&config.test, PathBuf::from(task), style, std::io::stdout());
            // Wrong answers do not affect the exit status
            harness.run(&options).await?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config => {
            config.dump(&mut std::io::stdout())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
