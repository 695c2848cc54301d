//! Configuration types for atcoder-cli
//!
//! The configuration lives in `$XDG_CONFIG_HOME/atcoder-cli/config.toml` (or the platform
//! config directory when `XDG_CONFIG_HOME` is unset). Every section is optional.
//!
//! ```toml
//! workdir = "$HOME/atcoder"
//!
//! [adt]
//! default_level = "easy"
//!
//! [http]
//! request_interval_ms = 100
//!
//! [test]
//! interpreter = "python3"
//! entry_point = "main.py"
//! ```

use crate::contests::adt::Level;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Directory name under the user config directory
const CONFIG_DIR_NAME: &str = "atcoder-cli";

/// Config file name
const CONFIG_FILE_NAME: &str = "config.toml";

/// Main configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Root of the local contest workspace (`$VAR` references are expanded; empty = cwd)
    #[serde(default)]
    pub workdir: PathBuf,

    /// AtCoder Daily Training settings
    #[serde(default)]
    pub adt: AdtConfig,

    /// Outbound HTTP settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Sample test runner settings
    #[serde(default)]
    pub test: TestConfig,
}

/// AtCoder Daily Training settings
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AdtConfig {
    /// Level used when none is given on the command line (default: all)
    #[serde(default)]
    pub default_level: Level,
}

/// Outbound HTTP settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Site root all contest URLs are built from (default: "https://atcoder.jp")
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Minimum gap between two dispatched requests (default: 100ms)
    #[serde(
        default = "default_request_interval",
        rename = "request_interval_ms",
        with = "duration_millis_serde"
    )]
    pub request_interval: Duration,

    /// Per-request timeout applied by the HTTP client (default: 30s)
    #[serde(
        default = "default_timeout",
        rename = "timeout_secs",
        with = "duration_serde"
    )]
    pub timeout: Duration,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_interval: default_request_interval(),
            timeout: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Sample test runner settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TestConfig {
    /// Interpreter used to run solutions (default: "python3")
    #[serde(default = "default_interpreter")]
    pub interpreter: String,

    /// Solution file inside each task directory (default: "main.py")
    #[serde(default = "default_entry_point")]
    pub entry_point: PathBuf,

    /// Colorize the report (default: true)
    #[serde(default = "default_true")]
    pub color: bool,
}

impl Default for TestConfig {
    fn default() -> Self {
        Self {
            interpreter: default_interpreter(),
            entry_point: default_entry_point(),
            color: true,
        }
    }
}

impl Config {
    /// Location of the config file
    ///
    /// `$XDG_CONFIG_HOME` wins when set, otherwise the platform config directory is used.
    pub fn file_path() -> Result<PathBuf> {
        let config_home = match std::env::var_os("XDG_CONFIG_HOME") {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => directories::BaseDirs::new()
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| Error::config("could not determine user config directory"))?,
        };
        Ok(config_home.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Load the config from its default location
    pub fn load() -> Result<Self> {
        let path = Self::file_path()?;
        Self::load_from(&path)
    }

    /// Load and resolve the config from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            tracing::error!(file = %path.display(), error = %e, "failed to open config file");
            Error::config(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let config = Self::from_toml_str(&contents).inspect_err(|e| {
            tracing::error!(file = %path.display(), error = %e, "failed to load config file");
        })?;
        tracing::debug!(file = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse a config document and resolve the workdir
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let mut config: Config =
            toml::from_str(contents).map_err(|e| Error::config(e.to_string()))?;
        config.resolve_workdir()?;
        Ok(config)
    }

    /// Expand environment references in `workdir`, defaulting it to the current directory
    fn resolve_workdir(&mut self) -> Result<()> {
        let raw = self.workdir.to_string_lossy().into_owned();
        let expanded = expand_env(&raw)?;
        self.workdir = if expanded.is_empty() {
            std::env::current_dir().inspect_err(|e| {
                tracing::error!(error = %e, "failed to get current working directory");
            })?
        } else {
            PathBuf::from(expanded)
        };
        Ok(())
    }

    /// Write the effective configuration as TOML
    pub fn dump(&self, writer: &mut impl Write) -> Result<()> {
        let rendered = toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))?;
        writer.write_all(rendered.as_bytes())?;
        Ok(())
    }
}

/// Replace `$VAR` and `${VAR}` with environment values; unset variables expand to ""
fn expand_env(raw: &str) -> Result<String> {
    let pattern = regex::Regex::new(r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))")
        .map_err(|e| Error::config(format!("invalid expansion pattern: {}", e)))?;

    let expanded = pattern.replace_all(raw, |caps: &regex::Captures<'_>| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .and_then(|name| std::env::var(name.as_str()).ok())
            .unwrap_or_default()
    });
    Ok(expanded.into_owned())
}

fn default_base_url() -> String {
    "https://atcoder.jp".to_string()
}

fn default_request_interval() -> Duration {
    crate::client::DEFAULT_REQUEST_INTERVAL
}

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

fn default_user_agent() -> String {
    format!("atcoder-cli/{}", env!("CARGO_PKG_VERSION"))
}

fn default_interpreter() -> String {
    "python3".to_string()
}

fn default_entry_point() -> PathBuf {
    PathBuf::from("main.py")
}

fn default_true() -> bool {
    true
}

// Duration serialization helper (whole seconds)
mod duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

// Duration serialization helper (milliseconds)
mod duration_millis_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
