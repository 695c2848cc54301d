//! Contest families
//!
//! A family knows two things: the contest identifier used in site URLs and where its
//! files live under the workspace root. Everything else treats it as an opaque
//! [`ContestFamily`].

/// AtCoder Daily Training
pub mod adt;
/// Educational DP Contest
pub mod dp;

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Naming and storage strategy for one family of contests
pub trait ContestFamily: Send + Sync {
    /// Contest identifier as it appears in `/contests/{name}/tasks`
    fn contest_name(&self) -> String;

    /// Directory holding this contest's task directories
    fn base_dir(&self, workdir: &Path) -> PathBuf;
}

/// Known contest families
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FamilyKind {
    /// AtCoder Daily Training (needs date, time and level)
    Adt,
    /// Educational DP Contest
    Dp,
}

impl std::str::FromStr for FamilyKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "adt" => Ok(FamilyKind::Adt),
            "dp" => Ok(FamilyKind::Dp),
            other => Err(Error::NotSupported(format!("unknown contest type: {}", other))),
        }
    }
}

/// Build a family from command-line style arguments
///
/// `date` and `time` are required for ADT and ignored otherwise.
pub fn resolve(
    kind: FamilyKind,
    date: Option<&str>,
    time: Option<&str>,
    level: adt::Level,
) -> Result<Arc<dyn ContestFamily>> {
    match kind {
        FamilyKind::Adt => {
            let date = date.ok_or_else(|| Error::InvalidContest("ADT needs a date".into()))?;
            let time = time.ok_or_else(|| Error::InvalidContest("ADT needs a time".into()))?;
            let family = adt::Family::new(date, time, level).inspect_err(|e| {
                tracing::error!(date, time, error = %e, "failed to parse ADT family");
            })?;
            Ok(Arc::new(family))
        }
        FamilyKind::Dp => Ok(Arc::new(dp::Family)),
    }
}
