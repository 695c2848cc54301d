use super::ContestFamily;
use crate::error::{Error, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Difficulty level of an ADT contest
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    /// Easy set
    Easy,
    /// Medium set
    Medium,
    /// Hard set
    Hard,
    /// Combined set
    #[default]
    All,
}

impl Level {
    /// Name used in contest identifiers
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Easy => "easy",
            Level::Medium => "medium",
            Level::Hard => "hard",
            Level::All => "all",
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "easy" => Ok(Level::Easy),
            "medium" => Ok(Level::Medium),
            "hard" => Ok(Level::Hard),
            "all" => Ok(Level::All),
            other => Err(Error::Config {
                message: format!("unknown ADT level: {}", other),
                key: Some("adt.default_level".to_string()),
            }),
        }
    }
}

/// Start times of the daily holds, in order; the position is the hold number minus one
fn daily_holds(weekday: Weekday) -> Option<[&'static str; 3]> {
    match weekday {
        Weekday::Tue => Some(["1530", "1730", "1930"]),
        Weekday::Wed => Some(["1600", "1800", "2000"]),
        Weekday::Thu => Some(["1630", "1830", "2030"]),
        _ => None,
    }
}

/// One AtCoder Daily Training contest
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Family {
    date: NaiveDate,
    number: usize,
    level: Level,
}

impl Family {
    /// Resolve a contest from its date (`YYYYMMDD`) and start time (`HHMM`)
    pub fn new(raw_date: &str, raw_time: &str, level: Level) -> Result<Self> {
        let date = NaiveDate::parse_from_str(raw_date, "%Y%m%d")
            .map_err(|e| Error::InvalidContest(format!("bad date {:?}: {}", raw_date, e)))?;

        let holds = daily_holds(date.weekday()).ok_or_else(|| {
            Error::InvalidContest(format!("no ADT is held on {}", date.weekday()))
        })?;

        let number = holds
            .iter()
            .position(|&t| t == raw_time)
            .map(|i| i + 1)
            .ok_or_else(|| {
                Error::InvalidContest(format!(
                    "no ADT starts at {} on {} (holds: {})",
                    raw_time,
                    date.weekday(),
                    holds.join(", ")
                ))
            })?;

        Ok(Self {
            date,
            number,
            level,
        })
    }

    /// Hold number within the day (1-based)
    pub fn number(&self) -> usize {
        self.number
    }
}

impl ContestFamily for Family {
    fn contest_name(&self) -> String {
        format!(
            "adt_{}_{}_{}",
            self.level,
            self.date.format("%Y%m%d"),
            self.number
        )
    }

    fn base_dir(&self, workdir: &Path) -> PathBuf {
        let start = daily_holds(self.date.weekday())
            .and_then(|holds| holds.get(self.number - 1).copied())
            .unwrap_or_default();

        workdir
            .join("adt")
            .join(format!("{:04}", self.date.year()))
            .join(format!("{:02}", self.date.month()))
            .join(format!("{:02}", self.date.day()))
            .join(start)
    }
}
