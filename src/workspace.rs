//! Contest workspace directory

use crate::contests::ContestFamily;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Create the family's base directory under `workdir` and make it the process working directory
///
/// Call once per process, before any fetch or test activity; every later relative path is
/// resolved against it.
pub fn enter_base_dir(family: &dyn ContestFamily, workdir: &Path) -> Result<PathBuf> {
    let base_dir = prepare_base_dir(family, workdir)?;

    std::env::set_current_dir(&base_dir).inspect_err(|e| {
        tracing::error!(path = %base_dir.display(), error = %e, "failed to change directory");
    })?;
    tracing::debug!(path = %base_dir.display(), "entered contest directory");
    Ok(base_dir)
}

/// Create the family's base directory under `workdir` without changing directory
pub fn prepare_base_dir(family: &dyn ContestFamily, workdir: &Path) -> Result<PathBuf> {
    let base_dir = family.base_dir(workdir);
    std::fs::create_dir_all(&base_dir).inspect_err(|e| {
        tracing::error!(path = %base_dir.display(), error = %e, "failed to create directory");
    })?;
    Ok(base_dir)
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::contests::adt::{Family, Level};
    use crate::contests::dp;

    #[test]
    fn prepare_creates_nested_adt_directory() {
        let workdir = tempfile::tempdir().unwrap();
        let family = Family::new("20250107", "1730", Level::Easy).unwrap();

        let base = prepare_base_dir(&family, workdir.path()).unwrap();

        assert_eq!(base, workdir.path().join("adt/2025/01/07/1730"));
        assert!(base.is_dir());
    }

    #[test]
    fn prepare_is_idempotent() {
        let workdir = tempfile::tempdir().unwrap();

        let first = prepare_base_dir(&dp::Family, workdir.path()).unwrap();
        let second = prepare_base_dir(&dp::Family, workdir.path()).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn prepare_fails_when_a_file_is_in_the_way() {
        let workdir = tempfile::tempdir().unwrap();
        std::fs::write(workdir.path().join("dp"), "").unwrap();

        assert!(prepare_base_dir(&dp::Family, workdir.path()).is_err());
    }
}
