use super::ContestFamily;
use std::path::{Path, PathBuf};

/// The Educational DP Contest (a single fixed contest)
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Family;

impl ContestFamily for Family {
    fn contest_name(&self) -> String {
        "dp".to_string()
    }

    fn base_dir(&self, workdir: &Path) -> PathBuf {
        workdir.join("dp")
    }
}
