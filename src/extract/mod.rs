//! Page extractors
//!
//! Both extractors are tied to one page layout and match purely on structure (direct
//! child relationships and fixed heading text), never on classes or ids. Anything that does
//! not fit the expected shape is skipped without an error.
//!
//! - [`task_list`] - listing page (`table > tbody > tr > td > a`) into [`Task`]s
//! - [`sample_io`] - task page (`section > h3` + `section > pre`) into [`SampleIo`]s
//!
//! [`Task`]: crate::types::Task
//! [`SampleIo`]: crate::types::SampleIo

pub mod sample_io;
pub mod task_list;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use sample_io::{
    INPUT_MARKER, MAX_EXAMPLE_NUMBER, OUTPUT_MARKER, extract_sample_ios, parse_sample_ios,
};
pub use task_list::{extract_task_list, parse_task_list};
