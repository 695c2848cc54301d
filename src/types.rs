//! Core types for atcoder-cli

use url::Url;

/// One published example: input lines and expected output lines
///
/// Either side stays `None` until its section has been extracted. Identity is positional:
/// the example number is the index in [`Task::sample_ios`] plus one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SampleIo {
    /// Lines of the example input
    pub input: Option<Vec<String>>,
    /// Lines of the expected output
    pub output: Option<Vec<String>>,
}

impl SampleIo {
    /// True for a gap filler that never received either side
    pub fn is_placeholder(&self) -> bool {
        self.input.is_none() && self.output.is_none()
    }
}

/// A contest task and its examples
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Task {
    /// Absolute URL of the task detail page
    pub url: Url,
    /// Task label from the listing, e.g. "A"
    pub index: String,
    /// Examples ordered by number; dense, with placeholders for unseen numbers
    pub sample_ios: Vec<SampleIo>,
}

impl Task {
    /// Create a task with no examples yet
    pub fn new(url: Url, index: impl Into<String>) -> Self {
        Self {
            url,
            index: index.into(),
            sample_ios: Vec::new(),
        }
    }

    /// Slot for example `number` (1-based), growing the list with placeholders as needed
    ///
    /// # Panics
    ///
    /// Panics if `number` is 0.
    pub fn sample_slot(&mut self, number: usize) -> &mut SampleIo {
        assert!(number > 0, "example numbers are 1-based");
        if self.sample_ios.len() < number {
            self.sample_ios.resize_with(number, SampleIo::default);
        }
        &mut self.sample_ios[number - 1]
    }
}
