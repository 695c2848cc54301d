//! Example section extraction
//!
//! A task page carries one `section` per example side:
//!
//! ```html
//! <section>
//!   <h3>入力例 1</h3>
//!   <pre>3 4
//! </pre>
//! </section>
//! ```

use crate::tree::{self, NodeRef};
use crate::types::Task;
use scraper::Html;

/// Heading prefix of an input example section
pub const INPUT_MARKER: &str = "入力例";

/// Heading prefix of an output example section
pub const OUTPUT_MARKER: &str = "出力例";

/// Highest example number accepted from a heading
pub const MAX_EXAMPLE_NUMBER: usize = 100;

/// Which side of an example a section holds
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Input,
    Output,
}

/// Parse a task page body and populate `task` from it
pub fn parse_sample_ios(body: &str, task: &mut Task) -> usize {
    let document = Html::parse_document(body);
    extract_sample_ios(&document, task)
}

/// Populate `task.sample_ios` from the example sections of its page
///
/// Sections may appear in any order; each lands at its own example number. A section whose
/// heading is recognized reserves its slot even when its body is missing. Returns how many
/// sections contributed a body.
pub fn extract_sample_ios(document: &Html, task: &mut Task) -> usize {
    let sections = tree::find_all(document.tree.root(), |n| tree::is_element(n, "section"));

    let mut populated = 0;
    for section in sections {
        let Some((side, number)) = example_heading(section) else {
            continue;
        };
        let Some(body) = example_body(section) else {
            task.sample_slot(number);
            tracing::debug!(index = %task.index, number, "example section has no body");
            continue;
        };
        let lines: Vec<String> = body.trim().lines().map(str::to_string).collect();

        let slot = task.sample_slot(number);
        match side {
            Side::Input => slot.input = Some(lines),
            Side::Output => slot.output = Some(lines),
        }
        populated += 1;
    }
    populated
}

/// Side and 1-based number announced by the section's `h3`
fn example_heading(section: NodeRef<'_>) -> Option<(Side, usize)> {
    let heading = tree::find_first(section, |n| {
        let Some(text) = tree::text(n) else {
            return false;
        };
        let Some(h3) = n.parent() else {
            return false;
        };
        tree::is_element(h3, "h3") && tree::is_child_of(h3, section) && split_marker(text).is_some()
    })
    .ok()?;

    let text = tree::text(heading)?;
    tracing::info!(data = text, "section has example number");

    let (side, rest) = split_marker(text)?;
    match parse_example_number(rest) {
        Some(number) => Some((side, number)),
        None => {
            tracing::warn!(data = text, "failed to parse example number");
            None
        }
    }
}

/// Text of the first `pre` directly under the section
fn example_body(section: NodeRef<'_>) -> Option<&str> {
    let body = tree::find_first(section, |n| {
        tree::text(n).is_some()
            && n.parent()
                .is_some_and(|pre| tree::is_element(pre, "pre") && tree::is_child_of(pre, section))
    })
    .ok()?;
    tree::text(body)
}

fn split_marker(text: &str) -> Option<(Side, &str)> {
    if let Some(rest) = text.strip_prefix(INPUT_MARKER) {
        Some((Side::Input, rest))
    } else {
        text.strip_prefix(OUTPUT_MARKER)
            .map(|rest| (Side::Output, rest))
    }
}

/// Number following a marker; a bare marker means example 1
///
/// Numbers outside `1..=MAX_EXAMPLE_NUMBER` are rejected since every lower slot is allocated.
fn parse_example_number(rest: &str) -> Option<usize> {
    let rest = rest.trim();
    if rest.is_empty() {
        return Some(1);
    }
    rest.parse::<usize>()
        .ok()
        .filter(|n| (1..=MAX_EXAMPLE_NUMBER).contains(n))
}
