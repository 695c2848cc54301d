//! Task listing extraction

use crate::error::Result;
use crate::tree::{self, NodeRef};
use crate::types::Task;
use scraper::Html;
use url::Url;

/// Parse a listing page body and extract its tasks
pub fn parse_task_list(body: &str, page_url: &Url) -> Result<Vec<Task>> {
    let document = Html::parse_document(body);
    extract_task_list(&document, page_url)
}

/// Extract tasks from the listing table, in row order
///
/// Rows without a first cell, a linked anchor or a label are skipped.
///
/// # Errors
///
/// Returns [`Error::NodeNotFound`](crate::Error::NodeNotFound) when the page has no
/// `table > tbody` at all.
pub fn extract_task_list(document: &Html, page_url: &Url) -> Result<Vec<Task>> {
    let tbody = tree::find_first(document.tree.root(), |n| {
        tree::is_element(n, "tbody") && tree::parent_is(n, "table")
    })
    .inspect_err(|e| {
        tracing::error!(url = %page_url, error = %e, "failed to find tbody");
    })?;

    let mut tasks = Vec::new();
    for row in tbody.children() {
        match extract_row(row, page_url) {
            Some(task) => {
                tracing::info!(index = %task.index, url = %task.url, "found task");
                tasks.push(task);
            }
            None => tracing::trace!("skipping row without a task link"),
        }
    }
    Ok(tasks)
}

fn extract_row(row: NodeRef<'_>, page_url: &Url) -> Option<Task> {
    let cell = tree::find_first(row, |n| {
        tree::is_child_of(n, row) && tree::is_element(n, "td")
    })
    .ok()?;

    let anchor = tree::find_first(cell, |n| {
        tree::is_child_of(n, cell)
            && tree::is_element(n, "a")
            && tree::get_attr(n, "href").is_some_and(|href| !href.is_empty())
    })
    .ok()?;
    let href = tree::get_attr(anchor, "href")?;

    let label = tree::find_first(anchor, |n| {
        tree::is_child_of(n, anchor) && tree::text(n).is_some()
    })
    .ok()
    .and_then(tree::text)
    .map(str::trim)
    .filter(|label| !label.is_empty())?;

    // The label becomes a directory name under the contest base dir
    if !is_safe_label(label) {
        tracing::debug!(label, "skipping task with unsafe label");
        return None;
    }

    match page_url.join(href) {
        Ok(url) => Some(Task::new(url, label)),
        Err(e) => {
            tracing::debug!(base_url = %page_url, href, error = %e, "skipping unresolvable task link");
            None
        }
    }
}

/// A single normal path component: no separators, not `.` or `..`
fn is_safe_label(label: &str) -> bool {
    !label.contains(['/', '\\']) && label != "." && label != ".."
}
