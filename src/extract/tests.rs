use super::*;
use crate::error::Error;
use crate::types::Task;
use url::Url;

fn listing_url() -> Url {
    Url::parse("https://atcoder.jp/contests/dp/tasks").unwrap()
}

fn task() -> Task {
    Task::new(
        Url::parse("https://atcoder.jp/contests/dp/tasks/dp_a").unwrap(),
        "A",
    )
}

fn listing(rows: &str) -> String {
    format!(
        r#"<html><body>
<table class="table">
<thead><tr><th>#</th><th>Task Name</th></tr></thead>
<tbody>{rows}</tbody>
</table>
</body></html>"#
    )
}

fn row(href: &str, label: &str) -> String {
    format!(r#"<tr><td class="text-center"><a href="{href}">{label}</a></td><td><a href="{href}">Name</a></td></tr>"#)
}

fn example(heading: &str, body: &str) -> String {
    format!(
        r#"<div class="part"><section><h3>{heading}<span class="btn btn-default">Copy</span></h3><pre>{body}</pre></section></div>"#
    )
}

fn task_page(sections: &[String]) -> String {
    format!(
        r#"<html><body><div id="task-statement"><span class="lang-ja">{}</span></div></body></html>"#,
        sections.concat()
    )
}

// Task listing

#[test]
fn task_list_keeps_row_order() {
    let page = listing(&[
        row("/contests/dp/tasks/dp_a", "A"),
        row("/contests/dp/tasks/dp_b", "B"),
        row("/contests/dp/tasks/dp_c", "C"),
    ]
    .concat());

    let tasks = parse_task_list(&page, &listing_url()).unwrap();

    let indexes: Vec<_> = tasks.iter().map(|t| t.index.as_str()).collect();
    assert_eq!(indexes, vec!["A", "B", "C"]);
    assert_eq!(
        tasks[1].url.as_str(),
        "https://atcoder.jp/contests/dp/tasks/dp_b"
    );
    assert!(tasks.iter().all(|t| t.sample_ios.is_empty()));
}

#[test]
fn task_list_skips_malformed_rows_wherever_they_appear() {
    let page = listing(&[
        // header-style row without a td
        "<tr><th>A</th></tr>".to_string(),
        row("/contests/dp/tasks/dp_a", "A"),
        // first cell without an anchor
        "<tr><td>B</td><td><a href=\"/contests/dp/tasks/dp_b\">B</a></td></tr>".to_string(),
        // empty href
        row("", "C"),
        row("/contests/dp/tasks/dp_d", "D"),
        // label nested below the anchor instead of directly in it
        "<tr><td><a href=\"/contests/dp/tasks/dp_e\"><span>E</span></a></td></tr>".to_string(),
        // whitespace-only label
        row("/contests/dp/tasks/dp_f", "   "),
    ]
    .concat());

    let tasks = parse_task_list(&page, &listing_url()).unwrap();

    let indexes: Vec<_> = tasks.iter().map(|t| t.index.as_str()).collect();
    assert_eq!(indexes, vec!["A", "D"]);
}

#[test]
fn task_list_resolves_links_against_page_url() {
    let page = listing(&[
        row("dp_a", "A"),
        row("https://example.com/elsewhere", "B"),
    ]
    .concat());

    let tasks = parse_task_list(&page, &listing_url()).unwrap();

    assert_eq!(tasks[0].url.as_str(), "https://atcoder.jp/contests/dp/dp_a");
    assert_eq!(tasks[1].url.as_str(), "https://example.com/elsewhere");
}

#[test]
fn task_list_trims_labels() {
    let page = listing(&row("/contests/dp/tasks/dp_a", "\n  A \n"));
    let tasks = parse_task_list(&page, &listing_url()).unwrap();
    assert_eq!(tasks[0].index, "A");
}

#[test]
fn task_list_skips_labels_that_are_not_plain_names() {
    let page = listing(&[
        row("/contests/dp/tasks/dp_a", "../A"),
        row("/contests/dp/tasks/dp_b", "B/C"),
        row("/contests/dp/tasks/dp_c", "..\\C"),
        row("/contests/dp/tasks/dp_d", ".."),
        row("/contests/dp/tasks/dp_e", "E"),
        row("/contests/dp/tasks/dp_f", "F.1"),
    ]
    .concat());

    let tasks = parse_task_list(&page, &listing_url()).unwrap();

    let indexes: Vec<_> = tasks.iter().map(|t| t.index.as_str()).collect();
    assert_eq!(indexes, vec!["E", "F.1"]);
}

#[test]
fn task_list_without_table_is_not_found() {
    let page = "<html><body><p>Contest not started</p></body></html>";
    let err = parse_task_list(page, &listing_url()).unwrap_err();
    assert!(matches!(err, Error::NodeNotFound));
}

#[test]
fn task_list_with_empty_table_is_empty() {
    let tasks = parse_task_list(&listing(""), &listing_url()).unwrap();
    assert!(tasks.is_empty());
}

// Example sections

#[test]
fn sample_ios_pair_inputs_and_outputs_by_number() {
    let page = task_page(&[
        example("入力例 1", "3 4\n"),
        example("出力例 1", "7\n"),
        example("入力例 2", "1\n2\n"),
        example("出力例 2", "3\n"),
    ]);
    let mut task = task();

    assert_eq!(parse_sample_ios(&page, &mut task), 4);

    assert_eq!(task.sample_ios.len(), 2);
    assert_eq!(task.sample_ios[0].input, Some(vec!["3 4".to_string()]));
    assert_eq!(task.sample_ios[0].output, Some(vec!["7".to_string()]));
    assert_eq!(
        task.sample_ios[1].input,
        Some(vec!["1".to_string(), "2".to_string()])
    );
    assert_eq!(task.sample_ios[1].output, Some(vec!["3".to_string()]));
}

#[test]
fn sample_ios_accept_output_before_input() {
    let page = task_page(&[example("出力例 1", "7"), example("入力例 1", "3 4")]);
    let mut task = task();

    parse_sample_ios(&page, &mut task);

    assert_eq!(task.sample_ios.len(), 1);
    assert_eq!(task.sample_ios[0].input, Some(vec!["3 4".to_string()]));
    assert_eq!(task.sample_ios[0].output, Some(vec!["7".to_string()]));
}

#[test]
fn bare_marker_is_example_one() {
    let page = task_page(&[example("入力例", "5"), example("出力例", "25")]);
    let mut task = task();

    parse_sample_ios(&page, &mut task);

    assert_eq!(task.sample_ios.len(), 1);
    assert_eq!(task.sample_ios[0].output, Some(vec!["25".to_string()]));
}

#[test]
fn lone_high_numbered_example_leaves_placeholders() {
    let page = task_page(&[example("入力例 3", "9")]);
    let mut task = task();

    parse_sample_ios(&page, &mut task);

    assert_eq!(task.sample_ios.len(), 3);
    assert!(task.sample_ios[0].is_placeholder());
    assert!(task.sample_ios[1].is_placeholder());
    assert_eq!(task.sample_ios[2].input, Some(vec!["9".to_string()]));
    assert_eq!(task.sample_ios[2].output, None);
}

#[test]
fn section_without_body_still_reserves_its_slot() {
    let page = task_page(&[
        r#"<section><h3>入力例 2</h3><p>see above</p></section>"#.to_string(),
    ]);
    let mut task = task();

    assert_eq!(parse_sample_ios(&page, &mut task), 0);

    assert_eq!(task.sample_ios.len(), 2);
    assert!(task.sample_ios.iter().all(|s| s.is_placeholder()));
}

#[test]
fn non_numeric_example_number_is_skipped() {
    let page = task_page(&[example("入力例 A", "1"), example("出力例 1", "2")]);
    let mut task = task();

    assert_eq!(parse_sample_ios(&page, &mut task), 1);

    assert_eq!(task.sample_ios.len(), 1);
    assert_eq!(task.sample_ios[0].input, None);
    assert_eq!(task.sample_ios[0].output, Some(vec!["2".to_string()]));
}

#[test]
fn out_of_range_example_number_is_skipped() {
    let page = task_page(&[
        example("入力例 4000000000", "1"),
        example("出力例 99999999999999999999999", "2"),
    ]);
    let mut task = task();

    assert_eq!(parse_sample_ios(&page, &mut task), 0);
    assert!(task.sample_ios.is_empty());
}

#[test]
fn unrelated_sections_are_ignored() {
    let page = format!(
        r#"<html><body>
<span class="lang-ja">
<section><h3>入力</h3><pre><var>N</var></pre></section>
<section><h3>出力</h3><p>Print the answer.</p></section>
{}
</span>
<span class="lang-en">
<section><h3>Sample Input 1</h3><pre>3 4</pre></section>
<section><h3>Sample Output 1</h3><pre>7</pre></section>
</span>
</body></html>"#,
        example("入力例 1", "3 4")
    );
    let mut task = task();

    assert_eq!(parse_sample_ios(&page, &mut task), 1);
    assert_eq!(task.sample_ios.len(), 1);
    assert_eq!(task.sample_ios[0].input, Some(vec!["3 4".to_string()]));
}

#[test]
fn heading_must_be_a_direct_child_of_the_section() {
    let page = task_page(&[
        r#"<section><div><h3>入力例 1</h3></div><pre>1</pre></section>"#.to_string(),
    ]);
    let mut task = task();

    assert_eq!(parse_sample_ios(&page, &mut task), 0);
    assert!(task.sample_ios.is_empty());
}

#[test]
fn body_is_trimmed_before_splitting() {
    let page = task_page(&[example("入力例 1", "\n  2 3\n4 5\n\n")]);
    let mut task = task();

    parse_sample_ios(&page, &mut task);

    assert_eq!(
        task.sample_ios[0].input,
        Some(vec!["2 3".to_string(), "4 5".to_string()])
    );
}
