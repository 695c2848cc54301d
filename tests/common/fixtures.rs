//! HTML pages shaped like the contest site's listing and task pages

/// Listing page with one row per `(href, label)` pair plus a decorative header row
pub fn listing_page(rows: &[(&str, &str)]) -> String {
    let body: String = rows
        .iter()
        .map(|(href, label)| {
            format!(
                r#"<tr>
  <td class="text-center no-break"><a href="{href}">{label}</a></td>
  <td><a href="{href}">Task {label}</a></td>
  <td class="text-right">2 sec</td>
</tr>
"#
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html>
<head><title>Tasks</title></head>
<body>
<div id="main-container">
<div class="panel panel-default table-responsive">
<table class="table table-bordered table-striped">
<thead>
<tr><th width="3%" class="text-center"></th><th>Task Name</th><th>Time Limit</th></tr>
</thead>
<tbody>
{body}</tbody>
</table>
</div>
</div>
</body>
</html>"#
    )
}

/// Task page with Japanese and English statements; `examples` are `(input, output)` pairs
pub fn task_page(examples: &[(&str, &str)]) -> String {
    let mut ja = String::new();
    let mut en = String::new();
    for (i, (input, output)) in examples.iter().enumerate() {
        let n = i + 1;
        ja.push_str(&format!(
            r#"<div class="part"><section>
<h3>入力例 {n}<span class="btn btn-default btn-sm btn-copy">Copy</span></h3><pre>{input}</pre>
</section></div>
<div class="part"><section>
<h3>出力例 {n}<span class="btn btn-default btn-sm btn-copy">Copy</span></h3><pre>{output}</pre>
</section></div>
"#
        ));
        en.push_str(&format!(
            r#"<div class="part"><section>
<h3>Sample Input {n}</h3><pre>{input}</pre>
</section></div>
"#
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
<body>
<div id="task-statement">
<span class="lang">
<span class="lang-ja">
<div class="part"><section><h3>問題文</h3><p>Compute the sum.</p></section></div>
<div class="io-style">
<div class="part"><section><h3>入力</h3><pre><var>A</var> <var>B</var></pre></section></div>
<div class="part"><section><h3>出力</h3><p>Print the answer.</p></section></div>
</div>
{ja}</span>
<span class="lang-en">
{en}</span>
</span>
</div>
</body>
</html>"#
    )
}
