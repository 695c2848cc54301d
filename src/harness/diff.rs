//! Line-level diff between expected and actual output

/// One line of a diff listing
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiffLine {
    /// Present on both sides
    Context(String),
    /// Expected but missing from the actual output
    Removed(String),
    /// Produced but not expected
    Added(String),
}

impl DiffLine {
    /// Marker character used when rendering the line
    pub fn marker(&self) -> char {
        match self {
            DiffLine::Context(_) => ' ',
            DiffLine::Removed(_) => '-',
            DiffLine::Added(_) => '+',
        }
    }

    /// The line content without its marker
    pub fn text(&self) -> &str {
        match self {
            DiffLine::Context(text) | DiffLine::Removed(text) | DiffLine::Added(text) => text,
        }
    }
}

impl std::fmt::Display for DiffLine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.marker(), self.text())
    }
}

/// Diff `expected` against `actual` line by line
///
/// Returns an empty listing when both sides are equal. Otherwise the listing covers both
/// inputs in full, built from a longest common subsequence, with removals ahead of additions
/// at each point of difference.
pub fn diff_lines(expected: &[&str], actual: &[&str]) -> Vec<DiffLine> {
    if expected == actual {
        return Vec::new();
    }

    let (n, m) = (expected.len(), actual.len());
    // lcs[i][j] = length of the LCS of expected[i..] and actual[j..]
    let mut lcs = vec![vec![0usize; m + 1]; n + 1];
    for i in (0..n).rev() {
        for j in (0..m).rev() {
            lcs[i][j] = if expected[i] == actual[j] {
                lcs[i + 1][j + 1] + 1
            } else {
                lcs[i + 1][j].max(lcs[i][j + 1])
            };
        }
    }

    let mut lines = Vec::with_capacity(n.max(m));
    let (mut i, mut j) = (0, 0);
    while i < n && j < m {
        if expected[i] == actual[j] {
            lines.push(DiffLine::Context(expected[i].to_string()));
            i += 1;
            j += 1;
        } else if lcs[i + 1][j] >= lcs[i][j + 1] {
            lines.push(DiffLine::Removed(expected[i].to_string()));
            i += 1;
        } else {
            lines.push(DiffLine::Added(actual[j].to_string()));
            j += 1;
        }
    }
    lines.extend(expected[i..].iter().map(|l| DiffLine::Removed(l.to_string())));
    lines.extend(actual[j..].iter().map(|l| DiffLine::Added(l.to_string())));
    lines
}
