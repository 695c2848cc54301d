//! Terminal rendering of harness results

use super::diff::DiffLine;
use crossterm::style::{Color, Stylize};
use std::io::{self, Write};

const FOREGROUND: Color = Color::Rgb {
    r: 0xFA,
    g: 0xFA,
    b: 0xFA,
};
const GREEN: Color = Color::Rgb {
    r: 0x43,
    g: 0xA0,
    b: 0x47,
};
const RED: Color = Color::Rgb {
    r: 0xE5,
    g: 0x39,
    b: 0x35,
};
const BLUE: Color = Color::Rgb {
    r: 0x1E,
    g: 0x88,
    b: 0xE5,
};
const GREY: Color = Color::Rgb {
    r: 0x75,
    g: 0x75,
    b: 0x75,
};

/// Badge kinds shown at the start of a report line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Badge {
    /// Accepted
    Accepted,
    /// Wrong answer
    WrongAnswer,
    /// Not executed
    Skip,
    /// Execution failed
    Error,
}

impl Badge {
    /// Short label printed inside the badge
    pub fn label(self) -> &'static str {
        match self {
            Badge::Accepted => "AC",
            Badge::WrongAnswer => "WA",
            Badge::Skip => "SKIP",
            Badge::Error => "ERROR",
        }
    }

    fn background(self) -> Color {
        match self {
            Badge::Accepted => GREEN,
            Badge::WrongAnswer | Badge::Error => RED,
            Badge::Skip => GREY,
        }
    }
}

/// How report text is decorated
///
/// Created once by the caller and handed to the harness. Plain mode emits the same text
/// without escape sequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReportStyle {
    color: bool,
}

impl ReportStyle {
    /// Colored output when `color` is true, plain otherwise
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    /// Colored output
    pub fn colored() -> Self {
        Self::new(true)
    }

    /// Plain output
    pub fn plain() -> Self {
        Self::new(false)
    }

    /// Render `badge` as a padded label
    pub fn badge(&self, badge: Badge) -> String {
        let padded = format!(" {} ", badge.label());
        if self.color {
            padded
                .with(FOREGROUND)
                .on(badge.background())
                .bold()
                .to_string()
        } else {
            padded
        }
    }

    /// Render a section title
    pub fn title(&self, title: &str) -> String {
        let padded = format!(" {} ", title);
        if self.color {
            padded.with(BLUE).bold().to_string()
        } else {
            padded
        }
    }

    /// Render one diff line with its marker
    pub fn diff_line(&self, line: &DiffLine) -> String {
        let rendered = line.to_string();
        if !self.color {
            return rendered;
        }
        match line {
            DiffLine::Added(_) => rendered.with(GREEN).bold().to_string(),
            DiffLine::Removed(_) => rendered.with(RED).bold().to_string(),
            DiffLine::Context(_) => rendered,
        }
    }
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self::colored()
    }
}

/// `<badge> Test case <id>`
pub fn write_verdict(
    out: &mut impl Write,
    style: &ReportStyle,
    badge: Badge,
    id: &str,
) -> io::Result<()> {
    writeln!(out, "{} Test case {}", style.badge(badge), id)
}

/// A titled block followed by its body
pub fn write_block(
    out: &mut impl Write,
    style: &ReportStyle,
    title: &str,
    body: &str,
) -> io::Result<()> {
    writeln!(out, "{}:", style.title(title))?;
    writeln!(out, "{}", body)
}

/// Every line of `diff` under a `Diff:` heading
pub fn write_diff(
    out: &mut impl Write,
    style: &ReportStyle,
    diff: &[DiffLine],
) -> io::Result<()> {
    writeln!(out, "Diff:")?;
    for line in diff {
        writeln!(out, "{}", style.diff_line(line))?;
    }
    Ok(())
}

/// Advisory shown when the entry point is missing before execution is attempted
pub fn write_missing_entry_point(
    out: &mut impl Write,
    style: &ReportStyle,
    path: &str,
) -> io::Result<()> {
    writeln!(out, "{}:", style.badge(Badge::Error))?;
    writeln!(out, "No such file: {}", path)
}
