//! Heading numbering auditor for HTML lecture files.
//!
//! Lecture documents carry dotted outline numbers in their `<h2>`–`<h4>`
//! headings (`5.1 Title`, `5.1.2 Sub-title`). This module walks the headings
//! of each file in document order and reports numbering problems: a prefix
//! that does not match the lecture index, gaps or duplicates in sibling
//! counters, and subsections filed under the wrong parent. The audit is
//! advisory only; no file is ever modified.

use std::{
    fmt, fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;

use crate::lazy_regex;

static HEADING_RE: LazyLock<Regex> = lazy_regex!(
    r"(?i)<(h[2-4])>\s*(\d+(?:\.\d+)*)\s+.*?</(h[2-4])>",
    "numbered heading pattern",
);

static LECTURE_FILE_RE: LazyLock<Regex> =
    lazy_regex!(r"^lecture-(\d+)\.html$", "lecture file pattern");

/// Heading levels subject to outline numbering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeadingLevel {
    H2,
    H3,
    H4,
}

impl HeadingLevel {
    fn from_tag(tag: &str) -> Option<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "h2" => Some(Self::H2),
            "h3" => Some(Self::H3),
            "h4" => Some(Self::H4),
            _ => None,
        }
    }

    /// Number of dotted path components a well-formed heading carries.
    fn expected_parts(self) -> usize {
        match self {
            Self::H2 => 2,
            Self::H3 => 3,
            Self::H4 => 4,
        }
    }

    fn tag(self) -> &'static str {
        match self {
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::H4 => "h4",
        }
    }

    fn shape(self) -> &'static str {
        match self {
            Self::H2 => "X.Y",
            Self::H3 => "X.Y.Z",
            Self::H4 => "X.Y.Z.W",
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::H2 => "H2",
            Self::H3 => "H3",
            Self::H4 => "H4",
        })
    }
}

/// One numbered heading extracted from a lecture file.
#[derive(Debug)]
struct Heading {
    level: HeadingLevel,
    number: String,
    path: Vec<u32>,
}

/// Severity of an audit finding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Info,
}

/// A single advisory line produced by the audit.
#[derive(Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
}

impl Diagnostic {
    fn warning(message: String) -> Self {
        Self {
            severity: Severity::Warning,
            message,
        }
    }

    fn info(message: String) -> Self {
        Self {
            severity: Severity::Info,
            message,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self.severity {
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
        };
        write!(f, "[{tag}] {}", self.message)
    }
}

/// Running state while walking one file's headings in document order.
///
/// Counters track the last *seen* sibling value rather than the last expected
/// one, so a single bad entry does not cascade into warnings on every
/// subsequent heading.
#[derive(Default)]
struct HierarchyCursor {
    last_h2: u32,
    last_h3: u32,
    last_h4: u32,
    current_h2: Option<u32>,
}

impl HierarchyCursor {
    fn observe(&mut self, lecture: u32, heading: &Heading, out: &mut Vec<Diagnostic>) {
        let parts = &heading.path;
        let prefix_ok = parts[0] == lecture;

        if !prefix_ok {
            out.push(Diagnostic::warning(format!(
                "Wrong Prefix: '{}' in {} (expected starting with {lecture})",
                heading.number,
                heading.level.tag(),
            )));
        }

        if parts.len() != heading.level.expected_parts() {
            out.push(Diagnostic::info(format!(
                "{} format check: '{}' (usually {})",
                heading.level,
                heading.number,
                heading.level.shape(),
            )));
        }

        // Sequence and hierarchy checks only apply once the prefix matches;
        // a foreign prefix says nothing about this file's counters.
        if !prefix_ok {
            return;
        }

        match heading.level {
            HeadingLevel::H2 => {
                if let Some(&section) = parts.get(1) {
                    if section != self.last_h2 + 1 {
                        out.push(Diagnostic::warning(format!(
                            "Gap/Order H2: found {} after {lecture}.{}",
                            heading.number, self.last_h2,
                        )));
                    }
                    self.last_h2 = section;
                    self.last_h3 = 0;
                    self.last_h4 = 0;
                    self.current_h2 = Some(section);
                }
            }
            HeadingLevel::H3 => {
                if let Some(&parent) = parts.get(1)
                    && self.current_h2 != Some(parent)
                {
                    let current = self
                        .current_h2
                        .map_or_else(|| "?".to_string(), |n| n.to_string());
                    out.push(Diagnostic::warning(format!(
                        "Hierarchy Mismatch: {} appears under H2 {lecture}.{current}",
                        heading.number,
                    )));
                }
                if let Some(&sub) = parts.get(2) {
                    if sub != self.last_h3 + 1 {
                        out.push(Diagnostic::warning(format!(
                            "Gap/Order H3: found {} after ...{}",
                            heading.number, self.last_h3,
                        )));
                    }
                    self.last_h3 = sub;
                    self.last_h4 = 0;
                }
            }
            HeadingLevel::H4 => {
                if let Some(&sub) = parts.get(3) {
                    if sub != self.last_h4 + 1 {
                        out.push(Diagnostic::warning(format!(
                            "Gap/Order H4: found {} after ...{}",
                            heading.number, self.last_h4,
                        )));
                    }
                    self.last_h4 = sub;
                }
            }
        }
    }
}

/// Extract the numbered headings from a file's text, in document order.
///
/// Headings whose open and close tags disagree, or whose text does not begin
/// with a dotted numeric path followed by a title, are ignored.
fn parse_headings(content: &str) -> Vec<Heading> {
    HEADING_RE
        .captures_iter(content)
        .filter_map(|cap| {
            if !cap[1].eq_ignore_ascii_case(&cap[3]) {
                return None;
            }
            let level = HeadingLevel::from_tag(&cap[1])?;
            let number = cap[2].to_string();
            let path = number
                .split('.')
                .map(str::parse)
                .collect::<Result<Vec<u32>, _>>()
                .ok()?;
            Some(Heading {
                level,
                number,
                path,
            })
        })
        .collect()
}

/// Audit one file's heading numbering against its lecture index.
///
/// Returns the diagnostics in the order they arise. A file with no numbered
/// headings yields exactly one informational diagnostic.
#[must_use]
pub fn audit_headings(lecture: u32, content: &str) -> Vec<Diagnostic> {
    let headings = parse_headings(content);
    if headings.is_empty() {
        return vec![Diagnostic::info("No numbered headings found.".to_string())];
    }

    let mut cursor = HierarchyCursor::default();
    let mut out = Vec::new();
    for heading in &headings {
        cursor.observe(lecture, heading, &mut out);
    }
    out
}

/// Audit every `lecture-<NN>.html` file in a directory.
///
/// Files are processed in ascending lecture-index order. A file whose name
/// does not parse, or which cannot be read, is skipped with a notice; no
/// finding is ever fatal to the run.
///
/// # Errors
/// Returns an error if the directory cannot be listed or the output stream
/// cannot be written.
pub fn audit_directory(dir: &Path, out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "Auditing HTML files in {}...\n", dir.display())?;

    let mut files: Vec<(u32, String, PathBuf)> = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with("lecture-") || !name.ends_with(".html") {
            continue;
        }
        match LECTURE_FILE_RE
            .captures(&name)
            .and_then(|cap| cap[1].parse::<u32>().ok())
        {
            Some(num) => files.push((num, name, entry.path())),
            None => writeln!(out, "Skipping {name}: could not parse lecture number.")?,
        }
    }
    files.sort();

    for (lecture, name, path) in files {
        writeln!(out, "--- Checking {name} (Lecture {lecture}) ---")?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                writeln!(out, "  Skipping {name}: {err}")?;
                continue;
            }
        };
        for diag in audit_headings(lecture, &content) {
            writeln!(out, "  {diag}")?;
        }
    }
    Ok(())
}
