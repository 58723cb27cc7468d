//! Regroup paragraph-wrapped pseudo-code into `<pre><code>` blocks.
//!
//! An earlier conversion pass emitted each line of a code example as its own
//! `<p>` element, bullet markers included. This pass scans line by line,
//! detects a run of paragraphs that look like code, and re-emits the run as a
//! single preformatted block with the leading `- ` stripped from each line.
//!
//! The detection heuristic is intentionally literal: a run starts at a
//! `<p>-` line, or at a plain `<p>` line containing one of `:`, `=`, `->` or
//! the word `If` when the next line is a similarly shaped paragraph. It is
//! known to be both over- and under-inclusive, but it is the repair policy
//! the corpus was actually cleaned with, so it is preserved as-is.

use std::sync::LazyLock;

use regex::Regex;

use crate::lazy_regex;

static PARA_RE: LazyLock<Regex> = lazy_regex!(r"^<p>(.*?)</p>", "paragraph content pattern");

const CODE_SIGNALS: [&str; 4] = [":", "=", "->", "If"];

/// Does this trimmed line start a code-like paragraph run?
fn starts_code_run(stripped: &str, next: Option<&str>) -> bool {
    if stripped.starts_with("<p>-") {
        return true;
    }
    if !stripped.starts_with("<p>") || stripped.starts_with("<p><strong>") {
        return false;
    }
    let Some(next) = next else {
        return false;
    };
    let next = next.trim();
    let next_is_code_shaped =
        next.starts_with("<p>-") || (next.starts_with("<p>") && !next.starts_with("<p><strong>"));
    next_is_code_shaped && CODE_SIGNALS.iter().any(|sig| stripped.contains(sig))
}

/// Does this trimmed line terminate a paragraph run?
fn ends_code_run(stripped: &str) -> bool {
    stripped.is_empty()
        || stripped.starts_with("<h")
        || stripped.starts_with("<p><strong>")
        || stripped.starts_with("<ul>")
        || stripped.starts_with("<ol>")
        || stripped.starts_with("<div")
        || stripped.starts_with("<strong>")
}

/// Regroup consecutive code-like paragraphs into preformatted blocks.
///
/// Lines that do not match the heuristic pass through unchanged. The wrapper
/// tags inherit the indentation of the run's first line; the collected lines
/// are emitted verbatim apart from a stripped leading `- `.
#[must_use]
pub fn regroup_snippets(lines: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(lines.len());
    let mut idx = 0;

    while idx < lines.len() {
        let line = &lines[idx];
        let stripped = line.trim();

        if !starts_code_run(stripped, lines.get(idx + 1).map(String::as_str)) {
            out.push(line.clone());
            idx += 1;
            continue;
        }

        let indent = &line[..line.len() - line.trim_start().len()];
        let mut code_lines = Vec::new();

        while idx < lines.len() {
            let current = lines[idx].trim();
            if ends_code_run(current) {
                break;
            }
            if !(current.starts_with("<p>") && current.ends_with("</p>")) {
                break;
            }
            let Some(cap) = PARA_RE.captures(current) else {
                break;
            };
            let text = cap[1].strip_prefix("- ").unwrap_or(&cap[1]);
            code_lines.push(text.to_string());
            idx += 1;
        }

        if code_lines.is_empty() {
            // Heuristic fired but nothing was collectable; pass through.
            out.push(line.clone());
            idx += 1;
            continue;
        }

        out.push(format!("{indent}<pre><code>"));
        out.extend(code_lines);
        out.push(format!("{indent}</code></pre>"));
    }

    out
}
