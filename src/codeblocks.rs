//! Repair passes for code blocks mangled by earlier HTML conversion.
//!
//! A lossy Markdown-to-HTML pass left fenced blocks as backtick-wrapped
//! `<code>` runs (`` ``<code>...</code>`` ``), sometimes split mid-block by a
//! stray `` </code>`<code> `` continuation, and sometimes missing the closing
//! `</pre>` altogether. Each pass here is a pure `&str -> String` rewrite;
//! [`repair_code_blocks`] composes them in the order they must run. Markup is
//! treated as opaque text throughout, so matching is deliberately order- and
//! whitespace-sensitive.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::lazy_regex;

static ORPHAN_CLOSE_RE: LazyLock<Regex> = lazy_regex!(
    r"</code>(\s*\n\s*)<(/?[A-Za-z][A-Za-z0-9]*)",
    "orphaned code close pattern",
);

/// Replace the malformed opening marker `` ``<code> `` with `<pre><code>`.
#[must_use]
pub fn open_markers(text: &str) -> String {
    text.replace("``<code>", "<pre><code>")
}

/// Remove `` </code>`<code> `` continuation artifacts so a block that was
/// split mid-way collapses into one contiguous `<code>` element.
#[must_use]
pub fn strip_continuations(text: &str) -> String {
    text.replace("</code>`<code>", "")
}

/// Replace the malformed closing marker `` </code>`` `` with
/// `</code></pre>`.
#[must_use]
pub fn close_markers(text: &str) -> String {
    text.replace("</code>``", "</code></pre>")
}

/// Insert a missing `</pre>` after an orphaned `</code>`.
///
/// A `</code>` whose next tag (across the line break) is neither a `</pre>`
/// nor another `<code>` opening lost its closer in a prior conversion; the
/// `</pre>` is restored directly after it. Text that is already canonical is
/// returned unchanged, which keeps the composed pipeline idempotent.
#[must_use]
pub fn restore_pre_close(text: &str) -> String {
    ORPHAN_CLOSE_RE
        .replace_all(text, |cap: &Captures<'_>| {
            let gap = &cap[1];
            let tag = &cap[2];
            if tag == "/pre" || tag == "code" {
                cap[0].to_string()
            } else {
                format!("</code></pre>{gap}<{tag}")
            }
        })
        .into_owned()
}

/// Run all four marker-repair passes in order.
#[must_use]
pub fn repair_code_blocks(text: &str) -> String {
    let text = open_markers(text);
    let text = strip_continuations(&text);
    let text = close_markers(&text);
    restore_pre_close(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrites_simple_malformed_block() {
        let input = "``<code>int x = 0;</code>``";
        assert_eq!(repair_code_blocks(input), "<pre><code>int x = 0;</code></pre>");
    }

    #[test]
    fn collapses_continuation_markers() {
        let input = "``<code>line one\n</code>`<code>line two</code>``";
        assert_eq!(
            repair_code_blocks(input),
            "<pre><code>line one\nline two</code></pre>"
        );
    }

    #[test]
    fn restores_missing_pre_close() {
        let input = "<pre><code>x = 1;</code>\n<p>After.</p>";
        assert_eq!(
            restore_pre_close(input),
            "<pre><code>x = 1;</code></pre>\n<p>After.</p>"
        );
    }

    #[test]
    fn leaves_closed_block_alone() {
        let input = "<pre><code>x = 1;</code>\n</pre>\n<p>After.</p>";
        assert_eq!(restore_pre_close(input), input);
    }

    #[test]
    fn leaves_adjacent_code_open_alone() {
        let input = "</code>\n<code>more</code></pre>";
        assert_eq!(restore_pre_close(input), input);
    }

    #[test]
    fn inline_code_on_one_line_is_untouched() {
        // The missing-closer repair requires a line break before the next tag.
        let input = "<p><code>x</code></p>";
        assert_eq!(restore_pre_close(input), input);
    }

    #[test]
    fn pipeline_is_idempotent_on_canonical_text() {
        let canonical = "\
<p>Intro.</p>
<pre><code>int x = 0;
x += 1;</code></pre>
<p>After.</p>
";
        let once = repair_code_blocks(canonical);
        assert_eq!(once, canonical);
        assert_eq!(repair_code_blocks(&once), once);
    }

    #[test]
    fn pipeline_is_idempotent_after_repair() {
        let input = "``<code>a</code>`<code>b</code>``\n<p>t</p>";
        let once = repair_code_blocks(input);
        assert_eq!(repair_code_blocks(&once), once);
    }
}
