//! File helpers for rewriting lecture HTML in place.
//!
//! There is deliberately no backup or dry-run mode; callers wanting safety
//! copy the file first.

use std::{fs, io, path::Path};

use crate::{codeblocks::repair_code_blocks, snippets::regroup_snippets};

/// Rewrite a file in place with repaired code-block markers.
///
/// # Errors
/// Returns an error if reading or writing the file fails.
pub fn repair_file(path: &Path) -> io::Result<()> {
    let text = fs::read_to_string(path)?;
    fs::write(path, repair_code_blocks(&text))
}

/// Rewrite a file in place with code-like paragraphs regrouped into
/// preformatted blocks.
///
/// # Errors
/// Returns an error if reading or writing the file fails.
pub fn regroup_file(path: &Path) -> io::Result<()> {
    let text = fs::read_to_string(path)?;
    let lines: Vec<String> = text.lines().map(str::to_string).collect();
    let fixed = regroup_snippets(&lines);
    fs::write(path, fixed.join("\n") + "\n")
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn repair_file_roundtrip() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("lecture-09.html");
        fs::write(&file, "``<code>int x = 0;</code>``").unwrap();
        repair_file(&file).unwrap();
        let out = fs::read_to_string(&file).unwrap();
        assert_eq!(out, "<pre><code>int x = 0;</code></pre>");
    }

    #[test]
    fn regroup_file_roundtrip() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("lecture-09.html");
        fs::write(&file, "<p>- a</p>\n<p>- b</p>\n").unwrap();
        regroup_file(&file).unwrap();
        let out = fs::read_to_string(&file).unwrap();
        assert_eq!(out, "<pre><code>\na\nb\n</code></pre>\n");
    }
}
