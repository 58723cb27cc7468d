//! Integration tests for the heading numbering auditor.
//!
//! Covers the directory walk (file ordering, skip notices, unreadable files)
//! and the documented warning semantics over whole-file inputs.

use std::fs;

use lecturefix::{Severity, audit_directory, audit_headings};
use rstest::rstest;
use tempfile::tempdir;

fn captured_audit(files: &[(&str, &str)]) -> String {
    let dir = tempdir().expect("failed to create temporary directory");
    for (name, content) in files {
        fs::write(dir.path().join(name), content).expect("failed to write lecture file");
    }
    let mut out = Vec::new();
    audit_directory(dir.path(), &mut out).expect("audit failed");
    String::from_utf8(out).expect("audit output is not UTF-8")
}

#[test]
fn files_are_checked_in_lecture_order() {
    let out = captured_audit(&[
        ("lecture-10.html", "<h2>10.1 A</h2>"),
        ("lecture-02.html", "<h2>2.1 A</h2>"),
    ]);
    let second = out.find("lecture-02.html").expect("lecture 2 missing");
    let tenth = out.find("lecture-10.html").expect("lecture 10 missing");
    assert!(second < tenth);
}

#[test]
fn unparseable_name_is_skipped_with_notice() {
    let out = captured_audit(&[
        ("lecture-abc.html", "<h2>1.1 A</h2>"),
        ("lecture-01.html", "<h2>1.1 A</h2>"),
    ]);
    assert!(out.contains("Skipping lecture-abc.html: could not parse lecture number."));
    assert!(out.contains("--- Checking lecture-01.html (Lecture 1) ---"));
    assert!(!out.contains("Checking lecture-abc.html"));
}

#[test]
fn non_lecture_files_are_ignored_silently() {
    let out = captured_audit(&[
        ("index.html", "<h2>1.1 A</h2>"),
        ("lecture-01.html", "<h2>1.1 A</h2>"),
    ]);
    assert!(!out.contains("index.html"));
}

#[test]
fn clean_file_reports_nothing() {
    let out = captured_audit(&[(
        "lecture-05.html",
        "<h2>5.1 A</h2>\n<h3>5.1.1 B</h3>\n<h2>5.2 C</h2>\n",
    )]);
    assert!(out.contains("--- Checking lecture-05.html (Lecture 5) ---"));
    assert!(!out.contains("[WARNING]"));
    assert!(!out.contains("[INFO]"));
}

#[test]
fn empty_file_reports_single_info_line() {
    let out = captured_audit(&[("lecture-05.html", "<p>No outline here.</p>")]);
    assert_eq!(out.matches("[INFO] No numbered headings found.").count(), 1);
    assert!(!out.contains("[WARNING]"));
}

#[rstest]
#[case("<h2>6.1 X</h2>", "Wrong Prefix: '6.1' in h2 (expected starting with 5)")]
#[case(
    "<h2>5.1 A</h2>\n<h2>5.2 B</h2>\n<h2>5.2 C</h2>",
    "Gap/Order H2: found 5.2 after 5.2"
)]
#[case(
    "<h2>5.1 A</h2>\n<h3>5.2.1 B</h3>",
    "Hierarchy Mismatch: 5.2.1 appears under H2 5.1"
)]
#[case(
    "<h2>5.1 A</h2>\n<h3>5.1.1 B</h3>\n<h3>5.1.3 C</h3>",
    "Gap/Order H3: found 5.1.3 after ...1"
)]
#[case(
    "<h2>5.1 A</h2>\n<h3>5.1.1 B</h3>\n<h4>5.1.1.2 C</h4>",
    "Gap/Order H4: found 5.1.1.2 after ...0"
)]
fn warning_semantics(#[case] content: &str, #[case] expected: &str) {
    let diags = audit_headings(5, content);
    assert!(
        diags
            .iter()
            .any(|d| d.severity == Severity::Warning && d.message == expected),
        "expected {expected:?} in {diags:?}"
    );
}

#[test]
fn sequence_checks_skip_foreign_prefixes() {
    // A wrong-prefix heading must not advance this file's counters.
    let content = "<h2>5.1 A</h2>\n<h2>6.2 X</h2>\n<h2>5.2 B</h2>";
    let diags = audit_headings(5, content);
    let warnings: Vec<_> = diags
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].message.starts_with("Wrong Prefix"));
}
