//! Authoring utilities for course lecture notes.
//!
//! The crate bundles a handful of independent tools used while maintaining a
//! set of lecture documents:
//!
//! - [`audit`] checks the dotted outline numbers in HTML heading hierarchies
//!   and reports gaps, duplicates, and misfiled subsections.
//! - [`codeblocks`] repairs code blocks left malformed by an earlier lossy
//!   Markdown-to-HTML conversion.
//! - [`snippets`] regroups paragraph-wrapped pseudo-code into proper
//!   `<pre><code>` blocks.
//! - [`pdf`] drives pandoc and pdflatex to build one combined PDF from the
//!   lecture Markdown sources.
//!
//! Every transformation is a pure function over text; file rewriting lives in
//! [`io`] and external processes are reached only through [`tools`].

pub mod audit;
pub mod codeblocks;
pub mod io;
mod macros;
pub mod pdf;
pub mod snippets;
pub mod tools;

pub use audit::{Diagnostic, Severity, audit_directory, audit_headings};
pub use codeblocks::repair_code_blocks;
pub use io::{regroup_file, repair_file};
pub use snippets::regroup_snippets;
pub use tools::{SystemRunner, ToolOutput, ToolRunner};
