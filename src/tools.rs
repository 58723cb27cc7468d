//! Narrow interface for invoking external document tools.
//!
//! The PDF driver shells out to pandoc and pdflatex. Putting the invocation
//! behind [`ToolRunner`] keeps that logic testable without the binaries on
//! the path: tests substitute a mock runner returning canned output. All
//! invocations are synchronous; the caller blocks until the tool exits.

use std::{
    io::{self, Write},
    process::{Command, Stdio},
};

/// Captured result of one tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    pub status: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    #[must_use]
    pub fn success(&self) -> bool {
        self.status == 0
    }
}

/// Runs an external program and captures its output.
///
/// "Program not found" surfaces as an [`io::Error`] with
/// [`io::ErrorKind::NotFound`]; an unsuccessful exit is reported through
/// [`ToolOutput::status`] so call sites can treat the two distinctly.
pub trait ToolRunner {
    /// Run `program` with `args`, optionally feeding `stdin`, and wait for it
    /// to exit.
    ///
    /// # Errors
    /// Returns an error if the process cannot be spawned or its pipes fail.
    fn run(&self, program: &str, args: &[&str], stdin: Option<&str>) -> io::Result<ToolOutput>;
}

/// [`ToolRunner`] backed by [`std::process::Command`].
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str], stdin: Option<&str>) -> io::Result<ToolOutput> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = command.spawn()?;
        if let Some(input) = stdin {
            // take() closes the pipe once the write completes, otherwise the
            // child would block waiting for more input.
            let mut pipe = child
                .stdin
                .take()
                .ok_or_else(|| io::Error::other("child stdin not captured"))?;
            pipe.write_all(input.as_bytes())?;
        }

        let output = child.wait_with_output()?;
        Ok(ToolOutput {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}
