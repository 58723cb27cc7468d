use std::{io::Write, path::PathBuf};

use clap::{Parser, Subcommand};
use lecturefix::{audit_directory, pdf, regroup_file, repair_file, tools::SystemRunner};

#[derive(Parser)]
#[command(about = "Authoring utilities for course lecture notes")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Audit heading numbering across a directory of lecture HTML files
    Audit {
        /// Directory containing lecture-<NN>.html files
        dir: PathBuf,
    },
    /// Repair malformed code-block markers in place
    FixCodeBlocks {
        /// HTML files to rewrite
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Regroup paragraph-wrapped pseudo-code into <pre><code> blocks in place
    FixSnippets {
        /// HTML files to rewrite
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Build a combined PDF of the lectures via pandoc and pdflatex
    Pdf {
        /// Directory containing "Lecture <N> - <title>.md" files
        dir: PathBuf,
        /// Output file stem for the .tex and .pdf
        #[arg(long, default_value = "lecture-notes")]
        output: String,
        /// Document title
        #[arg(long, default_value = "Lecture Notes")]
        title: String,
        /// Document author
        #[arg(long, default_value = "")]
        author: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Audit { dir } => audit_directory(&dir, &mut stdout)?,
        Command::FixCodeBlocks { files } => {
            for path in files {
                repair_file(&path)?;
                writeln!(stdout, "Fixed code blocks in {}", path.display())?;
            }
        }
        Command::FixSnippets { files } => {
            for path in files {
                regroup_file(&path)?;
                writeln!(stdout, "Fixed code snippets in {}", path.display())?;
            }
        }
        Command::Pdf {
            dir,
            output,
            title,
            author,
        } => {
            let generated =
                pdf::generate(&SystemRunner, &dir, &output, &title, &author, &mut stdout)?;
            writeln!(stdout, "Generated {}", generated.display())?;
        }
    }

    Ok(())
}
