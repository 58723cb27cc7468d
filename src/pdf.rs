//! Build a combined PDF of the lecture notes via pandoc and pdflatex.
//!
//! Each `Lecture <N> - <title>.md` file is converted to LaTeX by pandoc and
//! appended as a chapter of one book-class document, which pdflatex then
//! compiles twice so the table of contents and cross-references resolve.
//! Both tools are reached through [`ToolRunner`], so everything up to the
//! actual compilation can be exercised with a mock.

use std::{
    error, fmt, fs,
    io::{self, Write},
    path::{Path, PathBuf},
    sync::LazyLock,
};

use regex::Regex;

use crate::{
    lazy_regex,
    tools::{ToolOutput, ToolRunner},
};

static LECTURE_MD_RE: LazyLock<Regex> = lazy_regex!(r"^Lecture (\d+).*\.md$", "lecture markdown pattern");

const PANDOC_ARGS: [&str; 5] = ["-f", "markdown", "-t", "latex", "--wrap=preserve"];
const AUX_EXTENSIONS: [&str; 6] = ["aux", "log", "out", "toc", "lof", "lot"];

const PANDOC_GUIDANCE: &str = "install pandoc: https://pandoc.org/installing.html";
const PDFLATEX_GUIDANCE: &str =
    "install a LaTeX distribution (TeX Live, MiKTeX, or MacTeX)";

/// Failure modes of the PDF pipeline.
///
/// A tool missing from the path is reported separately from a tool that ran
/// and exited non-zero, so the operator gets installation guidance for the
/// former and the tool's own output for the latter.
#[derive(Debug)]
pub enum PdfError {
    ToolNotFound {
        program: &'static str,
        guidance: &'static str,
    },
    ToolFailed {
        program: &'static str,
        detail: String,
    },
    Io(io::Error),
}

impl fmt::Display for PdfError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ToolNotFound { program, guidance } => {
                write!(f, "{program} not found; {guidance}")
            }
            Self::ToolFailed { program, detail } => {
                write!(f, "{program} failed:\n{detail}")
            }
            Self::Io(err) => err.fmt(f),
        }
    }
}

impl error::Error for PdfError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::ToolNotFound { .. } | Self::ToolFailed { .. } => None,
        }
    }
}

impl From<io::Error> for PdfError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

fn tool_error(err: io::Error, program: &'static str, guidance: &'static str) -> PdfError {
    if err.kind() == io::ErrorKind::NotFound {
        PdfError::ToolNotFound { program, guidance }
    } else {
        PdfError::Io(err)
    }
}

/// Find the lecture Markdown files in `dir`, sorted by lecture number.
///
/// Files whose names do not match `Lecture <N> ... .md` are ignored.
///
/// # Errors
/// Returns an error if the directory cannot be listed.
pub fn collect_lectures(dir: &Path) -> io::Result<Vec<(u32, PathBuf)>> {
    let mut lectures = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if let Some(num) = LECTURE_MD_RE
            .captures(&name)
            .and_then(|cap| cap[1].parse::<u32>().ok())
        {
            lectures.push((num, entry.path()));
        }
    }
    lectures.sort();
    Ok(lectures)
}

fn preamble(title: &str, author: &str) -> String {
    format!(
        r"\documentclass[12pt,a4paper]{{book}}

\usepackage[utf8]{{inputenc}}
\usepackage[T1]{{fontenc}}
\usepackage{{graphicx}}
\usepackage{{hyperref}}
\usepackage{{amsmath}}
\usepackage{{amssymb}}
\usepackage{{listings}}
\usepackage{{xcolor}}
\usepackage{{geometry}}
\usepackage{{fancyhdr}}

\geometry{{a4paper, left=2.5cm, right=2.5cm, top=2.5cm, bottom=2.5cm}}

\pagestyle{{fancy}}
\fancyhf{{}}
\fancyhead[L]{{\leftmark}}
\fancyhead[R]{{\thepage}}
\fancyfoot[C]{{{title}}}

\definecolor{{backcolour}}{{rgb}}{{0.95,0.95,0.92}}
\lstset{{
    backgroundcolor=\color{{backcolour}},
    basicstyle=\ttfamily\footnotesize,
    breaklines=true,
    keepspaces=true,
    numbers=left,
    numbersep=5pt,
    tabsize=2
}}

\hypersetup{{
    colorlinks=true,
    linkcolor=blue,
    urlcolor=cyan,
    pdftitle={{{title}}},
    pdfauthor={{{author}}},
}}

\begin{{document}}

\begin{{titlepage}}
    \centering
    \vspace*{{2cm}}
    {{\Huge\bfseries {title}\par}}
    \vspace{{1cm}}
    {{\Large Complete Lecture Notes\par}}
    \vspace{{2cm}}
    {{\Large\itshape {author}\par}}
    \vfill
    {{\large \today\par}}
\end{{titlepage}}

\tableofcontents
\clearpage

"
    )
}

/// Convert the lecture files to LaTeX and assemble the combined document.
///
/// Relative `img/` references are re-rooted to the lectures directory so the
/// document compiles from the working directory. A lecture whose pandoc run
/// exits non-zero is skipped with a notice on `progress`; a missing pandoc
/// aborts the whole build.
///
/// # Errors
/// Returns [`PdfError::ToolNotFound`] if pandoc is not installed, or an I/O
/// error if a lecture file cannot be read or progress cannot be written.
pub fn build_document(
    runner: &dyn ToolRunner,
    dir: &Path,
    lectures: &[(u32, PathBuf)],
    title: &str,
    author: &str,
    progress: &mut impl Write,
) -> Result<String, PdfError> {
    let mut latex = preamble(title, author);

    for (num, path) in lectures {
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        writeln!(progress, "Processing: {name}")?;

        let markdown = fs::read_to_string(path)?;
        let markdown = markdown.replace(
            "<img src=\"img/",
            &format!("<img src=\"{}/img/", dir.display()),
        );

        let output = runner
            .run("pandoc", &PANDOC_ARGS, Some(&markdown))
            .map_err(|err| tool_error(err, "pandoc", PANDOC_GUIDANCE))?;
        if !output.success() {
            writeln!(
                progress,
                "Error converting {name}: pandoc exited with status {}",
                output.status
            )?;
            continue;
        }

        latex.push_str(&format!("\n% Lecture {num}\n"));
        latex.push_str(&output.stdout);
        latex.push_str("\n\\clearpage\n\n");
    }

    latex.push_str("\n\\end{document}\n");
    Ok(latex)
}

/// Compile `<stem>.tex` with pdflatex, twice.
///
/// The second run resolves the table of contents and cross-references.
///
/// # Errors
/// Returns [`PdfError::ToolNotFound`] if pdflatex is not installed, or
/// [`PdfError::ToolFailed`] carrying the tool's stdout if a run exits
/// non-zero.
pub fn compile_latex(
    runner: &dyn ToolRunner,
    stem: &str,
    progress: &mut impl Write,
) -> Result<(), PdfError> {
    let tex_file = format!("{stem}.tex");
    for pass in 1..=2 {
        writeln!(progress, "PDFLaTeX run {pass}/2...")?;
        let output: ToolOutput = runner
            .run("pdflatex", &["-interaction=nonstopmode", &tex_file], None)
            .map_err(|err| tool_error(err, "pdflatex", PDFLATEX_GUIDANCE))?;
        if !output.success() {
            return Err(PdfError::ToolFailed {
                program: "pdflatex",
                detail: output.stdout,
            });
        }
    }
    Ok(())
}

/// Remove the auxiliary files pdflatex leaves next to the PDF.
///
/// Files that do not exist are ignored.
///
/// # Errors
/// Returns an error if an existing auxiliary file cannot be removed.
pub fn clean_aux_files(stem: &str) -> io::Result<()> {
    for ext in AUX_EXTENSIONS {
        let path = PathBuf::from(format!("{stem}.{ext}"));
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {}
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

/// Run the whole pipeline: collect, convert, compile, clean up.
///
/// Returns the path of the generated PDF.
///
/// # Errors
/// Propagates any failure from the stages above.
pub fn generate(
    runner: &dyn ToolRunner,
    dir: &Path,
    stem: &str,
    title: &str,
    author: &str,
    progress: &mut impl Write,
) -> Result<PathBuf, PdfError> {
    let lectures = collect_lectures(dir)?;
    writeln!(progress, "Found {} lecture files", lectures.len())?;

    let latex = build_document(runner, dir, &lectures, title, author, progress)?;
    let tex_path = PathBuf::from(format!("{stem}.tex"));
    fs::write(&tex_path, latex)?;
    writeln!(progress, "Created LaTeX file: {}", tex_path.display())?;

    compile_latex(runner, stem, progress)?;
    clean_aux_files(stem)?;
    Ok(PathBuf::from(format!("{stem}.pdf")))
}
