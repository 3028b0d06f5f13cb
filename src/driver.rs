//! File-level driver
//!
//! Maps `.jack` sources to `.xml` outputs and runs the analyzer on each one.
//! Files are independent: a failure is recorded and the remaining files are
//! still processed.

use crate::analyzer::parse::ParseError;
use crate::analyzer::scanner::Scanner;
use crate::analyzer::{compile_source, write_token_stream};
use crate::markup::XmlWriter;
use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info};

const SOURCE_EXTENSION: &str = "jack";

/// What gets written for each source file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// The full parse tree, rooted at `class`.
    #[default]
    Tree,
    /// One leaf per token under a `tokens` root; the parser is not run.
    Tokens,
}

impl OutputMode {
    /// Appended to the source file stem to name the output file.
    pub fn suffix(self) -> &'static str {
        match self {
            OutputMode::Tree => ".xml",
            OutputMode::Tokens => "T.xml",
        }
    }
}

/// Options shared by every file of one run.
#[derive(Debug, Clone, Default)]
pub struct AnalyzerOptions {
    pub mode: OutputMode,
    /// Spaces per nesting level; 0 writes every line flush left.
    pub indent: usize,
    /// Where outputs go. `None` puts each output next to its source.
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("no .jack files found in {}", path.display())]
    NoSources { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("{}: {source}", path.display())]
    Parse { path: PathBuf, source: ParseError },
}

/// Outcome of [`analyze_path`].
#[derive(Debug, Default)]
pub struct Report {
    /// Output files that were written completely.
    pub written: Vec<PathBuf>,
    pub failures: Vec<AnalyzeError>,
}

impl Report {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// The source files named by `path`: the file itself, or every `.jack` file
/// directly inside a directory, sorted by name.
pub fn collect_sources(path: &Path) -> Result<Vec<PathBuf>, AnalyzeError> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let read_err = |source: io::Error| AnalyzeError::Read {
        path: path.to_path_buf(),
        source,
    };

    let mut sources = Vec::new();
    for entry in fs::read_dir(path).map_err(read_err)? {
        let entry_path = entry.map_err(read_err)?.path();
        if entry_path.is_file()
            && entry_path.extension().is_some_and(|ext| ext == SOURCE_EXTENSION)
        {
            sources.push(entry_path);
        }
    }
    sources.sort();

    if sources.is_empty() {
        return Err(AnalyzeError::NoSources {
            path: path.to_path_buf(),
        });
    }
    Ok(sources)
}

/// Output file for `source`: `<stem><suffix>` in the output directory, or
/// beside the source.
pub fn output_path(source: &Path, options: &AnalyzerOptions) -> PathBuf {
    let stem = source.file_stem().unwrap_or_default().to_string_lossy();
    let file_name = format!("{stem}{}", options.mode.suffix());
    match &options.out_dir {
        Some(dir) => dir.join(file_name),
        None => source.with_file_name(file_name),
    }
}

/// Analyze one source file and return the path written.
///
/// On a parse error the output file is left holding everything written
/// before the error.
pub fn analyze_file(source: &Path, options: &AnalyzerOptions) -> Result<PathBuf, AnalyzeError> {
    let text = fs::read_to_string(source).map_err(|err| AnalyzeError::Read {
        path: source.to_path_buf(),
        source: err,
    })?;

    let out_path = output_path(source, options);
    let write_err = |err: io::Error| AnalyzeError::Write {
        path: out_path.clone(),
        source: err,
    };

    if let Some(dir) = &options.out_dir {
        fs::create_dir_all(dir).map_err(write_err)?;
    }
    let file = File::create(&out_path).map_err(write_err)?;
    let mut sink = XmlWriter::new(BufWriter::new(file)).with_indent(options.indent);

    debug!(source = %source.display(), mode = ?options.mode, "analyzing");
    let result = match options.mode {
        OutputMode::Tree => compile_source(&text, &mut sink),
        OutputMode::Tokens => write_token_stream(&mut Scanner::new(&text), &mut sink),
    };
    sink.flush().map_err(write_err)?;

    match result {
        Ok(()) => Ok(out_path),
        Err(ParseError::Sink(err)) => Err(write_err(err)),
        Err(err) => Err(AnalyzeError::Parse {
            path: source.to_path_buf(),
            source: err,
        }),
    }
}

/// Analyze every source named by `path`.
///
/// Only a failure to find sources is returned as an error; per-file failures
/// are logged and collected in the report.
pub fn analyze_path(path: &Path, options: &AnalyzerOptions) -> Result<Report, AnalyzeError> {
    let mut report = Report::default();

    for source in collect_sources(path)? {
        match analyze_file(&source, options) {
            Ok(written) => {
                info!(source = %source.display(), output = %written.display(), "wrote");
                report.written.push(written);
            }
            Err(err) => {
                error!("{err}");
                report.failures.push(err);
            }
        }
    }

    Ok(report)
}
