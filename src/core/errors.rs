//! Error types for outline normalization
//!
//! Input path problems are detected before any file is touched. Everything
//! that can go wrong while importing or exporting a single icon is an
//! `OutlineError`, returned per file so the caller can pick a failure policy.

use crate::batch::report::BatchReport;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The icons argument does not point at a usable directory
#[derive(Debug, Error)]
pub enum InputPathError {
    #[error("The icons folder does not exist: {}", .0.display())]
    NotFound(PathBuf),
    #[error("The icons path is not a folder: {}", .0.display())]
    NotADirectory(PathBuf),
}

/// Failure while processing one icon file
#[derive(Debug, Error)]
pub enum OutlineError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to import outlines from {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: usvg::Error,
    },
    #[error(
        "{} draws {skipped} paths but none became an outline; leaving it untouched",
        path.display()
    )]
    NothingImported { path: PathBuf, skipped: usize },
    #[error("'{name}' is not a valid glyph name")]
    GlyphName { name: String },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure of a whole batch run
#[derive(Debug, Error)]
pub enum BatchError {
    #[error(transparent)]
    InputPath(#[from] InputPathError),
    #[error("failed to list {}: {source}", path.display())]
    ListDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("aborted at {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: OutlineError,
        /// Everything processed up to and including the failing file
        report: Box<BatchReport>,
    },
}

impl BatchError {
    /// The report of an aborted run, if it got as far as processing files
    pub fn partial_report(&self) -> Option<&BatchReport> {
        match self {
            BatchError::File { report, .. } => Some(report),
            _ => None,
        }
    }
}
