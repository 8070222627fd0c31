use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a reporting run.
///
/// Lines that do not look like access log records are not errors; they are
/// skipped by the analyzer.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// The log file could not be opened or read to the end
    #[error("could not read log file '{}': {source}", .path.display())]
    InputUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The CSV snapshot could not be created or written
    #[error("failed to write results to '{}': {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("failed to print report: {0}")]
    Console(#[source] io::Error),
}

pub type Result<T> = std::result::Result<T, AnalyzerError>;
