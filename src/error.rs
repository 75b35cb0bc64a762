//! Error types for flowtag.

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlowTagError {
    /// A file could not be opened, created or flushed.
    #[error("I/O error on {path:?}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading a line from an input stream failed.
    #[error("failed to read line {line} of {source_name}")]
    Read {
        source_name: String,
        line: usize,
        #[source]
        source: std::io::Error,
    },

    /// Writing the report failed.
    #[error("failed to write report")]
    Write(#[source] std::io::Error),

    /// A destination port field that is not an integer. Fatal for the whole run.
    #[error("invalid destination port {value:?} on line {line} of {source_name}")]
    InvalidPort {
        source_name: String,
        line: usize,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl FlowTagError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, FlowTagError>;
