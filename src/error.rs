//! Errors surfaced by loading and parsing source files.

use crate::parsing::ParseError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InspectorError {
    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("{}: file is {size} bytes, limit is {limit}", path.display())]
    FileTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("{}: not a supported source file", .0.display())]
    UnsupportedFile(PathBuf),
}

impl InspectorError {
    /// File the error refers to, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Parse { path, .. }
            | Self::Io { path, .. }
            | Self::FileTooLarge { path, .. }
            | Self::UnsupportedFile(path) => Some(path),
            Self::Config(_) => None,
        }
    }

    /// The underlying parse failure, for callers that report line numbers.
    pub fn parse_error(&self) -> Option<&ParseError> {
        match self {
            Self::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}

pub type InspectorResult<T> = Result<T, InspectorError>;
