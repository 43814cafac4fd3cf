//! Hard failures that stop a validation run before any record is checked.
//!
//! Field-level problems are never returned through this type; they are
//! accumulated as [`crate::report::Issue`]s instead.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Broad classification of a hard failure, used by callers to pick an exit path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed invocation (unknown document type)
    Usage,
    /// File missing, unreadable, or not valid JSON/YAML
    Load,
    /// Top-level document has the wrong shape
    Structural,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::Usage => "usage",
            ErrorKind::Load => "load",
            ErrorKind::Structural => "structural",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid data type: {0}. Must be one of: categories, requirements, responses")]
    UnknownDocumentType(String),

    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Error reading file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Invalid config file {}: {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("Data must be a list of {noun} objects")]
    NotAList { noun: &'static str },

    #[error("Categories must be a list")]
    CategoriesNotAList,
}

impl Error {
    /// Returns the category of this failure
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::UnknownDocumentType(_) => ErrorKind::Usage,
            Error::FileNotFound(_)
            | Error::Read { .. }
            | Error::InvalidJson(_)
            | Error::Config { .. } => ErrorKind::Load,
            Error::NotAList { .. } | Error::CategoriesNotAList => ErrorKind::Structural,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
