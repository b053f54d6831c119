//! Error types for archive access.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using `ArchiveError`.
pub type Result<T> = std::result::Result<T, ArchiveError>;

/// Errors that can occur while opening or reading an archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No registered backend accepted the byte source.
    #[error("unsupported archive format")]
    UnsupportedFormat,

    /// The requested member is not present in the archive.
    #[error("member not found: {name}")]
    MemberNotFound {
        /// The requested member name.
        name: String,
    },

    /// The member exists but has no readable content (directory, device).
    #[error("member is not a regular file: {name}")]
    NotAFile {
        /// The member name.
        name: String,
    },

    /// Archive was accepted but is corrupted.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// A member name cannot be used as a destination path.
    #[error("unsafe destination path: {path}")]
    UnsafePath {
        /// The rejected path.
        path: PathBuf,
    },
}

impl ArchiveError {
    pub(crate) fn not_found(name: &str) -> Self {
        Self::MemberNotFound {
            name: name.to_string(),
        }
    }

    pub(crate) fn not_a_file(name: &str) -> Self {
        Self::NotAFile {
            name: name.to_string(),
        }
    }
}
