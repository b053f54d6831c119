//! Error conversion utilities for CLI.
//!
//! Converts uncompress-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use std::io;
use std::path::Path;
use uncompress_core::ArchiveError;

/// Message shown when no backend accepts the archive.
pub const UNSUPPORTED_MESSAGE: &str =
    "Could not open archive, not an archive or unsupported format.";

/// Converts `ArchiveError` to a user-friendly anyhow error with context.
pub fn convert_archive_error(err: ArchiveError, archive: &Path) -> anyhow::Error {
    match err {
        ArchiveError::UnsupportedFormat => {
            anyhow!(
                "{UNSUPPORTED_MESSAGE}\n\
                 HINT: '{}' must be a zip or tar file (optionally .gz, .bz2 or .xz compressed) or a directory.",
                archive.display()
            )
        }
        ArchiveError::MemberNotFound { name } => {
            anyhow!(
                "No member named '{name}' in '{}'\n\
                 HINT: Use `uncompress list --all` to see the member names.",
                archive.display()
            )
        }
        ArchiveError::NotAFile { name } => {
            anyhow!(
                "Member '{name}' in '{}' is not a regular file",
                archive.display()
            )
        }
        ArchiveError::UnsafePath { path } => {
            anyhow!(
                "Refusing to extract '{}' outside the current directory\n\
                 HINT: Pass an explicit destination path.",
                path.display()
            )
        }
        ArchiveError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{}': {reason}\n\
                 HINT: The archive may be corrupted or truncated.",
                archive.display()
            )
        }
        ArchiveError::Io(io_err) => anyhow::Error::from(io_err)
            .context(format!("I/O error while processing '{}'", archive.display())),
    }
}

/// Adds archive context to a core result.
pub fn add_archive_context<T>(
    result: Result<T, ArchiveError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_archive_error(e, archive))
}

/// Returns `true` if the error was caused by the reader of our output going
/// away.
pub fn is_broken_pipe(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause
            .downcast_ref::<io::Error>()
            .is_some_and(|e| e.kind() == io::ErrorKind::BrokenPipe)
    })
}
