//! Helpers shared between backends and the decompressor.
//!
//! This is an internal module not exposed in the public API.

use std::io;
use std::path::Component;
use std::path::Path;

use crate::ArchiveError;

/// Returns `true` if an I/O error means "the bytes are not in this format".
///
/// Parsers and decoders report malformed input with these kinds. Errors of
/// any other kind come from the underlying device (permissions, missing
/// files) and must not be mistaken for a format mismatch.
pub fn is_format_error(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::InvalidData
            | io::ErrorKind::InvalidInput
            | io::ErrorKind::UnexpectedEof
            | io::ErrorKind::Other
    )
}

/// Error returned when a closed backend is used.
pub fn closed_error() -> ArchiveError {
    ArchiveError::Io(io::Error::other("archive is closed"))
}

/// Returns `true` if `name` is a relative path that stays below its root.
///
/// Absolute paths, drive prefixes and `..` components are rejected.
pub fn is_contained(name: &str) -> bool {
    !name.is_empty()
        && Path::new(name)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}

/// Resolves `target` relative to the directory containing `member`.
///
/// Both are archive-internal names using `/` separators. Returns `None` if
/// the result would climb above the archive root.
pub fn resolve_relative(member: &str, target: &str) -> Option<String> {
    let mut parts: Vec<&str> = if target.starts_with('/') {
        Vec::new()
    } else {
        let mut base: Vec<&str> = member.split('/').filter(|s| !s.is_empty()).collect();
        base.pop();
        base
    };

    for part in target.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop()?;
            }
            other => parts.push(other),
        }
    }

    Some(parts.join("/"))
}
