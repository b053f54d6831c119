//! Common traits for archive backends.

use crate::ArchiveSource;
use crate::MemberInfo;
use crate::Result;
use crate::io::ReadSeek;

/// An archive opened in one specific format.
pub trait ArchiveBackend {
    /// Returns the archive format name.
    fn format_name(&self) -> &str;

    /// Lists every member, files and directories alike.
    fn members(&self) -> Result<Vec<MemberInfo>>;

    /// Opens a member for reading its raw (still compressed) bytes.
    ///
    /// # Errors
    ///
    /// Returns `MemberNotFound` if no member has this name and `NotAFile`
    /// if the member carries no data.
    fn read(&mut self, name: &str) -> Result<Box<dyn ReadSeek>>;

    /// Releases the resources held by the backend.
    fn close(&mut self) -> Result<()>;
}

/// Constructs a backend for one archive format.
///
/// Openers are tried in order by [`Detector`](crate::Detector).
pub trait BackendOpener {
    /// Returns the format name of the backends this opener produces.
    fn name(&self) -> &str;

    /// Attempts to open `source` in this opener's format.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` when the source is not in this format.
    /// Any other error aborts detection.
    fn open(&self, source: &ArchiveSource) -> Result<Box<dyn ArchiveBackend>>;
}
