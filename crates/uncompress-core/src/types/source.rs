//! Byte sources accepted by archive detection.

use std::fs::File;
use std::io::BufReader;
use std::io::Read;
use std::io::Seek;
use std::path::Path;
use std::path::PathBuf;

use crate::Result;
use crate::io::SharedReader;

/// The input handed to archive detection.
///
/// A source is either an already-open seekable stream, or a filesystem path
/// naming an archive file or a directory. Streams are shared between the
/// caller, every backend attempt, and the backend that finally accepts them.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use uncompress_core::ArchiveSource;
///
/// let from_path = ArchiveSource::from_path("logs.tar");
/// assert!(from_path.as_path().is_some());
///
/// let from_memory = ArchiveSource::from_reader(Cursor::new(Vec::<u8>::new()));
/// assert!(from_memory.as_path().is_none());
/// ```
#[derive(Debug, Clone)]
pub enum ArchiveSource {
    /// An open seekable stream.
    Reader(SharedReader),
    /// A path naming an archive file or a directory.
    Path(PathBuf),
}

impl ArchiveSource {
    /// Creates a source from an open stream.
    #[must_use]
    pub fn from_reader<R: Read + Seek + 'static>(reader: R) -> Self {
        Self::Reader(SharedReader::new(reader))
    }

    /// Creates a source from a filesystem path.
    #[must_use]
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self::Path(path.as_ref().to_path_buf())
    }

    /// Returns the path if this source is path-based.
    #[must_use]
    pub fn as_path(&self) -> Option<&Path> {
        match self {
            Self::Path(path) => Some(path),
            Self::Reader(_) => None,
        }
    }

    /// Returns a stream over the source, if it has one.
    ///
    /// Stream sources return a new handle on the shared stream. A path naming
    /// a regular file is opened afresh on every call. Paths that do not exist
    /// or name a directory yield `None`.
    pub fn stream(&self) -> Result<Option<SharedReader>> {
        match self {
            Self::Reader(reader) => Ok(Some(reader.clone())),
            Self::Path(path) if path.is_file() => {
                let file = File::open(path)?;
                Ok(Some(SharedReader::new(BufReader::new(file))))
            }
            Self::Path(_) => Ok(None),
        }
    }

    /// Returns the current stream offset, or `None` for path sources.
    pub(crate) fn position(&self) -> Result<Option<u64>> {
        match self {
            Self::Reader(reader) => Ok(Some(reader.position()?)),
            Self::Path(_) => Ok(None),
        }
    }

    /// Moves a stream source back to `origin`; path sources are untouched.
    pub(crate) fn restore(&self, origin: Option<u64>) -> Result<()> {
        if let (Self::Reader(reader), Some(offset)) = (self, origin) {
            reader.seek_to(offset)?;
        }
        Ok(())
    }
}

impl From<PathBuf> for ArchiveSource {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for ArchiveSource {
    fn from(path: &Path) -> Self {
        Self::from_path(path)
    }
}

impl From<&PathBuf> for ArchiveSource {
    fn from(path: &PathBuf) -> Self {
        Self::from_path(path)
    }
}

impl From<&str> for ArchiveSource {
    fn from(path: &str) -> Self {
        Self::from_path(path)
    }
}

impl From<File> for ArchiveSource {
    fn from(file: File) -> Self {
        Self::from_reader(BufReader::new(file))
    }
}

impl From<SharedReader> for ArchiveSource {
    fn from(reader: SharedReader) -> Self {
        Self::Reader(reader)
    }
}
