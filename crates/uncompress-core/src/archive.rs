//! Uniform archive access and its builder.

use std::fs;
use std::fs::File;
use std::io::Read;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use log::debug;
use log::warn;

use crate::ArchiveConfig;
use crate::ArchiveError;
use crate::ArchiveSource;
use crate::Decompressor;
use crate::Detector;
use crate::MemberInfo;
use crate::Result;
use crate::copy::CopyBuffer;
use crate::copy::copy_with_buffer;
use crate::formats::ArchiveBackend;
use crate::formats::common::is_contained;

/// An archive of possibly compressed files.
///
/// Wraps whichever backend accepted the source and decodes member streams
/// transparently. The backend is closed exactly once: by [`close`], or when
/// the archive is dropped if it was never closed explicitly.
///
/// [`close`]: UniformArchive::close
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use uncompress_core::ArchiveSource;
/// use uncompress_core::UniformArchive;
/// use uncompress_core::test_utils::create_test_tar;
/// use uncompress_core::test_utils::gzip_bytes;
///
/// # fn main() -> Result<(), uncompress_core::ArchiveError> {
/// let gz = gzip_bytes(b"hello\n");
/// let tar = create_test_tar(vec![("log.txt.gz", &gz[..])]);
///
/// let mut archive = UniformArchive::open(ArchiveSource::from_reader(Cursor::new(tar)))?;
/// assert_eq!(archive.list_files()?, vec!["log.txt.gz"]);
/// assert_eq!(archive.read_to_vec("log.txt.gz")?, b"hello\n");
/// assert_eq!(archive.pure_name("log.txt.gz"), "log.txt");
/// archive.close()?;
/// # Ok(())
/// # }
/// ```
pub struct UniformArchive {
    backend: Box<dyn ArchiveBackend>,
    decompressor: Decompressor,
    config: ArchiveConfig,
    closed: bool,
}

impl UniformArchive {
    /// Opens `source` with the default detector and configuration.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` if no backend accepts the source.
    pub fn open(source: impl Into<ArchiveSource>) -> Result<Self> {
        ArchiveBuilder::new().open(source)
    }

    /// Wraps an already opened backend.
    #[must_use]
    pub fn from_backend(backend: Box<dyn ArchiveBackend>, config: ArchiveConfig) -> Self {
        Self {
            backend,
            decompressor: config.decompressor(),
            config,
            closed: false,
        }
    }

    /// Returns the name of the backend format (`zip`, `tar`, `directory`).
    #[must_use]
    pub fn format_name(&self) -> &str {
        self.backend.format_name()
    }

    /// Returns the configuration this archive was opened with.
    #[must_use]
    pub fn config(&self) -> &ArchiveConfig {
        &self.config
    }

    /// Lists every member with its file flag.
    pub fn members(&self) -> Result<Vec<MemberInfo>> {
        self.backend.members()
    }

    /// Returns the names of all members, files and directories alike.
    pub fn list(&self) -> Result<Vec<String>> {
        Ok(self.members()?.into_iter().map(|m| m.name).collect())
    }

    /// Returns the names of the members that are regular files.
    pub fn list_files(&self) -> Result<Vec<String>> {
        Ok(self
            .members()?
            .into_iter()
            .filter(|m| m.is_file)
            .map(|m| m.name)
            .collect())
    }

    /// Opens a member and decodes it if it is compressed.
    ///
    /// Members no configured codec recognizes are returned as stored.
    ///
    /// # Errors
    ///
    /// Returns `MemberNotFound` or `NotAFile` from the backend, or `Io` if
    /// the member stream fails while being probed.
    pub fn read(&mut self, name: &str) -> Result<Box<dyn Read>> {
        let raw = self.backend.read(name)?;
        self.decompressor.uncompress(raw)
    }

    /// Reads a whole decoded member into memory.
    pub fn read_to_vec(&mut self, name: &str) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        self.read(name)?.read_to_end(&mut data)?;
        Ok(data)
    }

    /// Strips at most one trailing compression suffix from `name`.
    #[must_use]
    pub fn pure_name(&self, name: &str) -> String {
        self.decompressor.pure_name(name)
    }

    /// Returns the path [`extract`](Self::extract) writes to when no
    /// destination is given.
    ///
    /// # Errors
    ///
    /// Returns `UnsafePath` if the member name is absolute or climbs out of
    /// the working directory.
    pub fn default_destination(&self, name: &str) -> Result<PathBuf> {
        let destination = if self.config.strip_compression_suffix {
            self.pure_name(name)
        } else {
            name.to_string()
        };

        if !is_contained(&destination) {
            return Err(ArchiveError::UnsafePath {
                path: PathBuf::from(name),
            });
        }
        Ok(PathBuf::from(destination))
    }

    /// Writes a decoded member to a file and returns the number of bytes
    /// written.
    ///
    /// Missing parent directories are created. An existing file at the
    /// destination is overwritten.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`read`](Self::read) and
    /// [`default_destination`](Self::default_destination), or `Io` if the
    /// destination cannot be written.
    pub fn extract(&mut self, name: &str, destination: Option<&Path>) -> Result<u64> {
        let destination = match destination {
            Some(path) => path.to_path_buf(),
            None => self.default_destination(name)?,
        };

        // Open the member first so a bad name leaves nothing on disk.
        let mut reader = self.read(name)?;

        if let Some(parent) = destination.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let destination = std::path::absolute(&destination)?;

        let mut file = File::create(&destination)?;
        let written = copy_with_buffer(&mut reader, &mut file, &mut CopyBuffer::new())?;
        file.flush()?;

        debug!("extracted {name} to {} ({written} bytes)", destination.display());
        Ok(written)
    }

    /// Writes a decoded member into `writer` and returns the number of bytes
    /// written. The writer is flushed but stays open.
    pub fn extract_to_writer<W: Write + ?Sized>(&mut self, name: &str, writer: &mut W) -> Result<u64> {
        let mut reader = self.read(name)?;
        let written = copy_with_buffer(&mut reader, writer, &mut CopyBuffer::new())?;
        writer.flush()?;
        Ok(written)
    }

    /// Closes the backend.
    ///
    /// # Errors
    ///
    /// Returns the error reported by the backend while releasing its
    /// resources.
    pub fn close(mut self) -> Result<()> {
        self.closed = true;
        self.backend.close()
    }
}

impl Drop for UniformArchive {
    fn drop(&mut self) {
        if !self.closed {
            self.closed = true;
            if let Err(e) = self.backend.close() {
                warn!("failed to close {} archive: {e}", self.backend.format_name());
            }
        }
    }
}

impl std::fmt::Debug for UniformArchive {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UniformArchive")
            .field("format", &self.backend.format_name())
            .field("config", &self.config)
            .field("closed", &self.closed)
            .finish()
    }
}

/// Builder for opening archives with a custom detector or configuration.
///
/// # Examples
///
/// ```no_run
/// use uncompress_core::ArchiveBuilder;
/// use uncompress_core::ArchiveConfig;
/// use uncompress_core::Detector;
/// use uncompress_core::ZipOpener;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let archive = ArchiveBuilder::new()
///     .detector(Detector::empty().with_opener(ZipOpener))
///     .config(ArchiveConfig::raw())
///     .open("bundle.zip")?;
/// println!("{:?}", archive.list()?);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Default)]
pub struct ArchiveBuilder {
    detector: Option<Detector>,
    config: Option<ArchiveConfig>,
}

impl ArchiveBuilder {
    /// Creates a builder using the default detector and configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the detector used to pick a backend.
    #[must_use]
    pub fn detector(mut self, detector: Detector) -> Self {
        self.detector = Some(detector);
        self
    }

    /// Sets the archive configuration.
    #[must_use]
    pub fn config(mut self, config: ArchiveConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Detects the format of `source` and opens it.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` if no opener accepts the source, or the
    /// first non-format error an opener reports.
    pub fn open(self, source: impl Into<ArchiveSource>) -> Result<UniformArchive> {
        let source = source.into();
        let detector = self.detector.unwrap_or_default();
        let backend = detector.detect(&source)?;
        Ok(UniformArchive::from_backend(
            backend,
            self.config.unwrap_or_default(),
        ))
    }
}
