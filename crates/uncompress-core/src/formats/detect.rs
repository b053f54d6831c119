//! Archive format detection.
//!
//! Detection is first-fit: openers are tried in order, the source is rolled
//! back to where it started after every rejected attempt, and the first
//! opener that accepts the source wins. There is no scoring and no record
//! of which opener came closest.

use log::debug;
use log::trace;

use super::directory::DirectoryOpener;
use super::tar::TarOpener;
use super::traits::ArchiveBackend;
use super::traits::BackendOpener;
use super::zip::ZipOpener;
use crate::ArchiveError;
use crate::ArchiveSource;
use crate::Result;

/// Ordered list of backend openers.
///
/// # Examples
///
/// ```
/// use uncompress_core::Detector;
///
/// let detector = Detector::default();
/// assert_eq!(detector.names(), vec!["zip", "tar", "directory"]);
/// ```
pub struct Detector {
    openers: Vec<Box<dyn BackendOpener>>,
}

impl Default for Detector {
    /// Zip, then tar, then directory.
    fn default() -> Self {
        Self::empty()
            .with_opener(ZipOpener)
            .with_opener(TarOpener::default())
            .with_opener(DirectoryOpener)
    }
}

impl std::fmt::Debug for Detector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Detector")
            .field("openers", &self.names())
            .finish()
    }
}

impl Detector {
    /// Creates a detector with no openers. It rejects every source.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            openers: Vec::new(),
        }
    }

    /// Appends an opener; it is tried after all openers added before it.
    #[must_use]
    pub fn with_opener<O: BackendOpener + 'static>(mut self, opener: O) -> Self {
        self.openers.push(Box::new(opener));
        self
    }

    /// Returns the opener names in detection order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.openers.iter().map(|o| o.name()).collect()
    }

    /// Opens `source` with the first opener that accepts it.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` if every opener rejects the source. Any
    /// other error from an opener stops detection and is returned as is.
    pub fn detect(&self, source: &ArchiveSource) -> Result<Box<dyn ArchiveBackend>> {
        let origin = source.position()?;

        for opener in &self.openers {
            match opener.open(source) {
                Ok(backend) => {
                    debug!("source opened as {}", opener.name());
                    return Ok(backend);
                }
                Err(ArchiveError::UnsupportedFormat) => {
                    trace!("{} rejected source", opener.name());
                    source.restore(origin)?;
                }
                Err(e) => return Err(e),
            }
        }

        Err(ArchiveError::UnsupportedFormat)
    }
}
