//! Transparent per-member decompression.

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::io::Read;
use std::io::Seek;
use std::path::Path;

use log::debug;
use log::trace;

use super::common::is_format_error;
use crate::CompressionCodec;
use crate::Result;
use crate::io::ReadSeek;

/// Detects and strips single-file compression from member streams.
///
/// Codecs are tried in their configured order. Some decoders only validate
/// their header on the first read, so each candidate is probed by decoding
/// one byte before it is accepted. Streams no codec recognizes are passed
/// through unchanged.
///
/// # Examples
///
/// ```
/// use uncompress_core::Decompressor;
///
/// let decompressor = Decompressor::default();
/// assert_eq!(decompressor.pure_name("data.txt.gz"), "data.txt");
/// assert_eq!(decompressor.pure_name("a.tar.gz.gz"), "a.tar.gz");
/// assert_eq!(decompressor.pure_name("data.txt"), "data.txt");
/// ```
#[derive(Debug, Clone)]
pub struct Decompressor {
    codecs: Vec<CompressionCodec>,
    suffixes: BTreeSet<&'static str>,
}

impl Default for Decompressor {
    fn default() -> Self {
        Self::new(CompressionCodec::DEFAULT_ORDER.to_vec())
    }
}

impl Decompressor {
    /// Creates a decompressor trying `codecs` in order.
    #[must_use]
    pub fn new(codecs: Vec<CompressionCodec>) -> Self {
        let suffixes = codecs
            .iter()
            .flat_map(|codec| codec.suffixes().iter().copied())
            .collect();
        Self { codecs, suffixes }
    }

    /// Returns the configured codecs in detection order.
    #[must_use]
    pub fn codecs(&self) -> &[CompressionCodec] {
        &self.codecs
    }

    /// Returns `true` if `suffix` (without the leading dot) belongs to a
    /// configured codec. Comparison is case-sensitive.
    #[must_use]
    pub fn is_compressed_suffix(&self, suffix: &str) -> bool {
        self.suffixes.contains(suffix)
    }

    /// Strips at most one trailing compression suffix from `name`.
    #[must_use]
    pub fn pure_name(&self, name: &str) -> String {
        let path = Path::new(name);
        match path.extension().and_then(OsStr::to_str) {
            Some(ext) if self.is_compressed_suffix(ext) => {
                path.with_extension("").to_string_lossy().into_owned()
            }
            _ => name.to_string(),
        }
    }

    /// Finds the first codec whose decoder accepts `raw`.
    ///
    /// `raw` is left at its start whatever the outcome.
    ///
    /// # Errors
    ///
    /// Returns an error only if `raw` cannot be repositioned or fails with a
    /// non-format I/O error. A format mismatch is never an error.
    pub fn detect(&self, raw: &mut dyn ReadSeek) -> Result<Option<CompressionCodec>> {
        for &codec in &self.codecs {
            raw.rewind()?;
            match codec.probe(&mut *raw) {
                Ok(()) => {
                    raw.rewind()?;
                    debug!("member stream is {}-compressed", codec.name());
                    return Ok(Some(codec));
                }
                Err(e) if is_format_error(&e) => {
                    trace!("{} probe rejected member stream: {e}", codec.name());
                }
                Err(e) => return Err(e.into()),
            }
        }

        raw.rewind()?;
        Ok(None)
    }

    /// Wraps `raw` in the decoder of the first matching codec, or returns it
    /// unchanged if none matches.
    ///
    /// Ownership of `raw` moves into the returned stream either way.
    pub fn uncompress(&self, mut raw: Box<dyn ReadSeek>) -> Result<Box<dyn Read>> {
        match self.detect(&mut *raw)? {
            Some(codec) => Ok(codec.decoder(raw)),
            None => Ok(Box::new(raw)),
        }
    }
}
