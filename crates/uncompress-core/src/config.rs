//! Configuration for opening archives.

use crate::CompressionCodec;
use crate::Decompressor;

/// Options controlling how archive members are decoded and extracted.
///
/// # Examples
///
/// ```
/// use uncompress_core::ArchiveConfig;
/// use uncompress_core::CompressionCodec;
///
/// // Bzip2, xz and gzip members are decoded transparently
/// let config = ArchiveConfig::default();
/// assert_eq!(config.codecs.len(), 3);
///
/// // Only gzip, and keep member names as they are
/// let custom = ArchiveConfig {
///     codecs: vec![CompressionCodec::Gzip],
///     strip_compression_suffix: false,
/// };
/// assert!(!custom.strip_compression_suffix);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveConfig {
    /// Codecs tried on every member stream, in order.
    pub codecs: Vec<CompressionCodec>,

    /// Drop a trailing compression suffix from default extraction
    /// destinations (`log.txt.gz` extracts to `log.txt`).
    pub strip_compression_suffix: bool,
}

impl Default for ArchiveConfig {
    /// Default values:
    /// - `codecs`: bzip2, xz, gzip
    /// - `strip_compression_suffix`: true
    fn default() -> Self {
        Self {
            codecs: CompressionCodec::DEFAULT_ORDER.to_vec(),
            strip_compression_suffix: true,
        }
    }
}

impl ArchiveConfig {
    /// Creates a configuration that returns member bytes as stored.
    ///
    /// No codec is tried and destinations keep their full names.
    #[must_use]
    pub fn raw() -> Self {
        Self {
            codecs: Vec::new(),
            strip_compression_suffix: false,
        }
    }

    /// Builds the decompressor described by this configuration.
    #[must_use]
    pub fn decompressor(&self) -> Decompressor {
        Decompressor::new(self.codecs.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ArchiveConfig::default();
        assert_eq!(
            config.codecs,
            vec![
                CompressionCodec::Bzip2,
                CompressionCodec::Xz,
                CompressionCodec::Gzip
            ]
        );
        assert!(config.strip_compression_suffix);
    }

    #[test]
    fn test_raw_config() {
        let config = ArchiveConfig::raw();
        assert!(config.codecs.is_empty());
        assert!(!config.strip_compression_suffix);
        assert!(config.decompressor().codecs().is_empty());
    }

    #[test]
    fn test_decompressor_follows_codecs() {
        let config = ArchiveConfig {
            codecs: vec![CompressionCodec::Xz],
            ..Default::default()
        };
        let decompressor = config.decompressor();
        assert!(decompressor.is_compressed_suffix("xz"));
        assert!(!decompressor.is_compressed_suffix("gz"));
    }
}
