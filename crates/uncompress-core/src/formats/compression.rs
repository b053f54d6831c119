//! Single-file compression codecs.
//!
//! These codecs wrap individual archive members (`notes.txt.gz`) and, for
//! tar, the archive as a whole (`backup.tar.xz`).
//!
//! # Supported Codecs
//!
//! - **Bzip2** (`.bz2`)
//! - **Xz** (`.xz`)
//! - **Gzip** (`.gz`)

use std::io::Read;
use std::io::{self};

use bzip2::read::MultiBzDecoder;
use flate2::read::MultiGzDecoder;
use xz2::read::XzDecoder;

/// Compression codec for single compressed files.
///
/// # Examples
///
/// ```
/// use uncompress_core::CompressionCodec;
///
/// assert_eq!(CompressionCodec::Gzip.suffixes(), &["gz"]);
/// assert_eq!(CompressionCodec::DEFAULT_ORDER[0], CompressionCodec::Bzip2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompressionCodec {
    /// Bzip2 compression (Burrows-Wheeler algorithm).
    Bzip2,

    /// Xz compression (LZMA2 algorithm).
    Xz,

    /// Gzip compression (deflate algorithm).
    Gzip,
}

impl CompressionCodec {
    /// Detection order used when nothing else is configured.
    pub const DEFAULT_ORDER: [Self; 3] = [Self::Bzip2, Self::Xz, Self::Gzip];

    /// Returns the file name suffixes (without the leading dot) this codec
    /// is known by.
    #[must_use]
    pub const fn suffixes(self) -> &'static [&'static str] {
        match self {
            Self::Bzip2 => &["bz2"],
            Self::Xz => &["xz"],
            Self::Gzip => &["gz"],
        }
    }

    /// Returns a human-readable name for this codec.
    ///
    /// # Examples
    ///
    /// ```
    /// use uncompress_core::CompressionCodec;
    ///
    /// assert_eq!(CompressionCodec::Gzip.name(), "gzip");
    /// assert_eq!(CompressionCodec::Bzip2.name(), "bzip2");
    /// ```
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bzip2 => "bzip2",
            Self::Xz => "xz",
            Self::Gzip => "gzip",
        }
    }

    /// Wraps `reader` in a decoder for this codec.
    ///
    /// Concatenated streams (multi-member gzip, multi-stream bzip2 and xz)
    /// decode as one. Headers are validated lazily on the first read.
    pub fn decoder<'a, R: Read + 'a>(self, reader: R) -> Box<dyn Read + 'a> {
        match self {
            Self::Bzip2 => Box::new(MultiBzDecoder::new(reader)),
            Self::Xz => Box::new(XzDecoder::new_multi_decoder(reader)),
            Self::Gzip => Box::new(MultiGzDecoder::new(reader)),
        }
    }

    /// Forces header validation by decoding a single byte from `reader`.
    ///
    /// The byte is discarded; callers reposition `reader` afterwards.
    pub fn probe<R: Read>(self, reader: R) -> io::Result<()> {
        let mut decoder = self.decoder(reader);
        let mut byte = [0u8; 1];
        loop {
            match decoder.read(&mut byte) {
                Ok(_) => return Ok(()),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::bzip2_bytes;
    use crate::test_utils::gzip_bytes;
    use crate::test_utils::xz_bytes;
    use std::io::Cursor;

    #[test]
    fn test_codec_suffixes() {
        assert_eq!(CompressionCodec::Bzip2.suffixes(), &["bz2"]);
        assert_eq!(CompressionCodec::Xz.suffixes(), &["xz"]);
        assert_eq!(CompressionCodec::Gzip.suffixes(), &["gz"]);
    }

    #[test]
    fn test_codec_name() {
        assert_eq!(CompressionCodec::Gzip.name(), "gzip");
        assert_eq!(CompressionCodec::Bzip2.name(), "bzip2");
        assert_eq!(CompressionCodec::Xz.name(), "xz");
    }

    #[test]
    fn test_default_order() {
        assert_eq!(
            CompressionCodec::DEFAULT_ORDER,
            [
                CompressionCodec::Bzip2,
                CompressionCodec::Xz,
                CompressionCodec::Gzip
            ]
        );
    }

    #[test]
    fn test_decoders_round_trip() {
        let text = b"the quick brown fox\n";
        let cases = [
            (CompressionCodec::Gzip, gzip_bytes(text)),
            (CompressionCodec::Bzip2, bzip2_bytes(text)),
            (CompressionCodec::Xz, xz_bytes(text)),
        ];

        for (codec, compressed) in cases {
            let mut out = Vec::new();
            codec
                .decoder(Cursor::new(compressed))
                .read_to_end(&mut out)
                .unwrap();
            assert_eq!(out, text, "codec {}", codec.name());
        }
    }

    #[test]
    fn test_probe_rejects_other_formats() {
        let gz = gzip_bytes(b"payload");
        assert!(CompressionCodec::Gzip.probe(Cursor::new(&gz)).is_ok());
        assert!(CompressionCodec::Bzip2.probe(Cursor::new(&gz)).is_err());
        assert!(CompressionCodec::Xz.probe(Cursor::new(&gz)).is_err());
    }

    #[test]
    fn test_probe_rejects_plain_text() {
        let text = b"just some plain text, nothing compressed here";
        for codec in CompressionCodec::DEFAULT_ORDER {
            assert!(
                codec.probe(Cursor::new(&text[..])).is_err(),
                "{} accepted plain text",
                codec.name()
            );
        }
    }

    #[test]
    fn test_multi_member_gzip() {
        let mut data = gzip_bytes(b"first ");
        data.extend(gzip_bytes(b"second"));

        let mut out = String::new();
        CompressionCodec::Gzip
            .decoder(Cursor::new(data))
            .read_to_string(&mut out)
            .unwrap();
        assert_eq!(out, "first second");
    }
}
