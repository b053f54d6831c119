//! Fixed-size chunked copy used when extracting members.

use std::io::Read;
use std::io::Write;
use std::io::{self};

use crate::Result;

/// Size of each chunk moved from a member stream to its destination.
pub const COPY_CHUNK_SIZE: usize = 1024;

/// Reusable chunk buffer for [`copy_with_buffer`].
///
/// # Examples
///
/// ```
/// use uncompress_core::copy::CopyBuffer;
/// use uncompress_core::copy::copy_with_buffer;
///
/// let mut buffer = CopyBuffer::new();
/// let mut input = &b"member bytes"[..];
/// let mut output = Vec::new();
///
/// let copied = copy_with_buffer(&mut input, &mut output, &mut buffer).unwrap();
/// assert_eq!(copied, 12);
/// ```
#[derive(Debug)]
pub struct CopyBuffer {
    buf: [u8; COPY_CHUNK_SIZE],
}

impl CopyBuffer {
    /// Creates a zeroed buffer.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buf: [0u8; COPY_CHUNK_SIZE],
        }
    }

    /// Returns the chunk size in bytes.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> usize {
        COPY_CHUNK_SIZE
    }
}

impl Default for CopyBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies `reader` into `writer` one chunk at a time until `reader` is
/// exhausted, returning the number of bytes copied.
///
/// Interrupted reads are retried. The writer is not flushed.
///
/// # Errors
///
/// Returns `Io` if reading or writing fails.
pub fn copy_with_buffer<R, W>(reader: &mut R, writer: &mut W, buffer: &mut CopyBuffer) -> Result<u64>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut total: u64 = 0;

    loop {
        let bytes_read = match reader.read(&mut buffer.buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        writer.write_all(&buffer.buf[..bytes_read])?;
        total += bytes_read as u64;
    }

    Ok(total)
}
