//! Bounded view onto a region of a shared stream.

use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::io::{self};

use super::SharedReader;

/// Read-only window over `len` bytes starting at `start` in a shared stream.
///
/// The window keeps its own cursor and moves the underlying stream back to
/// it before reading whenever another handle has moved it, so several
/// windows over the same stream can be used alternately.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use std::io::Read;
/// use uncompress_core::io::SharedReader;
/// use uncompress_core::io::WindowReader;
///
/// let shared = SharedReader::new(Cursor::new(b"headerPAYLOADtrailer".to_vec()));
/// let mut window = WindowReader::new(shared, 6, 7);
///
/// let mut payload = String::new();
/// window.read_to_string(&mut payload)?;
/// assert_eq!(payload, "PAYLOAD");
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Debug)]
pub struct WindowReader {
    inner: SharedReader,
    start: u64,
    len: u64,
    pos: u64,
}

impl WindowReader {
    /// Creates a window of `len` bytes beginning at absolute offset `start`.
    #[must_use]
    pub fn new(inner: SharedReader, start: u64, len: u64) -> Self {
        Self {
            inner,
            start,
            len,
            pos: 0,
        }
    }
}

impl Read for WindowReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let remaining = self.len.saturating_sub(self.pos);
        if remaining == 0 || buf.is_empty() {
            return Ok(0);
        }

        let want = usize::try_from(remaining).map_or(buf.len(), |r| r.min(buf.len()));
        self.inner.seek_to(self.start + self.pos)?;
        let n = self.inner.read(&mut buf[..want])?;
        self.pos += n as u64;
        Ok(n)
    }
}

impl Seek for WindowReader {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => Some(offset),
            SeekFrom::End(delta) => self.len.checked_add_signed(delta),
            SeekFrom::Current(delta) => self.pos.checked_add_signed(delta),
        };

        let target = target.ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "invalid seek to a negative or overflowing position",
            )
        })?;
        self.pos = target;
        Ok(target)
    }
}
