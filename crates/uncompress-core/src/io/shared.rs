//! Shared handle on a seekable byte stream.
//!
//! Archive detection hands the same stream to several backends in turn, and
//! the winning backend keeps reading from it after detection. `SharedReader`
//! lets every party hold a handle without transferring ownership back and
//! forth.

use std::cell::RefCell;
use std::fmt;
use std::io::Read;
use std::io::Seek;
use std::io::SeekFrom;
use std::io::{self};
use std::rc::Rc;

/// A byte stream that can be read and repositioned.
pub trait ReadSeek: Read + Seek {}

impl<T: Read + Seek + ?Sized> ReadSeek for T {}

/// Cloneable handle on a single underlying stream.
///
/// All clones read from and move the same cursor. Each `read`/`seek` call
/// borrows the stream only for its own duration.
///
/// # Examples
///
/// ```
/// use std::io::Cursor;
/// use std::io::Read;
/// use uncompress_core::io::SharedReader;
///
/// let reader = SharedReader::new(Cursor::new(b"abcdef".to_vec()));
/// let mut other = reader.clone();
///
/// let mut buf = [0u8; 3];
/// other.read_exact(&mut buf)?;
/// assert_eq!(reader.position()?, 3);
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone)]
pub struct SharedReader {
    inner: Rc<RefCell<Box<dyn ReadSeek>>>,
}

impl SharedReader {
    /// Wraps a stream.
    #[must_use]
    pub fn new<R: Read + Seek + 'static>(reader: R) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Box::new(reader))),
        }
    }

    /// Returns the current position of the underlying stream.
    pub fn position(&self) -> io::Result<u64> {
        self.inner.borrow_mut().stream_position()
    }

    /// Moves the underlying stream to an absolute offset.
    ///
    /// Nothing is done when the stream is already there, so a buffered
    /// stream keeps its buffer across sequential reads.
    pub fn seek_to(&self, offset: u64) -> io::Result<()> {
        let mut inner = self.inner.borrow_mut();
        if inner.stream_position()? != offset {
            inner.seek(SeekFrom::Start(offset))?;
        }
        Ok(())
    }
}

impl fmt::Debug for SharedReader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedReader")
            .field("handles", &Rc::strong_count(&self.inner))
            .finish_non_exhaustive()
    }
}

impl Read for SharedReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.borrow_mut().read(buf)
    }
}

impl Seek for SharedReader {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.borrow_mut().seek(pos)
    }
}
