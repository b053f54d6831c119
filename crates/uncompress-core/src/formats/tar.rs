//! Tar archive backend.
//!
//! Member headers are scanned once when the archive is opened. Reading a
//! member of a plain tar returns a window onto its data in the source
//! stream, so nothing is materialized. Tars compressed as a whole
//! (`.tar.gz`, `.tar.bz2`, `.tar.xz`) are scanned through a streaming
//! decoder; reading one of their members decodes up to that member again
//! and buffers only the member itself.

use std::collections::HashMap;
use std::io::Cursor;
use std::io::Read;
use std::io::{self};

use log::debug;

use super::common::closed_error;
use super::common::is_format_error;
use super::common::resolve_relative;
use super::traits::ArchiveBackend;
use super::traits::BackendOpener;
use crate::ArchiveError;
use crate::ArchiveSource;
use crate::CompressionCodec;
use crate::MemberInfo;
use crate::Result;
use crate::io::ReadSeek;
use crate::io::SharedReader;
use crate::io::WindowReader;

/// Maximum number of links followed when resolving a member.
const MAX_LINK_HOPS: usize = 16;

/// Opens tar sources, plain or compressed as a whole.
#[derive(Debug, Clone)]
pub struct TarOpener {
    codecs: Vec<CompressionCodec>,
}

impl Default for TarOpener {
    fn default() -> Self {
        Self::new(CompressionCodec::DEFAULT_ORDER.to_vec())
    }
}

impl TarOpener {
    /// Creates an opener that also accepts tars compressed with `codecs`.
    #[must_use]
    pub fn new(codecs: Vec<CompressionCodec>) -> Self {
        Self { codecs }
    }

    /// Creates an opener that only accepts uncompressed tars.
    #[must_use]
    pub fn plain() -> Self {
        Self::new(Vec::new())
    }
}

impl BackendOpener for TarOpener {
    fn name(&self) -> &str {
        "tar"
    }

    fn open(&self, source: &ArchiveSource) -> Result<Box<dyn ArchiveBackend>> {
        let Some(stream) = source.stream()? else {
            return Err(ArchiveError::UnsupportedFormat);
        };
        let origin = stream.position()?;

        match TarBackend::new(stream.clone()) {
            Err(ArchiveError::UnsupportedFormat) => {}
            result => return Ok(Box::new(result?)),
        }

        for &codec in &self.codecs {
            match TarBackend::compressed(stream.clone(), origin, codec) {
                Err(ArchiveError::UnsupportedFormat) => {}
                result => {
                    let backend = result?;
                    debug!("tar archive is {}-compressed", codec.name());
                    return Ok(Box::new(backend));
                }
            }
        }

        Err(ArchiveError::UnsupportedFormat)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TarKind {
    File,
    Directory,
    HardLink(String),
    Symlink(String),
    Other,
}

#[derive(Debug, Clone)]
struct TarMember {
    name: String,
    kind: TarKind,
    offset: u64,
    size: u64,
}

/// Where member data is read from.
#[derive(Debug)]
enum TarData {
    /// Members are windows onto the source stream.
    Plain(SharedReader),
    /// The source decodes to a tar; members are decoded on demand.
    Compressed {
        source: SharedReader,
        origin: u64,
        codec: CompressionCodec,
    },
}

impl TarData {
    fn open_member(&self, member: &TarMember) -> Result<Box<dyn ReadSeek>> {
        match self {
            Self::Plain(reader) => Ok(Box::new(WindowReader::new(
                reader.clone(),
                member.offset,
                member.size,
            ))),
            Self::Compressed {
                source,
                origin,
                codec,
            } => {
                let mut decoded = codec.decoder(decoded_input(source, *origin));
                let skipped = io::copy(&mut (&mut decoded).take(member.offset), &mut io::sink())?;

                let mut data = Vec::new();
                decoded.take(member.size).read_to_end(&mut data)?;
                if skipped < member.offset || (data.len() as u64) < member.size {
                    return Err(ArchiveError::InvalidArchive(format!(
                        "compressed tar ends inside {}",
                        member.name
                    )));
                }
                Ok(Box::new(Cursor::new(data)))
            }
        }
    }
}

/// Decoder input over `source` from `origin` on, with its own cursor so
/// other handles on the same stream do not disturb it.
fn decoded_input(source: &SharedReader, origin: u64) -> WindowReader {
    WindowReader::new(source.clone(), origin, u64::MAX - origin)
}

/// Tar archive handler.
#[derive(Debug)]
pub struct TarBackend {
    data: Option<TarData>,
    members: Vec<TarMember>,
    index: HashMap<String, usize>,
}

impl TarBackend {
    /// Scans the member headers of the tar starting at the current position
    /// of `reader`.
    ///
    /// A malformed header on the first member rejects the source. A
    /// malformed header further in ends the member list, matching how tar
    /// tools treat trailing garbage.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` if `reader` does not start with a tar
    /// header or holds no members.
    pub fn new(reader: SharedReader) -> Result<Self> {
        let origin = reader.position()?;
        let mut archive = tar::Archive::new(reader.clone());
        let entries = archive.entries_with_seek().map_err(header_error)?;
        let members = scan_members(entries, origin)?;
        Self::with_members(TarData::Plain(reader), members)
    }

    /// Scans the tar that `source` decodes to with `codec`, starting at
    /// `origin`.
    ///
    /// Decoding stops at the first header that is not a tar header, so a
    /// compressed file that is not a tar is rejected after one block.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` if the source is not `codec`-compressed
    /// or does not decode to a tar with members.
    pub fn compressed(source: SharedReader, origin: u64, codec: CompressionCodec) -> Result<Self> {
        let mut archive = tar::Archive::new(codec.decoder(decoded_input(&source, origin)));
        let entries = archive.entries().map_err(header_error)?;
        let members = scan_members(entries, 0)?;
        Self::with_members(
            TarData::Compressed {
                source,
                origin,
                codec,
            },
            members,
        )
    }

    fn with_members(data: TarData, members: Vec<TarMember>) -> Result<Self> {
        if members.is_empty() {
            return Err(ArchiveError::UnsupportedFormat);
        }

        // Later occurrences of a name shadow earlier ones.
        let index = members
            .iter()
            .enumerate()
            .map(|(i, m)| (m.name.clone(), i))
            .collect();

        Ok(Self {
            data: Some(data),
            members,
            index,
        })
    }

    fn lookup(&self, name: &str) -> Option<&TarMember> {
        let name = name.trim_end_matches('/');
        self.index
            .get(name)
            .or_else(|| self.index.get(name.trim_start_matches("./")))
            .map(|&i| &self.members[i])
    }

    /// Follows links from `name` to the member holding the data.
    fn resolve(&self, name: &str) -> Result<&TarMember> {
        let mut current = self
            .lookup(name)
            .ok_or_else(|| ArchiveError::not_found(name))?;

        for _ in 0..MAX_LINK_HOPS {
            let target = match &current.kind {
                TarKind::File => return Ok(current),
                TarKind::Directory | TarKind::Other => return Err(ArchiveError::not_a_file(name)),
                TarKind::HardLink(target) => target.clone(),
                TarKind::Symlink(target) => resolve_relative(&current.name, target)
                    .ok_or_else(|| ArchiveError::not_found(name))?,
            };
            current = self
                .lookup(&target)
                .ok_or_else(|| ArchiveError::not_found(name))?;
        }

        Err(ArchiveError::InvalidArchive(format!(
            "too many levels of links while resolving {name}"
        )))
    }
}

impl ArchiveBackend for TarBackend {
    fn format_name(&self) -> &str {
        "tar"
    }

    fn members(&self) -> Result<Vec<MemberInfo>> {
        Ok(self
            .members
            .iter()
            .map(|m| MemberInfo::new(m.name.clone(), m.kind == TarKind::File))
            .collect())
    }

    fn read(&mut self, name: &str) -> Result<Box<dyn ReadSeek>> {
        let data = self.data.as_ref().ok_or_else(closed_error)?;
        let member = self.resolve(name)?;
        data.open_member(member)
    }

    fn close(&mut self) -> Result<()> {
        self.data = None;
        Ok(())
    }
}

/// Collects the members listed by `entries`; `base` is added to each data
/// offset.
fn scan_members<R: Read>(entries: tar::Entries<'_, R>, base: u64) -> Result<Vec<TarMember>> {
    let mut members = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if members.is_empty() => return Err(header_error(e)),
            Err(e) if is_format_error(&e) => {
                debug!("ignoring tar data after member {}: {e}", members.len());
                break;
            }
            Err(e) => return Err(e.into()),
        };

        let raw_name = String::from_utf8_lossy(&entry.path_bytes()).into_owned();
        let name = raw_name.trim_end_matches('/').to_string();
        let link = entry
            .link_name_bytes()
            .map(|target| String::from_utf8_lossy(&target).into_owned());

        let kind = match (entry.header().entry_type(), link) {
            (tar::EntryType::Regular | tar::EntryType::Continuous, _) => TarKind::File,
            (tar::EntryType::Directory, _) => TarKind::Directory,
            (tar::EntryType::Link, Some(target)) => TarKind::HardLink(target),
            (tar::EntryType::Symlink, Some(target)) => TarKind::Symlink(target),
            _ => TarKind::Other,
        };

        members.push(TarMember {
            name,
            kind,
            offset: base + entry.raw_file_position(),
            size: entry.size(),
        });
    }
    Ok(members)
}

fn header_error(err: io::Error) -> ArchiveError {
    if is_format_error(&err) {
        ArchiveError::UnsupportedFormat
    } else {
        ArchiveError::Io(err)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io::Seek;
    use std::rc::Rc;
    use crate::test_utils::TarTestBuilder;
    use crate::test_utils::bzip2_bytes;
    use crate::test_utils::create_test_tar;
    use crate::test_utils::gzip_bytes;
    use crate::test_utils::xz_bytes;

    fn backend(data: Vec<u8>) -> Result<TarBackend> {
        TarBackend::new(SharedReader::new(Cursor::new(data)))
    }

    fn read_member(backend: &mut TarBackend, name: &str) -> Vec<u8> {
        let mut out = Vec::new();
        backend
            .read(name)
            .unwrap()
            .read_to_end(&mut out)
            .unwrap();
        out
    }

    #[test]
    fn test_lists_members_with_type_flags() {
        let data = TarTestBuilder::new()
            .add_directory("logs/")
            .add_file("logs/app.log", b"line\n")
            .add_symlink("latest", "logs/app.log")
            .build();
        let backend = backend(data).unwrap();

        assert_eq!(
            backend.members().unwrap(),
            vec![
                MemberInfo::directory("logs"),
                MemberInfo::file("logs/app.log"),
                MemberInfo::new("latest", false),
            ]
        );
    }

    #[test]
    fn test_read_member_window() {
        let data = create_test_tar(vec![("a.txt", b"first"), ("b.txt", b"second")]);
        let mut backend = backend(data).unwrap();

        assert_eq!(read_member(&mut backend, "b.txt"), b"second");
        assert_eq!(read_member(&mut backend, "a.txt"), b"first");
    }

    #[test]
    fn test_read_follows_links() {
        let data = TarTestBuilder::new()
            .add_file("data/real.txt", b"payload")
            .add_hardlink("hard.txt", "data/real.txt")
            .add_symlink("data/soft.txt", "real.txt")
            .build();
        let mut backend = backend(data).unwrap();

        assert_eq!(read_member(&mut backend, "hard.txt"), b"payload");
        assert_eq!(read_member(&mut backend, "data/soft.txt"), b"payload");
    }

    #[test]
    fn test_symlink_loop_is_invalid() {
        let data = TarTestBuilder::new()
            .add_symlink("a", "b")
            .add_symlink("b", "a")
            .build();
        let mut backend = backend(data).unwrap();
        assert!(matches!(
            backend.read("a"),
            Err(ArchiveError::InvalidArchive(_))
        ));
    }

    #[test]
    fn test_dangling_link_is_not_found() {
        let data = TarTestBuilder::new().add_symlink("a", "missing").build();
        let mut backend = backend(data).unwrap();
        assert!(matches!(
            backend.read("a"),
            Err(ArchiveError::MemberNotFound { .. })
        ));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let data = TarTestBuilder::new().add_directory("d/").build();
        let mut backend = backend(data).unwrap();
        assert!(matches!(
            backend.read("d"),
            Err(ArchiveError::NotAFile { .. })
        ));
    }

    #[test]
    fn test_missing_member() {
        let mut backend = backend(create_test_tar(vec![("a", b"1")])).unwrap();
        assert!(matches!(
            backend.read("b"),
            Err(ArchiveError::MemberNotFound { .. })
        ));
    }

    #[test]
    fn test_last_duplicate_wins() {
        let data = create_test_tar(vec![("dup.txt", b"old"), ("dup.txt", b"new")]);
        let mut backend = backend(data).unwrap();
        assert_eq!(backend.members().unwrap().len(), 2);
        assert_eq!(read_member(&mut backend, "dup.txt"), b"new");
    }

    #[test]
    fn test_rejects_non_tar() {
        assert!(matches!(
            backend(b"short text".to_vec()),
            Err(ArchiveError::UnsupportedFormat)
        ));
        assert!(matches!(
            backend(b"x".repeat(2048)),
            Err(ArchiveError::UnsupportedFormat)
        ));
    }

    #[test]
    fn test_rejects_empty_tar() {
        assert!(matches!(
            backend(Vec::new()),
            Err(ArchiveError::UnsupportedFormat)
        ));
        assert!(matches!(
            backend(vec![0u8; 1024]),
            Err(ArchiveError::UnsupportedFormat)
        ));
    }

    #[test]
    fn test_trailing_garbage_ends_listing() {
        let mut data = create_test_tar(vec![("a.txt", b"kept")]);
        // Drop the end-of-archive blocks and append junk instead.
        data.truncate(1024);
        data.extend(b"y".repeat(512));

        let mut backend = backend(data).unwrap();
        assert_eq!(backend.members().unwrap(), vec![MemberInfo::file("a.txt")]);
        assert_eq!(read_member(&mut backend, "a.txt"), b"kept");
    }

    #[test]
    fn test_opener_accepts_compressed_tar() {
        let tar = create_test_tar(vec![("inner.txt", b"inside")]);

        for compressed in [gzip_bytes(&tar), xz_bytes(&tar)] {
            let source = ArchiveSource::from_reader(Cursor::new(compressed));
            let mut backend = TarOpener::default().open(&source).unwrap();
            let mut out = Vec::new();
            backend
                .read("inner.txt")
                .unwrap()
                .read_to_end(&mut out)
                .unwrap();
            assert_eq!(out, b"inside");
        }
    }

    #[test]
    fn test_plain_opener_rejects_compressed_tar() {
        let tar = create_test_tar(vec![("inner.txt", b"inside")]);
        let source = ArchiveSource::from_reader(Cursor::new(gzip_bytes(&tar)));
        assert!(matches!(
            TarOpener::plain().open(&source),
            Err(ArchiveError::UnsupportedFormat)
        ));
    }

    #[test]
    fn test_opener_rejects_compressed_non_tar() {
        let source = ArchiveSource::from_reader(Cursor::new(gzip_bytes(b"just text")));
        assert!(matches!(
            TarOpener::default().open(&source),
            Err(ArchiveError::UnsupportedFormat)
        ));
    }

    #[test]
    fn test_offsets_respect_stream_origin() {
        let mut data = b"PREFIX".to_vec();
        data.extend(create_test_tar(vec![("f.txt", b"content")]));
        let mut cursor = Cursor::new(data);
        cursor.set_position(6);

        let source = ArchiveSource::from_reader(cursor);
        let mut backend = TarOpener::plain().open(&source).unwrap();
        let mut out = Vec::new();
        backend.read("f.txt").unwrap().read_to_end(&mut out).unwrap();
        assert_eq!(out, b"content");
    }

    /// Counts the bytes pulled from the wrapped stream.
    struct CountingReader {
        inner: Cursor<Vec<u8>>,
        read: Rc<Cell<u64>>,
    }

    impl Read for CountingReader {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            let n = self.inner.read(buf)?;
            self.read.set(self.read.get() + n as u64);
            Ok(n)
        }
    }

    impl Seek for CountingReader {
        fn seek(&mut self, pos: std::io::SeekFrom) -> std::io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    /// Bytes that deflate cannot shrink.
    fn noise(len: usize) -> Vec<u8> {
        let mut state = 0x2545_f491_u32;
        (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 17;
                state ^= state << 5;
                state.to_le_bytes()[0]
            })
            .collect()
    }

    #[test]
    fn test_compressed_non_tar_rejected_after_first_block() {
        let compressed = gzip_bytes(&noise(4 * 1024 * 1024));
        let read = Rc::new(Cell::new(0));
        let source = ArchiveSource::from_reader(CountingReader {
            inner: Cursor::new(compressed.clone()),
            read: Rc::clone(&read),
        });

        assert!(matches!(
            TarOpener::default().open(&source),
            Err(ArchiveError::UnsupportedFormat)
        ));
        assert!(
            read.get() < 512 * 1024,
            "read {} of {} compressed bytes",
            read.get(),
            compressed.len()
        );
    }

    #[test]
    fn test_compressed_tar_members_read_in_any_order() {
        let tar = TarTestBuilder::new()
            .add_file("one.txt", b"first member")
            .add_directory("dir/")
            .add_file("dir/two.txt", b"second member")
            .add_hardlink("again.txt", "one.txt")
            .build();
        let source = ArchiveSource::from_reader(Cursor::new(bzip2_bytes(&tar)));
        let mut backend = TarOpener::default().open(&source).unwrap();

        assert_eq!(backend.members().unwrap().len(), 4);
        for (name, expected) in [
            ("dir/two.txt", &b"second member"[..]),
            ("one.txt", b"first member"),
            ("again.txt", b"first member"),
        ] {
            let mut out = Vec::new();
            backend.read(name).unwrap().read_to_end(&mut out).unwrap();
            assert_eq!(out, expected);
        }
        assert!(matches!(
            backend.read("dir"),
            Err(ArchiveError::NotAFile { .. })
        ));
    }

    #[test]
    fn test_truncated_compressed_tar_member_is_invalid() {
        let tar = create_test_tar(vec![("big.bin", &noise(64 * 1024)[..])]);
        let mut compressed = gzip_bytes(&tar);
        compressed.truncate(compressed.len() / 2);

        let source = ArchiveSource::from_reader(Cursor::new(compressed));
        let mut backend = TarOpener::default().open(&source).unwrap();
        assert!(backend.read("big.bin").is_err());
    }

    #[test]
    fn test_closed_backend_rejects_reads() {
        let tar = create_test_tar(vec![("a.txt", b"a")]);
        let source = ArchiveSource::from_reader(Cursor::new(gzip_bytes(&tar)));
        let mut backend = TarOpener::default().open(&source).unwrap();
        backend.close().unwrap();
        assert!(matches!(backend.read("a.txt"), Err(ArchiveError::Io(_))));
    }
}
