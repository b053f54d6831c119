//! ZIP archive backend.
//!
//! Entries are decompressed fully into memory on `read`, since a zip entry
//! stream cannot be repositioned once the codec has started.

use std::io::Cursor;
use std::io::Read;

use zip::ZipArchive;
use zip::result::ZipError;

use super::common::closed_error;
use super::common::is_format_error;
use super::traits::ArchiveBackend;
use super::traits::BackendOpener;
use crate::ArchiveError;
use crate::ArchiveSource;
use crate::MemberInfo;
use crate::Result;
use crate::io::ReadSeek;
use crate::io::SharedReader;

/// Opens sources that are ZIP containers.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZipOpener;

impl BackendOpener for ZipOpener {
    fn name(&self) -> &str {
        "zip"
    }

    fn open(&self, source: &ArchiveSource) -> Result<Box<dyn ArchiveBackend>> {
        let Some(stream) = source.stream()? else {
            return Err(ArchiveError::UnsupportedFormat);
        };
        Ok(Box::new(ZipBackend::new(stream)?))
    }
}

/// ZIP archive handler.
pub struct ZipBackend {
    archive: Option<ZipArchive<SharedReader>>,
    members: Vec<MemberInfo>,
}

impl ZipBackend {
    /// Parses the central directory of `reader`.
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` if `reader` is not a ZIP container.
    pub fn new(reader: SharedReader) -> Result<Self> {
        let mut archive = ZipArchive::new(reader).map_err(open_error)?;

        let mut members = Vec::with_capacity(archive.len());
        for index in 0..archive.len() {
            let entry = archive.by_index_raw(index).map_err(open_error)?;
            members.push(MemberInfo::new(entry.name(), !entry.is_dir()));
        }

        Ok(Self {
            archive: Some(archive),
            members,
        })
    }
}

impl ArchiveBackend for ZipBackend {
    fn format_name(&self) -> &str {
        "zip"
    }

    fn members(&self) -> Result<Vec<MemberInfo>> {
        Ok(self.members.clone())
    }

    fn read(&mut self, name: &str) -> Result<Box<dyn ReadSeek>> {
        let archive = self.archive.as_mut().ok_or_else(closed_error)?;

        match self.members.iter().find(|m| m.name == name) {
            None => return Err(ArchiveError::not_found(name)),
            Some(member) if !member.is_file => return Err(ArchiveError::not_a_file(name)),
            Some(_) => {}
        }

        let mut entry = archive.by_name(name).map_err(|e| entry_error(name, e))?;
        let mut data = Vec::with_capacity(usize::try_from(entry.size()).unwrap_or(0));
        entry.read_to_end(&mut data).map_err(|e| {
            if is_format_error(&e) {
                ArchiveError::InvalidArchive(format!("failed to read ZIP entry {name}: {e}"))
            } else {
                ArchiveError::Io(e)
            }
        })?;

        Ok(Box::new(Cursor::new(data)))
    }

    fn close(&mut self) -> Result<()> {
        self.archive = None;
        Ok(())
    }
}

/// Maps a failure while parsing the container.
fn open_error(err: ZipError) -> ArchiveError {
    match err {
        ZipError::Io(e) if !is_format_error(&e) => ArchiveError::Io(e),
        _ => ArchiveError::UnsupportedFormat,
    }
}

/// Maps a failure while opening one entry of an accepted container.
fn entry_error(name: &str, err: ZipError) -> ArchiveError {
    match err {
        ZipError::FileNotFound => ArchiveError::not_found(name),
        ZipError::Io(e) if !is_format_error(&e) => ArchiveError::Io(e),
        other => ArchiveError::InvalidArchive(format!("failed to open ZIP entry {name}: {other}")),
    }
}
