//! Directory backend.
//!
//! Treats a directory tree on disk as an archive whose members are the
//! files and directories below the root.

use std::fs::File;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use walkdir::WalkDir;

use super::common::closed_error;
use super::common::is_contained;
use super::traits::ArchiveBackend;
use super::traits::BackendOpener;
use crate::ArchiveError;
use crate::ArchiveSource;
use crate::MemberInfo;
use crate::Result;
use crate::io::ReadSeek;

/// Opens path sources that name an existing directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectoryOpener;

impl BackendOpener for DirectoryOpener {
    fn name(&self) -> &str {
        "directory"
    }

    fn open(&self, source: &ArchiveSource) -> Result<Box<dyn ArchiveBackend>> {
        match source.as_path() {
            Some(path) if path.is_dir() => Ok(Box::new(DirectoryBackend::new(path))),
            _ => Err(ArchiveError::UnsupportedFormat),
        }
    }
}

/// Directory tree handler.
///
/// Every `read` opens a fresh file handle owned by the caller; nothing is
/// held open by the backend itself.
#[derive(Debug)]
pub struct DirectoryBackend {
    root: Option<PathBuf>,
}

impl DirectoryBackend {
    /// Creates a backend rooted at `root`.
    #[must_use]
    pub fn new(root: &Path) -> Self {
        Self {
            root: Some(root.to_path_buf()),
        }
    }

    fn root(&self) -> Result<&Path> {
        self.root.as_deref().ok_or_else(closed_error)
    }
}

impl ArchiveBackend for DirectoryBackend {
    fn format_name(&self) -> &str {
        "directory"
    }

    fn members(&self) -> Result<Vec<MemberInfo>> {
        let root = self.root()?;
        let mut members = Vec::new();

        for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(io::Error::from)?;
            let name = member_name(root, entry.path());
            members.push(MemberInfo::new(name, entry.path().is_file()));
        }

        Ok(members)
    }

    fn read(&mut self, name: &str) -> Result<Box<dyn ReadSeek>> {
        let root = self.root()?;
        if !is_contained(name) {
            return Err(ArchiveError::not_found(name));
        }

        let path = root.join(name);
        if path.is_dir() {
            return Err(ArchiveError::not_a_file(name));
        }

        match File::open(&path) {
            Ok(file) => Ok(Box::new(file)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Err(ArchiveError::not_found(name)),
            Err(e) => Err(e.into()),
        }
    }

    fn close(&mut self) -> Result<()> {
        self.root = None;
        Ok(())
    }
}

/// Relative name of `path` below `root`, with `/` separators.
fn member_name(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
