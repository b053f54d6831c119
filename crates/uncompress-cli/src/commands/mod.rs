//! Subcommand implementations.

pub mod cat;
pub mod completion;
pub mod extract;
pub mod list;

use crate::error::add_archive_context;
use anyhow::Context;
use anyhow::Result;
use log::info;
use std::io::Cursor;
use std::io::Read;
use std::io::{self};
use std::path::Path;
use uncompress_core::ArchiveBuilder;
use uncompress_core::ArchiveConfig;
use uncompress_core::ArchiveSource;
use uncompress_core::UniformArchive;

/// Opens `archive`, reading it from stdin when it is `-`.
///
/// Stdin cannot be repositioned between detection attempts, so it is read
/// into memory first.
pub fn open_archive(archive: &Path, config: ArchiveConfig) -> Result<UniformArchive> {
    let source = if archive == Path::new("-") {
        let mut data = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut data)
            .context("failed to read archive from stdin")?;
        ArchiveSource::from_reader(Cursor::new(data))
    } else {
        ArchiveSource::from_path(archive)
    };

    let opened = add_archive_context(ArchiveBuilder::new().config(config).open(source), archive)?;
    info!("opened {} as {}", archive.display(), opened.format_name());
    Ok(opened)
}
