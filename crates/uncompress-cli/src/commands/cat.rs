//! Cat command implementation

use super::open_archive;
use crate::cli::CatArgs;
use crate::error::add_archive_context;
use anyhow::Result;
use std::io::{self};
use uncompress_core::ArchiveConfig;

pub fn execute(args: &CatArgs) -> Result<()> {
    let mut archive = open_archive(&args.archive, ArchiveConfig::default())?;

    let mut out = io::stdout().lock();
    add_archive_context(
        archive.extract_to_writer(&args.member, &mut out),
        &args.archive,
    )?;

    add_archive_context(archive.close(), &args.archive)
}
