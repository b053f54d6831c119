//! Extract command implementation.

use super::open_archive;
use crate::cli::ExtractArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use uncompress_core::ArchiveConfig;

pub fn execute(args: &ExtractArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let config = ArchiveConfig {
        strip_compression_suffix: !args.keep_suffix,
        ..Default::default()
    };
    let mut archive = open_archive(&args.archive, config)?;

    let destination = match &args.destination {
        Some(path) => path.clone(),
        None => add_archive_context(archive.default_destination(&args.member), &args.archive)?,
    };

    let written = add_archive_context(
        archive.extract(&args.member, Some(&destination)),
        &args.archive,
    )?;
    formatter.format_extraction_result(&args.member, &destination, written)?;

    add_archive_context(archive.close(), &args.archive)
}
