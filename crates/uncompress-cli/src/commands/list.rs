//! List command implementation

use super::open_archive;
use crate::cli::ListArgs;
use crate::error::add_archive_context;
use crate::output::Listing;
use crate::output::OutputFormatter;
use anyhow::Result;
use uncompress_core::ArchiveConfig;

pub fn execute(args: &ListArgs, formatter: &dyn OutputFormatter) -> Result<()> {
    let archive = open_archive(&args.archive, ArchiveConfig::default())?;

    let mut members = add_archive_context(archive.members(), &args.archive)?;
    if !args.all {
        members.retain(|m| m.is_file);
    }

    let listing = Listing {
        archive: &args.archive,
        format: archive.format_name(),
        members: &members,
    };
    formatter.format_listing(&listing, args.long)?;

    add_archive_context(archive.close(), &args.archive)
}
