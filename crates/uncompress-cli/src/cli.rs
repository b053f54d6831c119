//! CLI argument parsing using clap.

use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "uncompress")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the members of an archive
    List(ListArgs),
    /// Print a decompressed member to stdout
    Cat(CatArgs),
    /// Write a decompressed member to a file
    Extract(ExtractArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Archive file, directory, or `-` for stdin
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Include directories and other non-file members
    #[arg(short, long)]
    pub all: bool,

    /// Show the member type next to each name
    #[arg(short, long)]
    pub long: bool,
}

#[derive(clap::Args)]
pub struct CatArgs {
    /// Archive file, directory, or `-` for stdin
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Member to print
    #[arg(value_name = "MEMBER")]
    pub member: String,
}

#[derive(clap::Args)]
pub struct ExtractArgs {
    /// Archive file, directory, or `-` for stdin
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Member to extract
    #[arg(value_name = "MEMBER")]
    pub member: String,

    /// Destination file (default: member name without compression suffix)
    #[arg(value_name = "DEST")]
    pub destination: Option<PathBuf>,

    /// Keep the compression suffix in the default destination
    #[arg(long)]
    pub keep_suffix: bool,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
