//! uncompress - read members of zip, tar and directory archives whose
//! files may be gzip, bzip2 or xz compressed.

mod cli;
mod commands;
mod error;
mod output;

use anyhow::Result;
use clap::Parser;
use std::process::ExitCode;

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else if verbose {
        "info"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &cli::Cli, formatter: &dyn output::OutputFormatter) -> Result<()> {
    match &cli.command {
        cli::Commands::List(args) => commands::list::execute(args, formatter),
        cli::Commands::Cat(args) => commands::cat::execute(args),
        cli::Commands::Extract(args) => commands::extract::execute(args, formatter),
        cli::Commands::Completion(args) => {
            commands::completion::execute(args.shell);
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    let formatter = output::create_formatter(cli.json, cli.quiet);

    match run(&cli, &*formatter) {
        Ok(()) => ExitCode::SUCCESS,
        // The reader went away; nothing left to report to.
        Err(err) if error::is_broken_pipe(&err) => ExitCode::FAILURE,
        Err(err) => {
            formatter.format_error(&err);
            ExitCode::FAILURE
        }
    }
}
