//! Human-readable output formatter with colors and styling.

use super::formatter::Listing;
use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct HumanFormatter {
    quiet: bool,
    use_colors: bool,
    term: Term,
    err_term: Term,
}

impl HumanFormatter {
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
            err_term: Term::stderr(),
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    /// One listing line; `long` prefixes the member type.
    fn listing_line(name: &str, is_file: bool, long: bool) -> String {
        if !long {
            return name.to_string();
        }
        let marker = if is_file { '-' } else { 'd' };
        format!("{marker} {name}")
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_listing(&self, listing: &Listing<'_>, long: bool) -> Result<()> {
        // Plain lines so the output can be piped into other tools.
        let mut out = io::stdout().lock();
        for member in listing.members {
            writeln!(
                out,
                "{}",
                Self::listing_line(&member.name, member.is_file, long)
            )?;
        }
        out.flush()?;
        Ok(())
    }

    fn format_extraction_result(&self, member: &str, destination: &Path, bytes: u64) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let summary = format!(
            "Extracted {member} to {} ({})",
            destination.display(),
            Self::format_size(bytes)
        );
        if self.use_colors {
            self.term
                .write_line(&format!("{} {summary}", style("✓").green().bold()))?;
        } else {
            self.term.write_line(&summary)?;
        }
        Ok(())
    }

    fn format_error(&self, error: &anyhow::Error) {
        // Always show errors, even in quiet mode
        if self.use_colors {
            let _ = self
                .err_term
                .write_line(&format!("{} {error:?}", style("ERROR:").red().bold()));
        } else {
            let _ = self.err_term.write_line(&format!("ERROR: {error:?}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(HumanFormatter::format_size(0), "0 B");
        assert_eq!(HumanFormatter::format_size(1023), "1023 B");
        assert_eq!(HumanFormatter::format_size(1024), "1.0 KB");
        assert_eq!(HumanFormatter::format_size(1536), "1.5 KB");
        assert_eq!(HumanFormatter::format_size(5 * 1024 * 1024), "5.0 MB");
        assert_eq!(HumanFormatter::format_size(2 * 1024 * 1024 * 1024), "2.0 GB");
    }

    #[test]
    fn test_listing_line() {
        assert_eq!(HumanFormatter::listing_line("a.txt", true, false), "a.txt");
        assert_eq!(HumanFormatter::listing_line("dir", false, false), "dir");
        assert_eq!(HumanFormatter::listing_line("a.txt", true, true), "- a.txt");
        assert_eq!(HumanFormatter::listing_line("dir", false, true), "d dir");
    }
}
