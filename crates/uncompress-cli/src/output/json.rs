//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::Listing;
use super::formatter::OutputFormatter;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

#[derive(Serialize)]
struct MemberOutput<'a> {
    name: &'a str,
    is_file: bool,
}

#[derive(Serialize)]
struct ListingOutput<'a> {
    archive: String,
    format: &'a str,
    members: Vec<MemberOutput<'a>>,
}

#[derive(Serialize)]
struct ExtractionOutput<'a> {
    member: &'a str,
    destination: String,
    bytes_written: u64,
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }

    fn listing_data<'a>(listing: &Listing<'a>) -> ListingOutput<'a> {
        ListingOutput {
            archive: listing.archive.display().to_string(),
            format: listing.format,
            members: listing
                .members
                .iter()
                .map(|m| MemberOutput {
                    name: &m.name,
                    is_file: m.is_file,
                })
                .collect(),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_listing(&self, listing: &Listing<'_>, _long: bool) -> Result<()> {
        Self::output(&JsonOutput::success("list", Self::listing_data(listing)))
    }

    fn format_extraction_result(&self, member: &str, destination: &Path, bytes: u64) -> Result<()> {
        let data = ExtractionOutput {
            member,
            destination: destination.display().to_string(),
            bytes_written: bytes,
        };
        Self::output(&JsonOutput::success("extract", data))
    }

    fn format_error(&self, error: &anyhow::Error) {
        let output = JsonOutput::<()>::error("error", format!("{error:#}"));
        let _ = Self::output(&output);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use uncompress_core::MemberInfo;

    #[test]
    fn test_listing_serialization() {
        let members = vec![MemberInfo::directory("logs"), MemberInfo::file("logs/a.gz")];
        let listing = Listing {
            archive: Path::new("bundle.tar"),
            format: "tar",
            members: &members,
        };

        let value = serde_json::to_value(JsonOutput::success(
            "list",
            JsonFormatter::listing_data(&listing),
        ))
        .unwrap();

        assert_eq!(value["operation"], "list");
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"]["format"], "tar");
        assert_eq!(value["data"]["members"][1]["name"], "logs/a.gz");
        assert_eq!(value["data"]["members"][0]["is_file"], false);
        assert!(value.get("error").is_none());
    }

    #[test]
    fn test_error_serialization() {
        let value = serde_json::to_value(JsonOutput::<()>::error("error", "boom")).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["error"], "boom");
        assert!(value.get("data").is_none());
    }
}
