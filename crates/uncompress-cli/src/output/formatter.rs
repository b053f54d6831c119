//! Output formatter trait for CLI results.

use anyhow::Result;
use serde::Serialize;
use std::path::Path;
use uncompress_core::MemberInfo;

/// A listed archive, as handed to the formatters.
pub struct Listing<'a> {
    pub archive: &'a Path,
    pub format: &'a str,
    pub members: &'a [MemberInfo],
}

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format the members of an archive
    fn format_listing(&self, listing: &Listing<'_>, long: bool) -> Result<()>;

    /// Format the result of extracting one member
    fn format_extraction_result(&self, member: &str, destination: &Path, bytes: u64)
    -> Result<()>;

    /// Format error message
    fn format_error(&self, error: &anyhow::Error);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Success,
    Error,
}

impl<T: Serialize> JsonOutput<T> {
    pub fn success(operation: impl Into<String>, data: T) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Success,
            data: Some(data),
            error: None,
        }
    }
}

impl JsonOutput<()> {
    pub fn error(operation: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: Status::Error,
            data: None,
            error: Some(error.into()),
        }
    }
}
