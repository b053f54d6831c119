//! Format-agnostic read access to archives of compressed files.
//!
//! `uncompress-core` opens zip archives, tar archives and plain directories
//! through one interface, and transparently decodes members compressed with
//! gzip, bzip2 or xz. The container format is detected by trying each
//! backend in turn; member compression is detected by probing the stream.
//!
//! # Examples
//!
//! ```no_run
//! use uncompress_core::UniformArchive;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut archive = UniformArchive::open("logs.tar")?;
//! for name in archive.list_files()? {
//!     let text = archive.read_to_vec(&name)?;
//!     println!("{name}: {} bytes", text.len());
//! }
//! archive.extract("app.log.gz", None)?; // writes ./app.log
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod archive;
pub mod config;
pub mod copy;
pub mod error;
pub mod formats;
pub mod io;
#[doc(hidden)]
pub mod test_utils;
pub mod types;

pub use archive::ArchiveBuilder;
pub use archive::UniformArchive;
pub use config::ArchiveConfig;
pub use error::ArchiveError;
pub use error::Result;
pub use formats::ArchiveBackend;
pub use formats::BackendOpener;
pub use formats::CompressionCodec;
pub use formats::Decompressor;
pub use formats::Detector;
pub use formats::DirectoryOpener;
pub use formats::TarOpener;
pub use formats::ZipOpener;
pub use types::ArchiveSource;
pub use types::MemberInfo;
