//! Archive format backends, detection and member decompression.

pub(crate) mod common;
pub mod compression;
pub mod decompress;
pub mod detect;
pub mod directory;
pub mod tar;
pub mod traits;
pub mod zip;

pub use compression::CompressionCodec;
pub use decompress::Decompressor;
pub use detect::Detector;
pub use directory::DirectoryBackend;
pub use directory::DirectoryOpener;
pub use tar::TarBackend;
pub use tar::TarOpener;
pub use traits::ArchiveBackend;
pub use traits::BackendOpener;
pub use zip::ZipBackend;
pub use zip::ZipOpener;
