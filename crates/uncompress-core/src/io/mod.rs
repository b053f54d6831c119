//! I/O utilities shared by the archive backends.
//!
//! This module provides the stream handles used across backends: a shared
//! seekable reader for detection and a bounded window for member data.

pub mod shared;
pub mod window;

// Re-export main types for convenience
pub use shared::ReadSeek;
pub use shared::SharedReader;
pub use window::WindowReader;
