//! Plain data types shared across backends.

pub mod member;
pub mod source;

pub use member::MemberInfo;
pub use source::ArchiveSource;
