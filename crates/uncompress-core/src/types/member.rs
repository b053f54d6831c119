//! Archive member metadata.

/// A single entry listed by an archive backend.
///
/// Produced fresh on every listing call; carries no identity beyond its
/// fields.
///
/// # Examples
///
/// ```
/// use uncompress_core::MemberInfo;
///
/// let file = MemberInfo::file("logs/app.log.gz");
/// let dir = MemberInfo::directory("logs");
///
/// assert!(file.is_file);
/// assert!(!dir.is_file);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberInfo {
    /// Member name as stored by the backend.
    pub name: String,
    /// `true` for regular files, `false` for directories and other entries.
    pub is_file: bool,
}

impl MemberInfo {
    /// Creates a new member record.
    #[must_use]
    pub fn new(name: impl Into<String>, is_file: bool) -> Self {
        Self {
            name: name.into(),
            is_file,
        }
    }

    /// Creates a regular file record.
    #[must_use]
    pub fn file(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    /// Creates a non-file record (directory or other entry).
    #[must_use]
    pub fn directory(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }
}
