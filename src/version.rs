use std::fmt;

/// Strips one optional leading 'v' from a release tag.
///
/// The normalization is idempotent: a tag without the prefix is returned
/// unchanged, and only a single leading character is removed.
///
/// # Example
/// ```ignore
/// assert_eq!(normalize_tag("v1.4.0"), "1.4.0");
/// assert_eq!(normalize_tag("1.4.0"), "1.4.0");
/// ```
pub fn normalize_tag(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}

/// The latest upstream release version, normalized from its tag.
///
/// Derived fresh each run from the hosting API and never stored. This is an
/// opaque comparable string: equality against the spec file version is the
/// only predicate applied, no ordering is computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion(String);

impl ReleaseVersion {
    /// Build a release version from a raw tag, stripping one leading 'v'.
    pub fn from_tag(tag: &str) -> Self {
        ReleaseVersion(normalize_tag(tag).to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The version string currently recorded in the spec file on disk.
///
/// Read fresh each run; compared once against the upstream release and
/// discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecVersion(String);

impl SpecVersion {
    pub fn new(version: impl Into<String>) -> Self {
        SpecVersion(version.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpecVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
