use semver::Version;
use std::fmt;

/// A release tag such as `v1.4.0` or `1.4.0`
///
/// The original spelling is kept for display; comparisons use the semantic
/// version with any leading `v` removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseVersion {
    raw: String,
}

impl ReleaseVersion {
    pub fn new(raw: impl Into<String>) -> Self {
        Self {
            raw: raw.into().trim().to_string(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Version without the `v` prefix
    pub fn normalized(&self) -> &str {
        self.raw.trim_start_matches(['v', 'V'])
    }

    pub fn semver(&self) -> Option<Version> {
        Version::parse(self.normalized()).ok()
    }

    /// Whether `self` is strictly newer than `other`
    ///
    /// Returns false when either side is not a valid semantic version.
    pub fn is_newer_than(&self, other: &ReleaseVersion) -> bool {
        match (self.semver(), other.semver()) {
            (Some(mine), Some(theirs)) => mine > theirs,
            _ => false,
        }
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl From<&str> for ReleaseVersion {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
