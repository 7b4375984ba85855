use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static OCTAL_MODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-7]{3,4}$").expect("octal mode pattern is valid"));

/// Unix permission bits for a manifest entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileMode(u32);

impl FileMode {
    /// Mode used for files created without explicit permissions
    pub const DEFAULT_FILE: FileMode = FileMode(0o644);

    /// Mode used for directories created without explicit permissions
    pub const DEFAULT_DIRECTORY: FileMode = FileMode(0o755);

    pub fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub fn bits(&self) -> u32 {
        self.0
    }

    /// Whether `value` is a three or four digit octal string
    pub fn is_valid_octal(value: &str) -> bool {
        OCTAL_MODE.is_match(value)
    }
}

impl FromStr for FileMode {
    type Err = FileModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !Self::is_valid_octal(s) {
            return Err(FileModeError::InvalidFormat(s.to_string()));
        }
        u32::from_str_radix(s, 8)
            .map(FileMode)
            .map_err(|_| FileModeError::InvalidFormat(s.to_string()))
    }
}

impl fmt::Display for FileMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:o}", self.0)
    }
}

/// Errors raised while parsing a permission string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileModeError {
    #[error("Invalid permissions '{0}': expected a three or four digit octal number")]
    InvalidFormat(String),
}
