use regex::Regex;
use std::fmt;
use std::path::{Component, Path};
use thiserror::Error;

/// Errors that can occur when building an exclusion pattern
#[derive(Debug, Error)]
pub enum ExcludePatternError {
    #[error("Exclusion pattern is empty")]
    Empty,

    #[error("Invalid exclusion pattern '{pattern}': {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// What part of a path a pattern is compared against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternScope {
    /// No `/` in the pattern: compared with every path component
    Name,
    /// Pattern contains `/`: compared with the whole relative path
    Path,
}

/// Glob-style exclusion rule used by the directory dump
///
/// `*` matches any run of characters, `?` a single character and `[...]` a
/// character class (`[!...]` negates). Leading and trailing slashes are
/// ignored, so `/target/` and `target` are the same rule.
#[derive(Debug, Clone)]
pub struct ExcludePattern {
    raw: String,
    scope: PatternScope,
    regex: Regex,
}

impl ExcludePattern {
    pub fn new(pattern: &str) -> Result<Self, ExcludePatternError> {
        let trimmed = pattern.trim().trim_matches('/');
        if trimmed.is_empty() {
            return Err(ExcludePatternError::Empty);
        }

        let scope = if trimmed.contains('/') {
            PatternScope::Path
        } else {
            PatternScope::Name
        };

        let regex = Regex::new(&glob_to_regex(trimmed)).map_err(|source| {
            ExcludePatternError::InvalidGlob {
                pattern: pattern.to_string(),
                source,
            }
        })?;

        Ok(Self {
            raw: pattern.to_string(),
            scope,
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn scope(&self) -> PatternScope {
        self.scope
    }

    /// Check a path relative to the dump root
    pub fn matches(&self, relative_path: &Path) -> bool {
        match self.scope {
            PatternScope::Name => relative_path.components().any(|component| match component {
                Component::Normal(name) => self.regex.is_match(&name.to_string_lossy()),
                _ => false,
            }),
            PatternScope::Path => {
                let joined = relative_path
                    .components()
                    .filter_map(|c| match c {
                        Component::Normal(name) => Some(name.to_string_lossy().into_owned()),
                        _ => None,
                    })
                    .collect::<Vec<_>>()
                    .join("/");
                self.regex.is_match(&joined)
            }
        }
    }
}

impl fmt::Display for ExcludePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

fn glob_to_regex(glob: &str) -> String {
    let chars: Vec<char> = glob.chars().collect();
    let mut out = String::from("^");
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            '[' => {
                if let Some(offset) = chars[i + 1..].iter().position(|&c| c == ']') {
                    let class: String = chars[i + 1..i + 1 + offset].iter().collect();
                    out.push('[');
                    match class.strip_prefix('!') {
                        Some(rest) => {
                            out.push('^');
                            out.push_str(&rest.replace('\\', "\\\\"));
                        }
                        None => out.push_str(&class.replace('\\', "\\\\")),
                    }
                    out.push(']');
                    i += offset + 1;
                } else {
                    out.push_str("\\[");
                }
            }
            c => out.push_str(&regex::escape(&c.to_string())),
        }
        i += 1;
    }

    out.push('$');
    out
}
