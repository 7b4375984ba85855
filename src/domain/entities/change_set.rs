use serde::Serialize;
use std::fmt;

/// How a file changed in a diff
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChangeKind {
    Added,
    Modified,
    Deleted,
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Added => f.write_str("Added"),
            ChangeKind::Modified => f.write_str("Modified"),
            ChangeKind::Deleted => f.write_str("Deleted"),
        }
    }
}

/// One file named by a diff
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileChange {
    pub kind: ChangeKind,
    pub path: String,
}

/// Files touched by a unified diff
///
/// Entries keep the order in which files first appear in the diff and hold
/// no duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChangeSet {
    entries: Vec<FileChange>,
}

impl ChangeSet {
    /// Classify the files in a `git diff` output
    pub fn from_diff(diff: &str) -> Self {
        let mut set = ChangeSet::default();
        let mut current: Option<usize> = None;

        for line in diff.lines() {
            if let Some(header) = line.strip_prefix("diff --git ") {
                current = target_path(header).map(|file| set.push(ChangeKind::Modified, file));
            } else if line.starts_with("new file mode") {
                set.mark(current, ChangeKind::Added);
            } else if line.starts_with("deleted file mode") {
                set.mark(current, ChangeKind::Deleted);
            }
        }
        set
    }

    /// Record a file; a path already present keeps its entry. Returns the entry index.
    pub fn push(&mut self, kind: ChangeKind, path: impl Into<String>) -> usize {
        let path = path.into();
        if let Some(index) = self.entries.iter().position(|entry| entry.path == path) {
            return index;
        }
        self.entries.push(FileChange { kind, path });
        self.entries.len() - 1
    }

    fn mark(&mut self, index: Option<usize>, kind: ChangeKind) {
        if let Some(entry) = index.and_then(|i| self.entries.get_mut(i)) {
            entry.kind = kind;
        }
    }

    pub fn entries(&self) -> &[FileChange] {
        &self.entries
    }

    /// Paths with the given kind of change, in diff order
    pub fn files(&self, kind: ChangeKind) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| entry.path.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn file_count(&self) -> usize {
        self.entries.len()
    }

    /// One line per file, e.g. `Added src/lib.rs`
    ///
    /// Added and deleted files come first in diff order, modified files after them.
    pub fn change_lines(&self) -> Vec<String> {
        let structural = self
            .entries
            .iter()
            .filter(|entry| entry.kind != ChangeKind::Modified);
        let modified = self
            .entries
            .iter()
            .filter(|entry| entry.kind == ChangeKind::Modified);

        structural
            .chain(modified)
            .map(|entry| format!("{} {}", entry.kind, entry.path))
            .collect()
    }
}

/// Extract `Y` from a `a/X b/Y` diff header
fn target_path(header: &str) -> Option<String> {
    let index = header.rfind(" b/")?;
    let path = &header[index + 3..];
    if path.is_empty() {
        None
    } else {
        Some(path.to_string())
    }
}
