use super::change_set::ChangeSet;
use std::fmt;

/// A commit message split into subject line and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    pub subject: String,
    pub body: String,
}

impl CommitMessage {
    /// Split free-form text (e.g. an LLM answer) at the first line break
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        match text.split_once('\n') {
            Some((subject, body)) => Self {
                subject: subject.trim_end().to_string(),
                body: body.trim_matches('\n').to_string(),
            },
            None => Self {
                subject: text.to_string(),
                body: String::new(),
            },
        }
    }

    /// Build a message locally from the files in a change set
    pub fn summarize(changes: &ChangeSet) -> Self {
        let lines = changes.change_lines();
        let subject = match lines.len() {
            0 => "Update working tree".to_string(),
            1 => lines[0].clone(),
            _ => "Multiple changes".to_string(),
        };

        Self {
            subject,
            body: format!("Details:\n{}", lines.join("\n")),
        }
    }
}

impl fmt::Display for CommitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.body.is_empty() {
            write!(f, "{}", self.subject)
        } else {
            write!(f, "{}\n\n{}", self.subject, self.body)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::change_set::ChangeKind;

    #[test]
    fn test_single_change_becomes_subject() {
        let mut changes = ChangeSet::default();
        changes.push(ChangeKind::Added, "README.md");
        let message = CommitMessage::summarize(&changes);
        assert_eq!(message.subject, "Added README.md");
        assert_eq!(message.to_string(), "Added README.md\n\nDetails:\nAdded README.md");
    }

    #[test]
    fn test_multiple_changes() {
        let mut changes = ChangeSet::default();
        changes.push(ChangeKind::Modified, "b.rs");
        changes.push(ChangeKind::Added, "a.rs");
        changes.push(ChangeKind::Deleted, "c.rs");
        let message = CommitMessage::summarize(&changes);
        assert_eq!(message.subject, "Multiple changes");
        assert_eq!(message.body, "Details:\nAdded a.rs\nDeleted c.rs\nModified b.rs");
    }

    #[test]
    fn test_no_files() {
        let message = CommitMessage::summarize(&ChangeSet::default());
        assert_eq!(message.subject, "Update working tree");
    }

    #[test]
    fn test_parse_splits_subject() {
        let message = CommitMessage::parse("Fix parser\n\nHandle empty input.\n");
        assert_eq!(message.subject, "Fix parser");
        assert_eq!(message.body, "Handle empty input.");
        assert_eq!(message.to_string(), "Fix parser\n\nHandle empty input.");

        let single = CommitMessage::parse("  Bump version  ");
        assert_eq!(single.subject, "Bump version");
        assert!(single.body.is_empty());
        assert_eq!(single.to_string(), "Bump version");
    }
}
