//! Repository error types.
//!
//! Messages identify the missing or conflicting record but never the author
//! that asked for it.

use thiserror::Error;

/// Errors that can occur during journal and bookmark repository operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// No journal entry with this id is owned by the requesting author.
    #[error("Journal entry not found: {id}")]
    JournalEntryNotFound { id: u64 },

    /// The requesting author has no bookmark with this name.
    #[error("Bookmark not found: {name}")]
    BookmarkNotFound { name: String },

    /// The requesting author already has a bookmark with this name.
    #[error("Bookmark already exists: {name}")]
    BookmarkAlreadyExists { name: String },
}

impl RepositoryError {
    /// Create a journal entry not found error.
    pub fn entry_not_found(id: u64) -> Self {
        Self::JournalEntryNotFound { id }
    }

    /// Create a bookmark not found error.
    pub fn bookmark_not_found(name: impl Into<String>) -> Self {
        Self::BookmarkNotFound { name: name.into() }
    }

    /// Create a bookmark already exists error.
    pub fn bookmark_exists(name: impl Into<String>) -> Self {
        Self::BookmarkAlreadyExists { name: name.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::JournalEntryNotFound { .. } | Self::BookmarkNotFound { .. }
        )
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::BookmarkAlreadyExists { .. })
    }

    /// Returns a user-friendly message suitable for an API response.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::JournalEntryNotFound { .. } => "That journal entry does not exist.",
            Self::BookmarkNotFound { .. } => "That bookmark does not exist.",
            Self::BookmarkAlreadyExists { .. } => "A bookmark with that name already exists.",
        }
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_record() {
        assert_eq!(
            RepositoryError::entry_not_found(7).to_string(),
            "Journal entry not found: 7"
        );
        assert_eq!(
            RepositoryError::bookmark_exists("home").to_string(),
            "Bookmark already exists: home"
        );
    }

    #[test]
    fn test_classification() {
        assert!(RepositoryError::entry_not_found(1).is_not_found());
        assert!(RepositoryError::bookmark_not_found("x").is_not_found());
        assert!(!RepositoryError::bookmark_exists("x").is_not_found());
        assert!(RepositoryError::bookmark_exists("x").is_already_exists());
    }
}
