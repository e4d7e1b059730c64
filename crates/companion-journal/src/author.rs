use companion_core::ValidationError;
use serde::{Deserialize, Serialize};

/// Opaque identity of the owner of journal entries and bookmarks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AuthorId(String);

impl AuthorId {
    /// # Errors
    /// Returns a [`ValidationError`] if `id` is empty or contains whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::EmptyAuthorId);
        }
        if id.chars().any(char::is_whitespace) {
            return Err(ValidationError::AuthorIdContainsWhitespace);
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AuthorId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<AuthorId> for String {
    fn from(author: AuthorId) -> Self {
        author.0
    }
}

impl std::fmt::Display for AuthorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
