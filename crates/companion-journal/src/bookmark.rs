use companion_core::ValidationError;
use serde::{Deserialize, Serialize};

/// Name of a saved location.
///
/// A single alphanumeric word; lookups are exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Bookmark(String);

impl Bookmark {
    /// # Errors
    /// Returns a [`ValidationError`] if the trimmed name is blank, contains
    /// whitespace or any non-alphanumeric character.
    pub fn new(name: impl AsRef<str>) -> Result<Self, ValidationError> {
        let name = name.as_ref().trim();

        if name.is_empty() {
            return Err(ValidationError::EmptyBookmarkName);
        }
        if name.chars().any(char::is_whitespace) {
            return Err(ValidationError::BookmarkNameContainsWhitespace);
        }
        if !name.chars().all(char::is_alphanumeric) {
            return Err(ValidationError::BookmarkNameNotAlphanumeric);
        }

        Ok(Self(name.to_string()))
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Bookmark {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Bookmark> for String {
    fn from(bookmark: Bookmark) -> Self {
        bookmark.0
    }
}

impl std::fmt::Display for Bookmark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
