use companion_core::ValidationError;
use serde::{Deserialize, Serialize};

/// Maximum note length, in characters.
pub const MAX_NOTE_LENGTH: usize = 1000;

/// Free-text content of a journal entry.
///
/// Stored trimmed; never empty, at most [`MAX_NOTE_LENGTH`] characters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Note(String);

impl Note {
    /// # Errors
    /// Returns [`ValidationError::EmptyNote`] for blank content and
    /// [`ValidationError::NoteTooLong`] past [`MAX_NOTE_LENGTH`] characters.
    pub fn new(content: impl AsRef<str>) -> Result<Self, ValidationError> {
        let trimmed = content.as_ref().trim();

        if trimmed.is_empty() {
            return Err(ValidationError::EmptyNote);
        }

        let length = trimmed.chars().count();
        if length > MAX_NOTE_LENGTH {
            return Err(ValidationError::NoteTooLong {
                max: MAX_NOTE_LENGTH,
                actual: length,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn content(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Note {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Note> for String {
    fn from(note: Note) -> Self {
        note.0
    }
}
