//! Shared error types for the Weather Companion workspace.
//!
//! Value objects across every crate (locations, notes, author ids, bookmark
//! names, weather states) reject bad input with a [`ValidationError`], so that
//! callers can tell caller-input defects apart from state-dependent failures
//! such as a missing journal entry.

use thiserror::Error;

/// A structural invariant of a value object was violated.
///
/// Raised by constructors before any state is touched; never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Latitude must be between -90 and 90, got {0}")]
    LatitudeOutOfRange(f64),

    #[error("Longitude must be between -90 and 90, got {0}")]
    LongitudeOutOfRange(f64),

    #[error("Author id cannot be empty")]
    EmptyAuthorId,

    #[error("Author id cannot contain whitespace")]
    AuthorIdContainsWhitespace,

    #[error("Note content cannot be empty")]
    EmptyNote,

    #[error("Note content cannot be longer than {max} characters (got {actual})")]
    NoteTooLong { max: usize, actual: usize },

    #[error("Bookmark name cannot be blank")]
    EmptyBookmarkName,

    #[error("Bookmark name cannot contain whitespace")]
    BookmarkNameContainsWhitespace,

    #[error("Bookmark name can only contain alphanumeric characters")]
    BookmarkNameNotAlphanumeric,

    #[error("{0} is mandatory")]
    MissingField(&'static str),

    #[error("{field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("Forecast already has a weather state for {0}")]
    DuplicateForecastTime(String),

    #[error("Start date {start} is after end date {end}")]
    InvalidDateRange { start: String, end: String },

    #[error("Distance must be a finite, non-negative number of kilometers, got {0}")]
    InvalidDistance(f64),
}

impl ValidationError {
    /// Returns a user-friendly message suitable for an API response.
    pub fn user_message(&self) -> &'static str {
        match self {
            ValidationError::LatitudeOutOfRange(_) | ValidationError::LongitudeOutOfRange(_) => {
                "Coordinates are out of range."
            }
            ValidationError::EmptyAuthorId | ValidationError::AuthorIdContainsWhitespace => {
                "Invalid user identifier."
            }
            ValidationError::EmptyNote => "The note cannot be empty.",
            ValidationError::NoteTooLong { .. } => "The note is too long.",
            ValidationError::EmptyBookmarkName
            | ValidationError::BookmarkNameContainsWhitespace
            | ValidationError::BookmarkNameNotAlphanumeric => {
                "Bookmark names must be a single alphanumeric word."
            }
            ValidationError::MissingField(_)
            | ValidationError::OutOfRange { .. }
            | ValidationError::Negative { .. }
            | ValidationError::DuplicateForecastTime(_) => {
                "The weather provider returned inconsistent data."
            }
            ValidationError::InvalidDateRange { .. } => "The start date must not be after the end date.",
            ValidationError::InvalidDistance(_) => "The search radius must be a non-negative distance.",
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory could not be determined")]
    NoConfigDir,

    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write configuration file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Configuration serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NoConfigDir => "No configuration directory available. Use an explicit path.",
            ConfigError::Read { .. } => "Configuration could not be read. Check file permissions.",
            ConfigError::Write { .. } => "Configuration could not be saved. Check file permissions.",
            ConfigError::Parse(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::Serialize(_) => "Configuration could not be saved.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
        }
    }
}
