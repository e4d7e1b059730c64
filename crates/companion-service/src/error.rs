//! Orchestrator error types.
//!
//! Every failure leaving [`WeatherCompanion`](crate::WeatherCompanion) is a
//! [`CompanionError`]: its `Display` is the fixed message of the operation
//! that failed, its `source()` is the repository, station or validation
//! error underneath.

use companion_core::ValidationError;
use companion_journal::RepositoryError;
use companion_weather::StationError;
use thiserror::Error;

/// The orchestrator operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    GetCurrentState,
    GetForecast,
    AddJournalEntry,
    GetJournalEntry,
    RemoveJournalEntry,
    UpdateJournalEntry,
    GetJournal,
    AddBookmark,
    RemoveBookmark,
    GetBookmarks,
    GetCurrentWeatherStateForBookmark,
}

impl Operation {
    pub fn message(self) -> &'static str {
        match self {
            Operation::GetCurrentState => "unable to get current weather state",
            Operation::GetForecast => "unable to get weather forecast",
            Operation::AddJournalEntry => "unable to add journal entry",
            Operation::GetJournalEntry => "unable to get journal entry",
            Operation::RemoveJournalEntry => "unable to remove journal entry",
            Operation::UpdateJournalEntry => "unable to update journal entry",
            Operation::GetJournal => "unable to get journal",
            Operation::AddBookmark => "unable to add bookmark",
            Operation::RemoveBookmark => "unable to remove bookmark",
            Operation::GetBookmarks => "unable to get bookmarks",
            Operation::GetCurrentWeatherStateForBookmark => {
                "unable to get current weather state for bookmark"
            }
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Underlying reason for a [`CompanionError`].
#[derive(Debug, Error)]
pub enum Cause {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Station(#[from] StationError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// A failed orchestrator operation.
#[derive(Debug, Error)]
#[error("{operation}")]
pub struct CompanionError {
    operation: Operation,
    #[source]
    cause: Cause,
}

impl CompanionError {
    pub fn new(operation: Operation, cause: impl Into<Cause>) -> Self {
        Self {
            operation,
            cause: cause.into(),
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    /// The requested journal entry or bookmark does not exist for the author.
    pub fn is_not_found(&self) -> bool {
        matches!(&self.cause, Cause::Repository(err) if err.is_not_found())
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(&self.cause, Cause::Repository(err) if err.is_already_exists())
    }

    /// The upstream weather provider failed.
    pub fn is_provider_failure(&self) -> bool {
        matches!(self.cause, Cause::Station(_))
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self.cause, Cause::Validation(_))
    }

    /// Returns a user-friendly message suitable for an API response.
    pub fn user_message(&self) -> &'static str {
        match &self.cause {
            Cause::Repository(err) => err.user_message(),
            Cause::Station(err) => err.user_message(),
            Cause::Validation(err) => err.user_message(),
        }
    }
}
