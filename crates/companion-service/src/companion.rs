//! The Weather Companion orchestrator.
//!
//! `WeatherCompanion` ties together a weather station and the two
//! per-author repositories. It adds no business rules of its own: it
//! delegates, and wraps any failure in a [`CompanionError`] naming the
//! operation.

use std::sync::Arc;

use chrono::NaiveDate;
use companion_journal::{
    filter_entries, AuthorId, Bookmark, InMemoryJournalRepository,
    InMemoryLocationBookmarkRepository, JournalEntry, JournalQuery, JournalRepository,
    LocationBookmarkRepository,
};
use companion_weather::{Forecast, Location, WeatherState, WeatherStation};

use crate::error::{Cause, CompanionError, Operation};

/// Result type for orchestrator operations.
pub type CompanionResult<T> = Result<T, CompanionError>;

/// Wrap a failure of `operation` and log it.
fn fail<E: Into<Cause>>(operation: Operation) -> impl FnOnce(E) -> CompanionError {
    move |cause| {
        let error = CompanionError::new(operation, cause);
        tracing::warn!("{}: {}", error, error.cause());
        error
    }
}

/// Entry point for every weather, journal and bookmark operation.
#[derive(Clone)]
pub struct WeatherCompanion {
    station: Arc<dyn WeatherStation>,
    journal: Arc<dyn JournalRepository>,
    bookmarks: Arc<dyn LocationBookmarkRepository>,
}

impl WeatherCompanion {
    pub fn new(
        station: Arc<dyn WeatherStation>,
        journal: Arc<dyn JournalRepository>,
        bookmarks: Arc<dyn LocationBookmarkRepository>,
    ) -> Self {
        Self {
            station,
            journal,
            bookmarks,
        }
    }

    /// Companion backed by empty in-memory repositories.
    pub fn in_memory(station: Arc<dyn WeatherStation>) -> Self {
        Self::new(
            station,
            Arc::new(InMemoryJournalRepository::new()),
            Arc::new(InMemoryLocationBookmarkRepository::new()),
        )
    }

    /// # Errors
    /// Fails with [`Operation::GetCurrentState`] if the station fails.
    pub async fn get_current_state(&self, location: &Location) -> CompanionResult<WeatherState> {
        self.station
            .get_current_state(location)
            .await
            .map_err(fail(Operation::GetCurrentState))
    }

    /// Forecast points whose local date lies in `[start, end]`.
    ///
    /// # Errors
    /// Fails with [`Operation::GetForecast`] if the station fails.
    pub async fn get_forecast(
        &self,
        location: &Location,
        start: NaiveDate,
        end: NaiveDate,
    ) -> CompanionResult<Forecast> {
        self.station
            .get_forecast(location, start, end)
            .await
            .map_err(fail(Operation::GetForecast))
    }

    /// Store a journal entry and return its id.
    ///
    /// # Errors
    /// Fails with [`Operation::AddJournalEntry`] if the repository fails.
    pub fn add_journal_entry(&self, entry: JournalEntry, author: &AuthorId) -> CompanionResult<u64> {
        self.journal
            .add(entry, author)
            .map_err(fail(Operation::AddJournalEntry))
    }

    /// # Errors
    /// Fails with [`Operation::GetJournalEntry`] if the author owns no such entry.
    pub fn get_journal_entry(&self, id: u64, author: &AuthorId) -> CompanionResult<JournalEntry> {
        self.journal
            .get(id, author)
            .map_err(fail(Operation::GetJournalEntry))
    }

    /// # Errors
    /// Fails with [`Operation::RemoveJournalEntry`] if the author owns no such entry.
    pub fn remove_journal_entry(&self, id: u64, author: &AuthorId) -> CompanionResult<()> {
        self.journal
            .remove(id, author)
            .map_err(fail(Operation::RemoveJournalEntry))
    }

    /// # Errors
    /// Fails with [`Operation::UpdateJournalEntry`] if the author owns no such entry.
    pub fn update_journal_entry(
        &self,
        id: u64,
        author: &AuthorId,
        entry: JournalEntry,
    ) -> CompanionResult<()> {
        self.journal
            .update(id, author, entry)
            .map_err(fail(Operation::UpdateJournalEntry))
    }

    /// Every entry of the author, in insertion order.
    ///
    /// # Errors
    /// Fails with [`Operation::GetJournal`] if the repository fails.
    pub fn get_all_journal_entries(
        &self,
        author: &AuthorId,
    ) -> CompanionResult<Vec<(u64, JournalEntry)>> {
        self.journal
            .get_all_entries(author)
            .map_err(fail(Operation::GetJournal))
    }

    /// The author's entries that match `query`, in insertion order.
    ///
    /// # Errors
    /// Fails with [`Operation::GetJournal`] if the query is invalid or the
    /// repository fails.
    pub fn get_journal(
        &self,
        author: &AuthorId,
        query: &JournalQuery,
    ) -> CompanionResult<Vec<(u64, JournalEntry)>> {
        let filter = query
            .clone()
            .into_filter()
            .map_err(fail(Operation::GetJournal))?;
        let entries = self.get_all_journal_entries(author)?;
        Ok(filter_entries(entries, &filter))
    }

    /// # Errors
    /// Fails with [`Operation::AddBookmark`] if the author already uses the name.
    pub fn add_bookmark(
        &self,
        bookmark: Bookmark,
        location: Location,
        author: &AuthorId,
    ) -> CompanionResult<()> {
        self.bookmarks
            .add(bookmark, location, author)
            .map_err(fail(Operation::AddBookmark))
    }

    /// # Errors
    /// Fails with [`Operation::RemoveBookmark`] if the author has no such bookmark.
    pub fn remove_bookmark(&self, bookmark: &Bookmark, author: &AuthorId) -> CompanionResult<()> {
        self.bookmarks
            .remove(bookmark, author)
            .map_err(fail(Operation::RemoveBookmark))
    }

    /// # Errors
    /// Fails with [`Operation::GetBookmarks`] if the repository fails.
    pub fn get_bookmarks(&self, author: &AuthorId) -> CompanionResult<Vec<(Bookmark, Location)>> {
        self.bookmarks
            .get_all_bookmarks(author)
            .map_err(fail(Operation::GetBookmarks))
    }

    /// Current weather at one of the author's bookmarks.
    ///
    /// # Errors
    /// Fails with [`Operation::GetCurrentWeatherStateForBookmark`] if the
    /// bookmark does not exist or the station fails.
    pub async fn get_current_weather_state_for_bookmark(
        &self,
        bookmark: &Bookmark,
        author: &AuthorId,
    ) -> CompanionResult<WeatherState> {
        let operation = Operation::GetCurrentWeatherStateForBookmark;
        let location = self
            .bookmarks
            .get(bookmark, author)
            .map_err(fail(operation))?;
        self.station
            .get_current_state(&location)
            .await
            .map_err(fail(operation))
    }
}

impl std::fmt::Debug for WeatherCompanion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherCompanion").finish_non_exhaustive()
    }
}
