//! Journal and bookmark domain for Weather Companion.
//!
//! Value objects ([`AuthorId`], [`Note`], [`Bookmark`], [`JournalEntry`]),
//! entry filters and the per-author repositories.

pub mod author;
pub mod bookmark;
pub mod bookmark_repository;
pub mod entry;
pub mod error;
pub mod filter;
pub mod journal_repository;
pub mod note;

pub use author::AuthorId;
pub use bookmark::Bookmark;
pub use bookmark_repository::{InMemoryLocationBookmarkRepository, LocationBookmarkRepository};
pub use entry::{sort_by_date, JournalEntry};
pub use error::{RepositoryError, RepositoryResult};
pub use filter::{
    filter_entries, AndFilter, DateRangeFilter, JournalEntryFilter, JournalQuery,
    LocationProximityFilter, NearQuery, NoteContentFilter,
};
pub use journal_repository::{InMemoryJournalRepository, JournalRepository};
pub use note::{Note, MAX_NOTE_LENGTH};
