//! Named location storage.

use companion_weather::Location;
use parking_lot::Mutex;

use crate::author::AuthorId;
use crate::bookmark::Bookmark;
use crate::error::{RepositoryError, RepositoryResult};

/// Storage for an author's named locations. Names are unique per author.
pub trait LocationBookmarkRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `BookmarkAlreadyExists` if the author already uses this name.
    fn add(&self, bookmark: Bookmark, location: Location, author: &AuthorId)
        -> RepositoryResult<()>;

    /// # Errors
    ///
    /// Returns `BookmarkNotFound` if the author has no bookmark with this name.
    fn get(&self, bookmark: &Bookmark, author: &AuthorId) -> RepositoryResult<Location>;

    /// # Errors
    ///
    /// Returns `BookmarkNotFound` if the author has no bookmark with this name.
    fn remove(&self, bookmark: &Bookmark, author: &AuthorId) -> RepositoryResult<()>;

    /// Every bookmark of the author, in insertion order.
    fn get_all_bookmarks(&self, author: &AuthorId) -> RepositoryResult<Vec<(Bookmark, Location)>>;
}

#[derive(Debug, Clone)]
struct BookmarkRecord {
    bookmark: Bookmark,
    location: Location,
    author: AuthorId,
}

impl BookmarkRecord {
    fn matches(&self, bookmark: &Bookmark, author: &AuthorId) -> bool {
        &self.bookmark == bookmark && &self.author == author
    }
}

#[derive(Debug, Default)]
pub struct InMemoryLocationBookmarkRepository {
    records: Mutex<Vec<BookmarkRecord>>,
}

impl InMemoryLocationBookmarkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocationBookmarkRepository for InMemoryLocationBookmarkRepository {
    fn add(
        &self,
        bookmark: Bookmark,
        location: Location,
        author: &AuthorId,
    ) -> RepositoryResult<()> {
        let mut records = self.records.lock();
        if records.iter().any(|record| record.matches(&bookmark, author)) {
            return Err(RepositoryError::bookmark_exists(bookmark.name()));
        }

        tracing::debug!("Created bookmark: {}", bookmark);
        records.push(BookmarkRecord {
            bookmark,
            location,
            author: author.clone(),
        });
        Ok(())
    }

    fn get(&self, bookmark: &Bookmark, author: &AuthorId) -> RepositoryResult<Location> {
        self.records
            .lock()
            .iter()
            .find(|record| record.matches(bookmark, author))
            .map(|record| record.location)
            .ok_or_else(|| RepositoryError::bookmark_not_found(bookmark.name()))
    }

    fn remove(&self, bookmark: &Bookmark, author: &AuthorId) -> RepositoryResult<()> {
        let mut records = self.records.lock();
        let index = records
            .iter()
            .position(|record| record.matches(bookmark, author))
            .ok_or_else(|| RepositoryError::bookmark_not_found(bookmark.name()))?;
        records.remove(index);

        tracing::debug!("Deleted bookmark: {}", bookmark);
        Ok(())
    }

    fn get_all_bookmarks(&self, author: &AuthorId) -> RepositoryResult<Vec<(Bookmark, Location)>> {
        Ok(self
            .records
            .lock()
            .iter()
            .filter(|record| &record.author == author)
            .map(|record| (record.bookmark.clone(), record.location))
            .collect())
    }
}
