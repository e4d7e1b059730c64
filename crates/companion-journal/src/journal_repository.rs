//! Journal entry storage.
//!
//! This module defines the `JournalRepository` trait and
//! `InMemoryJournalRepository`, which keeps every author's records in one
//! mutex-guarded list.

use parking_lot::Mutex;

use crate::author::AuthorId;
use crate::entry::JournalEntry;
use crate::error::{RepositoryError, RepositoryResult};

/// Storage for journal entries, partitioned by author.
///
/// A record is only ever visible to the author that created it: an id owned
/// by someone else behaves exactly like an id that does not exist.
pub trait JournalRepository: Send + Sync {
    /// Store an entry and return its new id.
    ///
    /// Ids are unique within the repository, increase with each call and are
    /// never handed out twice, even after the record is removed.
    fn add(&self, entry: JournalEntry, author: &AuthorId) -> RepositoryResult<u64>;

    /// Get the entry with the given id.
    ///
    /// # Errors
    ///
    /// Returns `JournalEntryNotFound` if the author owns no entry with this id.
    fn get(&self, id: u64, author: &AuthorId) -> RepositoryResult<JournalEntry>;

    /// Replace the entry with the given id, keeping the id.
    ///
    /// # Errors
    ///
    /// Returns `JournalEntryNotFound` if the author owns no entry with this id.
    fn update(&self, id: u64, author: &AuthorId, entry: JournalEntry) -> RepositoryResult<()>;

    /// Delete the entry with the given id.
    ///
    /// # Errors
    ///
    /// Returns `JournalEntryNotFound` if the author owns no entry with this id.
    fn remove(&self, id: u64, author: &AuthorId) -> RepositoryResult<()>;

    /// Every entry of the author, in insertion order.
    fn get_all_entries(&self, author: &AuthorId) -> RepositoryResult<Vec<(u64, JournalEntry)>>;
}

#[derive(Debug, Clone)]
struct JournalRecord {
    id: u64,
    entry: JournalEntry,
    author: AuthorId,
}

impl JournalRecord {
    fn matches(&self, id: u64, author: &AuthorId) -> bool {
        self.id == id && &self.author == author
    }
}

#[derive(Debug, Default)]
struct JournalState {
    records: Vec<JournalRecord>,
    next_id: u64,
}

/// In-memory journal storage.
#[derive(Debug, Default)]
pub struct InMemoryJournalRepository {
    state: Mutex<JournalState>,
}

impl InMemoryJournalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries across all authors.
    pub fn len(&self) -> usize {
        self.state.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().records.is_empty()
    }
}

impl JournalRepository for InMemoryJournalRepository {
    fn add(&self, entry: JournalEntry, author: &AuthorId) -> RepositoryResult<u64> {
        let mut state = self.state.lock();
        let id = state.next_id;
        state.next_id += 1;
        state.records.push(JournalRecord {
            id,
            entry,
            author: author.clone(),
        });

        tracing::debug!("Created journal entry with ID: {}", id);
        Ok(id)
    }

    fn get(&self, id: u64, author: &AuthorId) -> RepositoryResult<JournalEntry> {
        self.state
            .lock()
            .records
            .iter()
            .find(|record| record.matches(id, author))
            .map(|record| record.entry.clone())
            .ok_or_else(|| RepositoryError::entry_not_found(id))
    }

    fn update(&self, id: u64, author: &AuthorId, entry: JournalEntry) -> RepositoryResult<()> {
        let mut state = self.state.lock();
        let record = state
            .records
            .iter_mut()
            .find(|record| record.matches(id, author))
            .ok_or_else(|| RepositoryError::entry_not_found(id))?;
        record.entry = entry;

        tracing::debug!("Updated journal entry with ID: {}", id);
        Ok(())
    }

    fn remove(&self, id: u64, author: &AuthorId) -> RepositoryResult<()> {
        let mut state = self.state.lock();
        let index = state
            .records
            .iter()
            .position(|record| record.matches(id, author))
            .ok_or_else(|| RepositoryError::entry_not_found(id))?;
        state.records.remove(index);

        tracing::debug!("Deleted journal entry with ID: {}", id);
        Ok(())
    }

    fn get_all_entries(&self, author: &AuthorId) -> RepositoryResult<Vec<(u64, JournalEntry)>> {
        Ok(self
            .state
            .lock()
            .records
            .iter()
            .filter(|record| &record.author == author)
            .map(|record| (record.id, record.entry.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::note::Note;
    use chrono::NaiveDate;
    use companion_weather::Location;

    fn create_test_repository() -> InMemoryJournalRepository {
        InMemoryJournalRepository::new()
    }

    fn author(id: &str) -> AuthorId {
        AuthorId::new(id).unwrap()
    }

    fn entry(text: &str) -> JournalEntry {
        JournalEntry::new(
            Location::new(1.0, 2.0).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            Note::new(text).unwrap(),
        )
    }

    #[test]
    fn test_first_id_is_zero() {
        let repo = create_test_repository();
        assert!(repo.is_empty());
        assert_eq!(repo.add(entry("first"), &author("a")).unwrap(), 0);
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_ids_are_distinct_and_increasing() {
        let repo = create_test_repository();
        let ids: Vec<u64> = (0..5)
            .map(|i| {
                let who = if i % 2 == 0 { "a" } else { "b" };
                repo.add(entry("note"), &author(who)).unwrap()
            })
            .collect();
        assert_eq!(ids, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_ids_are_never_reused() {
        let repo = create_test_repository();
        let a = author("a");
        repo.add(entry("one"), &a).unwrap();
        let last = repo.add(entry("two"), &a).unwrap();
        repo.remove(last, &a).unwrap();
        assert_eq!(repo.add(entry("three"), &a).unwrap(), last + 1);
    }

    #[test]
    fn test_get_is_isolated_by_author() {
        let repo = create_test_repository();
        let id = repo.add(entry("mine"), &author("a")).unwrap();

        assert_eq!(repo.get(id, &author("a")).unwrap(), entry("mine"));
        let result = repo.get(id, &author("b"));
        assert!(matches!(
            result,
            Err(RepositoryError::JournalEntryNotFound { id: missing }) if missing == id
        ));
    }

    #[test]
    fn test_get_missing() {
        let repo = create_test_repository();
        assert_eq!(
            repo.get(42, &author("a")),
            Err(RepositoryError::entry_not_found(42))
        );
    }

    #[test]
    fn test_update_keeps_id() {
        let repo = create_test_repository();
        let a = author("a");
        let id = repo.add(entry("before"), &a).unwrap();

        repo.update(id, &a, entry("after")).unwrap();

        assert_eq!(repo.get(id, &a).unwrap(), entry("after"));
        assert_eq!(repo.len(), 1);
    }

    #[test]
    fn test_update_other_authors_entry() {
        let repo = create_test_repository();
        let id = repo.add(entry("mine"), &author("a")).unwrap();

        let result = repo.update(id, &author("b"), entry("hijack"));

        assert!(matches!(result, Err(RepositoryError::JournalEntryNotFound { .. })));
        assert_eq!(repo.get(id, &author("a")).unwrap(), entry("mine"));
    }

    #[test]
    fn test_remove_then_get() {
        let repo = create_test_repository();
        let a = author("a");
        let id = repo.add(entry("gone soon"), &a).unwrap();

        repo.remove(id, &a).unwrap();

        assert!(matches!(
            repo.get(id, &a),
            Err(RepositoryError::JournalEntryNotFound { .. })
        ));
        assert!(matches!(
            repo.remove(id, &a),
            Err(RepositoryError::JournalEntryNotFound { .. })
        ));
    }

    #[test]
    fn test_get_all_entries_in_insertion_order() {
        let repo = create_test_repository();
        let a = author("a");
        let b = author("b");
        repo.add(entry("a1"), &a).unwrap();
        repo.add(entry("b1"), &b).unwrap();
        repo.add(entry("a2"), &a).unwrap();

        let all = repo.get_all_entries(&a).unwrap();
        let notes: Vec<&str> = all.iter().map(|(_, e)| e.note().content()).collect();
        assert_eq!(notes, vec!["a1", "a2"]);
        assert_eq!(all[0].0, 0);
        assert_eq!(all[1].0, 2);

        assert!(repo.get_all_entries(&author("c")).unwrap().is_empty());
    }

    #[test]
    fn test_concurrent_adds_get_distinct_ids() {
        use std::sync::Arc;

        let repo = Arc::new(create_test_repository());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let repo = Arc::clone(&repo);
                std::thread::spawn(move || {
                    (0..25)
                        .map(|_| repo.add(entry("x"), &author("a")).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut ids: Vec<u64> = handles
            .into_iter()
            .flat_map(|handle| handle.join().unwrap())
            .collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 200);
    }
}
