use chrono::NaiveDate;
use companion_weather::Location;
use serde::{Deserialize, Serialize};

use crate::note::Note;

/// A dated, located note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalEntry {
    location: Location,
    date: NaiveDate,
    note: Note,
}

impl JournalEntry {
    pub fn new(location: Location, date: NaiveDate, note: Note) -> Self {
        Self {
            location,
            date,
            note,
        }
    }

    pub fn location(&self) -> &Location {
        &self.location
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn note(&self) -> &Note {
        &self.note
    }
}

/// Order `(id, entry)` pairs by entry date, oldest first.
///
/// The sort is stable: entries sharing a date keep their relative order.
pub fn sort_by_date(entries: &mut [(u64, JournalEntry)]) {
    entries.sort_by_key(|(_, entry)| entry.date());
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn entry(day: u32, text: &str) -> JournalEntry {
        JournalEntry::new(
            Location::new(1.0, 2.0).unwrap(),
            NaiveDate::from_ymd_opt(2020, 1, day).unwrap(),
            Note::new(text).unwrap(),
        )
    }

    #[test]
    fn test_structural_equality() {
        assert_eq!(entry(1, "alpha"), entry(1, "alpha"));
        assert_ne!(entry(1, "alpha"), entry(2, "alpha"));
        assert_ne!(entry(1, "alpha"), entry(1, "beta"));
    }

    #[test]
    fn test_sort_by_date_is_stable() {
        let mut entries = vec![
            (0, entry(5, "late")),
            (1, entry(1, "first")),
            (2, entry(5, "later")),
            (3, entry(3, "middle")),
        ];
        sort_by_date(&mut entries);
        let ids: Vec<u64> = entries.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_value(entry(1, "alpha")).unwrap();
        assert_eq!(json["date"], "2020-01-01");
        assert_eq!(json["note"], "alpha");
        assert_eq!(json["location"]["latitude"], 1.0);
    }
}
