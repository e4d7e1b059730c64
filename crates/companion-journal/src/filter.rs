//! Predicates over journal entries.
//!
//! Filters are small composable values; [`JournalQuery`] turns optional
//! query parameters into one [`AndFilter`].

use chrono::NaiveDate;
use companion_core::ValidationError;
use companion_weather::Location;
use serde::{Deserialize, Serialize};

use crate::entry::JournalEntry;

/// A yes/no test on a single journal entry.
pub trait JournalEntryFilter: Send + Sync {
    fn evaluate(&self, entry: &JournalEntry) -> bool;
}

/// Passes entries whose date lies in `[start, end]`, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRangeFilter {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRangeFilter {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

impl JournalEntryFilter for DateRangeFilter {
    fn evaluate(&self, entry: &JournalEntry) -> bool {
        (self.start..=self.end).contains(&entry.date())
    }
}

/// Case-insensitive substring match on the note content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteContentFilter {
    needle: String,
}

impl NoteContentFilter {
    pub fn new(text: impl AsRef<str>) -> Self {
        Self {
            needle: text.as_ref().trim().to_lowercase(),
        }
    }
}

impl JournalEntryFilter for NoteContentFilter {
    fn evaluate(&self, entry: &JournalEntry) -> bool {
        entry
            .note()
            .content()
            .to_lowercase()
            .contains(&self.needle)
    }
}

/// Passes entries within `max_distance_km` of a centre point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationProximityFilter {
    center: Location,
    max_distance_km: f64,
}

impl LocationProximityFilter {
    pub fn new(center: Location, max_distance_km: f64) -> Self {
        Self {
            center,
            max_distance_km,
        }
    }
}

impl JournalEntryFilter for LocationProximityFilter {
    fn evaluate(&self, entry: &JournalEntry) -> bool {
        self.center.distance_to(entry.location()) <= self.max_distance_km
    }
}

/// Conjunction of child filters. With no children every entry passes.
#[derive(Default)]
pub struct AndFilter {
    filters: Vec<Box<dyn JournalEntryFilter>>,
}

impl AndFilter {
    pub fn new(filters: Vec<Box<dyn JournalEntryFilter>>) -> Self {
        Self { filters }
    }

    pub fn with(mut self, filter: impl JournalEntryFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl JournalEntryFilter for AndFilter {
    fn evaluate(&self, entry: &JournalEntry) -> bool {
        self.filters.iter().all(|filter| filter.evaluate(entry))
    }
}

impl std::fmt::Debug for AndFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AndFilter")
            .field("filters", &self.filters.len())
            .finish()
    }
}

/// Keep the `(id, entry)` pairs that pass `filter`, in input order.
pub fn filter_entries(
    entries: Vec<(u64, JournalEntry)>,
    filter: &dyn JournalEntryFilter,
) -> Vec<(u64, JournalEntry)> {
    entries
        .into_iter()
        .filter(|(_, entry)| filter.evaluate(entry))
        .collect()
}

/// Centre and radius of a proximity search.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NearQuery {
    pub center: Location,
    pub max_distance_km: f64,
}

/// Optional search parameters for an author's journal.
///
/// Every parameter that is present narrows the result; an empty query
/// matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub text: Option<String>,
    pub near: Option<NearQuery>,
}

impl JournalQuery {
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none()
            && self.end_date.is_none()
            && self.text.is_none()
            && self.near.is_none()
    }

    /// Build the conjunction of filters for the parameters present.
    ///
    /// A missing date bound is open. Blank text is ignored.
    ///
    /// # Errors
    ///
    /// [`ValidationError::InvalidDateRange`] when the start date is after the
    /// end date, [`ValidationError::InvalidDistance`] when the radius is
    /// negative or not finite.
    pub fn into_filter(self) -> Result<AndFilter, ValidationError> {
        let mut filter = AndFilter::default();

        if self.start_date.is_some() || self.end_date.is_some() {
            let start = self.start_date.unwrap_or(NaiveDate::MIN);
            let end = self.end_date.unwrap_or(NaiveDate::MAX);
            if start > end {
                return Err(ValidationError::InvalidDateRange {
                    start: start.to_string(),
                    end: end.to_string(),
                });
            }
            filter = filter.with(DateRangeFilter::new(start, end));
        }

        if let Some(text) = self.text.filter(|text| !text.trim().is_empty()) {
            filter = filter.with(NoteContentFilter::new(text));
        }

        if let Some(near) = self.near {
            let km = near.max_distance_km;
            if !km.is_finite() || km < 0.0 {
                return Err(ValidationError::InvalidDistance(km));
            }
            filter = filter.with(LocationProximityFilter::new(near.center, km));
        }

        Ok(filter)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::note::Note;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn entry_at(lat: f64, lon: f64, day: NaiveDate, text: &str) -> JournalEntry {
        JournalEntry::new(Location::new(lat, lon).unwrap(), day, Note::new(text).unwrap())
    }

    fn entry(day: NaiveDate, text: &str) -> JournalEntry {
        entry_at(1.0, 2.0, day, text)
    }

    #[test]
    fn test_date_range_bounds_are_inclusive() {
        let filter = DateRangeFilter::new(date(2020, 1, 1), date(2020, 1, 2));
        assert!(filter.evaluate(&entry(date(2020, 1, 1), "a")));
        assert!(filter.evaluate(&entry(date(2020, 1, 2), "a")));
        assert!(!filter.evaluate(&entry(date(2019, 12, 31), "a")));
        assert!(!filter.evaluate(&entry(date(2020, 1, 3), "a")));
    }

    #[test]
    fn test_note_content_is_case_insensitive() {
        let filter = NoteContentFilter::new("  HIKING ");
        assert!(filter.evaluate(&entry(date(2020, 1, 1), "Went hiking today")));
        assert!(!filter.evaluate(&entry(date(2020, 1, 1), "Stayed home")));
    }

    #[test]
    fn test_zero_radius_proximity() {
        let center = Location::new(1.0, 2.0).unwrap();
        let filter = LocationProximityFilter::new(center, 0.0);
        assert!(filter.evaluate(&entry_at(1.0, 2.0, date(2020, 1, 1), "here")));
        assert!(!filter.evaluate(&entry_at(1.0, 2.001, date(2020, 1, 1), "there")));
    }

    #[test]
    fn test_proximity_radius() {
        let center = Location::new(0.0, 0.0).unwrap();
        // one degree of longitude at the equator is ~111 km
        let filter = LocationProximityFilter::new(center, 112.0);
        assert!(filter.evaluate(&entry_at(0.0, 1.0, date(2020, 1, 1), "near")));
        assert!(!filter.evaluate(&entry_at(0.0, 2.0, date(2020, 1, 1), "far")));
    }

    #[test]
    fn test_empty_and_filter_is_true() {
        let filter = AndFilter::default();
        assert!(filter.is_empty());
        assert!(filter.evaluate(&entry(date(2020, 1, 1), "anything")));
    }

    #[test]
    fn test_and_filter_requires_every_child() {
        let filter = AndFilter::default()
            .with(DateRangeFilter::new(date(2020, 1, 1), date(2020, 1, 31)))
            .with(NoteContentFilter::new("alpha"));
        assert_eq!(filter.len(), 2);
        assert!(filter.evaluate(&entry(date(2020, 1, 10), "alpha")));
        assert!(!filter.evaluate(&entry(date(2020, 2, 10), "alpha")));
        assert!(!filter.evaluate(&entry(date(2020, 1, 10), "beta")));
    }

    #[test]
    fn test_filter_entries_preserves_order() {
        let entries = vec![
            (4, entry(date(2020, 1, 3), "alpha three")),
            (1, entry(date(2020, 1, 1), "beta")),
            (2, entry(date(2020, 1, 2), "alpha two")),
        ];
        let kept = filter_entries(entries, &NoteContentFilter::new("alpha"));
        let ids: Vec<u64> = kept.iter().map(|(id, _)| *id).collect();
        assert_eq!(ids, vec![4, 2]);
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let query = JournalQuery::default();
        assert!(query.is_empty());
        let filter = query.into_filter().unwrap();
        assert!(filter.is_empty());
    }

    #[test]
    fn test_query_open_bounds() {
        let query = JournalQuery {
            start_date: Some(date(2020, 1, 2)),
            ..Default::default()
        };
        let filter = query.into_filter().unwrap();
        assert!(filter.evaluate(&entry(date(2999, 1, 1), "future")));
        assert!(!filter.evaluate(&entry(date(2020, 1, 1), "past")));
    }

    #[test]
    fn test_query_rejects_inverted_range() {
        let query = JournalQuery {
            start_date: Some(date(2020, 1, 2)),
            end_date: Some(date(2020, 1, 1)),
            ..Default::default()
        };
        assert!(matches!(
            query.into_filter(),
            Err(ValidationError::InvalidDateRange { .. })
        ));
    }

    #[test]
    fn test_query_rejects_bad_radius() {
        for km in [-1.0, f64::NAN, f64::INFINITY] {
            let query = JournalQuery {
                near: Some(NearQuery {
                    center: Location::new(0.0, 0.0).unwrap(),
                    max_distance_km: km,
                }),
                ..Default::default()
            };
            assert!(matches!(
                query.into_filter(),
                Err(ValidationError::InvalidDistance(_))
            ));
        }
    }

    #[test]
    fn test_query_accepts_zero_radius() {
        let center = Location::new(1.0, 2.0).unwrap();
        let query = JournalQuery {
            near: Some(NearQuery {
                center,
                max_distance_km: 0.0,
            }),
            ..Default::default()
        };
        let filter = query.into_filter().unwrap();
        assert!(filter.evaluate(&entry_at(1.0, 2.0, date(2020, 1, 1), "here")));
        assert!(!filter.evaluate(&entry_at(1.5, 2.0, date(2020, 1, 1), "there")));
    }

    #[test]
    fn test_blank_text_is_ignored() {
        let query = JournalQuery {
            text: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(query.into_filter().unwrap().is_empty());
    }

    #[test]
    fn test_query_from_json() {
        let query: JournalQuery = serde_json::from_str(
            r#"{"end_date": "2020-01-31", "near": {"center": {"latitude": 1.0, "longitude": 2.0}, "max_distance_km": 5.0}}"#,
        )
        .unwrap();
        assert_eq!(query.end_date, Some(date(2020, 1, 31)));
        assert!(query.start_date.is_none());
        assert_eq!(query.into_filter().unwrap().len(), 2);
    }
}
