/// Shared data structures for the gallery state
///
/// These structs represent the data model that flows between
/// the catalog providers and the UI layer.
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Stable identity of a photo: its position in the unfiltered catalog
pub type PhotoId = usize;

/// Opaque pointer to where the image bytes live.
/// Only `backend::resolve` knows how to turn one into a display URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ImageLocator {
    /// A direct URL, possibly wrapped in markdown link syntax
    Url(String),
    /// A Sanity asset reference (e.g. "image-abc123-2000x3000-jpg")
    SanityAsset(String),
    /// An object inside a Supabase storage bucket
    Storage { bucket: String, path: String },
    /// A file on the local disk
    File(PathBuf),
    /// The backend row had no usable image
    Missing,
}

/// A raw record as delivered by a catalog provider, before indexing
#[derive(Debug, Clone, PartialEq)]
pub struct PhotoRecord {
    /// Backend identifier (document id, row uuid, path...)
    pub identifier: String,
    pub title: String,
    pub image: ImageLocator,
    pub date: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

/// Represents a single photo in the loaded catalog
#[derive(Debug, Clone, PartialEq)]
pub struct Photo {
    /// Position in the unfiltered catalog, assigned at load time
    pub id: PhotoId,
    /// Backend identifier, kept for logging and downloads
    pub key: String,
    pub title: String,
    pub image: ImageLocator,
    pub date: Option<DateTime<Utc>>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Photo {
    /// Date formatted for the info panel (e.g. "14 October 2026")
    pub fn display_date(&self) -> Option<String> {
        self.date.map(|d| d.format("%-d %B %Y").to_string())
    }
}

/// The full, unfiltered, date-ordered set of photos for a session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    photos: Vec<Photo>,
}

impl Catalog {
    /// Build a catalog from provider records.
    ///
    /// Records are ordered newest first (undated last, ties keep provider
    /// order) and re-indexed 0..N-1. Any ordinal the backend supplied is
    /// ignored.
    pub fn from_records(mut records: Vec<PhotoRecord>) -> Self {
        // sort_by is stable, so equal dates keep the provider's order
        records.sort_by(|a, b| b.date.cmp(&a.date));

        let photos = records
            .into_iter()
            .enumerate()
            .map(|(id, record)| Photo {
                id,
                key: record.identifier,
                title: record.title,
                image: record.image,
                date: record.date,
                category: record.category.filter(|c| !c.is_empty()),
                description: record.description.filter(|d| !d.is_empty()),
                width: record.width,
                height: record.height,
            })
            .collect();

        Catalog { photos }
    }

    pub fn get(&self, id: PhotoId) -> Option<&Photo> {
        self.photos.get(id)
    }

    pub fn contains(&self, id: PhotoId) -> bool {
        id < self.photos.len()
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Photo> {
        self.photos.iter()
    }

    /// Sorted, de-duplicated category labels present in the catalog
    pub fn categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .photos
            .iter()
            .filter_map(|p| p.category.clone())
            .collect();
        categories.sort();
        categories.dedup();
        categories
    }
}

/// Parse the date formats the backends use: RFC 3339 timestamps
/// (Sanity datetime) or plain dates (Supabase `date` columns).
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Record helper shared by the state tests
    pub(crate) fn record(title: &str, date: &str, category: Option<&str>) -> PhotoRecord {
        PhotoRecord {
            identifier: format!("doc-{}", title),
            title: title.to_string(),
            image: ImageLocator::Url(format!("https://example.com/{}.jpg", title)),
            date: parse_date(date),
            category: category.map(str::to_string),
            description: None,
            width: None,
            height: None,
        }
    }

    #[test]
    fn test_catalog_orders_newest_first_and_reindexes() {
        let catalog = Catalog::from_records(vec![
            record("old", "2023-01-01", None),
            record("new", "2025-06-01", None),
            record("mid", "2024-03-15T10:00:00Z", None),
        ]);

        let titles: Vec<&str> = catalog.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["new", "mid", "old"]);

        for (position, photo) in catalog.iter().enumerate() {
            assert_eq!(photo.id, position);
        }
    }

    #[test]
    fn test_equal_dates_keep_provider_order() {
        let catalog = Catalog::from_records(vec![
            record("first", "2024-01-01", None),
            record("second", "2024-01-01", None),
        ]);
        assert_eq!(catalog.get(0).unwrap().title, "first");
        assert_eq!(catalog.get(1).unwrap().title, "second");
    }

    #[test]
    fn test_undated_records_sort_last() {
        let mut undated = record("undated", "", None);
        undated.date = None;
        let catalog = Catalog::from_records(vec![undated, record("dated", "2020-01-01", None)]);
        assert_eq!(catalog.get(0).unwrap().title, "dated");
        assert_eq!(catalog.get(1).unwrap().title, "undated");
    }

    #[test]
    fn test_categories_are_sorted_and_unique() {
        let catalog = Catalog::from_records(vec![
            record("a", "2024-01-03", Some("verfwerk")),
            record("b", "2024-01-02", Some("lego")),
            record("c", "2024-01-01", Some("verfwerk")),
            record("d", "2023-01-01", Some("")),
            record("e", "2022-01-01", None),
        ]);
        assert_eq!(catalog.categories(), vec!["lego", "verfwerk"]);
        assert_eq!(catalog.get(3).unwrap().category, None);
    }

    #[test]
    fn test_parse_date_formats() {
        assert!(parse_date("2024-05-01T12:30:00.000Z").is_some());
        assert!(parse_date("2024-05-01").is_some());
        assert!(parse_date("yesterday").is_none());
    }

    #[test]
    fn test_display_date() {
        let catalog = Catalog::from_records(vec![record("a", "2026-10-14", None)]);
        assert_eq!(catalog.get(0).unwrap().display_date().as_deref(), Some("14 October 2026"));
    }
}
