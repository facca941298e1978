/// Category filtering over the catalog
///
/// The filtered view only stores photo ids, so identity lookups always go
/// back to the unfiltered catalog.
use std::fmt;

use super::data::{Catalog, PhotoId};

/// The active category selection
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// No filtering, the sentinel "all"
    #[default]
    All,
    /// Only photos whose category equals this label
    Only(String),
}

impl CategoryFilter {
    /// Parse a category as it appears in an address or picker.
    /// "all", empty and absent values all mean no filtering.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            None | Some("") | Some("all") => CategoryFilter::All,
            Some(label) => CategoryFilter::Only(label.to_string()),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, CategoryFilter::All)
    }

    /// The category label to carry in an address, if any
    pub fn query_value(&self) -> Option<&str> {
        match self {
            CategoryFilter::All => None,
            CategoryFilter::Only(label) => Some(label),
        }
    }

    /// Whether a photo with this category passes the filter
    pub fn matches(&self, category: Option<&str>) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(label) => category == Some(label.as_str()),
        }
    }

    /// Human readable label for the category picker
    pub fn label(&self) -> String {
        match self {
            CategoryFilter::All => "All categories".to_string(),
            CategoryFilter::Only(label) if label == "lego" => "LEGO".to_string(),
            CategoryFilter::Only(label) => {
                let mut chars = label.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

/// The subsequence of the catalog matching the active category
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilteredView {
    ids: Vec<PhotoId>,
}

impl FilteredView {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Stable id of the photo at a position in this view
    pub fn id_at(&self, index: usize) -> Option<PhotoId> {
        self.ids.get(index).copied()
    }

    /// Position of a photo in this view, if the view contains it
    pub fn position_of(&self, id: PhotoId) -> Option<usize> {
        self.ids.iter().position(|&candidate| candidate == id)
    }

    pub fn ids(&self) -> &[PhotoId] {
        &self.ids
    }
}

/// Restrict the catalog to a category, preserving catalog order.
/// Unknown categories simply produce an empty view.
pub fn filter(catalog: &Catalog, category: &CategoryFilter) -> FilteredView {
    let ids = catalog
        .iter()
        .filter(|photo| category.matches(photo.category.as_deref()))
        .map(|photo| photo.id)
        .collect();
    FilteredView { ids }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::tests::record;

    fn sample_catalog() -> Catalog {
        Catalog::from_records(vec![
            record("a", "2024-03-01", Some("x")),
            record("b", "2024-02-01", Some("y")),
            record("c", "2024-01-01", Some("x")),
            record("d", "2023-12-01", None),
        ])
    }

    #[test]
    fn test_all_returns_full_catalog_in_order() {
        let catalog = sample_catalog();
        let view = filter(&catalog, &CategoryFilter::All);
        assert_eq!(view.ids(), &[0, 1, 2, 3]);
    }

    #[test]
    fn test_category_keeps_matching_in_order() {
        let catalog = sample_catalog();
        let view = filter(&catalog, &CategoryFilter::Only("x".into()));
        assert_eq!(view.ids(), &[0, 2]);
        assert_eq!(view.position_of(2), Some(1));
        assert_eq!(view.id_at(1), Some(2));
        assert_eq!(view.position_of(1), None);
    }

    #[test]
    fn test_unknown_category_is_empty() {
        let catalog = sample_catalog();
        let view = filter(&catalog, &CategoryFilter::Only("kleikunst".into()));
        assert!(view.is_empty());
        assert_eq!(view.id_at(0), None);
    }

    #[test]
    fn test_filter_matches_exactly_the_category_members() {
        let catalog = sample_catalog();
        for label in ["x", "y", "z"] {
            let category = CategoryFilter::Only(label.to_string());
            let view = filter(&catalog, &category);
            let expected: Vec<PhotoId> = catalog
                .iter()
                .filter(|p| p.category.as_deref() == Some(label))
                .map(|p| p.id)
                .collect();
            assert_eq!(view.ids(), expected.as_slice());
            assert!(view.ids().windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn test_parse_sentinels() {
        assert_eq!(CategoryFilter::parse(None), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(Some("")), CategoryFilter::All);
        assert_eq!(CategoryFilter::parse(Some("all")), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse(Some("lego")),
            CategoryFilter::Only("lego".into())
        );
    }

    #[test]
    fn test_labels() {
        assert_eq!(CategoryFilter::All.label(), "All categories");
        assert_eq!(CategoryFilter::Only("lego".into()).label(), "LEGO");
        assert_eq!(CategoryFilter::Only("tekeningen".into()).label(), "Tekeningen");
    }
}
