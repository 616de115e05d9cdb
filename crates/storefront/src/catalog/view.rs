//! Client-side search and sort over a reconciled record list.
//!
//! These run after dedup/ordering and never touch accumulation state, so
//! flipping the search term or sort menu is free of backend round-trips.

use std::cmp::Ordering;

use card_compass_core::ProductRecord;
use rust_decimal::Decimal;

/// Sort menu options, mirroring the storefront UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOption {
    /// Reconciler output order (backend ranking / memoized shuffle).
    #[default]
    Featured,
    PriceLowToHigh,
    PriceHighToLow,
    Rating,
    Name,
}

/// Case-insensitive substring match against name or category.
#[must_use]
pub fn search(records: &[ProductRecord], term: &str) -> Vec<ProductRecord> {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return records.to_vec();
    }
    records
        .iter()
        .filter(|r| {
            r.name.to_lowercase().contains(&term) || r.category.to_lowercase().contains(&term)
        })
        .cloned()
        .collect()
}

/// Sort records in place per the selected option.
///
/// Unknown prices sort as zero and unknown ratings as zero, matching the
/// storefront's display behavior. `Featured` leaves the list untouched.
pub fn sort_records(records: &mut [ProductRecord], option: SortOption) {
    let price = |r: &ProductRecord| r.best_price.unwrap_or(Decimal::ZERO);
    match option {
        SortOption::Featured => {}
        SortOption::PriceLowToHigh => records.sort_by(|a, b| price(a).cmp(&price(b))),
        SortOption::PriceHighToLow => records.sort_by(|a, b| price(b).cmp(&price(a))),
        SortOption::Rating => records.sort_by(|a, b| {
            let ra = a.rating.unwrap_or(0.0);
            let rb = b.rating.unwrap_or(0.0);
            rb.partial_cmp(&ra).unwrap_or(Ordering::Equal)
        }),
        SortOption::Name => records.sort_by(|a, b| a.name.cmp(&b.name)),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use card_compass_core::{ProductId, ProductSource};

    fn record(id: &str, name: &str, category: &str, price: Option<i64>) -> ProductRecord {
        ProductRecord {
            id: ProductId::new(id),
            name: name.to_string(),
            category: category.to_string(),
            image_url: None,
            description: None,
            best_price: price.map(|cents| Decimal::new(cents, 2)),
            source: ProductSource::Unknown,
            in_stock: false,
            is_preorder: false,
            asin: None,
            upc: None,
            rating: None,
            review_count: None,
            affiliate_url: None,
        }
    }

    #[test]
    fn test_search_matches_name_or_category() {
        let records = vec![
            record("1", "Scarlet Booster Box", "boxes", None),
            record("2", "Card Sleeves", "accessories", None),
            record("3", "Deck Box", "accessories", None),
        ];
        let hits = search(&records, "BOX");
        assert_eq!(hits.len(), 2);
        let hits = search(&records, "accessories");
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_search_blank_term_returns_all() {
        let records = vec![record("1", "A", "x", None)];
        assert_eq!(search(&records, "   ").len(), 1);
    }

    #[test]
    fn test_sort_price_unknown_sorts_as_zero() {
        let mut records = vec![
            record("1", "A", "x", Some(1000)),
            record("2", "B", "x", None),
            record("3", "C", "x", Some(500)),
        ];
        sort_records(&mut records, SortOption::PriceLowToHigh);
        let ids: Vec<_> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "1"]);
    }

    #[test]
    fn test_sort_name() {
        let mut records = vec![
            record("1", "Gamma", "x", None),
            record("2", "Alpha", "x", None),
        ];
        sort_records(&mut records, SortOption::Name);
        assert_eq!(records.first().unwrap().id.as_str(), "2");
    }

    #[test]
    fn test_featured_leaves_order() {
        let mut records = vec![
            record("1", "Gamma", "x", None),
            record("2", "Alpha", "x", None),
        ];
        sort_records(&mut records, SortOption::Featured);
        assert_eq!(records.first().unwrap().id.as_str(), "1");
    }
}
