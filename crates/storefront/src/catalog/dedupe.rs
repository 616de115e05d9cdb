//! Deduplication fold over an accumulated record list.

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use card_compass_core::ProductRecord;

use super::identity::{IdentityKey, normalize_key};
use super::score::preference_score;

/// Collapse an accumulated record list to one record per identity key.
///
/// Records are processed in arrival order. For each key the highest-scoring
/// record seen so far survives; on an exact score tie the earlier-seen
/// record is kept. Output preserves first-seen-key order - the overall
/// (backend-provided) catalog ranking - rather than re-sorting by score.
#[must_use]
pub fn dedupe(records: &[ProductRecord]) -> Vec<ProductRecord> {
    let mut slot_by_key: HashMap<IdentityKey, usize> = HashMap::new();
    let mut unique: Vec<ProductRecord> = Vec::new();

    for record in records {
        match slot_by_key.entry(normalize_key(record)) {
            Entry::Occupied(slot) => {
                if let Some(existing) = unique.get_mut(*slot.get()) {
                    if preference_score(record) > preference_score(existing) {
                        *existing = record.clone();
                    }
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(unique.len());
                unique.push(record.clone());
            }
        }
    }

    unique
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use card_compass_core::{ProductId, ProductSource};
    use rust_decimal::Decimal;

    fn record(id: &str, name: &str) -> ProductRecord {
        ProductRecord {
            id: ProductId::new(id),
            name: name.to_string(),
            category: String::new(),
            image_url: None,
            description: None,
            best_price: None,
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

    fn ids(records: &[ProductRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_same_asin_dedupes_best_record_wins() {
        let mut weak = record("1", "Booster Box");
        weak.asin = Some("B0ABCD".to_string());

        let mut strong = record("2", "Booster Box (Sealed)");
        strong.asin = Some(" b0abcd ".to_string());
        strong.in_stock = true;
        strong.best_price = Some(Decimal::new(9999, 2));

        // Arrival order must not matter for the winner.
        let forward = dedupe(&[weak.clone(), strong.clone()]);
        let reverse = dedupe(&[strong.clone(), weak]);
        assert_eq!(ids(&forward), vec!["2"]);
        assert_eq!(ids(&reverse), vec!["2"]);
    }

    #[test]
    fn test_punctuation_variant_names_dedupe() {
        let a = record("1", "Booster Box!!");
        let b = record("2", "booster box");
        let out = dedupe(&[a, b]);
        // Tie score, first-seen wins.
        assert_eq!(ids(&out), vec!["1"]);
    }

    #[test]
    fn test_first_seen_key_order_preserved() {
        let mut a = record("a", "Alpha");
        a.best_price = Some(Decimal::new(100, 2));
        let b = record("b", "Beta");
        // Better copy of Beta arrives last; it wins its slot but the slot
        // keeps Beta's original position.
        let mut b2 = record("b2", "Beta");
        b2.in_stock = true;
        let c = record("c", "Gamma");

        let out = dedupe(&[a, b, c, b2]);
        assert_eq!(ids(&out), vec!["a", "b2", "c"]);
    }

    #[test]
    fn test_distinct_records_untouched() {
        let out = dedupe(&[record("1", "Alpha"), record("2", "Beta")]);
        assert_eq!(ids(&out), vec!["1", "2"]);
    }

    #[test]
    fn test_keyless_records_never_cross_match() {
        // Non-alphanumeric names degrade to id keys: no dedup.
        let out = dedupe(&[record("1", "???"), record("2", "???")]);
        assert_eq!(ids(&out), vec!["1", "2"]);
    }
}
