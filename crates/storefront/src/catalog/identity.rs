//! Normalized identity keys for cross-source product matching.
//!
//! A manufacturer-assigned code (ASIN/UPC) is a stronger identity signal
//! than a free-text name, which varies between sources in capitalization
//! and punctuation for the same physical product. Every record gets a key;
//! with no matching metadata the key degrades to the source-assigned id,
//! which dedupes nothing but keeps the record displayable.

use card_compass_core::ProductRecord;

/// Normalized string under which records for the same physical product
/// collide. Prefixed by the signal it was derived from (`asin:`, `upc:`,
/// `name:`, `id:`) so keys from different signals never cross-match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdentityKey(String);

impl IdentityKey {
    /// The underlying key string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Derive the identity key for a record.
///
/// Precedence: ASIN (lowercased, trimmed), then UPC (trimmed), then the
/// normalized name, then the raw source id as a last resort. A record keys
/// on its strongest signal only.
#[must_use]
pub fn normalize_key(record: &ProductRecord) -> IdentityKey {
    if let Some(asin) = trimmed_nonempty(record.asin.as_deref()) {
        return IdentityKey(format!("asin:{}", asin.to_lowercase()));
    }
    if let Some(upc) = trimmed_nonempty(record.upc.as_deref()) {
        return IdentityKey(format!("upc:{upc}"));
    }
    let name = normalize_name(&record.name);
    if !name.is_empty() {
        return IdentityKey(format!("name:{name}"));
    }
    IdentityKey(format!("id:{}", record.id))
}

/// Lowercase, strip everything outside `[a-z0-9\s]`, collapse whitespace
/// runs to a single space, and trim.
fn normalize_name(name: &str) -> String {
    let lowered: String = name
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c.is_whitespace())
        .collect();
    lowered.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn trimmed_nonempty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use card_compass_core::{ProductId, ProductSource};

    fn record(id: &str, name: &str, asin: Option<&str>, upc: Option<&str>) -> ProductRecord {
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
            asin: asin.map(String::from),
            upc: upc.map(String::from),
            rating: None,
            review_count: None,
            affiliate_url: None,
        }
    }

    #[test]
    fn test_asin_outranks_upc_and_name() {
        let r = record("1", "Booster Box", Some(" B0ABCD "), Some("012345"));
        assert_eq!(normalize_key(&r).as_str(), "asin:b0abcd");
    }

    #[test]
    fn test_asin_case_and_whitespace_insensitive() {
        let a = record("1", "A", Some("B0ABCD"), None);
        let b = record("2", "B", Some("  b0abcd"), None);
        assert_eq!(normalize_key(&a), normalize_key(&b));
    }

    #[test]
    fn test_upc_when_no_asin() {
        let r = record("1", "Booster Box", None, Some(" 012345 "));
        assert_eq!(normalize_key(&r).as_str(), "upc:012345");
    }

    #[test]
    fn test_name_normalization() {
        let a = record("1", "Booster Box!!", None, None);
        let b = record("2", "booster   box", None, None);
        assert_eq!(normalize_key(&a).as_str(), "name:booster box");
        assert_eq!(normalize_key(&a), normalize_key(&b));
    }

    #[test]
    fn test_blank_asin_falls_through() {
        let r = record("1", "Booster Box", Some("   "), None);
        assert_eq!(normalize_key(&r).as_str(), "name:booster box");
    }

    #[test]
    fn test_id_fallback_when_nothing_matches() {
        let r = record("p-9", "!!!", None, None);
        assert_eq!(normalize_key(&r).as_str(), "id:p-9");
    }
}
