//! Preference scoring between records that share an identity key.
//!
//! Higher score wins. Availability and known pricing dominate; the small
//! price penalty only separates otherwise-equal candidates, so a cheap
//! out-of-stock listing never displaces an in-stock one.

use card_compass_core::ProductRecord;
use rust_decimal::prelude::ToPrimitive;

/// Score a record for "better record wins" comparisons.
///
/// - `+3` in stock
/// - `+2` known `best_price` (real pricing outranks placeholder records)
/// - `+1` affiliate origin
/// - `-0.5` preorder
/// - `-best_price / 1000` when the price is known (prefers the cheaper of
///   otherwise-equal candidates)
#[must_use]
pub fn preference_score(record: &ProductRecord) -> f64 {
    let mut score = 0.0;
    if record.in_stock {
        score += 3.0;
    }
    if let Some(price) = record.best_price {
        score += 2.0;
        score -= price.to_f64().unwrap_or(0.0) / 1000.0;
    }
    if record.source.is_affiliate() {
        score += 1.0;
    }
    if record.is_preorder {
        score -= 0.5;
    }
    score
}
