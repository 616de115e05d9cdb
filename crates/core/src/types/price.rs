//! Money display helpers over decimal amounts.
//!
//! Prices move through the system at full `Decimal` precision; rounding to
//! two places happens only here, at display time. Stores and wire types
//! must never round.

use rust_decimal::Decimal;

/// Format a decimal amount as a dollar price string (e.g., `"$19.99"`).
///
/// The backend reports every price in a single currency, so the symbol is
/// fixed; the `currency` field on optimization responses is informational.
#[must_use]
pub fn display_amount(amount: Decimal) -> String {
    format!("${:.2}", amount.round_dp(2))
}
