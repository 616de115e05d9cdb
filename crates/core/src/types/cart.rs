//! Cart line item type.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;

/// One product entry in the cart with an associated quantity.
///
/// Serialized field names match the persisted cart payload (`price` rather
/// than `unit_price`), so carts saved by earlier clients keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    pub product_id: ProductId,
    pub name: String,
    /// Caller-supplied display price. Authoritative pricing is re-derived
    /// server-side at optimization/checkout time.
    #[serde(rename = "price", with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CartLineItem {
    /// Price of this line at its current quantity, at full precision.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_line_total() {
        let line = CartLineItem {
            product_id: ProductId::new("p1"),
            name: "Booster Box".to_string(),
            unit_price: Decimal::new(1050, 2), // 10.50
            quantity: 3,
            image_url: None,
        };
        assert_eq!(line.line_total(), Decimal::new(3150, 2));
    }

    #[test]
    fn test_serde_wire_names() {
        let line = CartLineItem {
            product_id: ProductId::new("p1"),
            name: "Sleeves".to_string(),
            unit_price: Decimal::new(499, 2),
            quantity: 1,
            image_url: None,
        };
        let json = serde_json::to_value(&line).unwrap();
        assert!(json.get("price").is_some());
        assert!(json.get("unit_price").is_none());
    }
}
