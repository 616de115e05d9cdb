//! Pure shape mapping between the cart and the backend checkout endpoints.
//!
//! The cart's contents are handed to the backend untouched except for this
//! mapping; optimized line figures come back from the backend and are
//! echoed into the checkout submission verbatim.

use card_compass_core::{CartLineItem, CustomerId};

use crate::backend::{
    CheckoutRequest, OptimizationResponse, OptimizeRequest, OptimizeRequestItem, ShippingAddress,
};

/// Map cart lines to the optimizer's `{product_id, quantity}` shape.
#[must_use]
pub fn optimize_items(lines: &[CartLineItem]) -> Vec<OptimizeRequestItem> {
    lines
        .iter()
        .map(|line| OptimizeRequestItem {
            product_id: line.product_id.clone(),
            quantity: line.quantity,
        })
        .collect()
}

/// Build the `POST /api/cart/optimize` request body.
#[must_use]
pub fn optimize_request(lines: &[CartLineItem], shipping_address: ShippingAddress) -> OptimizeRequest {
    OptimizeRequest {
        items: optimize_items(lines),
        shipping_address,
    }
}

/// Build the `POST /api/checkout` request body from an optimization result.
///
/// `save_payment_method` is only honored for registered users, matching the
/// backend contract.
#[must_use]
pub fn checkout_request(
    optimized: &OptimizationResponse,
    customer_email: String,
    shipping_address: ShippingAddress,
    user_id: Option<CustomerId>,
    save_payment_method: bool,
) -> CheckoutRequest {
    let save_payment_method = user_id.is_some() && save_payment_method;
    CheckoutRequest {
        items: optimized.items.clone(),
        customer_email,
        shipping_address,
        user_id,
        save_payment_method,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use card_compass_core::ProductId;
    use rust_decimal::Decimal;

    fn line(id: &str, quantity: u32) -> CartLineItem {
        CartLineItem {
            product_id: ProductId::new(id),
            name: format!("Product {id}"),
            unit_price: Decimal::new(999, 2),
            quantity,
            image_url: None,
        }
    }

    fn optimization() -> OptimizationResponse {
        serde_json::from_str(
            r#"{
                "strategy": "split",
                "items": [],
                "total_product_price": 0.0,
                "total_shipping_cost": 0.0,
                "total_price": 0.0,
                "savings": 0.0,
                "currency": "CAD"
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_optimize_items_maps_id_and_quantity_only() {
        let items = optimize_items(&[line("p1", 2), line("p2", 1)]);
        assert_eq!(
            items,
            vec![
                OptimizeRequestItem {
                    product_id: ProductId::new("p1"),
                    quantity: 2,
                },
                OptimizeRequestItem {
                    product_id: ProductId::new("p2"),
                    quantity: 1,
                },
            ]
        );
    }

    #[test]
    fn test_save_payment_method_requires_user_id() {
        let request = checkout_request(
            &optimization(),
            "a@example.com".to_string(),
            ShippingAddress::default(),
            None,
            true,
        );
        assert!(!request.save_payment_method);

        let request = checkout_request(
            &optimization(),
            "a@example.com".to_string(),
            ShippingAddress::default(),
            Some(CustomerId::new("u1")),
            true,
        );
        assert!(request.save_payment_method);
    }
}
