//! Checkout commands: shipping optimization and order submission.

use card_compass_core::{CustomerId, display_amount};
use card_compass_storefront::backend::{OptimizationResponse, ShippingAddress};
use card_compass_storefront::checkout::{checkout_request, optimize_request};
use card_compass_storefront::error::{AppError, Result};
use card_compass_storefront::state::AppState;

/// Run the backend shipping optimizer over the current cart and print the
/// recommended fulfillment plan.
pub async fn optimize(state: &AppState, address: ShippingAddress) -> Result<OptimizationResponse> {
    let lines = {
        let cart = state.cart();
        if cart.is_empty() {
            return Err(AppError::BadRequest("cart is empty".to_string()));
        }
        cart.items().to_vec()
    };

    let request = optimize_request(&lines, address);
    let response = state.backend().optimize_cart(&request).await?;

    print_optimization(&response);
    Ok(response)
}

/// Optimize, submit the order, and clear the cart on success.
#[allow(clippy::print_stdout)]
pub async fn submit(
    state: &AppState,
    email: String,
    address: ShippingAddress,
    user_id: Option<String>,
    save_payment_method: bool,
) -> Result<()> {
    let optimized = optimize(state, address.clone()).await?;

    let request = checkout_request(
        &optimized,
        email,
        address,
        user_id.map(CustomerId::new),
        save_payment_method,
    );
    let response = state.backend().submit_checkout(&request).await?;

    // The order is accepted server-side; the persisted cart is done.
    state.cart().clear();

    if let Some(hosted) = response.shopify_checkout {
        println!("Complete payment at: {}", hosted.url);
    }
    for redirect in &response.affiliate_redirects {
        let name = redirect.affiliate_name.as_deref().unwrap_or("affiliate");
        println!(
            "Purchase {} from {name}: {}",
            redirect.product_id, redirect.url
        );
    }

    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_optimization(response: &OptimizationResponse) {
    println!("Strategy: {}", response.strategy);
    for item in &response.items {
        println!(
            "{:<12} {:>3} x {:<10} from {:<20} shipping {:<10} total {}",
            item.product_id,
            item.quantity,
            display_amount(item.unit_price),
            item.source_name,
            display_amount(item.shipping_total),
            display_amount(item.total_price),
        );
    }
    println!();
    println!("Products: {}", display_amount(response.total_product_price));
    println!("Shipping: {}", display_amount(response.total_shipping_cost));
    if response.savings > rust_decimal::Decimal::ZERO {
        println!("You save: {}", display_amount(response.savings));
    }
    println!(
        "Total:    {} {}",
        display_amount(response.total_price),
        response.currency
    );
}
