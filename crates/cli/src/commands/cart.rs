//! Cart management commands.

use card_compass_core::{CartLineItem, ProductId, display_amount};
use card_compass_storefront::error::Result;
use card_compass_storefront::state::AppState;
use rust_decimal::Decimal;

/// Display the cart contents and total.
#[allow(clippy::print_stdout)]
pub fn show(state: &AppState) {
    let cart = state.cart();

    if cart.is_empty() {
        println!("Cart is empty.");
        return;
    }

    for line in cart.items() {
        println!(
            "{:<12} {:<40} {:>3} x {:<10} = {}",
            line.product_id,
            line.name,
            line.quantity,
            display_amount(line.unit_price),
            display_amount(line.line_total()),
        );
    }
    println!();
    println!(
        "{} items, total {}",
        cart.item_count(),
        display_amount(cart.total_price())
    );
}

/// Add a product to the cart.
#[allow(clippy::print_stdout)]
pub fn add(
    state: &AppState,
    product_id: &str,
    name: String,
    price: Decimal,
    quantity: u32,
    image_url: Option<String>,
) -> Result<()> {
    state.cart().add_item(CartLineItem {
        product_id: ProductId::new(product_id),
        name,
        unit_price: price,
        quantity,
        image_url,
    })?;

    println!("Added {quantity} x {product_id}.");
    Ok(())
}

/// Remove a product from the cart.
#[allow(clippy::print_stdout)]
pub fn remove(state: &AppState, product_id: &str) {
    state.cart().remove_item(&ProductId::new(product_id));
    println!("Removed {product_id}.");
}

/// Overwrite a line's quantity.
#[allow(clippy::print_stdout)]
pub fn set_quantity(state: &AppState, product_id: &str, quantity: u32) -> Result<()> {
    state
        .cart()
        .update_quantity(&ProductId::new(product_id), quantity)?;
    println!("Set {product_id} to quantity {quantity}.");
    Ok(())
}

/// Empty the cart.
#[allow(clippy::print_stdout)]
pub fn clear(state: &AppState) {
    state.cart().clear();
    println!("Cart cleared.");
}
