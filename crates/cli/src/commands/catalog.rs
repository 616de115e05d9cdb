//! Catalog browsing commands.

use card_compass_core::{ProductRecord, display_amount};
use card_compass_storefront::catalog::{SortOption, search, sort_records};
use card_compass_storefront::error::Result;
use card_compass_storefront::state::AppState;

/// Fetch `pages` catalog pages for `category`, reconcile them, and print
/// the resulting list after optional client-side search and sort.
pub async fn list(
    state: &AppState,
    category: Option<String>,
    pages: u32,
    search_term: Option<&str>,
    sort: SortOption,
) -> Result<()> {
    state.set_category(category);

    for _ in 0..pages {
        if state.catalog().remaining() == Some(0) {
            break;
        }
        state.load_more().await?;
    }

    let mut records = match search_term {
        Some(term) => search(state.catalog().products(), term),
        None => state.catalog().products().to_vec(),
    };
    sort_records(&mut records, sort);

    print_records(&records, state.catalog().remaining());
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_records(records: &[ProductRecord], remaining: Option<u64>) {
    if records.is_empty() {
        println!("No products found.");
        return;
    }

    for record in records {
        let price = record
            .best_price
            .map_or_else(|| "price unknown".to_string(), display_amount);
        let stock = if record.in_stock {
            "in stock"
        } else {
            "out of stock"
        };
        println!(
            "{:<12} {:<40} {:<14} {}",
            record.id, record.name, price, stock
        );
    }

    println!();
    match remaining {
        Some(0) => println!("{} products (end of catalog)", records.len()),
        Some(n) => println!("{} products ({n} more available)", records.len()),
        None => println!("{} products", records.len()),
    }
}
