//! Card Compass CLI - catalog browsing, cart management, and checkout.
//!
//! # Usage
//!
//! ```bash
//! # Browse the first two pages of the "boxes" category
//! cc-cli products list -c boxes --pages 2
//!
//! # Search and sort the reconciled catalog
//! cc-cli products list --search "booster" --sort price-asc
//!
//! # Manage the persisted cart
//! cc-cli cart add -p prod-1 -n "Booster Box" --price 129.99 -q 2
//! cc-cli cart show
//! cc-cli cart set-quantity -p prod-1 -q 1
//! cc-cli cart remove -p prod-1
//! cc-cli cart clear
//!
//! # Optimize shipping and check out
//! cc-cli checkout optimize --city Toronto --postal-code "M5V 1A1"
//! cc-cli checkout submit --email you@example.com --city Toronto --postal-code "M5V 1A1"
//! ```
//!
//! # Commands
//!
//! - `products list` - Fetch, reconcile, and display the product catalog
//! - `cart` - Mutate and inspect the persisted cart
//! - `checkout` - Run the backend cart optimizer and submit an order

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

use card_compass_storefront::catalog::SortOption;
use card_compass_storefront::config::StorefrontConfig;
use card_compass_storefront::state::AppState;

mod commands;

#[derive(Parser)]
#[command(name = "cc-cli")]
#[command(author, version, about = "Card Compass CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Manage the persisted cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Optimize and submit an order
    Checkout {
        #[command(subcommand)]
        action: CheckoutAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// Fetch, reconcile, and display the catalog
    List {
        /// Category filter (omit for all categories)
        #[arg(short, long)]
        category: Option<String>,

        /// Number of pages to fetch
        #[arg(long, default_value_t = 1)]
        pages: u32,

        /// Client-side name/category search term
        #[arg(long)]
        search: Option<String>,

        /// Client-side sort order
        #[arg(long, value_enum, default_value_t = SortArg::Featured)]
        sort: SortArg,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Display the cart and its total
    Show,
    /// Add a product to the cart
    Add {
        /// Product id
        #[arg(short, long)]
        product_id: String,

        /// Display name
        #[arg(short, long)]
        name: String,

        /// Display unit price (server re-derives authoritative pricing)
        #[arg(long)]
        price: Decimal,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,

        /// Image URL
        #[arg(long)]
        image_url: Option<String>,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        #[arg(short, long)]
        product_id: String,
    },
    /// Overwrite a line's quantity
    SetQuantity {
        /// Product id
        #[arg(short, long)]
        product_id: String,

        /// New quantity (minimum 1)
        #[arg(short, long)]
        quantity: u32,
    },
    /// Empty the cart
    Clear,
}

#[derive(clap::Args)]
struct AddressArgs {
    /// Recipient name
    #[arg(long, default_value = "")]
    name: String,

    /// Street address
    #[arg(long, default_value = "")]
    street: String,

    /// City
    #[arg(long)]
    city: String,

    /// Province or state code
    #[arg(long, default_value = "ON")]
    province: String,

    /// Postal code
    #[arg(long)]
    postal_code: String,

    /// Country code
    #[arg(long, default_value = "CA")]
    country: String,
}

#[derive(Subcommand)]
enum CheckoutAction {
    /// Run the backend shipping optimizer over the cart
    Optimize {
        #[command(flatten)]
        address: AddressArgs,
    },
    /// Optimize, then submit the order
    Submit {
        /// Customer email
        #[arg(short, long)]
        email: String,

        #[command(flatten)]
        address: AddressArgs,

        /// Registered user id, for saved payment methods
        #[arg(long)]
        user_id: Option<String>,

        /// Save the payment method for future checkouts (registered users)
        #[arg(long, default_value_t = false)]
        save_payment_method: bool,
    },
}

/// Clap-facing mirror of [`SortOption`].
#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Featured,
    PriceAsc,
    PriceDesc,
    Rating,
    Name,
}

impl From<SortArg> for SortOption {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Featured => Self::Featured,
            SortArg::PriceAsc => Self::PriceLowToHigh,
            SortArg::PriceDesc => Self::PriceHighToLow,
            SortArg::Rating => Self::Rating,
            SortArg::Name => Self::Name,
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let state = AppState::new(config)?;

    match cli.command {
        Commands::Products { action } => match action {
            ProductsAction::List {
                category,
                pages,
                search,
                sort,
            } => {
                commands::catalog::list(
                    &state,
                    category,
                    pages,
                    search.as_deref(),
                    sort.into(),
                )
                .await?;
            }
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state),
            CartAction::Add {
                product_id,
                name,
                price,
                quantity,
                image_url,
            } => commands::cart::add(&state, &product_id, name, price, quantity, image_url)?,
            CartAction::Remove { product_id } => commands::cart::remove(&state, &product_id),
            CartAction::SetQuantity {
                product_id,
                quantity,
            } => commands::cart::set_quantity(&state, &product_id, quantity)?,
            CartAction::Clear => commands::cart::clear(&state),
        },
        Commands::Checkout { action } => match action {
            CheckoutAction::Optimize { address } => {
                commands::checkout::optimize(&state, address.into()).await?;
            }
            CheckoutAction::Submit {
                email,
                address,
                user_id,
                save_payment_method,
            } => {
                commands::checkout::submit(
                    &state,
                    email,
                    address.into(),
                    user_id,
                    save_payment_method,
                )
                .await?;
            }
        },
    }

    Ok(())
}

impl From<AddressArgs> for card_compass_storefront::backend::ShippingAddress {
    fn from(args: AddressArgs) -> Self {
        Self {
            name: args.name,
            street: args.street,
            city: args.city,
            province: args.province,
            postal_code: args.postal_code,
            country: args.country,
        }
    }
}
