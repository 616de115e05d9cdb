//! Core types for Card Compass.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod price;
pub mod product;

pub use cart::CartLineItem;
pub use id::*;
pub use price::display_amount;
pub use product::{ProductRecord, ProductSource};
