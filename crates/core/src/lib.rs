//! Card Compass Core - Shared types library.
//!
//! This crate provides common types used across all Card Compass components:
//! - `storefront` - Headless client core (cart, catalog, backend API)
//! - `cli` - Command-line tools for browsing and checkout
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients,
//! no persistence. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype IDs, money display, product and cart line types

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
