//! Card Compass Storefront library.
//!
//! The headless client core of the Card Compass marketplace: everything the
//! user-facing surfaces need that is not rendering. All business logic,
//! persistence, and payment processing live in the remote backend; this
//! crate owns the two pieces of client-side state with real invariants:
//!
//! - [`cart`] - the persisted shopping cart (one line per product, durable
//!   across sessions via an injected storage adapter)
//! - [`catalog`] - reconciliation of paginated, multi-source product feeds
//!   into one deduplicated, stably ordered list
//!
//! plus the thin collaborators around them: [`backend`] (REST client),
//! [`checkout`] (cart-to-request mapping), [`config`], and [`state`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod backend;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod state;
