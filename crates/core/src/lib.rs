//! Artisan Core - Cart types library.
//!
//! This crate provides the types and pure functions shared by all Artisan
//! cart components:
//! - `cart` - Persisted cart store, view model and checkout flow
//! - `cli` - Command-line front end over a file-backed store
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no storage
//! access, no logging. Every cart mutation is expressed here as a transition
//! from one [`Cart`] to the next; persistence lives in `artisan-cart`.
//!
//! # Modules
//!
//! - [`types`] - `ProductId`, `LineItem`, `Cart` and price formatting
//! - [`coerce`] - Loose value coercion for data read back from storage
//! - [`normalize`] - Validity and uniqueness filtering of raw cart data

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod coerce;
pub mod normalize;
pub mod types;

pub use normalize::{Normalized, NotASequence, normalize_items, normalize_value};
pub use types::*;
