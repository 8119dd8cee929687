//! Core types for the Artisan cart.
//!
//! This module provides type-safe wrappers for the cart's domain concepts.

pub mod cart;
pub mod id;
pub mod line_item;
pub mod price;

pub use cart::{Cart, NewItem};
pub use id::{ProductId, ProductIdError};
pub use line_item::{LineItem, LineItemError};
pub use price::PriceFormat;
