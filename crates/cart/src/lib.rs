//! Artisan Cart - Persisted shopping-cart store.
//!
//! This crate owns the cart's durable state:
//! - [`CartStore`] - load/save with a read cache, plus add/decrement/remove/clear
//! - [`Storage`] - synchronous string key-value backends (memory, file)
//! - [`CartSummary`] - formatted view model for the rendering layer
//! - [`Checkout`] - payment selection and order confirmation
//!
//! # Failure model
//!
//! Store operations never return errors. Storage failures and corrupted data
//! degrade to an empty or last-known-good cart and are reported through
//! `tracing`. [`CartStore::reload`] exposes what happened during a read for
//! callers that need to know.
//!
//! # Example
//!
//! ```
//! use artisan_cart::{CartStore, MemoryStorage};
//!
//! let mut store = CartStore::new(MemoryStorage::new());
//! store.add_item(7_u32, "Croissant", 1.2, None);
//! store.add_item("7", "Croissant", 1.2, None);
//!
//! assert_eq!(store.item_count(), 2);
//! assert!((store.total() - 2.4).abs() < 1e-9);
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod checkout;
pub mod config;
pub mod notification;
pub mod storage;
pub mod store;
pub mod summary;

pub use checkout::{Checkout, CheckoutError, OrderConfirmation, PaymentMethod, PendingOrder};
pub use config::{CartConfig, ConfigError};
pub use notification::Notification;
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError};
pub use store::{CartStore, LoadReport, LoadStatus, ResetReason};
pub use summary::{CartItemSummary, CartSummary};
