//! Integration tests for the Artisan shopping cart.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p artisan-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_store` - Store behavior over in-memory storage
//! - `file_storage` - Persistence across store instances on disk
//! - `checkout` - Checkout flow against a persisted cart
//! - `properties` - Normalization and operation sequences under random input
