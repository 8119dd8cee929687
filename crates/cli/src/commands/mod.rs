//! CLI command implementations.
//!
//! Commands return the text to print; `main` owns stdout.

pub mod cart;
pub mod checkout;
