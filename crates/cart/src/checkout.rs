//! Checkout flow.
//!
//! There is no payment processing. Checkout checks that the cart has items
//! and that a payment method was picked, shows a confirmation, and clears
//! the cart once the shopper acknowledges it.
//!
//! ```
//! use artisan_cart::{CartStore, Checkout, MemoryStorage, PaymentMethod};
//!
//! let mut store = CartStore::new(MemoryStorage::new());
//! store.add_item("1", "Baguette", 0.9, None);
//!
//! let mut checkout = Checkout::new();
//! checkout.select(PaymentMethod::parse("cash").unwrap());
//!
//! let order = checkout.request(&mut store).unwrap();
//! let confirmation = order.confirm(&mut store);
//! assert_eq!(confirmation.item_count, 1);
//! assert_eq!(store.item_count(), 0);
//! ```

use core::fmt;

use artisan_core::Cart;
use thiserror::Error;

use crate::notification::Notification;
use crate::storage::Storage;
use crate::store::CartStore;

/// Reasons checkout cannot proceed.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckoutError {
    /// The cart has no items.
    #[error("Cart is empty")]
    EmptyCart,

    /// No payment method was selected.
    #[error("No payment method selected")]
    NoPaymentSelected,

    /// The payment method identifier is blank.
    #[error("Invalid payment method: {0:?}")]
    InvalidPaymentMethod(String),
}

impl CheckoutError {
    /// The banner to show for this error, if the shopper should see one.
    #[must_use]
    pub fn notification(&self) -> Option<Notification> {
        match self {
            Self::EmptyCart => Some(Notification::EmptyCart),
            Self::NoPaymentSelected => Some(Notification::NoPaymentSelected),
            Self::InvalidPaymentMethod(_) => None,
        }
    }
}

/// A payment method identifier, as carried by the page's payment options.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PaymentMethod(String);

impl PaymentMethod {
    /// Parse a payment method, trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidPaymentMethod`] if nothing remains.
    pub fn parse(s: &str) -> Result<Self, CheckoutError> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CheckoutError::InvalidPaymentMethod(s.to_owned()));
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = CheckoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Payment selection state for one visit to the cart.
#[derive(Debug, Clone, Default)]
pub struct Checkout {
    selected: Option<PaymentMethod>,
}

impl Checkout {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, method: PaymentMethod) {
        self.selected = Some(method);
    }

    /// Clear the selection; done whenever the cart is reopened.
    pub fn reset(&mut self) {
        self.selected = None;
    }

    #[must_use]
    pub const fn selected(&self) -> Option<&PaymentMethod> {
        self.selected.as_ref()
    }

    /// Check that the order can be placed.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] if the cart has no items, then
    /// [`CheckoutError::NoPaymentSelected`] if no payment method is selected.
    pub fn request<S: Storage>(
        &self,
        store: &mut CartStore<S>,
    ) -> Result<PendingOrder, CheckoutError> {
        let cart = store.load();
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let payment = self
            .selected
            .clone()
            .ok_or(CheckoutError::NoPaymentSelected)?;

        Ok(PendingOrder {
            payment,
            cart: cart.clone(),
        })
    }
}

/// An order awaiting the shopper's acknowledgement.
///
/// Dropping it without calling [`PendingOrder::confirm`] leaves the cart
/// untouched.
#[derive(Debug, Clone)]
#[must_use = "the cart is only cleared once the order is confirmed"]
pub struct PendingOrder {
    payment: PaymentMethod,
    cart: Cart,
}

impl PendingOrder {
    #[must_use]
    pub const fn payment(&self) -> &PaymentMethod {
        &self.payment
    }

    /// The cart as it was when checkout was requested.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Acknowledge the order and clear the cart.
    pub fn confirm<S: Storage>(self, store: &mut CartStore<S>) -> OrderConfirmation {
        store.clear();
        tracing::info!(
            payment = %self.payment,
            item_count = self.cart.item_count(),
            "Order confirmed"
        );

        OrderConfirmation {
            item_count: self.cart.item_count(),
            total: self.cart.total(),
            payment: self.payment,
        }
    }
}

/// Summary of a confirmed order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfirmation {
    pub payment: PaymentMethod,
    pub item_count: u32,
    pub total: f64,
}
