//! Cart display data.
//!
//! The rendering layer pulls a [`CartSummary`] after every mutation and
//! turns it into markup. Prices arrive pre-formatted so every view shows
//! amounts the same way.

use artisan_core::{Cart, LineItem, PriceFormat};
use serde::Serialize;

/// Line item display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartItemSummary {
    pub id: String,
    pub name: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
    pub image: Option<String>,
}

/// Cart display data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    pub items: Vec<CartItemSummary>,
    pub subtotal: String,
    pub total: String,
    /// Badge count (sum of quantities).
    pub item_count: u32,
    pub is_empty: bool,
}

impl CartSummary {
    /// Create an empty cart summary.
    #[must_use]
    pub fn empty(format: &PriceFormat) -> Self {
        Self {
            items: Vec::new(),
            subtotal: format.format(0.0),
            total: format.format(0.0),
            item_count: 0,
            is_empty: true,
        }
    }

    /// Build the summary of a cart.
    ///
    /// There are no fees or discounts, so the total equals the subtotal.
    #[must_use]
    pub fn from_cart(cart: &Cart, format: &PriceFormat) -> Self {
        if cart.is_empty() {
            return Self::empty(format);
        }

        let subtotal = format.format(cart.total());
        Self {
            items: cart
                .iter()
                .map(|item| CartItemSummary::from_item(item, format))
                .collect(),
            total: subtotal.clone(),
            subtotal,
            item_count: cart.item_count(),
            is_empty: false,
        }
    }
}

impl CartItemSummary {
    #[must_use]
    pub fn from_item(item: &LineItem, format: &PriceFormat) -> Self {
        Self {
            id: item.id.to_string(),
            name: item.name.clone(),
            quantity: item.quantity,
            unit_price: format.format(item.price),
            line_total: format.format(item.line_total()),
            image: item.image().map(str::to_owned),
        }
    }
}
