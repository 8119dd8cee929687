//! Cart line items.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ProductId;
use crate::coerce;

/// Errors that can occur when constructing a [`LineItem`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum LineItemError {
    /// The product id is empty.
    #[error("line item id cannot be empty")]
    EmptyId,
    /// The display name is empty.
    #[error("line item name cannot be empty")]
    EmptyName,
    /// The price is not a finite, strictly positive number.
    #[error("line item price must be greater than zero, got {0}")]
    InvalidPrice(f64),
    /// The quantity is zero.
    #[error("line item quantity must be at least 1")]
    ZeroQuantity,
}

/// One row in the cart.
///
/// ## Constraints
///
/// - `id` and `name` are non-empty
/// - `price` is finite and strictly positive
/// - `quantity` is at least 1
///
/// Fields are public so the pure transitions in [`Cart`](super::Cart) can
/// adjust them; anything that reaches storage is re-checked with
/// [`LineItem::validate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Product identifier, unique within a cart.
    pub id: ProductId,
    /// Display label.
    pub name: String,
    /// Unit price in the store currency.
    pub price: f64,
    /// Number of units, at least 1.
    pub quantity: u32,
    /// Thumbnail URL or path, empty when unknown.
    #[serde(default)]
    pub image: String,
}

impl LineItem {
    /// Create a validated line item.
    ///
    /// # Errors
    ///
    /// Returns the first [`LineItemError`] the fields violate.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: f64,
        quantity: u32,
        image: impl Into<String>,
    ) -> Result<Self, LineItemError> {
        let item = Self {
            id: id.into(),
            name: name.into(),
            price,
            quantity,
            image: image.into(),
        };
        item.validate()?;
        Ok(item)
    }

    /// Check the line item invariants.
    ///
    /// # Errors
    ///
    /// Returns the first [`LineItemError`] the fields violate.
    pub fn validate(&self) -> Result<(), LineItemError> {
        if self.id.is_empty() {
            return Err(LineItemError::EmptyId);
        }
        if self.name.is_empty() {
            return Err(LineItemError::EmptyName);
        }
        if !(self.price.is_finite() && self.price > 0.0) {
            return Err(LineItemError::InvalidPrice(self.price));
        }
        if self.quantity == 0 {
            return Err(LineItemError::ZeroQuantity);
        }
        Ok(())
    }

    /// Returns `true` if every invariant holds.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Decode a loosely-typed persisted entry.
    ///
    /// Every field is coerced (see [`coerce`]); an entry that is not an
    /// object yields empty fields. Quantities above `u32::MAX` saturate.
    /// Returns `None` only when the coerced quantity is negative; other
    /// invariants are left to [`LineItem::validate`].
    #[must_use]
    pub fn from_json(entry: &Value) -> Option<Self> {
        let quantity = coerce::to_quantity(field(entry, "quantity"));
        if quantity < 1 {
            return None;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);

        Some(Self {
            id: ProductId::from_json(field(entry, "id")),
            name: coerce::to_text(field(entry, "name")),
            price: coerce::to_price(field(entry, "price")),
            quantity,
            image: coerce::to_text(field(entry, "image")),
        })
    }

    /// Price of the whole row (`price * quantity`).
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    /// Returns the image if one is set.
    #[must_use]
    pub fn image(&self) -> Option<&str> {
        (!self.image.is_empty()).then_some(self.image.as_str())
    }
}

static MISSING: Value = Value::Null;

fn field<'a>(entry: &'a Value, name: &str) -> &'a Value {
    entry.get(name).unwrap_or(&MISSING)
}
