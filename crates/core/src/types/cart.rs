//! The cart and its state transitions.
//!
//! Every mutation consumes the current [`Cart`] and returns the next one.
//! Transitions never validate; the store normalizes whatever they produce
//! before it is persisted.

use serde::{Deserialize, Serialize};

use super::{LineItem, ProductId};

/// A product being added to the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub image: Option<String>,
}

impl NewItem {
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: None,
        }
    }

    /// Attach a thumbnail; empty strings are treated as no image.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        let image = image.into();
        self.image = (!image.is_empty()).then_some(image);
        self
    }
}

/// An ordered list of line items, in display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart(Vec<LineItem>);

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LineItem> {
        self.0.iter()
    }

    /// Number of rows (not units; see [`Cart::item_count`]).
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.0.iter().find(|item| item.id == *id)
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    /// Sum of `price * quantity` over every row.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.0.iter().map(LineItem::line_total).sum()
    }

    /// Sum of quantities, used for the cart badge.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.0
            .iter()
            .fold(0_u32, |count, item| count.saturating_add(item.quantity))
    }

    /// Add one unit of a product.
    ///
    /// An existing row gains one unit and picks up the new image if it had
    /// none; otherwise a row with quantity 1 is appended.
    #[must_use]
    pub fn add_item(mut self, new: NewItem) -> Self {
        if let Some(existing) = self.get_mut(&new.id) {
            existing.quantity = existing.quantity.saturating_add(1);
            if existing.image.is_empty()
                && let Some(image) = new.image
            {
                existing.image = image;
            }
            return self;
        }

        self.0.push(LineItem {
            id: new.id,
            name: new.name,
            price: new.price,
            quantity: 1,
            image: new.image.unwrap_or_default(),
        });
        self
    }

    /// Remove one unit of a product, dropping the row when it reaches zero.
    #[must_use]
    pub fn decrement_item(mut self, id: &ProductId) -> Self {
        let Some(item) = self.get_mut(id) else {
            return self;
        };
        if item.quantity > 1 {
            item.quantity -= 1;
            return self;
        }
        self.remove_item(id)
    }

    /// Drop the row for a product.
    #[must_use]
    pub fn remove_item(mut self, id: &ProductId) -> Self {
        self.0.retain(|item| item.id != *id);
        self
    }

    /// Consumes the cart and returns its rows.
    #[must_use]
    pub fn into_items(self) -> Vec<LineItem> {
        self.0
    }

    fn get_mut(&mut self, id: &ProductId) -> Option<&mut LineItem> {
        self.0.iter_mut().find(|item| item.id == *id)
    }
}

impl From<Vec<LineItem>> for Cart {
    fn from(items: Vec<LineItem>) -> Self {
        Self(items)
    }
}

impl FromIterator<LineItem> for Cart {
    fn from_iter<I: IntoIterator<Item = LineItem>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Cart {
    type Item = LineItem;
    type IntoIter = std::vec::IntoIter<LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a LineItem;
    type IntoIter = std::slice::Iter<'a, LineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
