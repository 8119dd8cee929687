//! Normalization of cart data.
//!
//! Normalization is the single gate every cart passes through on its way in
//! or out of storage: entries are coerced to typed line items, entries that
//! break an invariant are dropped, and later duplicates of an id are dropped
//! in favor of the first occurrence. Applying it twice yields the same cart.

use std::collections::HashSet;

use serde_json::Value;

use crate::{Cart, LineItem};

/// The persisted value is not a JSON array.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cart data is not a sequence")]
pub struct NotASequence;

/// A normalized cart and the number of entries that were discarded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    pub cart: Cart,
    pub dropped: usize,
}

impl Normalized {
    /// Returns `true` if nothing had to be discarded.
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.dropped == 0
    }
}

/// Normalize a raw persisted value.
///
/// # Errors
///
/// Returns [`NotASequence`] if `value` is not an array.
pub fn normalize_value(value: &Value) -> Result<Normalized, NotASequence> {
    let entries = value.as_array().ok_or(NotASequence)?;
    let decoded: Vec<Option<LineItem>> = entries.iter().map(LineItem::from_json).collect();
    let undecodable = decoded.iter().filter(|entry| entry.is_none()).count();

    let mut normalized = normalize_items(decoded.into_iter().flatten());
    normalized.dropped += undecodable;
    Ok(normalized)
}

/// Normalize typed line items.
///
/// A zero quantity is read as 1, as it is for persisted entries, so typed
/// and untyped saves keep the same rows.
pub fn normalize_items(items: impl IntoIterator<Item = LineItem>) -> Normalized {
    let mut seen = HashSet::new();
    let mut dropped = 0;

    let cart = items
        .into_iter()
        .map(|mut item| {
            if item.quantity == 0 {
                item.quantity = 1;
            }
            item
        })
        .filter(|item| {
            let keep = item.is_valid() && seen.insert(item.id.clone());
            if !keep {
                dropped += 1;
            }
            keep
        })
        .collect();

    Normalized { cart, dropped }
}
