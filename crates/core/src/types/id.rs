//! Product identifiers.
//!
//! Catalog ids arrive as numbers from product markup and as strings from
//! persisted carts. Both are folded into one canonical string form so that
//! `7` and `"7"` name the same product.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::coerce;

/// Errors that can occur when parsing a [`ProductId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductIdError {
    /// The input string is empty.
    #[error("product id cannot be empty")]
    Empty,
}

/// A catalog product identifier in canonical string form.
///
/// Equality is plain string equality of the canonical form.
///
/// ## Examples
///
/// ```
/// use artisan_core::ProductId;
///
/// assert_eq!(ProductId::from(7_u32), ProductId::from("7"));
/// assert!(ProductId::parse("").is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Parse a non-empty `ProductId` from a string.
    ///
    /// # Errors
    ///
    /// Returns [`ProductIdError::Empty`] if the input is empty.
    pub fn parse(s: &str) -> Result<Self, ProductIdError> {
        if s.is_empty() {
            return Err(ProductIdError::Empty);
        }
        Ok(Self(s.to_owned()))
    }

    /// Coerce a loosely-typed JSON value into its canonical id form.
    ///
    /// Falsy values (`null`, `false`, `0`, `""`) coerce to the empty id.
    #[must_use]
    pub fn from_json(value: &serde_json::Value) -> Self {
        Self(coerce::to_text(value))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the id is empty (never valid inside a cart).
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consumes the `ProductId` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for ProductId {
    type Err = ProductIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for ProductId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&String> for ProductId {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

impl From<&Self> for ProductId {
    fn from(id: &Self) -> Self {
        id.clone()
    }
}

macro_rules! impl_from_integer {
    ($($int:ty),*) => {
        $(
            impl From<$int> for ProductId {
                fn from(id: $int) -> Self {
                    Self(id.to_string())
                }
            }
        )*
    };
}

impl_from_integer!(u32, u64, i32, i64);
