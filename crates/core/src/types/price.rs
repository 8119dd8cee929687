//! Price formatting.
//!
//! Prices are plain `f64` amounts in the store currency (Tunisian dinar by
//! default, which is quoted with three decimals).

use serde::{Deserialize, Serialize};

/// How amounts are rendered for display, e.g. `"1.200 DT"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceFormat {
    /// Currency label appended after the amount.
    pub currency: String,
    /// Digits after the decimal point.
    pub decimals: usize,
}

impl PriceFormat {
    /// Default currency label.
    pub const DEFAULT_CURRENCY: &'static str = "DT";
    /// Default number of decimals.
    pub const DEFAULT_DECIMALS: usize = 3;

    #[must_use]
    pub fn new(currency: impl Into<String>, decimals: usize) -> Self {
        Self {
            currency: currency.into(),
            decimals,
        }
    }

    /// Format an amount for display.
    #[must_use]
    pub fn format(&self, amount: f64) -> String {
        if self.currency.is_empty() {
            format!("{amount:.prec$}", prec = self.decimals)
        } else {
            format!("{amount:.prec$} {}", self.currency, prec = self.decimals)
        }
    }
}

impl Default for PriceFormat {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CURRENCY, Self::DEFAULT_DECIMALS)
    }
}
