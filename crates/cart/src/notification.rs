//! Banner messages shown to the shopper.
//!
//! The store emits no events; callers pick the notification matching the
//! operation they just ran.

use core::fmt;

/// A short user-facing message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// A product was added to the cart.
    Added { name: String },
    /// Checkout was attempted with nothing in the cart.
    EmptyCart,
    /// Checkout was attempted without choosing a payment method.
    NoPaymentSelected,
    /// The order was confirmed and the cart cleared.
    OrderConfirmed,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Added { name } => write!(f, "{name} ajouté au panier"),
            Self::EmptyCart => f.write_str("Votre panier est vide"),
            Self::NoPaymentSelected => f.write_str("Veuillez sélectionner un moyen de paiement"),
            Self::OrderConfirmed => f.write_str(
                "Merci pour votre commande ! Votre commande a bien été prise en compte.",
            ),
        }
    }
}
