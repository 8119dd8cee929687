//! Order placement.

use artisan_cart::{CartStore, Checkout, Notification, PaymentMethod, Storage};
use artisan_core::PriceFormat;

use crate::CliError;

/// Place the order with the given payment method and clear the cart.
///
/// The command line has no confirmation dialog, so the order is
/// acknowledged as soon as it is accepted.
///
/// # Errors
///
/// Returns an error if the payment method is blank or the cart is empty.
pub fn place_order<S: Storage>(
    store: &mut CartStore<S>,
    payment: &str,
    format: &PriceFormat,
) -> Result<String, CliError> {
    let mut checkout = Checkout::new();
    checkout.select(PaymentMethod::parse(payment)?);

    let order = checkout.request(store).inspect_err(|e| {
        if let Some(notification) = e.notification() {
            tracing::warn!("{notification}");
        }
    })?;
    let confirmation = order.confirm(store);

    Ok(format!(
        "{}\nPaid by {}: {} item(s), {}",
        Notification::OrderConfirmed,
        confirmation.payment,
        confirmation.item_count,
        format.format(confirmation.total)
    ))
}
