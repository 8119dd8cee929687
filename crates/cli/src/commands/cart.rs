//! Cart inspection and editing commands.

use std::fmt::Write as _;

use artisan_cart::{CartStore, CartSummary, LoadStatus, Notification, ResetReason, Storage};
use artisan_core::{PriceFormat, coerce};

use crate::CliError;

/// Render the cart as a table, or as JSON.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn show<S: Storage>(
    store: &mut CartStore<S>,
    format: &PriceFormat,
    json: bool,
) -> Result<String, CliError> {
    let summary = CartSummary::from_cart(store.load(), format);
    if json {
        return Ok(serde_json::to_string_pretty(&summary)?);
    }
    Ok(render(&summary))
}

fn render(summary: &CartSummary) -> String {
    if summary.is_empty {
        return Notification::EmptyCart.to_string();
    }

    let mut out = String::new();
    for item in &summary.items {
        let _ = writeln!(
            out,
            "{:<8} {:<24} x{:<4} {:>14} {:>14}",
            item.id, item.name, item.quantity, item.unit_price, item.line_total
        );
    }
    let _ = writeln!(out, "Items: {}", summary.item_count);
    let _ = write!(out, "Total: {}", summary.total);
    out
}

/// Add one unit of a product.
///
/// `price` is read the way the storefront reads `data-price` attributes:
/// the leading number is used and anything unparsable becomes zero, which
/// the store then refuses for new rows.
pub fn add<S: Storage>(
    store: &mut CartStore<S>,
    id: &str,
    name: &str,
    price: &str,
    image: Option<&str>,
) -> String {
    let price = coerce::parse_float_prefix(price).unwrap_or(0.0);
    let before = quantity(store, id);
    store.add_item(id, name, price, image);

    if quantity(store, id) > before {
        let notification = Notification::Added {
            name: name.to_owned(),
        };
        tracing::info!(%id, "{notification}");
        notification.to_string()
    } else {
        tracing::warn!(%id, %name, price, "Item was not added to the cart");
        format!("{name} could not be added to the cart")
    }
}

/// Add one more unit of a product already in the cart.
pub fn increase<S: Storage>(store: &mut CartStore<S>, id: &str) -> String {
    let Some(item) = store.get(id) else {
        tracing::warn!(%id, "Cannot increase quantity of unknown item");
        return format!("Product {id} is not in the cart");
    };

    store.add_item(item.id, &item.name, item.price, None);
    quantity_line(store, id)
}

/// Remove one unit of a product.
pub fn decrease<S: Storage>(store: &mut CartStore<S>, id: &str) -> String {
    store.decrement_item(id);
    quantity_line(store, id)
}

/// Remove a product entirely.
pub fn remove<S: Storage>(store: &mut CartStore<S>, id: &str) -> String {
    store.remove_item(id);
    quantity_line(store, id)
}

/// Empty the cart.
pub fn clear<S: Storage>(store: &mut CartStore<S>) -> String {
    store.clear();
    tracing::info!("Cart cleared");
    Notification::EmptyCart.to_string()
}

pub fn total<S: Storage>(store: &mut CartStore<S>, format: &PriceFormat) -> String {
    format.format(store.total())
}

pub fn count<S: Storage>(store: &mut CartStore<S>) -> String {
    store.item_count().to_string()
}

/// Re-read stored data and describe what was found.
///
/// With `repair`, a cart that lost entries or was reset is written back so
/// the stored data matches what the store serves.
pub fn check<S: Storage>(store: &mut CartStore<S>, repair: bool) -> String {
    let report = store.reload();
    let mut message = match report.status {
        LoadStatus::Missing => "No cart stored".to_owned(),
        LoadStatus::Clean => format!("Cart is valid ({} rows)", report.cart.len()),
        LoadStatus::Repaired { dropped } => format!(
            "{dropped} invalid entries ignored, {} rows kept",
            report.cart.len()
        ),
        LoadStatus::Reset(reason) => format!("Stored cart is unusable: {}", describe(reason)),
    };

    let needs_repair = matches!(
        report.status,
        LoadStatus::Repaired { .. } | LoadStatus::Reset(ResetReason::Malformed | ResetReason::NotASequence)
    );
    if repair && needs_repair {
        tracing::info!(dropped = report.dropped(), "Rewriting stored cart");
        store.save(report.cart);
        message.push_str("\nStored cart rewritten");
    }
    message
}

const fn describe(reason: ResetReason) -> &'static str {
    match reason {
        ResetReason::Unreadable => "storage could not be read",
        ResetReason::Malformed => "not valid JSON",
        ResetReason::NotASequence => "not a list of items",
    }
}

fn quantity<S: Storage>(store: &mut CartStore<S>, id: &str) -> u32 {
    store.get(id).map_or(0, |item| item.quantity)
}

fn quantity_line<S: Storage>(store: &mut CartStore<S>, id: &str) -> String {
    match store.get(id) {
        Some(item) => format!("{}: {} in cart", item.name, item.quantity),
        None => format!("Product {id} is not in the cart"),
    }
}
