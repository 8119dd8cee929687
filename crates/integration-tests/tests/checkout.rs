//! Integration tests for the checkout flow.

use artisan_cart::{
    CartStore, CartSummary, Checkout, CheckoutError, FileStorage, MemoryStorage, Notification,
    PaymentMethod,
};
use artisan_core::PriceFormat;
use tempfile::TempDir;

#[test]
fn empty_cart_is_refused_before_payment_check() {
    let mut store = CartStore::new(MemoryStorage::new());
    let checkout = Checkout::new();

    let err = checkout.request(&mut store).unwrap_err();
    assert_eq!(err, CheckoutError::EmptyCart);
    assert_eq!(err.notification(), Some(Notification::EmptyCart));
}

#[test]
fn missing_payment_is_refused() {
    let mut store = CartStore::new(MemoryStorage::new());
    store.add_item("1", "Pain", 1.5, None);

    let err = Checkout::new().request(&mut store).unwrap_err();
    assert_eq!(
        err.notification().unwrap().to_string(),
        "Veuillez sélectionner un moyen de paiement"
    );
}

#[test]
fn confirmed_order_empties_persisted_cart() {
    let dir = TempDir::new().unwrap();
    let mut store = CartStore::new(FileStorage::new(dir.path()));
    store.add_item("1", "Pain", 1.5, None);
    store.add_item("2", "Tarte", 3.0, None);

    let mut checkout = Checkout::new();
    checkout.select(PaymentMethod::parse("card").unwrap());
    let order = checkout.request(&mut store).unwrap();

    let summary = CartSummary::from_cart(order.cart(), &PriceFormat::default());
    assert_eq!(summary.total, "4.500 DT");

    let confirmation = order.confirm(&mut store);
    assert_eq!(confirmation.item_count, 2);
    assert_eq!(confirmation.payment.as_str(), "card");

    let mut reopened = CartStore::new(FileStorage::new(dir.path()));
    assert!(reopened.load().is_empty());
}

#[test]
fn reopening_cart_resets_payment_selection() {
    let mut store = CartStore::new(MemoryStorage::new());
    store.add_item("1", "Pain", 1.5, None);

    let mut checkout = Checkout::new();
    checkout.select(PaymentMethod::parse("cash").unwrap());
    checkout.reset();

    assert_eq!(
        checkout.request(&mut store).unwrap_err(),
        CheckoutError::NoPaymentSelected
    );
    assert_eq!(store.item_count(), 1);
}
