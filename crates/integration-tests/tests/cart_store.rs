//! Integration tests for `CartStore` over in-memory storage.

use artisan_cart::{CartStore, LoadStatus, MemoryStorage, ResetReason, Storage};
use artisan_core::{Cart, LineItem, ProductId};
use serde_json::{Value, json};

const KEY: &str = "artisan_boulangerie_cart";

fn store() -> CartStore<MemoryStorage> {
    CartStore::new(MemoryStorage::new())
}

fn store_with(raw: &str) -> CartStore<MemoryStorage> {
    let mut storage = MemoryStorage::new();
    storage.set_item(KEY, raw).unwrap();
    CartStore::new(storage)
}

fn stored(store: &CartStore<MemoryStorage>) -> Value {
    let raw = store.storage().get_item(KEY).unwrap().unwrap();
    serde_json::from_str(&raw).unwrap()
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

// ============================================================================
// Adding and removing
// ============================================================================

#[test]
fn add_to_empty_cart_persists_one_row() {
    let mut store = store();
    store.add_item("7", "Croissant", 1.2, Some("img/croissant.jpg"));

    assert_eq!(
        stored(&store),
        json!([{
            "id": "7",
            "name": "Croissant",
            "price": 1.2,
            "quantity": 1,
            "image": "img/croissant.jpg"
        }])
    );
}

#[test]
fn add_existing_increments_quantity() {
    let mut store = store();
    store.add_item("7", "Croissant", 1.2, None);
    store.add_item("7", "Croissant", 1.2, None);

    let cart = store.load();
    assert_eq!(cart.len(), 1);
    assert_eq!(cart.items()[0].quantity, 2);
}

#[test]
fn numeric_and_text_ids_are_the_same_product() {
    let mut store = store();
    store.add_item(7, "Croissant", 1.2, None);
    store.add_item("7", "Croissant", 1.2, None);

    assert_eq!(store.load().len(), 1);
    assert_eq!(store.get("7").unwrap().quantity, 2);
    assert_eq!(stored(&store)[0]["id"], "7");
}

#[test]
fn decrement_with_text_id_after_numeric_add() {
    let mut store = store();
    store.add_item(7_u32, "Croissant", 1.2, None);
    store.decrement_item("7");

    assert!(store.load().is_empty());
    assert_eq!(stored(&store), json!([]));
}

#[test]
fn remove_with_numeric_id_after_text_add() {
    let mut store = store();
    store.add_item("7", "Croissant", 1.2, None);
    store.add_item("7", "Croissant", 1.2, None);
    store.remove_item(7_u32);

    assert!(store.load().is_empty());
    assert_eq!(stored(&store), json!([]));
}

#[test]
fn decrement_to_zero_removes_row() {
    let mut store = store();
    store.add_item("1", "Pain", 1.5, None);
    store.decrement_item("1");

    assert!(store.load().is_empty());
    assert_eq!(stored(&store), json!([]));
}

#[test]
fn decrement_unknown_id_is_a_no_op() {
    let mut store = store();
    store.decrement_item("missing");
    assert_eq!(store.storage().get_item(KEY).unwrap(), None);
}

#[test]
fn remove_drops_row_regardless_of_quantity() {
    let mut store = store();
    for _ in 0..5 {
        store.add_item("1", "Pain", 1.5, None);
    }
    store.add_item("2", "Tarte", 3.0, None);
    store.remove_item("1");

    assert_eq!(store.item_count(), 1);
    assert!(store.get("1").is_none());
}

#[test]
fn totals_follow_quantities() {
    let mut store = store();
    store.add_item("1", "Pain", 1.5, None);
    store.add_item("1", "Pain", 1.5, None);
    store.add_item("2", "Tarte", 3.0, None);

    assert!(approx(store.total(), 6.0));
    assert_eq!(store.item_count(), 3);
}

#[test]
fn invalid_new_items_are_not_persisted() {
    let mut store = store();
    store.add_item("1", "", 1.5, None);
    store.add_item("2", "Pain", 0.0, None);
    store.add_item("3", "Pain", -1.0, None);
    store.add_item("", "Pain", 1.0, None);

    assert!(store.load().is_empty());
}

#[test]
fn clear_resets_cart_and_cache() {
    let mut store = store();
    store.add_item("1", "Pain", 1.5, None);
    store.clear();

    assert!(!store.is_cached());
    assert_eq!(stored(&store), json!([]));
    assert_eq!(store.item_count(), 0);
}

// ============================================================================
// Recovery from stored data
// ============================================================================

#[test]
fn malformed_storage_yields_empty_cart() {
    let mut store = store_with("{not json");
    assert!(store.load().is_empty());

    store.add_item("1", "Pain", 1.5, None);
    assert_eq!(stored(&store).as_array().unwrap().len(), 1);
}

#[test]
fn non_array_storage_yields_empty_cart() {
    let mut store = store_with(r#"{"id":"1"}"#);
    let report = store.reload();
    assert!(report.cart.is_empty());
    assert_eq!(report.status, LoadStatus::Reset(ResetReason::NotASequence));
}

#[test]
fn invalid_entries_are_filtered_on_load() {
    let mut store = store_with(
        r#"[
            {"id":"1","name":"Pain","price":"1.5","quantity":"2"},
            {"id":"2","name":"","price":1,"quantity":1},
            {"id":"3","name":"Tarte","price":0,"quantity":1},
            {"id":"4","name":"Flan","price":2,"quantity":-2},
            "garbage",
            {"id":1,"name":"Duplicate","price":9,"quantity":9}
        ]"#,
    );

    let report = store.reload();
    assert_eq!(report.status, LoadStatus::Repaired { dropped: 5 });
    assert_eq!(report.cart.len(), 1);

    let item = &report.cart.items()[0];
    assert_eq!(item.name, "Pain");
    assert_eq!(item.quantity, 2);
    assert!(approx(item.price, 1.5));
}

#[test]
fn missing_quantity_defaults_to_one() {
    let mut store = store_with(r#"[{"id":"1","name":"Pain","price":1.5}]"#);
    assert_eq!(store.item_count(), 1);
}

#[test]
fn oversized_quantity_is_kept() {
    let mut store = store_with(r#"[{"id":"1","name":"Pain","price":1.5,"quantity":5000000000}]"#);
    let report = store.reload();

    assert_eq!(report.status, LoadStatus::Clean);
    assert_eq!(report.cart.items()[0].quantity, u32::MAX);
}

#[test]
fn unavailable_storage_reads_as_empty() {
    let mut storage = MemoryStorage::new();
    storage.set_item(KEY, r#"[{"id":"1","name":"Pain","price":1.5,"quantity":1}]"#).unwrap();
    storage.set_unavailable(true);

    let mut store = CartStore::new(storage);
    let report = store.reload();
    assert!(report.cart.is_empty());
    assert_eq!(report.status, LoadStatus::Reset(ResetReason::Unreadable));
}

#[test]
fn failed_write_is_not_served_from_cache() {
    let mut store = CartStore::new(MemoryStorage::with_quota(KEY.len() + 2));
    store.save_value(&json!([]));
    assert!(store.is_cached());

    store.add_item("1", "Pain", 1.5, None);
    assert!(!store.is_cached());
    assert!(store.load().is_empty());
}

// ============================================================================
// Untyped saves
// ============================================================================

#[test]
fn save_value_normalizes_entries() {
    let mut store = store();
    store.save_value(&json!([
        {"id": 5, "name": "Pain", "price": "2.5", "quantity": "3"},
        {"id": "", "name": "x", "price": 1, "quantity": 1}
    ]));

    assert_eq!(
        stored(&store),
        json!([{"id": "5", "name": "Pain", "price": 2.5, "quantity": 3, "image": ""}])
    );
    assert_eq!(store.item_count(), 3);
}

#[test]
fn typed_and_untyped_saves_agree() {
    let mut typed = store();
    typed.save(Cart::from(vec![LineItem {
        id: ProductId::from("1"),
        name: "Pain".to_string(),
        price: 1.5,
        quantity: 0,
        image: String::new(),
    }]));

    let mut untyped = store();
    untyped.save_value(&json!([{"id": "1", "name": "Pain", "price": 1.5, "quantity": 0}]));

    assert_eq!(typed.item_count(), 1);
    assert_eq!(stored(&typed), stored(&untyped));
}

#[test]
fn save_value_refuses_non_array() {
    let mut store = store();
    store.add_item("1", "Pain", 1.5, None);
    let before = stored(&store);

    store.save_value(&json!({"id": "2"}));
    assert_eq!(stored(&store), before);
    assert_eq!(store.item_count(), 1);
}

#[test]
fn custom_key_is_isolated() {
    let mut store = CartStore::with_key(MemoryStorage::new(), "other_cart");
    store.add_item("1", "Pain", 1.5, None);

    assert_eq!(store.storage().get_item(KEY).unwrap(), None);
    assert!(store.storage().get_item("other_cart").unwrap().is_some());
}
