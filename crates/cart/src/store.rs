//! The cart store.
//!
//! [`CartStore`] owns the storage backend, the fixed storage key and a
//! read cache. Every mutation runs load, then a pure transition from
//! `artisan-core`, then save. Saving normalizes, writes, and refreshes the
//! cache, so reads after a write always see the written cart.
//!
//! Nothing here returns an error. Unreadable or corrupted storage yields an
//! empty cart; failed writes invalidate the cache so the next read goes back
//! to storage instead of trusting a cart that was never persisted.

use artisan_core::{Cart, LineItem, NewItem, ProductId, normalize_items, normalize_value};
use serde_json::Value;
use tracing::instrument;

use crate::storage::Storage;

/// Storage key the storefront has always used for the cart.
pub const DEFAULT_STORAGE_KEY: &str = "artisan_boulangerie_cart";

/// Why a stored cart was discarded wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetReason {
    /// The backend failed to read.
    Unreadable,
    /// The stored text is not valid JSON.
    Malformed,
    /// The stored JSON is not an array.
    NotASequence,
}

/// Outcome of reading the cart from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing stored under the key.
    Missing,
    /// Every stored entry was valid.
    Clean,
    /// Some entries were invalid or duplicated and were dropped.
    Repaired {
        /// Number of discarded entries.
        dropped: usize,
    },
    /// The stored value was unusable; the cart was reset to empty.
    Reset(ResetReason),
}

/// A cart read from storage along with how it was obtained.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadReport {
    pub cart: Cart,
    pub status: LoadStatus,
}

impl LoadReport {
    const fn empty(status: LoadStatus) -> Self {
        Self {
            cart: Cart::new(),
            status,
        }
    }

    /// Number of stored entries that did not make it into the cart.
    ///
    /// Wholesale resets report zero; there were no entries to count.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        match self.status {
            LoadStatus::Repaired { dropped } => dropped,
            _ => 0,
        }
    }
}

/// Persisted cart with a read cache.
///
/// All operations take `&mut self` and complete synchronously, so calls
/// issued back to back observe each other's writes in order.
#[derive(Debug)]
pub struct CartStore<S> {
    storage: S,
    key: String,
    cache: Option<Cart>,
}

impl<S: Storage> CartStore<S> {
    /// Create a store using [`DEFAULT_STORAGE_KEY`].
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Create a store persisting under `key`.
    #[must_use]
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            cache: None,
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns `true` if the next [`load`](Self::load) is served from memory.
    #[must_use]
    pub const fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Mutable access to the backend.
    ///
    /// Writes made through this handle are not seen until the cache is
    /// invalidated.
    pub const fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Return the current cart, reading storage only when the cache is invalid.
    pub fn load(&mut self) -> &Cart {
        let cart = match self.cache.take() {
            Some(cart) => cart,
            None => self.read().cart,
        };
        self.cache.insert(cart)
    }

    /// Drop the cache and re-read storage, reporting what was found.
    pub fn reload(&mut self) -> LoadReport {
        self.invalidate();
        let report = self.read();
        self.cache = Some(report.cart.clone());
        report
    }

    /// Forget the cached cart; the next read goes to storage.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Normalize and persist `cart`, then cache the normalized value.
    ///
    /// If the write fails the cache is invalidated.
    pub fn save(&mut self, cart: Cart) {
        let normalized = normalize_items(cart);
        if !normalized.is_clean() {
            tracing::warn!(
                key = %self.key,
                dropped = normalized.dropped,
                "Dropped invalid line items before saving cart"
            );
        }
        self.persist(normalized.cart);
    }

    /// Persist untyped cart data.
    ///
    /// A value that is not an array is refused: nothing is written and the
    /// cache is left as it was.
    pub fn save_value(&mut self, value: &Value) {
        match normalize_value(value) {
            Ok(normalized) => {
                if !normalized.is_clean() {
                    tracing::warn!(
                        key = %self.key,
                        dropped = normalized.dropped,
                        "Dropped invalid line items before saving cart"
                    );
                }
                self.persist(normalized.cart);
            }
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "Attempted to save non-array cart");
            }
        }
    }

    /// Add one unit of a product.
    ///
    /// An existing row gains a unit (and the image, if it had none);
    /// otherwise a new row with quantity 1 is appended. A new row with an
    /// empty name or a non-positive price is discarded on save.
    #[instrument(level = "debug", skip_all, fields(key = %self.key))]
    pub fn add_item(
        &mut self,
        id: impl Into<ProductId>,
        name: &str,
        price: f64,
        image: Option<&str>,
    ) {
        let mut item = NewItem::new(id, name, price);
        if let Some(image) = image {
            item = item.with_image(image);
        }
        tracing::debug!(id = %item.id, "Adding item to cart");

        let cart = self.take_cart().add_item(item);
        self.save(cart);
    }

    /// Remove one unit of a product; the row disappears at zero.
    ///
    /// Unknown ids are ignored and nothing is written.
    #[instrument(level = "debug", skip_all, fields(key = %self.key))]
    pub fn decrement_item(&mut self, id: impl Into<ProductId>) {
        let id = id.into();
        if !self.load().contains(&id) {
            tracing::debug!(%id, "Decrement of unknown item ignored");
            return;
        }

        let cart = self.take_cart().decrement_item(&id);
        self.save(cart);
    }

    /// Remove a product's row regardless of quantity.
    #[instrument(level = "debug", skip_all, fields(key = %self.key))]
    pub fn remove_item(&mut self, id: impl Into<ProductId>) {
        let id = id.into();
        tracing::debug!(%id, "Removing item from cart");

        let cart = self.take_cart().remove_item(&id);
        self.save(cart);
    }

    /// Persist an empty cart and invalidate the cache.
    #[instrument(level = "debug", skip_all, fields(key = %self.key))]
    pub fn clear(&mut self) {
        self.save(Cart::new());
        self.invalidate();
    }

    /// Sum of `price * quantity` over the current cart.
    pub fn total(&mut self) -> f64 {
        self.load().total()
    }

    /// Sum of quantities over the current cart.
    pub fn item_count(&mut self) -> u32 {
        self.load().item_count()
    }

    /// Look up a row by product id.
    pub fn get(&mut self, id: impl Into<ProductId>) -> Option<LineItem> {
        let id = id.into();
        self.load().get(&id).cloned()
    }

    fn take_cart(&mut self) -> Cart {
        self.load();
        self.cache.take().unwrap_or_default()
    }

    fn persist(&mut self, cart: Cart) {
        let json = match serde_json::to_string(&cart) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "Error serializing cart");
                self.invalidate();
                return;
            }
        };

        match self.storage.set_item(&self.key, &json) {
            Ok(()) => self.cache = Some(cart),
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "Error saving cart to storage");
                self.invalidate();
            }
        }
    }

    fn read(&self) -> LoadReport {
        let raw = match self.storage.get_item(&self.key) {
            Ok(Some(raw)) if !raw.is_empty() => raw,
            Ok(_) => return LoadReport::empty(LoadStatus::Missing),
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "Error reading cart from storage");
                return LoadReport::empty(LoadStatus::Reset(ResetReason::Unreadable));
            }
        };

        let value: Value = match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!(key = %self.key, error = %e, "Cart data is not valid JSON, resetting cart");
                return LoadReport::empty(LoadStatus::Reset(ResetReason::Malformed));
            }
        };

        match normalize_value(&value) {
            Ok(normalized) if normalized.is_clean() => LoadReport {
                cart: normalized.cart,
                status: LoadStatus::Clean,
            },
            Ok(normalized) => {
                tracing::warn!(
                    key = %self.key,
                    dropped = normalized.dropped,
                    "Dropped invalid line items from stored cart"
                );
                LoadReport {
                    cart: normalized.cart,
                    status: LoadStatus::Repaired {
                        dropped: normalized.dropped,
                    },
                }
            }
            Err(_) => {
                tracing::warn!(key = %self.key, "Cart data is not an array, resetting cart");
                LoadReport::empty(LoadStatus::Reset(ResetReason::NotASequence))
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::storage::{MemoryStorage, StorageError};

    fn store() -> CartStore<MemoryStorage> {
        CartStore::new(MemoryStorage::new())
    }

    fn stored(store: &CartStore<MemoryStorage>) -> Value {
        let raw = store.storage().get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }

    #[test]
    fn test_load_missing_is_empty_and_cached() {
        let mut store = store();
        assert!(store.load().is_empty());
        assert!(store.is_cached());
        assert_eq!(store.reload().status, LoadStatus::Missing);
    }

    #[test]
    fn test_load_serves_cache_until_invalidated() {
        let mut store = store();
        store.add_item("1", "Baguette", 0.9, None);

        store
            .storage_mut()
            .set_item(DEFAULT_STORAGE_KEY, "[]")
            .unwrap();
        assert_eq!(store.load().len(), 1);

        store.invalidate();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_add_persists_normalized_cart() {
        let mut store = store();
        store.add_item(7_u32, "Croissant", 1.2, Some("img/croissant.jpg"));

        assert_eq!(
            stored(&store),
            json!([{"id": "7", "name": "Croissant", "price": 1.2, "quantity": 1, "image": "img/croissant.jpg"}])
        );
    }

    #[test]
    fn test_add_invalid_new_item_is_discarded() {
        let mut store = store();
        store.add_item("1", "Baguette", 0.9, None);
        store.add_item("2", "Broken", 0.0, None);
        store.add_item("3", "", 1.0, None);

        assert_eq!(store.load().len(), 1);
        assert_eq!(store.reload().status, LoadStatus::Clean);
    }

    #[test]
    fn test_decrement_unknown_does_not_write() {
        let mut store = store();
        store.decrement_item("404");
        assert!(store.storage().is_empty());
    }

    #[test]
    fn test_remove_item() {
        let mut store = store();
        store.add_item("1", "Baguette", 0.9, None);
        store.add_item("1", "Baguette", 0.9, None);
        store.add_item("2", "Croissant", 1.2, None);
        store.remove_item(1_u32);

        let ids: Vec<_> = store.load().iter().map(|i| i.id.to_string()).collect();
        assert_eq!(ids, ["2"]);
        store.remove_item("missing");
        assert_eq!(store.item_count(), 1);
    }

    #[test]
    fn test_reload_reports_repairs() {
        let mut store = store();
        store
            .storage_mut()
            .set_item(
                DEFAULT_STORAGE_KEY,
                r#"[{"id":"1","name":"Pain","price":1,"quantity":1},{"id":"1","name":"Dup","price":1},{"id":"2","name":"Free","price":0}]"#,
            )
            .unwrap();

        let report = store.reload();
        assert_eq!(report.status, LoadStatus::Repaired { dropped: 2 });
        assert_eq!(report.dropped(), 2);
        assert_eq!(report.cart.len(), 1);
    }

    #[test]
    fn test_reload_resets_bad_data() {
        let mut store = store();
        store.storage_mut().set_item(DEFAULT_STORAGE_KEY, "{not json").unwrap();
        assert_eq!(
            store.reload().status,
            LoadStatus::Reset(ResetReason::Malformed)
        );

        store
            .storage_mut()
            .set_item(DEFAULT_STORAGE_KEY, r#"{"id":"1"}"#)
            .unwrap();
        assert_eq!(
            store.reload().status,
            LoadStatus::Reset(ResetReason::NotASequence)
        );

        store.storage_mut().set_unavailable(true);
        let report = store.reload();
        assert_eq!(report.status, LoadStatus::Reset(ResetReason::Unreadable));
        assert!(report.cart.is_empty());
    }

    #[test]
    fn test_failed_write_invalidates_cache() {
        let mut store = CartStore::new(MemoryStorage::with_quota(200));
        store.add_item("1", "Baguette", 0.9, None);
        assert!(store.is_cached());

        store.add_item("2", &"x".repeat(300), 1.0, None);
        assert!(!store.is_cached());

        let cart = store.load();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].name, "Baguette");
    }

    #[test]
    fn test_save_value_non_array_keeps_cache() {
        let mut store = store();
        store.add_item("1", "Baguette", 0.9, None);

        store.save_value(&json!({"id": "2"}));
        assert!(store.is_cached());
        assert_eq!(store.load().len(), 1);
        assert_eq!(stored(&store).as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_save_value_normalizes() {
        let mut store = store();
        store.save_value(&json!([
            {"id": 3, "name": "Tarte", "price": "4.5", "quantity": "2"},
            {"id": "4", "name": "Broken", "price": -1},
        ]));

        let cart = store.load();
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
        assert!((cart.total() - 9.0).abs() < 1e-9);
    }

    #[test]
    fn test_clear() {
        let mut store = store();
        store.add_item("1", "Baguette", 0.9, None);
        store.clear();

        assert!(!store.is_cached());
        assert_eq!(stored(&store), json!([]));
        assert_eq!(store.item_count(), 0);
    }

    #[test]
    fn test_custom_key() {
        let mut store = CartStore::with_key(MemoryStorage::new(), "other");
        store.add_item("1", "Baguette", 0.9, None);
        assert_eq!(store.key(), "other");
        assert!(store.storage().get_item("other").unwrap().is_some());
        assert!(store.storage().get_item(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_unavailable_storage_never_panics() {
        let mut storage = MemoryStorage::new();
        storage.set_unavailable(true);
        let mut store = CartStore::new(storage);

        store.add_item("1", "Baguette", 0.9, None);
        store.decrement_item("1");
        store.remove_item("1");
        store.clear();
        assert!(store.load().is_empty());
        assert!(matches!(
            store.storage().get_item(DEFAULT_STORAGE_KEY),
            Err(StorageError::Unavailable(_))
        ));
    }
}
