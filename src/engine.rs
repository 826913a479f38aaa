//! Cart engine: the only way cart state changes
use super::cart::{CartLine, CartState};
use super::catalog::Product;
use super::config::StorefrontConfig;
use super::error::CartError;
use super::notify::{CartEvent, NotificationBus, Subscription};
use super::storage::{CartStore, DEFAULT_CART_KEY, decode_cart, encode_cart};
use tracing::{debug, info, warn};

/// Owns the cart state and writes it through to `store` after every change.
///
/// Mutations return a [`CartError`] only when persisting failed; the change
/// itself is kept in memory either way.
pub struct CartEngine<S> {
    store: S,
    key: String,
    state: CartState,
    bus: NotificationBus,
}

impl<S: CartStore> CartEngine<S> {
    /// Restore the cart held under `key`. Missing, unreadable, or malformed
    /// data starts an empty cart.
    pub fn restore(store: S, key: &str) -> Self {
        let state = match store.load(key) {
            Ok(Some(bytes)) => match decode_cart(&bytes) {
                Ok(lines) => {
                    let state = CartState::from_lines(lines);
                    info!(key, lines = state.lines().len(), "restored cart");
                    state
                }
                Err(err) => {
                    warn!(key, error = %err, "persisted cart is malformed, starting empty");
                    CartState::new()
                }
            },
            Ok(None) => {
                debug!(key, "no persisted cart, starting empty");
                CartState::new()
            }
            Err(err) => {
                warn!(key, error = %err, "failed to read persisted cart, starting empty");
                CartState::new()
            }
        };

        Self {
            store,
            key: key.to_string(),
            state,
            bus: NotificationBus::new(),
        }
    }

    pub fn open(store: S) -> Self {
        Self::restore(store, DEFAULT_CART_KEY)
    }

    pub fn with_config(store: S, config: &StorefrontConfig) -> Self {
        Self::restore(store, config.storage_key())
    }

    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn lines(&self) -> &[CartLine] {
        self.state.lines()
    }

    pub fn item_count(&self) -> u128 {
        self.state.item_count()
    }

    /// Sum of `price * quantity` over all lines.
    pub fn compute_total(&self) -> u128 {
        self.state.total()
    }

    pub fn subscribe(&mut self) -> Subscription {
        self.bus.subscribe()
    }

    /// Add one unit of `product`. Returns the line's new quantity.
    pub fn add(&mut self, product: Product) -> Result<u64, CartError> {
        let event = CartEvent::ItemAdded {
            product_id: product.id.clone(),
            title: product.title.clone(),
        };
        let quantity = self.state.add(product);
        debug!(product_id = event.product_id(), quantity, "added to cart");

        let persisted = self.persist();
        self.bus.publish(event);
        persisted.map(|_| quantity)
    }

    /// Remove the line for `product_id`. Unknown ids are ignored.
    pub fn remove(&mut self, product_id: &str) -> Result<Option<CartLine>, CartError> {
        let Some(line) = self.state.remove(product_id) else {
            debug!(product_id, "remove ignored, not in cart");
            return Ok(None);
        };
        debug!(product_id, "removed from cart");

        let persisted = self.persist();
        self.bus.publish(CartEvent::ItemRemoved {
            product_id: line.product.id.clone(),
            title: line.product.title.clone(),
        });
        persisted.map(|_| Some(line))
    }

    /// Set a line's quantity. Anything at or below zero removes the line.
    ///
    /// Returns the quantity now held, or `None` if the product is not in the
    /// cart afterwards.
    pub fn set_quantity(
        &mut self,
        product_id: &str,
        quantity: i64,
    ) -> Result<Option<u64>, CartError> {
        let quantity = quantity.max(0).unsigned_abs();
        if quantity == 0 {
            return self.remove(product_id).map(|_| None);
        }

        match self.state.set_quantity(product_id, quantity) {
            Some(quantity) => {
                debug!(product_id, quantity, "cart quantity updated");
                self.persist()?;
                Ok(Some(quantity))
            }
            None => {
                debug!(product_id, "quantity update ignored, not in cart");
                Ok(None)
            }
        }
    }

    /// Write the current lines to the store, replacing what was there.
    pub fn persist(&self) -> Result<(), CartError> {
        let bytes = encode_cart(self.state.lines()).inspect_err(|err| {
            warn!(key = %self.key, error = %err, "failed to encode cart");
        })?;

        self.store.save(&self.key, &bytes).map_err(|err| {
            warn!(key = %self.key, error = %err, "failed to persist cart");
            CartError::from(err)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::storage::MemoryStore;

    fn tee() -> Product {
        Product::new("1", "Premium Cotton T-Shirt", 899, Category::Men)
    }
    fn dress() -> Product {
        Product::new("2", "Elegant Summer Dress", 2499, Category::Women)
    }

    #[test]
    fn add_notifies_and_persists() {
        let store = MemoryStore::new();
        let mut engine = CartEngine::open(&store);
        let events = engine.subscribe();

        assert_eq!(engine.add(tee()).unwrap(), 1);

        let event = events.try_next().unwrap();
        assert_eq!(event.message(), "Product added to cart!");
        assert!(store.load(DEFAULT_CART_KEY).unwrap().is_some());
    }

    #[test]
    fn quantity_update_is_silent() {
        let store = MemoryStore::new();
        let mut engine = CartEngine::open(&store);
        engine.add(dress()).unwrap();
        let events = engine.subscribe();

        assert_eq!(engine.set_quantity("2", 4).unwrap(), Some(4));
        assert!(events.drain().is_empty());
        assert_eq!(engine.compute_total(), 4 * 2499);
    }

    #[test]
    fn zero_quantity_removes_with_notification() {
        let store = MemoryStore::new();
        let mut engine = CartEngine::open(&store);
        engine.add(tee()).unwrap();
        let events = engine.subscribe();

        assert_eq!(engine.set_quantity("1", -3).unwrap(), None);
        assert!(engine.lines().is_empty());
        assert_eq!(
            events.drain(),
            vec![CartEvent::ItemRemoved {
                product_id: "1".into(),
                title: "Premium Cotton T-Shirt".into(),
            }]
        );
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let store = MemoryStore::new();
        let mut engine = CartEngine::open(&store);
        let events = engine.subscribe();

        assert!(engine.remove("42").unwrap().is_none());
        assert_eq!(engine.set_quantity("42", 3).unwrap(), None);
        assert!(events.drain().is_empty());
        assert!(store.load(DEFAULT_CART_KEY).unwrap().is_none());
    }

    #[test]
    fn failed_write_keeps_the_mutation() {
        let store = MemoryStore::new();
        let mut engine = CartEngine::open(&store);
        store.fail_writes(true);

        let result = engine.add(tee());

        assert!(matches!(result, Err(CartError::Persistence(_))));
        assert_eq!(engine.item_count(), 1);
        assert_eq!(engine.compute_total(), 899);

        engine.add(dress()).unwrap_err();
        let result = engine.set_quantity("2", 3);

        assert!(matches!(result, Err(CartError::Persistence(_))));
        assert_eq!(engine.state().line("2").unwrap().quantity, 3);

        let result = engine.remove("1");

        assert!(matches!(result, Err(CartError::Persistence(_))));
        assert!(engine.state().line("1").is_none());
        assert_eq!(engine.lines().len(), 1);
        assert_eq!(engine.compute_total(), 3 * 2499);
    }

    #[test]
    fn unreadable_store_restores_empty() {
        let store = MemoryStore::new();
        {
            let mut engine = CartEngine::open(&store);
            engine.add(tee()).unwrap();
        }
        store.fail_reads(true);

        let mut engine = CartEngine::open(&store);
        assert!(engine.state().is_empty());

        // writes still land even though the earlier read failed
        engine.add(dress()).unwrap();
        store.fail_reads(false);

        let restored = CartEngine::open(&store);
        assert_eq!(restored.lines().len(), 1);
        assert_eq!(restored.lines()[0].product.id, "2");
    }

    #[test]
    fn huge_quantity_totals_exactly() {
        let store = MemoryStore::new();
        let mut engine = CartEngine::open(&store);
        engine.add(tee()).unwrap();

        engine.set_quantity("1", i64::MAX).unwrap();

        assert_eq!(engine.compute_total(), 8_291_811_461_132_443_450_493);
        assert_eq!(engine.item_count(), i64::MAX as u128);
        assert_eq!(CartEngine::open(&store).compute_total(), engine.compute_total());
    }

    #[test]
    fn malformed_slot_restores_empty() {
        let store = MemoryStore::new();
        store.put_raw(DEFAULT_CART_KEY, b"not a cart".to_vec()).unwrap();

        let engine = CartEngine::open(&store);

        assert!(engine.state().is_empty());
    }

    #[test]
    fn configured_key_is_used() {
        let store = MemoryStore::new();
        let config = StorefrontConfig::new().set_storage_key("guestCart");

        let mut engine = CartEngine::with_config(&store, &config);
        engine.add(tee()).unwrap();

        assert!(store.load("guestCart").unwrap().is_some());
        assert!(store.load(DEFAULT_CART_KEY).unwrap().is_none());
    }
}
