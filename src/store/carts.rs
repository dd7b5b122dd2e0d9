use std::path::PathBuf;

use crate::error::StoreError;
use crate::models::{Cart, CartItem};

use super::entity::{EntityStore, Record};

impl Record for Cart {
    const COLLECTION: &'static str = "carts";

    fn id(&self) -> u64 {
        self.id
    }

    fn set_id(&mut self, id: u64) {
        self.id = id;
    }
}

/// File-backed cart collection owning per-cart line aggregation.
pub struct CartStore {
    inner: EntityStore<Cart>,
}

impl CartStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Ok(Self {
            inner: EntityStore::open(path)?,
        })
    }

    /// Allocate a new empty cart and return its id.
    pub fn create(&mut self) -> Result<u64, StoreError> {
        self.inner.add(Cart {
            id: 0,
            items: Vec::new(),
        })
    }

    pub fn get(&self, id: u64) -> Result<&Cart, StoreError> {
        self.inner.get(id)
    }

    pub fn all(&self) -> &[Cart] {
        self.inner.all()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Add one unit of `product_id` to the cart and return the resulting line.
    ///
    /// The first insertion freezes `sales_price` at `unit_price`; later calls
    /// for the same product only bump the quantity and ignore the price
    /// argument, so cart pricing never drifts with the catalog.
    pub fn add_item(
        &mut self,
        cart_id: u64,
        product_id: u64,
        unit_price: f64,
    ) -> Result<CartItem, StoreError> {
        let cart = self.inner.get_mut(cart_id)?;
        let item = match cart
            .items
            .iter_mut()
            .find(|item| item.product_id == product_id)
        {
            Some(existing) => {
                existing.quantity += 1;
                existing.clone()
            }
            None => {
                let line = CartItem {
                    product_id,
                    quantity: 1,
                    sales_price: unit_price,
                };
                cart.items.push(line.clone());
                line
            }
        };
        self.inner.flush()?;
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_store(dir: &tempfile::TempDir) -> CartStore {
        CartStore::open(dir.path().join("carts.json")).expect("open store")
    }

    #[test]
    fn create_returns_increasing_ids_for_empty_carts() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);
        assert_eq!(store.create().unwrap(), 1);
        assert_eq!(store.create().unwrap(), 2);
        assert!(store.get(1).unwrap().items.is_empty());
    }

    #[test]
    fn add_item_freezes_the_price_at_first_insertion() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);
        let cart_id = store.create().unwrap();

        let first = store.add_item(cart_id, 7, 50.0).unwrap();
        assert_eq!(first.product_id, 7);
        assert_eq!(first.quantity, 1);
        assert_eq!(first.sales_price, 50.0);

        // Second call passes a different price; it must be ignored.
        let second = store.add_item(cart_id, 7, 999.0).unwrap();
        assert_eq!(second.quantity, 2);
        assert_eq!(second.sales_price, 50.0);

        let cart = store.get(cart_id).unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.items[0].sales_price, 50.0);
    }

    #[test]
    fn lines_keep_first_added_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);
        let cart_id = store.create().unwrap();

        store.add_item(cart_id, 3, 10.0).unwrap();
        store.add_item(cart_id, 1, 20.0).unwrap();
        store.add_item(cart_id, 3, 10.0).unwrap();
        store.add_item(cart_id, 2, 30.0).unwrap();

        let ids: Vec<u64> = store
            .get(cart_id)
            .unwrap()
            .items
            .iter()
            .map(|item| item.product_id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn add_item_on_a_missing_cart_signals_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = open_store(&dir);
        assert!(matches!(
            store.add_item(42, 1, 10.0),
            Err(StoreError::NotFound)
        ));
    }

    #[test]
    fn cart_items_survive_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("carts.json");

        let mut store = CartStore::open(&path).unwrap();
        let cart_id = store.create().unwrap();
        store.add_item(cart_id, 7, 50.0).unwrap();
        store.add_item(cart_id, 7, 999.0).unwrap();

        let reloaded = CartStore::open(&path).unwrap();
        let cart = reloaded.get(cart_id).unwrap();
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items[0].quantity, 2);
        assert_eq!(cart.items[0].sales_price, 50.0);
    }
}
