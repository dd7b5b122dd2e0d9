use std::path::Path;
use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::StoreError;
use crate::notify::ProductFeed;
use crate::store::{CartStore, ProductStore, UserStore};

/// Shared application state: one mutex-guarded store per backing file.
///
/// Handlers hold a store's lock for the whole read-modify-flush sequence,
/// which serializes mutations on the shared collection and file across the
/// multi-threaded runtime.
#[derive(Clone)]
pub struct AppState {
    pub products: Arc<Mutex<ProductStore>>,
    pub carts: Arc<Mutex<CartStore>>,
    pub users: Arc<Mutex<UserStore>>,
    pub feed: ProductFeed,
}

impl AppState {
    /// Open every store under `data_dir`. Fails fast on a corrupt persist file.
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            products: Arc::new(Mutex::new(ProductStore::open(
                data_dir.join("products.json"),
            )?)),
            carts: Arc::new(Mutex::new(CartStore::open(data_dir.join("carts.json"))?)),
            users: Arc::new(Mutex::new(UserStore::open(data_dir.join("users.json"))?)),
            feed: ProductFeed::new(16),
        })
    }
}
