use tokio::sync::broadcast;

use crate::models::Product;

/// Fire-and-forget publisher for product catalog changes.
///
/// After every successful product mutation the services push the full current
/// collection here; subscribers bridge it to whatever real-time transport sits
/// in front (out of scope at this layer). A failed publish never fails the
/// store operation that triggered it.
#[derive(Clone)]
pub struct ProductFeed {
    tx: broadcast::Sender<Vec<Product>>,
}

impl ProductFeed {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Vec<Product>> {
        self.tx.subscribe()
    }

    pub fn publish(&self, products: Vec<Product>) {
        if let Err(err) = self.tx.send(products) {
            tracing::debug!(error = %err, "no product feed subscribers");
        }
    }
}
