//! File-backed persistence: in-memory collections with store-assigned ids,
//! flushed to one JSON file per store on every mutation.

pub mod carts;
pub mod entity;
pub mod products;
pub mod users;

pub use carts::CartStore;
pub use entity::{EntityStore, Record};
pub use products::{ProductDraft, ProductStore, normalize_code};
pub use users::UserStore;
