use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Product;
use crate::store::ProductDraft;

/// Request body for both create and full-replace update: the store replaces
/// every field except the id, so the two operations share a shape.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductPayload {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub thumbnail: String,
    pub code: String,
    pub stock: u32,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<bool>,
}

impl ProductPayload {
    pub fn into_draft(self) -> ProductDraft {
        ProductDraft {
            title: self.title,
            description: self.description,
            price: self.price,
            thumbnail: self.thumbnail,
            code: self.code,
            stock: self.stock,
            category: self.category,
            status: self.status,
        }
    }
}

#[derive(Serialize, ToSchema)]
#[serde(transparent)]
pub struct ProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}
