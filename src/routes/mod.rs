use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod carts;
pub mod doc;
pub mod health;
pub mod params;
pub mod products;

// Build the API router without binding state; it is provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/products", products::router())
        .nest("/carts", carts::router())
        .nest("/auth", auth::router())
}
