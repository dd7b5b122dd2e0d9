use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post},
};

use crate::{
    dto::carts::CartCreated,
    error::AppResult,
    models::{Cart, CartItem},
    response::ApiResponse,
    services::cart_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_cart))
        .route("/{cid}", get(get_cart))
        .route("/{cid}/product/{pid}", post(add_product_to_cart))
}

#[utoipa::path(
    post,
    path = "/api/carts",
    responses(
        (status = 200, description = "Create an empty cart", body = ApiResponse<CartCreated>)
    ),
    tag = "Carts"
)]
pub async fn create_cart(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CartCreated>>> {
    Ok(Json(cart_service::create_cart(&state).await?))
}

#[utoipa::path(
    get,
    path = "/api/carts/{cid}",
    params(
        ("cid" = u64, Path, description = "Cart id")
    ),
    responses(
        (status = 200, description = "Get cart", body = ApiResponse<Cart>),
        (status = 404, description = "Cart not found"),
    ),
    tag = "Carts"
)]
pub async fn get_cart(
    Path(cid): Path<u64>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<Cart>>> {
    Ok(Json(cart_service::get_cart(&state, cid).await?))
}

#[utoipa::path(
    post,
    path = "/api/carts/{cid}/product/{pid}",
    params(
        ("cid" = u64, Path, description = "Cart id"),
        ("pid" = u64, Path, description = "Product id"),
    ),
    responses(
        (status = 200, description = "Add one unit of the product to the cart", body = ApiResponse<CartItem>),
        (status = 404, description = "Cart or product not found"),
    ),
    tag = "Carts"
)]
pub async fn add_product_to_cart(
    Path((cid, pid)): Path<(u64, u64)>,
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<CartItem>>> {
    Ok(Json(cart_service::add_item(&state, cid, pid).await?))
}
