use crate::{
    dto::carts::CartCreated,
    error::AppResult,
    models::{Cart, CartItem},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn create_cart(state: &AppState) -> AppResult<ApiResponse<CartCreated>> {
    let mut carts = state.carts.lock().await;
    let id = carts.create()?;
    tracing::info!(cart_id = id, "cart created");
    Ok(ApiResponse::success(
        "Cart created",
        CartCreated { id },
        Some(Meta::empty()),
    ))
}

pub async fn get_cart(state: &AppState, id: u64) -> AppResult<ApiResponse<Cart>> {
    let carts = state.carts.lock().await;
    let cart = carts.get(id)?.clone();
    Ok(ApiResponse::success("Cart", cart, None))
}

/// Add one unit of a product to a cart, snapshotting the product's current
/// price when the line is first created.
pub async fn add_item(
    state: &AppState,
    cart_id: u64,
    product_id: u64,
) -> AppResult<ApiResponse<CartItem>> {
    // The product lock is dropped before the cart lock is taken; the price
    // read is a one-time snapshot.
    let unit_price = {
        let products = state.products.lock().await;
        products.get(product_id)?.price
    };

    let mut carts = state.carts.lock().await;
    let item = carts.add_item(cart_id, product_id, unit_price)?;

    tracing::info!(cart_id, product_id, quantity = item.quantity, "cart item added");
    Ok(ApiResponse::success("OK", item, None))
}
