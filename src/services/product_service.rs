use crate::{
    dto::products::{ProductList, ProductPayload},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Product,
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    state::AppState,
};

pub async fn list_products(
    state: &AppState,
    pagination: Pagination,
) -> AppResult<ApiResponse<ProductList>> {
    let (page, limit, offset) = pagination.normalize();
    let products = state.products.lock().await;
    let total = products.len() as i64;
    let items = products
        .all()
        .iter()
        .skip(offset as usize)
        .take(limit as usize)
        .cloned()
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Products",
        ProductList { items },
        Some(meta),
    ))
}

pub async fn get_product(state: &AppState, id: u64) -> AppResult<ApiResponse<Product>> {
    let products = state.products.lock().await;
    let product = products.get(id)?.clone();
    Ok(ApiResponse::success("Product", product, None))
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: ProductPayload,
) -> AppResult<ApiResponse<Product>> {
    let mut products = state.products.lock().await;
    let id = products.add(payload.into_draft())?;
    let product = products.get(id)?.clone();

    state.feed.publish(products.all().to_vec());
    tracing::info!(user_id = user.user_id, product_id = id, "product created");

    Ok(ApiResponse::success(
        "Product created",
        product,
        Some(Meta::empty()),
    ))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: u64,
    payload: ProductPayload,
) -> AppResult<ApiResponse<Product>> {
    let mut products = state.products.lock().await;
    products.update(id, payload.into_draft())?;
    let product = products.get(id)?.clone();

    state.feed.publish(products.all().to_vec());
    tracing::info!(user_id = user.user_id, product_id = id, "product updated");

    Ok(ApiResponse::success("Updated", product, Some(Meta::empty())))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: u64,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let mut products = state.products.lock().await;
    products.delete(id)?;

    state.feed.publish(products.all().to_vec());
    tracing::info!(user_id = user.user_id, product_id = id, "product deleted");

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
