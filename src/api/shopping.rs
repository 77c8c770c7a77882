//! Cart and shopping list handlers

use axum::{
    extract::{Path, State},
    Json,
};

use super::handlers::AppState;
use crate::error::{GatewayError, Result};
use crate::models::{
    AddToCartRequest, CartResponse, CartTotalResponse, CreateListRequest, MessageResponse,
    UpdateCartRequest, UpdateListRequest,
};
use crate::shopping::ShoppingList;

// == Cart ==

/// Handler for GET /api/cart
pub async fn get_cart_handler(State(state): State<AppState>) -> Json<CartResponse> {
    let cart = state.cart.read().await;
    Json(CartResponse::from_cart(&cart))
}

/// Handler for POST /api/cart/add
///
/// Adding a product already in the cart increases its quantity.
pub async fn add_to_cart_handler(
    State(state): State<AppState>,
    Json(req): Json<AddToCartRequest>,
) -> Result<Json<CartResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(GatewayError::InvalidRequest(error_msg));
    }

    let mut cart = state.cart.write().await;
    cart.add(req.into_item());
    Ok(Json(CartResponse::from_cart(&cart)))
}

/// Handler for DELETE /api/cart/remove/:product_id
pub async fn remove_from_cart_handler(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
) -> Result<Json<CartResponse>> {
    let mut cart = state.cart.write().await;
    cart.remove(&product_id)?;
    Ok(Json(CartResponse::from_cart(&cart)))
}

/// Handler for PUT /api/cart/update/:product_id
pub async fn update_cart_handler(
    State(state): State<AppState>,
    Path(product_id): Path<String>,
    Json(req): Json<UpdateCartRequest>,
) -> Result<Json<CartResponse>> {
    let mut cart = state.cart.write().await;
    cart.set_quantity(&product_id, req.quantity)?;
    Ok(Json(CartResponse::from_cart(&cart)))
}

/// Handler for DELETE and POST /api/cart/clear
pub async fn clear_cart_handler(State(state): State<AppState>) -> Json<CartResponse> {
    let mut cart = state.cart.write().await;
    cart.clear();
    Json(CartResponse::from_cart(&cart))
}

/// Handler for GET /api/cart/total
pub async fn cart_total_handler(State(state): State<AppState>) -> Json<CartTotalResponse> {
    let cart = state.cart.read().await;
    Json(CartTotalResponse::from_cart(&cart))
}

// == Shopping Lists ==

/// Handler for POST /api/lists
pub async fn create_list_handler(
    State(state): State<AppState>,
    Json(req): Json<CreateListRequest>,
) -> Result<Json<ShoppingList>> {
    if let Some(error_msg) = req.validate() {
        return Err(GatewayError::InvalidRequest(error_msg));
    }

    let mut lists = state.lists.write().await;
    Ok(Json(lists.create(req.name, req.items)))
}

/// Handler for GET /api/lists
pub async fn list_lists_handler(State(state): State<AppState>) -> Json<Vec<ShoppingList>> {
    Json(state.lists.read().await.all())
}

/// Handler for GET /api/lists/:id
pub async fn get_list_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ShoppingList>> {
    Ok(Json(state.lists.read().await.get(&id)?))
}

/// Handler for PUT /api/lists/:id
pub async fn update_list_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateListRequest>,
) -> Result<Json<ShoppingList>> {
    let mut lists = state.lists.write().await;
    Ok(Json(lists.update(&id, req.name, req.items)?))
}

/// Handler for DELETE /api/lists/:id
pub async fn delete_list_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>> {
    state.lists.write().await.delete(&id)?;
    Ok(Json(MessageResponse::new("Shopping list deleted successfully")))
}
