//! Cart pricing API (`orders:place`)
//!
//! Prices a cart with today's offers without creating an order.

use axum::{
    Json, Router,
    extract::State,
    middleware,
    routing::post,
};
use shared::models::{CartQuote, CartRequest};

use crate::auth::permissions::ORDERS_PLACE;
use crate::auth::require_permission;
use crate::core::ServerState;
use crate::orders;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/cart/quote", post(quote))
        .layer(middleware::from_fn(require_permission(ORDERS_PLACE)))
}

/// POST /api/cart/quote
async fn quote(
    State(state): State<ServerState>,
    Json(req): Json<CartRequest>,
) -> AppResult<Json<CartQuote>> {
    let quote = orders::quote_cart(&state.pool, state.tz(), &req.items).await?;
    Ok(Json(quote))
}
