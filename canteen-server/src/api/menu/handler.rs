//! Menu API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::error::ErrorCode;
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate, MenuItemView, MenuQuery};

use crate::core::ServerState;
use crate::db::repository::{menu_item, offer};
use crate::pricing::{PricingDay, decorate_menu};
use crate::utils::validation::{MAX_NAME_LEN, validate_amount, validate_required_text};
use crate::utils::{AppError, AppResult};

async fn decorate(state: &ServerState, items: Vec<MenuItem>) -> AppResult<Vec<MenuItemView>> {
    let offers = offer::find_active(&state.pool).await?;
    Ok(decorate_menu(items, &offers, &PricingDay::now(state.tz())))
}

/// GET /api/menu?available_only=true - items with today's effective price
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<MenuQuery>,
) -> AppResult<Json<Vec<MenuItemView>>> {
    let items = menu_item::find_all(&state.pool, query.available_only).await?;
    Ok(Json(decorate(&state, items).await?))
}

/// GET /api/menu/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuItemView>> {
    let item = menu_item::find_by_id(&state.pool, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::MenuItemNotFound, format!("Menu item {id} not found"))
    })?;
    let mut views = decorate(&state, vec![item]).await?;
    views
        .pop()
        .ok_or_else(|| AppError::internal("Menu decoration lost the item"))
        .map(Json)
}

/// POST /api/menu
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<Json<MenuItem>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_amount(payload.price, "price")?;

    let item = menu_item::create(&state.pool, payload).await?;
    tracing::info!(item_id = item.id, name = %item.name, price = item.price, "Menu item created");
    Ok(Json(item))
}

/// PUT /api/menu/{id}
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(price) = payload.price {
        validate_amount(price, "price")?;
    }

    let item = menu_item::update(&state.pool, id, payload).await?;
    tracing::info!(item_id = item.id, "Menu item updated");
    Ok(Json(item))
}

/// POST /api/menu/{id}/toggle - flip availability
pub async fn toggle(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuItem>> {
    let item = menu_item::toggle_availability(&state.pool, id).await?;
    tracing::info!(item_id = item.id, available = item.available, "Menu item availability toggled");
    Ok(Json(item))
}

/// DELETE /api/menu/{id} - also removes offers that target this item
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    menu_item::delete(&state.pool, id).await?;
    tracing::info!(item_id = id, "Menu item deleted");
    Ok(Json(true))
}
