//! Offer API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::ErrorCode;
use shared::models::{Offer, OfferCreate, OfferUpdate, OfferView};

use crate::core::ServerState;
use crate::db::repository::offer;
use crate::pricing::validate_offer;
use crate::utils::{AppError, AppResult};

fn not_found(id: i64) -> AppError {
    AppError::with_message(ErrorCode::OfferNotFound, format!("Offer {id} not found"))
}

/// GET /api/offers - newest first, with target item name
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<OfferView>>> {
    Ok(Json(offer::find_all(&state.pool).await?))
}

/// GET /api/offers/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Offer>> {
    let found = offer::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(found))
}

/// POST /api/offers
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OfferCreate>,
) -> AppResult<Json<Offer>> {
    validate_offer(&Offer {
        id: 0,
        name: payload.name.clone(),
        item_id: payload.item_id,
        discount_type: payload.discount_type,
        discount_value: payload.discount_value,
        start_date: payload.start_date.clone(),
        end_date: payload.end_date.clone(),
        day_of_week: payload.day_of_week,
        active: payload.active.unwrap_or(true),
        created_at: 0,
    })?;

    let created = offer::create(&state.pool, payload).await?;
    tracing::info!(offer_id = created.id, name = %created.name, "Offer created");
    Ok(Json(created))
}

/// PUT /api/offers/{id} - partial update, `null` clears optional fields
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OfferUpdate>,
) -> AppResult<Json<Offer>> {
    let existing = offer::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let merged = offer::merge_update(existing, payload);
    validate_offer(&merged)?;

    let saved = offer::save(&state.pool, &merged).await?;
    tracing::info!(offer_id = id, "Offer updated");
    Ok(Json(saved))
}

/// DELETE /api/offers/{id}
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<bool>> {
    offer::delete(&state.pool, id).await?;
    tracing::info!(offer_id = id, "Offer deleted");
    Ok(Json(true))
}
