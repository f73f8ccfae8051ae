//! Orders API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
    response::{IntoResponse, Response},
};
use http::header;
use serde::Deserialize;
use shared::models::{
    CartRequest, Order, OrderQuery, OrderStatusUpdate, PaymentRequest, PlacedOrder,
};

use crate::auth::CurrentUser;
use crate::auth::permissions::{ORDERS_VIEW_ALL, PAYMENTS_CONFIRM};
use crate::core::ServerState;
use crate::db::repository::{account, order};
use crate::orders::{self, ensure_order_access, load_order};
use crate::payment::{self, PaymentQr, UpiPayee};
use crate::receipt::{Receipt, ensure_receipt_available, receipt_filename, render_receipt};
use crate::utils::AppResult;

/// Load an order the caller may see
async fn visible_order(state: &ServerState, user: &CurrentUser, id: i64) -> AppResult<Order> {
    let found = load_order(&state.pool, id).await?;
    ensure_order_access(user, &found, ORDERS_VIEW_ALL)?;
    Ok(found)
}

/// POST /api/orders - checkout
pub async fn place(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<CartRequest>,
) -> AppResult<Json<PlacedOrder>> {
    let placed = orders::place_order(&state.pool, state.tz(), &user.id, &req.items).await?;
    let payment = UpiPayee::from_config(&state.config)
        .ok()
        .map(|payee| payment::payment_request(&payee, &placed));
    Ok(Json(PlacedOrder {
        order: placed,
        payment,
    }))
}

/// GET /api/orders/mine - PLACED first, then newest
pub async fn list_mine(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(order::find_by_user(&state.pool, &user.id).await?))
}

/// GET /api/orders?status=READY
pub async fn list_all(
    State(state): State<ServerState>,
    Query(query): Query<OrderQuery>,
) -> AppResult<Json<Vec<Order>>> {
    Ok(Json(order::find_all(&state.pool, query.status).await?))
}

/// GET /api/orders/{id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    Ok(Json(visible_order(&state, &user, id).await?))
}

/// PUT /api/orders/{id}/status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    Ok(Json(orders::update_status(&state.pool, id, payload.status).await?))
}

/// GET /api/orders/{id}/payment - UPI payload and payment status
pub async fn payment(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<PaymentRequest>> {
    let found = visible_order(&state, &user, id).await?;
    let payee = UpiPayee::from_config(&state.config)?;
    Ok(Json(payment::payment_request(&payee, &found)))
}

#[derive(Debug, Default, Deserialize)]
pub struct QrQuery {
    /// png (default) | svg
    #[serde(default)]
    pub format: Option<String>,
}

/// GET /api/orders/{id}/payment/qr?format=svg
pub async fn payment_qr(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Query(query): Query<QrQuery>,
) -> AppResult<Response> {
    let found = visible_order(&state, &user, id).await?;
    let payee = UpiPayee::from_config(&state.config)?;
    let request = payment::payment_request(&payee, &found);
    let qr = PaymentQr::encode(&request.upi_uri)?;
    let scale = state.config.qr_module_scale;

    let response = match query.format.as_deref() {
        Some(f) if f.eq_ignore_ascii_case("svg") => (
            [(header::CONTENT_TYPE, "image/svg+xml".to_string())],
            qr.to_svg(scale),
        )
            .into_response(),
        _ => (
            [(header::CONTENT_TYPE, "image/png".to_string())],
            qr.to_png(scale)?,
        )
            .into_response(),
    };
    Ok(response)
}

/// POST /api/orders/{id}/payment/confirm - "I have paid" or counter confirmation
pub async fn confirm_payment(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let found = load_order(&state.pool, id).await?;
    ensure_order_access(&user, &found, PAYMENTS_CONFIRM)?;
    Ok(Json(payment::confirm_payment(&state.pool, id).await?))
}

/// GET /api/orders/{id}/receipt - PDF, COMPLETED orders only
pub async fn receipt(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Response> {
    let found = visible_order(&state, &user, id).await?;
    ensure_receipt_available(&found)?;

    let customer = account::find_by_id(&state.pool, &found.user_id).await?;
    let (customer_name, customer_id) = match &customer {
        Some(acc) => (acc.name.as_str(), acc.user_id.as_str()),
        None => ("N/A", found.user_id.as_str()),
    };

    let qr = match UpiPayee::from_config(&state.config) {
        Ok(payee) => Some(PaymentQr::encode(&payment::build_upi_uri(
            &payee,
            found.total_amount,
            found.id,
        ))?),
        Err(_) => None,
    };

    let bytes = render_receipt(&Receipt {
        order: &found,
        customer_name,
        customer_id,
        tz: state.tz(),
        qr: qr.as_ref(),
    })?;

    tracing::info!(order_id = id, size = bytes.len(), "Receipt rendered");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", receipt_filename(id)),
            ),
        ],
        bytes,
    )
        .into_response())
}
