//! Orders API
//!
//! | Path | Method | Permission |
//! |------|--------|------------|
//! | /api/orders | POST | orders:place |
//! | /api/orders/mine | GET | orders:place |
//! | /api/orders | GET | orders:view_all |
//! | /api/orders/{id} | GET | owner or orders:view_all |
//! | /api/orders/{id}/status | PUT | orders:update_status |
//! | /api/orders/{id}/payment | GET | owner or orders:view_all |
//! | /api/orders/{id}/payment/qr | GET | owner or orders:view_all |
//! | /api/orders/{id}/payment/confirm | POST | owner or payments:confirm |
//! | /api/orders/{id}/receipt | GET | owner or orders:view_all |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::permissions::{ORDERS_PLACE, ORDERS_UPDATE_STATUS, ORDERS_VIEW_ALL};
use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    let student_routes = Router::new()
        .route("/", post(handler::place))
        .route("/mine", get(handler::list_mine))
        .layer(middleware::from_fn(require_permission(ORDERS_PLACE)));

    let staff_routes = Router::new()
        .route("/", get(handler::list_all))
        .layer(middleware::from_fn(require_permission(ORDERS_VIEW_ALL)));

    let status_routes = Router::new()
        .route("/{id}/status", put(handler::update_status))
        .layer(middleware::from_fn(require_permission(ORDERS_UPDATE_STATUS)));

    // ownership is checked per order inside the handlers
    let order_routes = Router::new()
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/payment", get(handler::payment))
        .route("/{id}/payment/qr", get(handler::payment_qr))
        .route("/{id}/payment/confirm", post(handler::confirm_payment))
        .route("/{id}/receipt", get(handler::receipt));

    student_routes
        .merge(staff_routes)
        .merge(status_routes)
        .merge(order_routes)
}
