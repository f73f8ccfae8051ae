//! Reports API (`reports:view`)
//!
//! Dashboard counters, chart series and order exports.

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::permissions::REPORTS_VIEW;
use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reports", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/summary", get(handler::summary))
        .route("/charts", get(handler::charts))
        .route("/top-items", get(handler::top_items))
        .route("/orders-by-hour", get(handler::orders_by_hour))
        .route("/revenue-by-day", get(handler::revenue_by_day))
        .route("/export.csv", get(handler::export_csv))
        .route("/export.xlsx", get(handler::export_xlsx))
        .layer(middleware::from_fn(require_permission(REPORTS_VIEW)))
}
