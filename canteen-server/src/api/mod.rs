//! HTTP API
//!
//! # Structure
//!
//! - [`health`] - liveness check (public)
//! - [`auth`] - register / login / me
//! - [`accounts`] - staff account management
//! - [`menu`] - menu items with effective prices
//! - [`offers`] - discount offers
//! - [`cart`] - cart pricing
//! - [`orders`] - checkout, status workflow, payment, receipt
//! - [`reports`] - dashboard, charts, exports

pub mod accounts;
pub mod auth;
pub mod cart;
pub mod health;
pub mod logging;
pub mod menu;
pub mod offers;
pub mod orders;
pub mod reports;

use std::time::Duration;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

pub use crate::utils::AppResult;

/// Request ID generator (UUID v4)
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// All routes, no middleware, no state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(accounts::router())
        .merge(menu::router())
        .merge(offers::router())
        .merge(cart::router())
        .merge(orders::router())
        .merge(reports::router())
}

/// Routes plus the full middleware stack
///
/// Used by the HTTP server and by the integration tests (`oneshot`).
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    #[allow(deprecated)]
    let timeout = TimeoutLayer::new(Duration::from_millis(state.config.request_timeout_ms));

    build_router()
        .layer(timeout)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        // request logging
        .layer(axum_middleware::from_fn(logging::logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static("x-request-id"),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            "x-request-id",
        )))
        // JWT authentication, injects CurrentUser; skips public routes
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            crate::auth::require_auth,
        ))
}
