//! Menu API
//!
//! Reads are open to every role; changes need `menu:manage`.

mod handler;

use axum::{
    Router, middleware,
    routing::{delete, get, post, put},
};

use crate::auth::permissions::{MENU_MANAGE, MENU_VIEW};
use crate::auth::require_permission;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/menu", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list))
        .route("/{id}", get(handler::get_by_id))
        .layer(middleware::from_fn(require_permission(MENU_VIEW)));

    let write_routes = Router::new()
        .route("/", post(handler::create))
        .route("/{id}", put(handler::update))
        .route("/{id}", delete(handler::delete))
        .route("/{id}/toggle", post(handler::toggle))
        .layer(middleware::from_fn(require_permission(MENU_MANAGE)));

    read_routes.merge(write_routes)
}
