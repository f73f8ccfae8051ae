//! Auth API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/auth/register | POST | none (creates a student) |
//! | /api/auth/login | POST | none |
//! | /api/auth/me | GET | any logged-in user |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/auth", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/register", post(handler::register))
        .route("/login", post(handler::login))
        .route("/me", get(handler::me))
}
