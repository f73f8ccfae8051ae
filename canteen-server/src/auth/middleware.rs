//! Authentication middleware
//!
//! Axum middleware for JWT authentication and permission checks

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use shared::error::ErrorCode;
use sqlx::SqlitePool;

use crate::AppError;
use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::db::repository::account;
use crate::security_log;

/// API routes reachable without a token
const PUBLIC_API_ROUTES: &[&str] = &["/api/auth/login", "/api/auth/register"];

/// Authentication middleware
///
/// Extracts and validates the JWT from `Authorization: Bearer <token>` and
/// inserts [`CurrentUser`] into request extensions.
///
/// Skipped for:
/// - `OPTIONS *` (CORS preflight)
/// - non-`/api/` paths (health check, unknown paths fall through to 404)
/// - `/api/auth/login`, `/api/auth/register`
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }

    if PUBLIC_API_ROUTES.contains(&path) {
        return Ok(next.run(req).await);
    }

    let jwt_service = state.get_jwt_service();
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", req.uri()));
            return Err(AppError::not_authenticated());
        }
    };

    match jwt_service
        .validate_token(token)
        .and_then(CurrentUser::try_from)
    {
        Ok(user) => {
            ensure_account_active(&state.pool, &user).await?;
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(e) => {
            security_log!(
                "WARN",
                "auth_failed",
                error = format!("{}", e),
                uri = format!("{:?}", req.uri())
            );

            match e {
                JwtError::ExpiredToken => Err(AppError::token_expired()),
                _ => Err(AppError::invalid_token("Invalid token")),
            }
        }
    }
}

/// Reject tokens whose account has since been disabled
///
/// Tokens outlive `set_account_active(false)`, so the flag is read on every
/// authenticated request.
pub async fn ensure_account_active(pool: &SqlitePool, user: &CurrentUser) -> Result<(), AppError> {
    let active = account::find_by_id(pool, &user.id)
        .await?
        .map(|acc| acc.is_active);

    match active {
        Some(true) => Ok(()),
        Some(false) => {
            security_log!("WARN", "auth_account_disabled", user_id = user.id.clone());
            Err(AppError::with_message(
                ErrorCode::AccountDisabled,
                "Account has been disabled",
            ))
        }
        None => {
            security_log!("WARN", "auth_account_missing", user_id = user.id.clone());
            Err(AppError::invalid_token("Account no longer exists"))
        }
    }
}

/// Permission check middleware
///
/// Supports `"orders:*"` wildcards and the `"all"` super-permission.
///
/// ```ignore
/// use axum::middleware;
/// Router::new()
///     .route("/api/menu", post(handler::create))
///     .layer(middleware::from_fn(require_permission("menu:manage")));
/// ```
///
/// Missing permission returns 403.
pub fn require_permission(
    permission: &'static str,
) -> impl Fn(
    Request,
    Next,
) -> std::pin::Pin<Box<dyn std::future::Future<Output = Result<Response, AppError>> + Send>>
+ Clone {
    move |req: Request, next: Next| {
        Box::pin(async move {
            let user = req
                .extensions()
                .get::<CurrentUser>()
                .ok_or(AppError::not_authenticated())?;

            if !user.has_permission(permission) {
                security_log!(
                    "WARN",
                    "permission_denied",
                    user_id = user.id.clone(),
                    role = user.role.as_str(),
                    required_permission = permission
                );
                return Err(AppError::forbidden(format!(
                    "Permission denied: {}",
                    permission
                )));
            }

            Ok(next.run(req).await)
        })
    }
}
