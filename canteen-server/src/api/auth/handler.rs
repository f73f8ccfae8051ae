//! Auth API Handlers

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use shared::error::ErrorCode;
use shared::models::{AccountResponse, LoginRequest, LoginResponse, RegisterRequest, Role};

use crate::auth::password::{verify_dummy, verify_password};
use crate::auth::permissions::permissions_for;
use crate::auth::registration::create_account;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::account;
use crate::security_log;
use crate::utils::{AppError, AppResult};

/// Fixed delay before answering a login, found or not
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// POST /api/auth/register - student self-registration
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<AccountResponse>> {
    let created = create_account(&state.pool, &req.user_id, &req.name, Role::Student, &req.password).await?;
    Ok(Json(created.into()))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user_id = req.user_id.trim().to_string();
    let found = account::find_by_id(&state.pool, &user_id).await?;

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // one message for unknown user and wrong password
    let acc = match found {
        Some(acc) => {
            let valid = verify_password(&req.password, &acc.password_hash)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;
            if !valid {
                security_log!("WARN", "login_failed", user_id = user_id.clone(), reason = "invalid_password");
                return Err(AppError::invalid_credentials());
            }
            acc
        }
        None => {
            verify_dummy(&req.password);
            security_log!("WARN", "login_failed", user_id = user_id.clone(), reason = "user_not_found");
            return Err(AppError::invalid_credentials());
        }
    };

    if let Some(requested) = req.role.as_deref().filter(|r| !r.trim().is_empty())
        && Role::parse(requested) != Some(acc.role)
    {
        security_log!("WARN", "login_role_mismatch", user_id = user_id.clone(), requested = requested.to_string());
        return Err(AppError::with_message(
            ErrorCode::RoleMismatch,
            format!("Account exists with role {}.", acc.role.display_name()),
        ));
    }

    if !acc.is_active {
        security_log!("WARN", "login_disabled", user_id = user_id.clone());
        return Err(AppError::with_message(
            ErrorCode::AccountDisabled,
            "Account has been disabled",
        ));
    }

    let permissions = permissions_for(acc.role);
    let token = state
        .get_jwt_service()
        .generate_token(&acc.user_id, &acc.name, acc.role, &permissions)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(user_id = %acc.user_id, role = %acc.role, "User logged in");

    Ok(Json(LoginResponse {
        token,
        user: acc.into(),
    }))
}

/// GET /api/auth/me
pub async fn me(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<AccountResponse>> {
    let acc = account::find_by_id(&state.pool, &user.id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::AccountNotFound, format!("Account {} not found", user.id))
        })?;
    Ok(Json(acc.into()))
}
