//! Account API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
};
use shared::error::ErrorCode;
use shared::models::{AccountActiveUpdate, AccountCreate, AccountResponse};

use crate::auth::CurrentUser;
use crate::auth::registration::create_account;
use crate::core::ServerState;
use crate::db::repository::account;
use crate::utils::{AppError, AppResult};

/// GET /api/accounts
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<AccountResponse>>> {
    let accounts = account::find_all(&state.pool).await?;
    Ok(Json(accounts.into_iter().map(Into::into).collect()))
}

/// POST /api/accounts - create an account with any role
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<AccountCreate>,
) -> AppResult<Json<AccountResponse>> {
    let created = create_account(
        &state.pool,
        &payload.user_id,
        &payload.name,
        payload.role,
        &payload.password,
    )
    .await?;
    Ok(Json(created.into()))
}

/// PUT /api/accounts/{user_id}/active
pub async fn set_active(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(user_id): Path<String>,
    Json(payload): Json<AccountActiveUpdate>,
) -> AppResult<Json<AccountResponse>> {
    if user_id == current_user.id && !payload.is_active {
        return Err(AppError::new(ErrorCode::AccountCannotDisableSelf));
    }

    let updated = account::set_active(&state.pool, &user_id, payload.is_active).await?;
    tracing::info!(
        user_id = %updated.user_id,
        is_active = updated.is_active,
        by = %current_user.id,
        "Account active flag changed"
    );
    Ok(Json(updated.into()))
}
