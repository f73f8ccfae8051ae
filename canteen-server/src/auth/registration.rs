//! Account creation (self-registration and manager-created staff)

use shared::models::{Account, Role};
use sqlx::SqlitePool;

use crate::auth::password::hash_password;
use crate::db::repository::account;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_USER_ID_LEN, validate_password, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// Validate, hash the password and insert
pub async fn create_account(
    pool: &SqlitePool,
    user_id: &str,
    name: &str,
    role: Role,
    password: &str,
) -> AppResult<Account> {
    let user_id = user_id.trim();
    let name = name.trim();
    validate_required_text(user_id, "user_id", MAX_USER_ID_LEN)?;
    validate_required_text(name, "name", MAX_NAME_LEN)?;
    validate_password(password)?;

    let hash = hash_password(password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;
    let created = account::create(pool, user_id, name, role, &hash).await?;

    tracing::info!(user_id = %created.user_id, role = %created.role, "Account created");
    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::verify_password;
    use crate::db::repository::test_support::memory_pool;
    use shared::error::ErrorCode;

    #[tokio::test]
    async fn test_create_trims_and_hashes() {
        let pool = memory_pool().await;
        let acc = create_account(&pool, " 21CS042 ", " Asha ", Role::Student, "pass1234")
            .await
            .unwrap();
        assert_eq!(acc.user_id, "21CS042");
        assert_eq!(acc.name, "Asha");
        assert!(verify_password("pass1234", &acc.password_hash).unwrap());
    }

    #[tokio::test]
    async fn test_duplicate_and_blank() {
        let pool = memory_pool().await;
        create_account(&pool, "a1", "A", Role::Student, "pass").await.unwrap();

        let err = create_account(&pool, "a1", "B", Role::Student, "pass")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AccountExists);

        let err = create_account(&pool, "a2", "  ", Role::Student, "pass")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }
}
