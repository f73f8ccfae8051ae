//! Startup manager account
//!
//! Self-registration only ever creates students, so the first manager comes
//! from configuration (`CANTEEN_ADMIN_ID` / `CANTEEN_ADMIN_PASSWORD`).

use shared::models::Role;
use sqlx::SqlitePool;

use crate::auth::password::hash_password;
use crate::db::repository::{RepoError, RepoResult, account};

/// Create the configured manager when no manager exists yet
///
/// Returns `true` when an account was created.
pub async fn ensure_manager(pool: &SqlitePool, user_id: &str, password: &str) -> RepoResult<bool> {
    if account::count_by_role(pool, Role::Manager).await? > 0 {
        return Ok(false);
    }

    if account::find_by_id(pool, user_id).await?.is_some() {
        tracing::warn!(
            user_id = %user_id,
            "Bootstrap manager id is taken by a non-manager account, skipping"
        );
        return Ok(false);
    }

    let hash = hash_password(password)
        .map_err(|e| RepoError::Database(format!("Failed to hash password: {e}")))?;
    account::create(pool, user_id, "Manager", Role::Manager, &hash).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::verify_password;
    use crate::db::repository::test_support::memory_pool;

    #[tokio::test]
    async fn test_creates_manager_once() {
        let pool = memory_pool().await;
        assert!(ensure_manager(&pool, "admin", "secret").await.unwrap());
        assert!(!ensure_manager(&pool, "admin2", "secret").await.unwrap());

        let admin = account::find_by_id(&pool, "admin").await.unwrap().unwrap();
        assert_eq!(admin.role, Role::Manager);
        assert!(verify_password("secret", &admin.password_hash).unwrap());
        assert!(account::find_by_id(&pool, "admin2").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_skips_taken_id() {
        let pool = memory_pool().await;
        account::create(&pool, "admin", "Student", Role::Student, "h")
            .await
            .unwrap();
        assert!(!ensure_manager(&pool, "admin", "secret").await.unwrap());
        assert_eq!(account::count_by_role(&pool, Role::Manager).await.unwrap(), 0);
    }
}
