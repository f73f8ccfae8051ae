//! Account Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{Account, Role};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "user_id, name, role, password_hash, is_active, created_at";

pub async fn find_by_id(pool: &SqlitePool, user_id: &str) -> RepoResult<Option<Account>> {
    let account = sqlx::query_as::<_, Account>(&format!(
        "SELECT {COLUMNS} FROM account WHERE user_id = ?"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?;
    Ok(account)
}

/// All accounts, staff first
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Account>> {
    let accounts = sqlx::query_as::<_, Account>(&format!(
        "SELECT {COLUMNS} FROM account \
         ORDER BY CASE role WHEN 'manager' THEN 0 WHEN 'attendant' THEN 1 ELSE 2 END, user_id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(accounts)
}

pub async fn count_by_role(pool: &SqlitePool, role: Role) -> RepoResult<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM account WHERE role = ?")
        .bind(role)
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Insert an account; `password_hash` must already be hashed
pub async fn create(
    pool: &SqlitePool,
    user_id: &str,
    name: &str,
    role: Role,
    password_hash: &str,
) -> RepoResult<Account> {
    sqlx::query(
        "INSERT INTO account (user_id, name, role, password_hash, is_active, created_at) \
         VALUES (?, ?, ?, ?, 1, ?)",
    )
    .bind(user_id)
    .bind(name)
    .bind(role)
    .bind(password_hash)
    .bind(now_millis())
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => RepoError::Business(
            ErrorCode::AccountExists,
            format!("User ID '{user_id}' already exists"),
        ),
        other => other,
    })?;

    find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create account".into()))
}

pub async fn set_active(pool: &SqlitePool, user_id: &str, is_active: bool) -> RepoResult<Account> {
    let rows = sqlx::query("UPDATE account SET is_active = ? WHERE user_id = ?")
        .bind(is_active)
        .bind(user_id)
        .execute(pool)
        .await?
        .rows_affected();

    if rows == 0 {
        return Err(RepoError::Business(
            ErrorCode::AccountNotFound,
            format!("User '{user_id}' not found"),
        ));
    }

    find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| {
            RepoError::Business(ErrorCode::AccountNotFound, format!("User '{user_id}' not found"))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::memory_pool;

    #[tokio::test]
    async fn test_create_and_find() {
        let pool = memory_pool().await;
        let account = create(&pool, "21CS042", "Asha", Role::Student, "hash")
            .await
            .unwrap();
        assert_eq!(account.role, Role::Student);
        assert!(account.is_active);

        let found = find_by_id(&pool, "21CS042").await.unwrap().unwrap();
        assert_eq!(found.name, "Asha");
        assert_eq!(found.password_hash, "hash");
        assert!(find_by_id(&pool, "nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_user_id() {
        let pool = memory_pool().await;
        create(&pool, "m1", "Meera", Role::Manager, "h").await.unwrap();
        let err = create(&pool, "m1", "Other", Role::Student, "h")
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::AccountExists, _)));
    }

    #[tokio::test]
    async fn test_set_active_and_ordering() {
        let pool = memory_pool().await;
        create(&pool, "s1", "Student", Role::Student, "h").await.unwrap();
        create(&pool, "a1", "Attendant", Role::Attendant, "h").await.unwrap();
        create(&pool, "m1", "Manager", Role::Manager, "h").await.unwrap();

        let ids: Vec<String> = find_all(&pool)
            .await
            .unwrap()
            .into_iter()
            .map(|a| a.user_id)
            .collect();
        assert_eq!(ids, vec!["m1", "a1", "s1"]);

        let disabled = set_active(&pool, "s1", false).await.unwrap();
        assert!(!disabled.is_active);
        assert_eq!(count_by_role(&pool, Role::Manager).await.unwrap(), 1);

        let err = set_active(&pool, "ghost", true).await.unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::AccountNotFound, _)));
    }
}
