//! Menu Item Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};
use sqlx::SqlitePool;

/// Menu inserted on first start
pub const DEFAULT_MENU: &[(&str, f64)] = &[
    ("Masala Dosa", 50.0),
    ("Idli Sambar", 35.0),
    ("Veg Sandwich", 45.0),
    ("Pav Bhaji", 70.0),
    ("Chole Bhature", 80.0),
    ("Tea", 10.0),
    ("Coffee", 15.0),
];

fn name_exists(name: &str) -> RepoError {
    RepoError::Business(
        ErrorCode::MenuItemNameExists,
        format!("Item '{name}' already exists"),
    )
}

fn not_found(id: i64) -> RepoError {
    RepoError::Business(ErrorCode::MenuItemNotFound, format!("Menu item {id} not found"))
}

fn map_duplicate(name: &str) -> impl FnOnce(sqlx::Error) -> RepoError + '_ {
    move |e| match RepoError::from(e) {
        RepoError::Duplicate(_) => name_exists(name),
        other => other,
    }
}

/// Items sorted by name
pub async fn find_all(pool: &SqlitePool, available_only: bool) -> RepoResult<Vec<MenuItem>> {
    let sql = if available_only {
        "SELECT id, name, price, available FROM menu_item WHERE available = 1 ORDER BY name COLLATE NOCASE"
    } else {
        "SELECT id, name, price, available FROM menu_item ORDER BY name COLLATE NOCASE"
    };
    let items = sqlx::query_as::<_, MenuItem>(sql).fetch_all(pool).await?;
    Ok(items)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let item = sqlx::query_as::<_, MenuItem>(
        "SELECT id, name, price, available FROM menu_item WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(item)
}

pub async fn create(pool: &SqlitePool, data: MenuItemCreate) -> RepoResult<MenuItem> {
    let name = data.name.trim();
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO menu_item (name, price, available) VALUES (?, ?, ?) RETURNING id",
    )
    .bind(name)
    .bind(data.price)
    .bind(data.available.unwrap_or(true))
    .fetch_one(pool)
    .await
    .map_err(map_duplicate(name))?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

/// Partial update; absent fields keep their value
pub async fn update(pool: &SqlitePool, id: i64, data: MenuItemUpdate) -> RepoResult<MenuItem> {
    let name = data.name.as_deref().map(str::trim);
    let rows = sqlx::query(
        "UPDATE menu_item SET name = COALESCE(?, name), price = COALESCE(?, price), \
         available = COALESCE(?, available) WHERE id = ?",
    )
    .bind(name)
    .bind(data.price)
    .bind(data.available)
    .bind(id)
    .execute(pool)
    .await
    .map_err(map_duplicate(name.unwrap_or_default()))?
    .rows_affected();

    if rows == 0 {
        return Err(not_found(id));
    }

    find_by_id(pool, id).await?.ok_or_else(|| not_found(id))
}

/// Flip availability and return the updated item
pub async fn toggle_availability(pool: &SqlitePool, id: i64) -> RepoResult<MenuItem> {
    let rows = sqlx::query("UPDATE menu_item SET available = NOT available WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();

    if rows == 0 {
        return Err(not_found(id));
    }

    find_by_id(pool, id).await?.ok_or_else(|| not_found(id))
}

/// Delete an item; its item-specific offers go with it (FK cascade)
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM menu_item WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();

    if rows == 0 {
        return Err(not_found(id));
    }
    Ok(())
}

/// Insert [`DEFAULT_MENU`] when the menu table is empty; returns rows inserted
pub async fn seed_default_menu(pool: &SqlitePool) -> RepoResult<u64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM menu_item")
        .fetch_one(pool)
        .await?;
    if count > 0 {
        return Ok(0);
    }

    let mut tx = pool.begin().await?;
    let mut inserted = 0;
    for (name, price) in DEFAULT_MENU {
        inserted += sqlx::query("INSERT INTO menu_item (name, price, available) VALUES (?, ?, 1)")
            .bind(name)
            .bind(price)
            .execute(&mut *tx)
            .await?
            .rows_affected();
    }
    tx.commit().await?;
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::memory_pool;

    fn item(name: &str, price: f64) -> MenuItemCreate {
        MenuItemCreate {
            name: name.into(),
            price,
            available: None,
        }
    }

    #[tokio::test]
    async fn test_seed_only_once() {
        let pool = memory_pool().await;
        assert_eq!(seed_default_menu(&pool).await.unwrap(), 7);
        assert_eq!(seed_default_menu(&pool).await.unwrap(), 0);

        let names: Vec<String> = find_all(&pool, false)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names.first().map(String::as_str), Some("Chole Bhature"));
        assert_eq!(names.last().map(String::as_str), Some("Veg Sandwich"));
    }

    #[tokio::test]
    async fn test_create_trims_and_rejects_duplicates() {
        let pool = memory_pool().await;
        let created = create(&pool, item("  Samosa ", 12.0)).await.unwrap();
        assert_eq!(created.name, "Samosa");
        assert!(created.available);

        let err = create(&pool, item("Samosa", 15.0)).await.unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::MenuItemNameExists, _)));
    }

    #[tokio::test]
    async fn test_update_toggle_delete() {
        let pool = memory_pool().await;
        let tea = create(&pool, item("Tea", 10.0)).await.unwrap();
        create(&pool, item("Coffee", 15.0)).await.unwrap();

        let updated = update(
            &pool,
            tea.id,
            MenuItemUpdate {
                price: Some(12.0),
                ..Default::default()
            },
        )
        .await
        .unwrap();
        assert_eq!(updated.price, 12.0);
        assert_eq!(updated.name, "Tea");

        let err = update(
            &pool,
            tea.id,
            MenuItemUpdate {
                name: Some("Coffee".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::MenuItemNameExists, _)));

        let toggled = toggle_availability(&pool, tea.id).await.unwrap();
        assert!(!toggled.available);
        assert_eq!(find_all(&pool, true).await.unwrap().len(), 1);

        delete(&pool, tea.id).await.unwrap();
        let err = delete(&pool, tea.id).await.unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::MenuItemNotFound, _)));
    }
}
