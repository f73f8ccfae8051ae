//! Offer Repository

use super::{RepoError, RepoResult};
use shared::error::ErrorCode;
use shared::models::{Offer, OfferCreate, OfferUpdate, OfferView};
use shared::util::now_millis;
use sqlx::SqlitePool;

const COLUMNS: &str = "o.id AS id, o.name AS name, o.item_id AS item_id, \
     o.discount_type AS discount_type, o.discount_value AS discount_value, \
     o.start_date AS start_date, o.end_date AS end_date, o.day_of_week AS day_of_week, \
     o.active AS active, o.created_at AS created_at";

#[derive(sqlx::FromRow)]
struct OfferRow {
    #[sqlx(flatten)]
    offer: Offer,
    item_name: Option<String>,
}

fn not_found(id: i64) -> RepoError {
    RepoError::Business(ErrorCode::OfferNotFound, format!("Offer {id} not found"))
}

fn map_missing_item(e: sqlx::Error) -> RepoError {
    match RepoError::from(e) {
        RepoError::Validation(_) => RepoError::Business(
            ErrorCode::MenuItemNotFound,
            "Offer targets a menu item that does not exist".into(),
        ),
        other => other,
    }
}

/// All offers, newest first, with the target item's name
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<OfferView>> {
    let rows = sqlx::query_as::<_, OfferRow>(&format!(
        "SELECT {COLUMNS}, m.name AS item_name FROM offer o \
         LEFT JOIN menu_item m ON m.id = o.item_id ORDER BY o.id DESC"
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| OfferView {
            item_name: row.item_name.unwrap_or_else(|| "All Items".to_string()),
            offer: row.offer,
        })
        .collect())
}

/// Offers with the `active` flag set; date and weekday windows are checked
/// by the pricing matcher
pub async fn find_active(pool: &SqlitePool) -> RepoResult<Vec<Offer>> {
    let offers = sqlx::query_as::<_, Offer>(&format!(
        "SELECT {COLUMNS} FROM offer o WHERE o.active = 1 ORDER BY o.id"
    ))
    .fetch_all(pool)
    .await?;
    Ok(offers)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Offer>> {
    let offer = sqlx::query_as::<_, Offer>(&format!("SELECT {COLUMNS} FROM offer o WHERE o.id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(offer)
}

pub async fn create(pool: &SqlitePool, data: OfferCreate) -> RepoResult<Offer> {
    let id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO offer (name, item_id, discount_type, discount_value, start_date, end_date, \
         day_of_week, active, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING id",
    )
    .bind(data.name.trim())
    .bind(data.item_id)
    .bind(data.discount_type)
    .bind(data.discount_value)
    .bind(data.start_date)
    .bind(data.end_date)
    .bind(data.day_of_week)
    .bind(data.active.unwrap_or(true))
    .bind(now_millis())
    .fetch_one(pool)
    .await
    .map_err(map_missing_item)?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create offer".into()))
}

/// Replace an offer with already merged values
///
/// Callers merge [`OfferUpdate`] into the existing row (see
/// [`merge_update`]) and validate the result before saving.
pub async fn save(pool: &SqlitePool, offer: &Offer) -> RepoResult<Offer> {
    let rows = sqlx::query(
        "UPDATE offer SET name = ?, item_id = ?, discount_type = ?, discount_value = ?, \
         start_date = ?, end_date = ?, day_of_week = ?, active = ? WHERE id = ?",
    )
    .bind(&offer.name)
    .bind(offer.item_id)
    .bind(offer.discount_type)
    .bind(offer.discount_value)
    .bind(&offer.start_date)
    .bind(&offer.end_date)
    .bind(offer.day_of_week)
    .bind(offer.active)
    .bind(offer.id)
    .execute(pool)
    .await
    .map_err(map_missing_item)?
    .rows_affected();

    if rows == 0 {
        return Err(not_found(offer.id));
    }

    find_by_id(pool, offer.id)
        .await?
        .ok_or_else(|| not_found(offer.id))
}

/// Apply a partial update onto an existing offer
pub fn merge_update(mut offer: Offer, data: OfferUpdate) -> Offer {
    if let Some(name) = data.name {
        offer.name = name.trim().to_string();
    }
    if let Some(item_id) = data.item_id {
        offer.item_id = item_id;
    }
    if let Some(discount_type) = data.discount_type {
        offer.discount_type = discount_type;
    }
    if let Some(value) = data.discount_value {
        offer.discount_value = value;
    }
    if let Some(start) = data.start_date {
        offer.start_date = start;
    }
    if let Some(end) = data.end_date {
        offer.end_date = end;
    }
    if let Some(day) = data.day_of_week {
        offer.day_of_week = day;
    }
    if let Some(active) = data.active {
        offer.active = active;
    }
    offer
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM offer WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?
        .rows_affected();

    if rows == 0 {
        return Err(not_found(id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::menu_item;
    use crate::db::repository::test_support::memory_pool;
    use shared::models::{DiscountType, MenuItemCreate, Weekday};

    fn offer_for(item_id: Option<i64>) -> OfferCreate {
        OfferCreate {
            name: "Happy Hour".into(),
            item_id,
            discount_type: DiscountType::Percentage,
            discount_value: 10.0,
            start_date: Some("2025-01-01".into()),
            end_date: None,
            day_of_week: Some(Weekday::Fri),
            active: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_list_with_item_names() {
        let pool = memory_pool().await;
        let tea = menu_item::create(
            &pool,
            MenuItemCreate {
                name: "Tea".into(),
                price: 10.0,
                available: None,
            },
        )
        .await
        .unwrap();

        let global = create(&pool, offer_for(None)).await.unwrap();
        let specific = create(&pool, offer_for(Some(tea.id))).await.unwrap();
        assert_eq!(specific.day_of_week, Some(Weekday::Fri));
        assert!(specific.active);

        let views = find_all(&pool).await.unwrap();
        assert_eq!(views.len(), 2);
        assert_eq!(views[0].offer.id, specific.id);
        assert_eq!(views[0].item_name, "Tea");
        assert_eq!(views[1].offer.id, global.id);
        assert_eq!(views[1].item_name, "All Items");
    }

    #[tokio::test]
    async fn test_unknown_item_rejected() {
        let pool = memory_pool().await;
        let err = create(&pool, offer_for(Some(999))).await.unwrap_err();
        assert!(matches!(err, RepoError::Business(ErrorCode::MenuItemNotFound, _)));
    }

    #[tokio::test]
    async fn test_deleting_item_removes_its_offers() {
        let pool = memory_pool().await;
        let dosa = menu_item::create(
            &pool,
            MenuItemCreate {
                name: "Masala Dosa".into(),
                price: 50.0,
                available: None,
            },
        )
        .await
        .unwrap();
        create(&pool, offer_for(Some(dosa.id))).await.unwrap();
        create(&pool, offer_for(None)).await.unwrap();

        menu_item::delete(&pool, dosa.id).await.unwrap();
        let remaining = find_all(&pool).await.unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].offer.item_id, None);
    }

    #[tokio::test]
    async fn test_merge_and_save() {
        let pool = memory_pool().await;
        let offer = create(&pool, offer_for(None)).await.unwrap();

        let merged = merge_update(
            offer.clone(),
            OfferUpdate {
                discount_value: Some(25.0),
                day_of_week: Some(None),
                active: Some(false),
                ..Default::default()
            },
        );
        let saved = save(&pool, &merged).await.unwrap();
        assert_eq!(saved.discount_value, 25.0);
        assert_eq!(saved.day_of_week, None);
        assert_eq!(saved.start_date, offer.start_date);
        assert!(!saved.active);
        assert!(find_active(&pool).await.unwrap().is_empty());

        delete(&pool, offer.id).await.unwrap();
        assert!(matches!(
            delete(&pool, offer.id).await.unwrap_err(),
            RepoError::Business(ErrorCode::OfferNotFound, _)
        ));
    }
}
