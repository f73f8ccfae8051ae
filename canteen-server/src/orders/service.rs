//! Order service
//!
//! Checkout and order lifecycle on top of the order repository.

use chrono_tz::Tz;
use shared::error::ErrorCode;
use shared::models::{CartLine, CartQuote, Order, OrderItem, OrderStatus};
use sqlx::SqlitePool;

use crate::auth::CurrentUser;
use crate::db::repository::{RepoError, menu_item, offer, order};
use crate::pricing::{PricingDay, price_item};
use crate::utils::validation::MAX_LINE_QTY;
use crate::utils::{AppError, AppResult, money};

use super::{allocate_token, check_transition};

fn quantity_out_of_range(item_id: i64, message: String) -> AppError {
    AppError::with_message(ErrorCode::ValueOutOfRange, message).with_detail("item_id", item_id)
}

/// Merge duplicate item ids (quantities summed), keeping first-seen order
///
/// Every line and every merged sum stays within `1..=MAX_LINE_QTY`.
pub fn merge_lines(lines: &[CartLine]) -> AppResult<Vec<CartLine>> {
    if lines.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }

    let too_many = |item_id: i64| {
        quantity_out_of_range(
            item_id,
            format!("Quantity must be at most {MAX_LINE_QTY} (item {item_id})"),
        )
    };

    let mut merged: Vec<CartLine> = Vec::with_capacity(lines.len());
    for line in lines {
        if line.qty < 1 {
            return Err(quantity_out_of_range(
                line.item_id,
                format!("Quantity must be at least 1 (item {})", line.item_id),
            ));
        }
        if line.qty > MAX_LINE_QTY {
            return Err(too_many(line.item_id));
        }
        match merged.iter_mut().find(|m| m.item_id == line.item_id) {
            Some(existing) => {
                existing.qty = existing
                    .qty
                    .checked_add(line.qty)
                    .filter(|qty| *qty <= MAX_LINE_QTY)
                    .ok_or_else(|| too_many(line.item_id))?;
            }
            None => merged.push(line.clone()),
        }
    }

    Ok(merged)
}

/// Price a cart with today's offers, without persisting anything
pub async fn quote_cart(pool: &SqlitePool, tz: Tz, lines: &[CartLine]) -> AppResult<CartQuote> {
    let merged = merge_lines(lines)?;
    let offers = offer::find_active(pool).await?;
    let day = PricingDay::now(tz);

    let mut priced = Vec::with_capacity(merged.len());
    for line in merged {
        let item = menu_item::find_by_id(pool, line.item_id).await?.ok_or_else(|| {
            AppError::with_message(
                ErrorCode::MenuItemNotFound,
                format!("Menu item {} not found", line.item_id),
            )
        })?;
        if !item.available {
            return Err(AppError::with_message(
                ErrorCode::MenuItemUnavailable,
                format!("{} is currently unavailable", item.name),
            )
            .with_detail("item_id", item.id));
        }

        let best = price_item(&item, &offers, &day);
        priced.push(OrderItem {
            item_id: item.id,
            item_name: item.name,
            unit_price: best.final_price,
            original_price: item.price,
            offer_desc: best.offer_desc,
            qty: line.qty,
            line_total: money::line_total(best.final_price, line.qty),
        });
    }

    let total = money::sum(priced.iter().map(|l| l.line_total));
    Ok(CartQuote {
        lines: priced,
        total,
    })
}

/// Checkout: price, allocate a token and persist in one transaction
pub async fn place_order(
    pool: &SqlitePool,
    tz: Tz,
    user_id: &str,
    lines: &[CartLine],
) -> AppResult<Order> {
    let quote = quote_cart(pool, tz, lines).await?;

    let mut tx = pool.begin().await.map_err(RepoError::from)?;
    let taken = order::open_tokens(&mut *tx).await?;
    let token = allocate_token(&taken, &mut rand::thread_rng())?;
    let order_id = order::insert(&mut *tx, user_id, quote.total, &token, &quote.lines).await?;
    tx.commit().await.map_err(RepoError::from)?;

    tracing::info!(
        order_id,
        user_id = %user_id,
        token = %token,
        total = quote.total,
        "Order placed"
    );

    load_order(pool, order_id).await
}

/// Fetch an order with its lines, or `OrderNotFound`
pub async fn load_order(pool: &SqlitePool, id: i64) -> AppResult<Order> {
    order::find_by_id(pool, id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::OrderNotFound, format!("Order {id} not found"))
    })
}

/// Compare-and-set attempts before giving up on a contended order
const STATUS_UPDATE_ATTEMPTS: usize = 3;

/// Move an order forward in the workflow
///
/// The write only lands while the order still holds the status the
/// transition was checked against; a concurrent change is re-read and
/// re-checked, so an order never moves backwards.
pub async fn update_status(pool: &SqlitePool, id: i64, status: OrderStatus) -> AppResult<Order> {
    for _ in 0..STATUS_UPDATE_ATTEMPTS {
        let current = load_order(pool, id).await?;
        if !check_transition(current.status, status)? {
            return Ok(current);
        }

        if order::update_status(pool, id, current.status, status).await? {
            tracing::info!(order_id = id, from = %current.status, to = %status, "Order status changed");
            return load_order(pool, id).await;
        }
        tracing::debug!(order_id = id, "Order status changed concurrently, retrying");
    }

    Err(AppError::with_message(
        ErrorCode::InvalidStatusTransition,
        format!("Order {id} is being updated concurrently"),
    ))
}

/// Owner, or a user holding `permission`
pub fn ensure_order_access(user: &CurrentUser, order: &Order, permission: &str) -> AppResult<()> {
    if user.owns_or_has(&order.user_id, permission) {
        Ok(())
    } else {
        Err(AppError::forbidden(format!(
            "Order {} belongs to another user",
            order.id
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::account;
    use crate::db::repository::test_support::memory_pool;
    use chrono_tz::Asia::Kolkata;
    use shared::models::{
        DiscountType, MenuItemCreate, MenuItemUpdate, OfferCreate, PaymentStatus, Role,
    };

    fn cart(lines: &[(i64, i64)]) -> Vec<CartLine> {
        lines
            .iter()
            .map(|&(item_id, qty)| CartLine { item_id, qty })
            .collect()
    }

    async fn setup() -> (SqlitePool, i64, i64) {
        let pool = memory_pool().await;
        account::create(&pool, "s1", "Asha", Role::Student, "h")
            .await
            .unwrap();
        let tea = menu_item::create(
            &pool,
            MenuItemCreate { name: "Tea".into(), price: 10.0, available: None },
        )
        .await
        .unwrap();
        let dosa = menu_item::create(
            &pool,
            MenuItemCreate { name: "Masala Dosa".into(), price: 50.0, available: None },
        )
        .await
        .unwrap();
        (pool, tea.id, dosa.id)
    }

    #[test]
    fn test_merge_lines() {
        let merged = merge_lines(&cart(&[(2, 1), (1, 2), (2, 3)])).unwrap();
        assert_eq!(merged.len(), 2);
        assert_eq!((merged[0].item_id, merged[0].qty), (2, 4));
        assert_eq!((merged[1].item_id, merged[1].qty), (1, 2));
    }

    #[test]
    fn test_merge_rejects_bad_quantities() {
        assert_eq!(merge_lines(&[]).unwrap_err().code, ErrorCode::OrderEmpty);
        assert_eq!(
            merge_lines(&cart(&[(1, 0)])).unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );
        assert_eq!(
            merge_lines(&cart(&[(1, 60), (1, 40)])).unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );
        assert!(merge_lines(&cart(&[(1, 99)])).is_ok());
    }

    #[test]
    fn test_merge_bounds_each_line_before_summing() {
        assert_eq!(
            merge_lines(&cart(&[(1, 100)])).unwrap_err().code,
            ErrorCode::ValueOutOfRange
        );
        // would wrap to a negative quantity if summed unchecked
        let err = merge_lines(&cart(&[(1, i64::MAX), (1, 1)])).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
        let err = merge_lines(&cart(&[(1, 1), (1, i64::MAX)])).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValueOutOfRange);
    }

    #[tokio::test]
    async fn test_quote_applies_best_offer() {
        let (pool, tea, dosa) = setup().await;
        offer::create(
            &pool,
            OfferCreate {
                name: "Dosa Deal".into(),
                item_id: Some(dosa),
                discount_type: DiscountType::Percentage,
                discount_value: 10.0,
                start_date: None,
                end_date: None,
                day_of_week: None,
                active: None,
            },
        )
        .await
        .unwrap();

        let quote = quote_cart(&pool, Kolkata, &cart(&[(tea, 2), (dosa, 1), (tea, 1)]))
            .await
            .unwrap();
        assert_eq!(quote.lines.len(), 2);
        assert_eq!(quote.lines[0].qty, 3);
        assert_eq!(quote.lines[0].line_total, 30.0);
        assert_eq!(quote.lines[1].unit_price, 45.0);
        assert_eq!(quote.lines[1].original_price, 50.0);
        assert_eq!(quote.lines[1].offer_desc.as_deref(), Some("Dosa Deal: 10% off"));
        assert_eq!(quote.total, 75.0);
    }

    #[tokio::test]
    async fn test_quote_rejects_unknown_and_unavailable() {
        let (pool, tea, _) = setup().await;
        let err = quote_cart(&pool, Kolkata, &cart(&[(999, 1)])).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MenuItemNotFound);

        menu_item::update(
            &pool,
            tea,
            MenuItemUpdate { available: Some(false), ..Default::default() },
        )
        .await
        .unwrap();
        let err = quote_cart(&pool, Kolkata, &cart(&[(tea, 1)])).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MenuItemUnavailable);
    }

    #[tokio::test]
    async fn test_place_order_persists_snapshot() {
        let (pool, tea, dosa) = setup().await;
        let order = place_order(&pool, Kolkata, "s1", &cart(&[(tea, 2), (dosa, 1)]))
            .await
            .unwrap();

        assert_eq!(order.user_id, "s1");
        assert_eq!(order.status, OrderStatus::Placed);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert_eq!(order.total_amount, 70.0);
        assert_eq!(order.token_number.len(), 4);
        assert_eq!(order.items.len(), 2);

        // later menu edits do not touch the placed order
        menu_item::update(
            &pool,
            tea,
            MenuItemUpdate { price: Some(12.0), ..Default::default() },
        )
        .await
        .unwrap();
        let reloaded = load_order(&pool, order.id).await.unwrap();
        assert_eq!(reloaded.items[0].unit_price, 10.0);
    }

    #[tokio::test]
    async fn test_open_orders_get_distinct_tokens() {
        let (pool, tea, _) = setup().await;
        let mut tokens = std::collections::HashSet::new();
        for _ in 0..20 {
            let order = place_order(&pool, Kolkata, "s1", &cart(&[(tea, 1)]))
                .await
                .unwrap();
            assert!(tokens.insert(order.token_number));
        }
    }

    #[tokio::test]
    async fn test_status_workflow() {
        let (pool, tea, _) = setup().await;
        let order = place_order(&pool, Kolkata, "s1", &cart(&[(tea, 1)]))
            .await
            .unwrap();

        let ready = update_status(&pool, order.id, OrderStatus::Ready).await.unwrap();
        assert_eq!(ready.status, OrderStatus::Ready);

        let same = update_status(&pool, order.id, OrderStatus::Ready).await.unwrap();
        assert_eq!(same.updated_at, ready.updated_at);

        let err = update_status(&pool, order.id, OrderStatus::Placed)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);

        let err = update_status(&pool, 404, OrderStatus::Ready).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }

    #[tokio::test]
    async fn test_status_never_moves_backwards_after_concurrent_completion() {
        let (pool, tea, _) = setup().await;
        let order = place_order(&pool, Kolkata, "s1", &cart(&[(tea, 1)]))
            .await
            .unwrap();

        // a stale writer that checked PLACED -> READY loses to the completion
        assert!(
            order::update_status(&pool, order.id, OrderStatus::Placed, OrderStatus::Completed)
                .await
                .unwrap()
        );
        assert!(
            !order::update_status(&pool, order.id, OrderStatus::Placed, OrderStatus::Ready)
                .await
                .unwrap()
        );

        let err = update_status(&pool, order.id, OrderStatus::Ready)
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
        let reloaded = load_order(&pool, order.id).await.unwrap();
        assert_eq!(reloaded.status, OrderStatus::Completed);
    }
}
