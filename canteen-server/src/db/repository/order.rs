//! Order Repository
//!
//! Orders and their line snapshots. Lines are stored in `order_item` and
//! attached after the order rows are loaded.

use std::collections::{HashMap, HashSet};

use super::RepoResult;
use shared::models::{Order, OrderItem, OrderStatus};
use shared::util::now_millis;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

const ORDER_COLUMNS: &str = "id, user_id, total_amount, token_number, status, payment_status, \
     paid_at, created_at, updated_at";

#[derive(sqlx::FromRow)]
struct ItemRow {
    order_id: i64,
    #[sqlx(flatten)]
    item: OrderItem,
}

/// Load line snapshots for a batch of orders
async fn attach_items(pool: &SqlitePool, orders: &mut [Order]) -> RepoResult<()> {
    if orders.is_empty() {
        return Ok(());
    }

    let mut qb: QueryBuilder<Sqlite> = QueryBuilder::new(
        "SELECT order_id, item_id, item_name, unit_price, original_price, offer_desc, qty, \
         line_total FROM order_item WHERE order_id IN (",
    );
    let mut separated = qb.separated(", ");
    for order in orders.iter() {
        separated.push_bind(order.id);
    }
    separated.push_unseparated(") ORDER BY id");

    let rows = qb.build_query_as::<ItemRow>().fetch_all(pool).await?;

    let mut by_order: HashMap<i64, Vec<OrderItem>> = HashMap::new();
    for row in rows {
        by_order.entry(row.order_id).or_default().push(row.item);
    }
    for order in orders.iter_mut() {
        order.items = by_order.remove(&order.id).unwrap_or_default();
    }
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Order>> {
    let order = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM \"order\" WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match order {
        Some(order) => {
            let mut orders = [order];
            attach_items(pool, &mut orders).await?;
            let [order] = orders;
            Ok(Some(order))
        }
        None => Ok(None),
    }
}

/// A user's orders: PLACED first, then newest first
pub async fn find_by_user(pool: &SqlitePool, user_id: &str) -> RepoResult<Vec<Order>> {
    let mut orders = sqlx::query_as::<_, Order>(&format!(
        "SELECT {ORDER_COLUMNS} FROM \"order\" WHERE user_id = ? \
         ORDER BY CASE status WHEN 'PLACED' THEN 0 ELSE 1 END, id DESC"
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    attach_items(pool, &mut orders).await?;
    Ok(orders)
}

/// All orders, newest first, optionally filtered by status
pub async fn find_all(pool: &SqlitePool, status: Option<OrderStatus>) -> RepoResult<Vec<Order>> {
    let mut orders = match status {
        Some(status) => {
            sqlx::query_as::<_, Order>(&format!(
                "SELECT {ORDER_COLUMNS} FROM \"order\" WHERE status = ? ORDER BY id DESC"
            ))
            .bind(status)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, Order>(&format!(
                "SELECT {ORDER_COLUMNS} FROM \"order\" ORDER BY id DESC"
            ))
            .fetch_all(pool)
            .await?
        }
    };
    attach_items(pool, &mut orders).await?;
    Ok(orders)
}

/// Tokens held by orders that are not yet COMPLETED
pub async fn open_tokens(conn: &mut SqliteConnection) -> RepoResult<HashSet<String>> {
    let tokens = sqlx::query_scalar::<_, String>(
        "SELECT token_number FROM \"order\" WHERE status != 'COMPLETED'",
    )
    .fetch_all(conn)
    .await?;
    Ok(tokens.into_iter().collect())
}

/// Insert an order with its lines; returns the new order id
///
/// Runs on the caller's connection so token allocation and the insert can
/// share one transaction.
pub async fn insert(
    conn: &mut SqliteConnection,
    user_id: &str,
    total_amount: f64,
    token_number: &str,
    items: &[OrderItem],
) -> RepoResult<i64> {
    let now = now_millis();
    let order_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO \"order\" (user_id, total_amount, token_number, status, payment_status, \
         created_at, updated_at) VALUES (?, ?, ?, 'PLACED', 'PENDING', ?, ?) RETURNING id",
    )
    .bind(user_id)
    .bind(total_amount)
    .bind(token_number)
    .bind(now)
    .bind(now)
    .fetch_one(&mut *conn)
    .await?;

    for item in items {
        sqlx::query(
            "INSERT INTO order_item (order_id, item_id, item_name, unit_price, original_price, \
             offer_desc, qty, line_total) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(order_id)
        .bind(item.item_id)
        .bind(&item.item_name)
        .bind(item.unit_price)
        .bind(item.original_price)
        .bind(&item.offer_desc)
        .bind(item.qty)
        .bind(item.line_total)
        .execute(&mut *conn)
        .await?;
    }

    Ok(order_id)
}

/// Compare-and-set status change
///
/// Writes only while the row still holds `from`; returns false when the
/// order is missing or another writer moved it first.
pub async fn update_status(
    pool: &SqlitePool,
    id: i64,
    from: OrderStatus,
    to: OrderStatus,
) -> RepoResult<bool> {
    let rows = sqlx::query("UPDATE \"order\" SET status = ?, updated_at = ? WHERE id = ? AND status = ?")
        .bind(to)
        .bind(now_millis())
        .bind(id)
        .bind(from)
        .execute(pool)
        .await?
        .rows_affected();
    Ok(rows == 1)
}

/// PENDING -> PAID; returns false when the order was already paid
pub async fn mark_paid(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let now = now_millis();
    let rows = sqlx::query(
        "UPDATE \"order\" SET payment_status = 'PAID', paid_at = ?, updated_at = ? \
         WHERE id = ? AND payment_status = 'PENDING'",
    )
    .bind(now)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?
    .rows_affected();
    Ok(rows == 1)
}
