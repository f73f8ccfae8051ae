//! Report Repository
//!
//! Aggregate queries behind the dashboard, charts and exports. Anything that
//! depends on the business time zone (hours, calendar days) is bucketed by
//! the caller from raw timestamps.

use super::RepoResult;
use shared::models::{ItemSales, ReportSummary};
use sqlx::SqlitePool;

#[derive(sqlx::FromRow)]
struct SummaryRow {
    pending: i64,
    completed: i64,
    revenue: f64,
    paid_revenue: f64,
}

/// One exported row: an order line joined with its order
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderLineRow {
    pub order_id: i64,
    pub user_id: String,
    pub token_number: String,
    pub status: String,
    pub payment_status: String,
    pub created_at: i64,
    pub item_name: String,
    pub qty: i64,
    pub unit_price: f64,
    pub line_total: f64,
    pub total_amount: f64,
}

/// Dashboard counters; `orders_today` counts `[day_start, day_end)`
pub async fn summary(pool: &SqlitePool, day_start: i64, day_end: i64) -> RepoResult<ReportSummary> {
    let row = sqlx::query_as::<_, SummaryRow>(
        "SELECT \
           COALESCE(SUM(CASE WHEN status != 'COMPLETED' THEN 1 ELSE 0 END), 0) AS pending, \
           COALESCE(SUM(CASE WHEN status = 'COMPLETED' THEN 1 ELSE 0 END), 0) AS completed, \
           CAST(COALESCE(SUM(total_amount), 0) AS REAL) AS revenue, \
           CAST(COALESCE(SUM(CASE WHEN payment_status = 'PAID' THEN total_amount ELSE 0 END), 0) AS REAL) AS paid_revenue \
         FROM \"order\"",
    )
    .fetch_one(pool)
    .await?;

    let orders_today = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM \"order\" WHERE created_at >= ? AND created_at < ?",
    )
    .bind(day_start)
    .bind(day_end)
    .fetch_one(pool)
    .await?;

    Ok(ReportSummary {
        pending: row.pending,
        completed: row.completed,
        revenue: row.revenue,
        paid_revenue: row.paid_revenue,
        orders_today,
    })
}

/// Best sellers by quantity, ties broken by name
pub async fn top_items(pool: &SqlitePool, limit: i64) -> RepoResult<Vec<ItemSales>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT item_name, SUM(qty) AS total_qty FROM order_item \
         GROUP BY item_name ORDER BY total_qty DESC, item_name ASC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(item_name, qty)| ItemSales { item_name, qty })
        .collect())
}

/// Creation time of every order
pub async fn order_timestamps(pool: &SqlitePool) -> RepoResult<Vec<i64>> {
    let rows = sqlx::query_scalar::<_, i64>("SELECT created_at FROM \"order\"")
        .fetch_all(pool)
        .await?;
    Ok(rows)
}

/// `(created_at, total_amount)` of every order, oldest first
pub async fn order_totals(pool: &SqlitePool) -> RepoResult<Vec<(i64, f64)>> {
    let rows = sqlx::query_as::<_, (i64, f64)>(
        "SELECT created_at, total_amount FROM \"order\" ORDER BY created_at ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

/// Order x line rows for export, newest order first
pub async fn order_lines(pool: &SqlitePool) -> RepoResult<Vec<OrderLineRow>> {
    let rows = sqlx::query_as::<_, OrderLineRow>(
        "SELECT o.id AS order_id, o.user_id AS user_id, o.token_number AS token_number, \
           o.status AS status, o.payment_status AS payment_status, o.created_at AS created_at, \
           i.item_name AS item_name, i.qty AS qty, i.unit_price AS unit_price, \
           i.line_total AS line_total, o.total_amount AS total_amount \
         FROM \"order\" o JOIN order_item i ON i.order_id = o.id \
         ORDER BY o.id DESC, i.id ASC",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::memory_pool;
    use crate::db::repository::{account, order};
    use shared::models::{OrderItem, OrderStatus, Role};

    fn line(name: &str, price: f64, qty: i64) -> OrderItem {
        OrderItem {
            item_id: 1,
            item_name: name.into(),
            unit_price: price,
            original_price: price,
            offer_desc: None,
            qty,
            line_total: price * qty as f64,
        }
    }

    async fn seeded_pool() -> SqlitePool {
        let pool = memory_pool().await;
        account::create(&pool, "s1", "Student", Role::Student, "h")
            .await
            .unwrap();

        let mut conn = pool.acquire().await.unwrap();
        let first = order::insert(&mut conn, "s1", 30.0, "1001", &[line("Tea", 10.0, 3)])
            .await
            .unwrap();
        order::insert(
            &mut conn,
            "s1",
            65.0,
            "1002",
            &[line("Coffee", 15.0, 3), line("Tea", 10.0, 2)],
        )
        .await
        .unwrap();
        order::insert(&mut conn, "s1", 15.0, "1003", &[line("Coffee", 15.0, 1)])
            .await
            .unwrap();
        drop(conn);

        order::update_status(&pool, first, OrderStatus::Placed, OrderStatus::Completed)
            .await
            .unwrap();
        order::mark_paid(&pool, first).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_summary_counts() {
        let pool = seeded_pool().await;
        let summary = summary(&pool, 0, i64::MAX).await.unwrap();
        assert_eq!(summary.pending, 2);
        assert_eq!(summary.completed, 1);
        assert_eq!(summary.revenue, 110.0);
        assert_eq!(summary.paid_revenue, 30.0);
        assert_eq!(summary.orders_today, 3);

        let none_today = super::summary(&pool, 0, 1).await.unwrap();
        assert_eq!(none_today.orders_today, 0);
    }

    #[tokio::test]
    async fn test_summary_on_empty_database() {
        let pool = memory_pool().await;
        assert_eq!(summary(&pool, 0, i64::MAX).await.unwrap(), ReportSummary::default());
    }

    #[tokio::test]
    async fn test_top_items_ties_break_by_name() {
        let pool = seeded_pool().await;
        let top = top_items(&pool, 10).await.unwrap();
        // Coffee 4, Tea 5
        assert_eq!(top[0], ItemSales { item_name: "Tea".into(), qty: 5 });
        assert_eq!(top[1], ItemSales { item_name: "Coffee".into(), qty: 4 });
        assert_eq!(top_items(&pool, 1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_order_lines_one_row_per_item() {
        let pool = seeded_pool().await;
        let rows = order_lines(&pool).await.unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].token_number, "1003");
        assert_eq!(rows[1].item_name, "Coffee");
        assert_eq!(rows[2].item_name, "Tea");
        assert_eq!(rows.last().map(|r| r.status.as_str()), Some("COMPLETED"));
        assert_eq!(order_timestamps(&pool).await.unwrap().len(), 3);
        assert_eq!(order_totals(&pool).await.unwrap().len(), 3);
    }
}
