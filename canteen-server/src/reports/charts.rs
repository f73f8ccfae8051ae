//! Plot-ready chart series

use chrono_tz::Tz;
use shared::models::{ChartBundle, ChartKind, ChartSeries, DayRevenue, HourBucket, ItemSales};
use sqlx::SqlitePool;

use super::{DEFAULT_REVENUE_DAYS, DEFAULT_TOP_ITEMS, orders_by_hour, revenue_by_day, top_items};
use crate::utils::AppResult;

pub fn top_items_chart(items: &[ItemSales]) -> ChartSeries {
    ChartSeries {
        title: "Top Items by Quantity".into(),
        kind: ChartKind::Bar,
        labels: items.iter().map(|i| i.item_name.clone()).collect(),
        values: items.iter().map(|i| i.qty as f64).collect(),
    }
}

pub fn orders_by_hour_chart(buckets: &[HourBucket]) -> ChartSeries {
    ChartSeries {
        title: "Orders by Hour".into(),
        kind: ChartKind::Bar,
        labels: buckets.iter().map(|b| format!("{:02}:00", b.hour)).collect(),
        values: buckets.iter().map(|b| b.orders as f64).collect(),
    }
}

pub fn revenue_by_day_chart(days: &[DayRevenue]) -> ChartSeries {
    ChartSeries {
        title: "Revenue by Day".into(),
        kind: ChartKind::Line,
        labels: days.iter().map(|d| d.date.clone()).collect(),
        values: days.iter().map(|d| d.revenue).collect(),
    }
}

/// All three dashboard charts
pub async fn build_charts(pool: &SqlitePool, tz: Tz) -> AppResult<ChartBundle> {
    let items = top_items(pool, DEFAULT_TOP_ITEMS).await?;
    let hours = orders_by_hour(pool, tz).await?;
    let days = revenue_by_day(pool, tz, DEFAULT_REVENUE_DAYS).await?;

    Ok(ChartBundle {
        top_items: top_items_chart(&items),
        orders_by_hour: orders_by_hour_chart(&hours),
        revenue_by_day: revenue_by_day_chart(&days),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::test_support::memory_pool;

    #[test]
    fn test_hour_labels() {
        let chart = orders_by_hour_chart(&[
            HourBucket { hour: 9, orders: 3 },
            HourBucket { hour: 13, orders: 7 },
        ]);
        assert_eq!(chart.labels, vec!["09:00", "13:00"]);
        assert_eq!(chart.values, vec![3.0, 7.0]);
        assert_eq!(chart.kind, ChartKind::Bar);
    }

    #[test]
    fn test_revenue_chart_is_line() {
        let chart = revenue_by_day_chart(&[DayRevenue { date: "2025-03-05".into(), revenue: 95.5 }]);
        assert_eq!(chart.kind, ChartKind::Line);
        assert_eq!(chart.values, vec![95.5]);
    }

    #[tokio::test]
    async fn test_bundle_on_empty_database() {
        let pool = memory_pool().await;
        let bundle = build_charts(&pool, chrono_tz::Asia::Kolkata).await.unwrap();
        assert!(bundle.top_items.labels.is_empty());
        assert_eq!(bundle.orders_by_hour.labels.len(), 24);
        assert!(bundle.revenue_by_day.values.is_empty());
    }
}
