//! Dashboard and analytics
//!
//! Counters come straight from SQL; hour-of-day and per-day buckets are
//! computed here in the business time zone.

pub mod charts;

pub use charts::{build_charts, orders_by_hour_chart, revenue_by_day_chart, top_items_chart};

use std::collections::BTreeMap;

use chrono::NaiveDate;
use chrono_tz::Tz;
use shared::models::{DayRevenue, HourBucket, ItemSales, ReportSummary};
use sqlx::SqlitePool;

use crate::db::repository::report;
use crate::utils::time::{day_end_millis, day_start_millis, local_date, local_hour, now_in};
use crate::utils::{AppResult, money};

pub const DEFAULT_TOP_ITEMS: i64 = 10;
pub const DEFAULT_REVENUE_DAYS: usize = 10;

pub async fn summary(pool: &SqlitePool, tz: Tz) -> AppResult<ReportSummary> {
    let today = now_in(tz).date_naive();
    let summary = report::summary(pool, day_start_millis(today, tz), day_end_millis(today, tz)).await?;
    Ok(ReportSummary {
        revenue: money::sum([summary.revenue]),
        paid_revenue: money::sum([summary.paid_revenue]),
        ..summary
    })
}

pub async fn top_items(pool: &SqlitePool, limit: i64) -> AppResult<Vec<ItemSales>> {
    Ok(report::top_items(pool, limit.max(1)).await?)
}

pub async fn orders_by_hour(pool: &SqlitePool, tz: Tz) -> AppResult<Vec<HourBucket>> {
    let timestamps = report::order_timestamps(pool).await?;
    Ok(bucket_by_hour(&timestamps, tz))
}

pub async fn revenue_by_day(pool: &SqlitePool, tz: Tz, days: usize) -> AppResult<Vec<DayRevenue>> {
    let totals = report::order_totals(pool).await?;
    Ok(revenue_per_day(&totals, tz, days))
}

/// 24 buckets, hour 0..=23, empty hours included
pub fn bucket_by_hour(timestamps: &[i64], tz: Tz) -> Vec<HourBucket> {
    let mut counts = [0i64; 24];
    for &ts in timestamps {
        counts[local_hour(ts, tz) as usize] += 1;
    }
    counts
        .iter()
        .enumerate()
        .map(|(hour, &orders)| HourBucket {
            hour: hour as u32,
            orders,
        })
        .collect()
}

/// Revenue of the last `days` calendar days that have orders, oldest first
pub fn revenue_per_day(totals: &[(i64, f64)], tz: Tz, days: usize) -> Vec<DayRevenue> {
    let mut by_day: BTreeMap<NaiveDate, Vec<f64>> = BTreeMap::new();
    for &(created_at, amount) in totals {
        by_day.entry(local_date(created_at, tz)).or_default().push(amount);
    }

    let skip = by_day.len().saturating_sub(days);
    by_day
        .into_iter()
        .skip(skip)
        .map(|(date, amounts)| DayRevenue {
            date: date.format("%Y-%m-%d").to_string(),
            revenue: money::sum(amounts),
        })
        .collect()
}
