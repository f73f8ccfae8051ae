//! Report Models (dashboard + analytics)

use serde::{Deserialize, Serialize};

/// Dashboard counters
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReportSummary {
    /// Orders not yet COMPLETED
    pub pending: i64,
    pub completed: i64,
    /// Sum of all order totals
    pub revenue: f64,
    /// Sum of totals for PAID orders
    pub paid_revenue: f64,
    /// Orders created today (business time zone)
    pub orders_today: i64,
}

/// Quantity sold per item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ItemSales {
    pub item_name: String,
    pub qty: i64,
}

/// Orders placed in one hour of the day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HourBucket {
    pub hour: u32,
    pub orders: i64,
}

/// Revenue for one calendar day
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DayRevenue {
    /// `YYYY-MM-DD`
    pub date: String,
    pub revenue: f64,
}

/// Chart kind hint for the client
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

/// Plot-ready series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSeries {
    pub title: String,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// All analytics charts in one payload
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartBundle {
    pub top_items: ChartSeries,
    pub orders_by_hour: ChartSeries,
    pub revenue_by_day: ChartSeries,
}

/// Query for report endpoints that take a limit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReportQuery {
    pub limit: Option<i64>,
}
