//! Order exports (CSV / XLSX)
//!
//! One row per order line, newest order first. An empty database still
//! produces the header row.

mod csv_writer;
mod xlsx_writer;

pub use csv_writer::write_csv;
pub use xlsx_writer::write_xlsx;

use chrono_tz::Tz;
use shared::error::ErrorCode;
use sqlx::SqlitePool;

use crate::db::repository::report::{self, OrderLineRow};
use crate::utils::time::{file_stamp, format_datetime};
use crate::utils::{AppError, AppResult};

pub const HEADERS: [&str; 11] = [
    "Order ID",
    "User ID",
    "Token Number",
    "Status",
    "Payment Status",
    "Date & Time",
    "Item Name",
    "Quantity",
    "Unit Price",
    "Item Total",
    "Order Total",
];

/// Export file kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Xlsx,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv; charset=utf-8",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

/// One export row, with the date already formatted for the business zone
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub order_id: i64,
    pub user_id: String,
    pub token_number: String,
    pub status: String,
    pub payment_status: String,
    pub date_time: String,
    pub item_name: String,
    pub qty: i64,
    pub unit_price: f64,
    pub line_total: f64,
    pub order_total: f64,
}

impl ExportRow {
    pub fn from_line(row: OrderLineRow, tz: Tz) -> Self {
        Self {
            order_id: row.order_id,
            user_id: row.user_id,
            token_number: row.token_number,
            status: row.status,
            payment_status: row.payment_status,
            date_time: format_datetime(row.created_at, tz),
            item_name: row.item_name,
            qty: row.qty,
            unit_price: row.unit_price,
            line_total: row.line_total,
            order_total: row.total_amount,
        }
    }
}

pub(crate) fn export_error(err: impl std::fmt::Display) -> AppError {
    AppError::with_message(ErrorCode::ExportFailed, format!("Export failed: {err}"))
}

/// `orders_export_<YYYYmmdd_HHMMSS>.<ext>`
pub fn export_filename(format: ExportFormat, tz: Tz) -> String {
    format!("orders_export_{}.{}", file_stamp(tz), format.extension())
}

pub async fn load_rows(pool: &SqlitePool, tz: Tz) -> AppResult<Vec<ExportRow>> {
    let lines = report::order_lines(pool).await?;
    Ok(lines
        .into_iter()
        .map(|line| ExportRow::from_line(line, tz))
        .collect())
}

/// Load every order line and encode it
pub async fn export_orders(pool: &SqlitePool, tz: Tz, format: ExportFormat) -> AppResult<Vec<u8>> {
    let rows = load_rows(pool, tz).await?;
    let bytes = match format {
        ExportFormat::Csv => write_csv(&rows)?,
        ExportFormat::Xlsx => write_xlsx(&rows)?,
    };
    tracing::info!(rows = rows.len(), format = format.extension(), "Orders exported");
    Ok(bytes)
}
