//! Reports API Handlers

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use http::header;
use shared::models::{ChartBundle, DayRevenue, HourBucket, ItemSales, ReportQuery, ReportSummary};

use crate::core::ServerState;
use crate::export::{ExportFormat, export_filename, export_orders};
use crate::reports::{self, DEFAULT_REVENUE_DAYS, DEFAULT_TOP_ITEMS};
use crate::utils::AppResult;

/// Upper bound for `?limit=`
const MAX_LIMIT: i64 = 365;

fn clamp_limit(limit: Option<i64>, default: i64) -> i64 {
    limit.unwrap_or(default).clamp(1, MAX_LIMIT)
}

/// GET /api/reports/summary
pub async fn summary(State(state): State<ServerState>) -> AppResult<Json<ReportSummary>> {
    Ok(Json(reports::summary(&state.pool, state.tz()).await?))
}

/// GET /api/reports/charts - all chart series at once
pub async fn charts(State(state): State<ServerState>) -> AppResult<Json<ChartBundle>> {
    Ok(Json(reports::build_charts(&state.pool, state.tz()).await?))
}

/// GET /api/reports/top-items?limit=10
pub async fn top_items(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<Vec<ItemSales>>> {
    let limit = clamp_limit(query.limit, DEFAULT_TOP_ITEMS);
    Ok(Json(reports::top_items(&state.pool, limit).await?))
}

/// GET /api/reports/orders-by-hour
pub async fn orders_by_hour(State(state): State<ServerState>) -> AppResult<Json<Vec<HourBucket>>> {
    Ok(Json(reports::orders_by_hour(&state.pool, state.tz()).await?))
}

/// GET /api/reports/revenue-by-day?limit=10
pub async fn revenue_by_day(
    State(state): State<ServerState>,
    Query(query): Query<ReportQuery>,
) -> AppResult<Json<Vec<DayRevenue>>> {
    let days = clamp_limit(query.limit, DEFAULT_REVENUE_DAYS as i64) as usize;
    Ok(Json(reports::revenue_by_day(&state.pool, state.tz(), days).await?))
}

async fn export(state: &ServerState, format: ExportFormat) -> AppResult<Response> {
    let bytes = export_orders(&state.pool, state.tz(), format).await?;
    let filename = export_filename(format, state.tz());
    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        bytes,
    )
        .into_response())
}

/// GET /api/reports/export.csv
pub async fn export_csv(State(state): State<ServerState>) -> AppResult<Response> {
    export(&state, ExportFormat::Csv).await
}

/// GET /api/reports/export.xlsx
pub async fn export_xlsx(State(state): State<ServerState>) -> AppResult<Response> {
    export(&state, ExportFormat::Xlsx).await
}
