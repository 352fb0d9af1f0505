//! Finance handlers for the net profit view and export

use axum::{
    extract::{Query, State},
    http::header,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::AppResult;
use crate::services::FinanceService;
use crate::AppState;

#[derive(Deserialize)]
pub struct NetProfitQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub format: Option<String>, // "json" or "csv"
}

/// Get net profit over a date range, with the entries it covers
pub async fn get_net_profit(
    State(state): State<AppState>,
    Query(query): Query<NetProfitQuery>,
) -> AppResult<impl IntoResponse> {
    let service = FinanceService::new(state.store.clone());
    let report = service
        .net_profit_report(query.start_date, query.end_date)
        .await?;

    if query.format.as_deref() == Some("csv") {
        let csv = FinanceService::export_to_csv(&report.entries)?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"finance.csv\""),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(report).into_response())
    }
}
