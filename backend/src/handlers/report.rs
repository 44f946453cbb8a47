//! HTTP handlers for profit reports

use axum::{
    extract::{Path, State},
    Json,
};
use shared::{parse_ledger_date, ProfitReport};

use crate::error::{AppError, AppResult};
use crate::services::ReportService;
use crate::AppState;

/// FIFO profit of a product as of a `YYYY-MM-DD` date
pub async fn get_profit_report(
    State(state): State<AppState>,
    Path((name, date)): Path<(String, String)>,
) -> AppResult<Json<ProfitReport>> {
    let report_date = parse_ledger_date(&date).map_err(|msg| AppError::Validation {
        field: "date".to_string(),
        message: msg.to_string(),
    })?;

    let service = ReportService::new(state.db);
    let report = service.profit_report(&name, report_date).await?;
    Ok(Json(report))
}
