//! Sales history HTTP handlers

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::{DateRange, RecordSaleInput, Sale};

use crate::error::{AppError, AppResult};
use crate::services::sales::{SalesService, SALE_CSV_HEADERS};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct SalesHistoryQuery {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub format: Option<String>, // "json" or "csv"
}

/// Record a sale
pub async fn record_sale(
    State(state): State<AppState>,
    Json(input): Json<RecordSaleInput>,
) -> AppResult<(StatusCode, Json<Sale>)> {
    let service = SalesService::new(state.db.clone());
    let sale = service.record_sale(input).await?;
    Ok((StatusCode::CREATED, Json(sale)))
}

/// Get a partner's sales history with totals and current discount
pub async fn get_sales_history(
    State(state): State<AppState>,
    Path(partner_id): Path<i64>,
    query: Result<Query<SalesHistoryQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Query(query) = query.map_err(|e| AppError::MalformedRequest(e.body_text()))?;
    let service = SalesService::new(state.db.clone());

    let range = DateRange {
        start: query.date_from,
        end: query.date_to,
    };
    let history = service.get_sales_history(partner_id, range).await?;

    if query.format.as_deref() == Some("csv") {
        let csv = SalesService::export_to_csv(&SALE_CSV_HEADERS, &history.sales)?;
        Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"sales_history.csv\"",
                ),
            ],
            csv,
        )
            .into_response())
    } else {
        Ok(Json(history).into_response())
    }
}
