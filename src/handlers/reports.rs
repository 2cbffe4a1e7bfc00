// src/handlers/reports.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    models::reports::{OrderSummary, PaymentSummary},
};

#[derive(Debug, Deserialize)]
pub struct DateRangeQuery {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

// GET /api/v1/reports/orders/{shop_id}?start_date=&end_date=
#[utoipa::path(
    get,
    path = "/api/v1/reports/orders/{shop_id}",
    tag = "Reports",
    params(
        ("shop_id" = Uuid, Path, description = "ID da loja"),
        ("start_date" = String, Query, description = "Data inicial (YYYY-MM-DD)"),
        ("end_date" = String, Query, description = "Data final (YYYY-MM-DD)")
    ),
    responses((status = 200, description = "Resumo dos pedidos no período", body = OrderSummary)),
    security(("api_jwt" = []))
)]
pub async fn order_summary(
    State(app_state): State<AppState>,
    Path(shop_id): Path<Uuid>,
    Query(range): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state
        .reports_service
        .order_summary(shop_id, range.start_date, range.end_date)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(summary, "Order summary retrieved successfully")),
    ))
}

// GET /api/v1/reports/payments/{shop_id}?start_date=&end_date=
#[utoipa::path(
    get,
    path = "/api/v1/reports/payments/{shop_id}",
    tag = "Reports",
    params(
        ("shop_id" = Uuid, Path, description = "ID da loja"),
        ("start_date" = String, Query, description = "Data inicial (YYYY-MM-DD)"),
        ("end_date" = String, Query, description = "Data final (YYYY-MM-DD)")
    ),
    responses((status = 200, description = "Resumo dos pagamentos no período", body = PaymentSummary)),
    security(("api_jwt" = []))
)]
pub async fn payment_summary(
    State(app_state): State<AppState>,
    Path(shop_id): Path<Uuid>,
    Query(range): Query<DateRangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state
        .reports_service
        .payment_summary(shop_id, range.start_date, range.end_date)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(summary, "Payment summary retrieved successfully")),
    ))
}
