// src/models/reports.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

// Agregados de pedidos num intervalo de datas.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct OrderSummary {
    pub total_orders: i64,
    #[schema(example = "12500.00")]
    pub total_revenue: Decimal,
    pub total_collected: Decimal,
    pub total_pending: Decimal,
    pub fully_paid_count: i64,
}

// Agregados do diário de pagamentos num intervalo de datas.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct PaymentSummary {
    pub total_amount: Decimal,
    pub payment_count: i64,
}
