// src/db/reports_repo.rs

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::reports::{OrderSummary, PaymentSummary},
};

#[derive(Clone)]
pub struct ReportsRepository {
    pool: PgPool,
}

impl ReportsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn order_summary(
        &self,
        shop_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<OrderSummary, AppError> {
        let summary = sqlx::query_as::<_, OrderSummary>(
            r#"
            SELECT
                COUNT(*) AS total_orders,
                COALESCE(SUM(total_amount), 0) AS total_revenue,
                COALESCE(SUM(total_amount + delivery_charge - balance_due), 0) AS total_collected,
                COALESCE(SUM(balance_due), 0) AS total_pending,
                COUNT(*) FILTER (WHERE payment_status = 'fully_paid') AS fully_paid_count
            FROM orders
            WHERE shop_id = $1 AND order_date::date BETWEEN $2 AND $3
            "#,
        )
        .bind(shop_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }

    pub async fn payment_summary(
        &self,
        shop_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PaymentSummary, AppError> {
        let summary = sqlx::query_as::<_, PaymentSummary>(
            r#"
            SELECT COALESCE(SUM(payment_amount), 0) AS total_amount,
                   COUNT(*) AS payment_count
            FROM payments
            WHERE shop_id = $1 AND payment_date::date BETWEEN $2 AND $3
            "#,
        )
        .bind(shop_id)
        .bind(start_date)
        .bind(end_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(summary)
    }
}
