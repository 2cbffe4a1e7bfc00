// src/services/reports_service.rs

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ReportsRepository,
    models::reports::{OrderSummary, PaymentSummary},
};

#[derive(Clone)]
pub struct ReportsService {
    reports_repo: ReportsRepository,
}

impl ReportsService {
    pub fn new(reports_repo: ReportsRepository) -> Self {
        Self { reports_repo }
    }

    pub async fn order_summary(
        &self,
        shop_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<OrderSummary, AppError> {
        self.reports_repo
            .order_summary(shop_id, start_date, end_date)
            .await
    }

    pub async fn payment_summary(
        &self,
        shop_id: Uuid,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<PaymentSummary, AppError> {
        self.reports_repo
            .payment_summary(shop_id, start_date, end_date)
            .await
    }
}
