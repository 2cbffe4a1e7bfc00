// src/db/payment_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        payments::{NewPaymentRecord, Payment},
        reports::PaymentSummary,
    },
};

#[derive(Clone)]
pub struct PaymentRepository {
    pool: PgPool,
}

impl PaymentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn insert<'e, E>(
        &self,
        executor: E,
        record: &NewPaymentRecord,
    ) -> Result<Payment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payment = sqlx::query_as::<_, Payment>(
            r#"
            INSERT INTO payments
                (shop_id, order_id, customer_id, payment_type, payment_amount,
                 payment_method, bank_account_id, branch_name, transaction_id,
                 payment_status, notes, payment_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(record.shop_id)
        .bind(record.order_id)
        .bind(record.customer_id)
        .bind(record.payment_type)
        .bind(record.payment_amount)
        .bind(record.payment_method)
        .bind(record.bank_account_id)
        .bind(record.branch_name.as_deref())
        .bind(&record.transaction_id)
        .bind(record.payment_status)
        .bind(record.notes.as_deref())
        .bind(record.payment_date)
        .fetch_one(executor)
        .await
        .map_err(|e| match &e {
            // Cliente referenciado não existe: erro de negócio, não 500.
            sqlx::Error::Database(db)
                if db.constraint() == Some("payments_customer_id_fkey") =>
            {
                AppError::CustomerNotFound
            }
            sqlx::Error::Database(db)
                if db.constraint() == Some("payments_transaction_id_key") =>
            {
                AppError::Conflict("A payment with this transaction id already exists".to_string())
            }
            _ => AppError::DatabaseError(e),
        })?;

        Ok(payment)
    }

    pub async fn find_for_shop<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Payment>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let payment =
            sqlx::query_as::<_, Payment>("SELECT * FROM payments WHERE id = $1 AND shop_id = $2")
                .bind(id)
                .bind(shop_id)
                .fetch_optional(executor)
                .await?;

        Ok(payment)
    }

    pub async fn list_by_shop(&self, shop_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(
            "SELECT * FROM payments WHERE shop_id = $1 ORDER BY payment_date DESC",
        )
        .bind(shop_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    pub async fn list_by_order(
        &self,
        shop_id: Uuid,
        order_id: Uuid,
    ) -> Result<Vec<Payment>, AppError> {
        let payments = sqlx::query_as::<_, Payment>(
            r#"
            SELECT * FROM payments
            WHERE shop_id = $1 AND order_id = $2
            ORDER BY payment_date DESC
            "#,
        )
        .bind(shop_id)
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(payments)
    }

    /// Reescreve os campos editáveis de um pagamento já mesclado pelo serviço.
    pub async fn update_row<'e, E>(
        &self,
        executor: E,
        payment: &Payment,
    ) -> Result<Payment, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let updated = sqlx::query_as::<_, Payment>(
            r#"
            UPDATE payments
            SET payment_type = $3, payment_amount = $4, payment_method = $5,
                bank_account_id = $6, branch_name = $7, payment_status = $8,
                notes = $9, payment_date = $10, updated_at = now()
            WHERE id = $1 AND shop_id = $2
            RETURNING *
            "#,
        )
        .bind(payment.id)
        .bind(payment.shop_id)
        .bind(payment.payment_type)
        .bind(payment.payment_amount)
        .bind(payment.payment_method)
        .bind(payment.bank_account_id)
        .bind(payment.branch_name.as_deref())
        .bind(payment.payment_status)
        .bind(payment.notes.as_deref())
        .bind(payment.payment_date)
        .fetch_one(executor)
        .await?;

        Ok(updated)
    }

    pub async fn delete<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        id: Uuid,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM payments WHERE id = $1 AND shop_id = $2")
            .bind(id)
            .bind(shop_id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected())
    }

    pub async fn summary(
        &self,
        shop_id: Uuid,
        start_date: Option<NaiveDate>,
        end_date: Option<NaiveDate>,
    ) -> Result<PaymentSummary, AppError> {
        let summary = sqlx::query_as::<_, PaymentSummary>(
            r#"
            SELECT COALESCE(SUM(payment_amount), 0) AS total_amount,
                   COUNT(*) AS payment_count
            FROM payments
            WHERE shop_id = $1
              AND ($2::date IS NULL OR payment_date::date >= $2)
              AND ($3::date IS NULL OR payment_date::date <= $3)
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
