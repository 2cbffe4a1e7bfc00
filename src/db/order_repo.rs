// src/db/order_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::orders::{LedgerUpdate, Order, OrderStatus, PaymentStatus},
};

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        shop_id: Uuid,
        customer_id: Option<Uuid>,
        order_number: &str,
        total_amount: Decimal,
        delivery_charge: Decimal,
        notes: Option<&str>,
        order_date: DateTime<Utc>,
    ) -> Result<Order, AppError> {
        // final_amount e balance_due nascem iguais ao total geral.
        let order = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders
                (shop_id, customer_id, order_number, total_amount, delivery_charge,
                 final_amount, balance_due, notes, order_date)
            VALUES ($1, $2, $3, $4, $5, $4 + $5, $4 + $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(shop_id)
        .bind(customer_id)
        .bind(order_number)
        .bind(total_amount)
        .bind(delivery_charge)
        .bind(notes)
        .bind(order_date)
        .fetch_one(&self.pool)
        .await?;

        Ok(order)
    }

    // Versão genérica para poder rodar dentro de uma transação do
    // serviço de pagamentos.
    pub async fn find_for_shop<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order =
            sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1 AND shop_id = $2")
                .bind(id)
                .bind(shop_id)
                .fetch_optional(executor)
                .await?;

        Ok(order)
    }

    pub async fn list_by_shop(
        &self,
        shop_id: Uuid,
        pending_only: bool,
    ) -> Result<Vec<Order>, AppError> {
        let orders = if pending_only {
            sqlx::query_as::<_, Order>(
                r#"
                SELECT * FROM orders
                WHERE shop_id = $1 AND payment_status <> $2
                ORDER BY created_at DESC
                "#,
            )
            .bind(shop_id)
            .bind(PaymentStatus::FullyPaid)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, Order>(
                "SELECT * FROM orders WHERE shop_id = $1 ORDER BY created_at DESC",
            )
            .bind(shop_id)
            .fetch_all(&self.pool)
            .await?
        };

        Ok(orders)
    }

    /// Persiste o resultado da aritmética do razão num único UPDATE.
    pub async fn apply_ledger<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        id: Uuid,
        update: &LedgerUpdate,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET advance_paid = $3, final_amount = $4, balance_due = $5,
                payment_status = $6, updated_at = now()
            WHERE id = $1 AND shop_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(shop_id)
        .bind(update.advance_paid)
        .bind(update.final_amount)
        .bind(update.balance_due)
        .bind(update.payment_status)
        .fetch_optional(executor)
        .await?;

        Ok(order)
    }

    pub async fn update_status(
        &self,
        shop_id: Uuid,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET order_status = $3, updated_at = now()
            WHERE id = $1 AND shop_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(shop_id)
        .bind(status)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }
}
