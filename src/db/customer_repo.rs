// src/db/customer_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::customers::Customer};

#[derive(Clone)]
pub struct CustomerRepository {
    pool: PgPool,
}

impl CustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        shop_id: Uuid,
        first_name: &str,
        last_name: &str,
        phone: Option<&str>,
        email: Option<&str>,
        address: Option<&str>,
    ) -> Result<Customer, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            INSERT INTO customers (shop_id, first_name, last_name, phone, email, address)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(shop_id)
        .bind(first_name)
        .bind(last_name)
        .bind(phone)
        .bind(email)
        .bind(address)
        .fetch_one(&self.pool)
        .await?;

        Ok(customer)
    }

    pub async fn list_by_shop(&self, shop_id: Uuid) -> Result<Vec<Customer>, AppError> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT * FROM customers WHERE shop_id = $1 ORDER BY first_name ASC, last_name ASC",
        )
        .bind(shop_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }

    pub async fn find_for_shop(
        &self,
        shop_id: Uuid,
        id: Uuid,
    ) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            "SELECT * FROM customers WHERE id = $1 AND shop_id = $2",
        )
        .bind(id)
        .bind(shop_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }

    pub async fn update(
        &self,
        shop_id: Uuid,
        id: Uuid,
        first_name: &str,
        last_name: &str,
        phone: Option<&str>,
        email: Option<&str>,
        address: Option<&str>,
    ) -> Result<Option<Customer>, AppError> {
        let customer = sqlx::query_as::<_, Customer>(
            r#"
            UPDATE customers
            SET first_name = $3, last_name = $4, phone = $5, email = $6, address = $7,
                updated_at = now()
            WHERE id = $1 AND shop_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(shop_id)
        .bind(first_name)
        .bind(last_name)
        .bind(phone)
        .bind(email)
        .bind(address)
        .fetch_optional(&self.pool)
        .await?;

        Ok(customer)
    }
}
