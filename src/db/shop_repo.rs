// src/db/shop_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::shops::Shop};

#[derive(Clone)]
pub struct ShopRepository {
    pool: PgPool,
}

impl ShopRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        shop_name: &str,
        address: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Shop, AppError> {
        let shop = sqlx::query_as::<_, Shop>(
            r#"
            INSERT INTO shops (shop_name, address, phone)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(shop_name)
        .bind(address)
        .bind(phone)
        .fetch_one(&self.pool)
        .await?;

        Ok(shop)
    }

    pub async fn list(&self) -> Result<Vec<Shop>, AppError> {
        let shops = sqlx::query_as::<_, Shop>("SELECT * FROM shops ORDER BY shop_name ASC")
            .fetch_all(&self.pool)
            .await?;

        Ok(shops)
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Shop>, AppError> {
        let shop = sqlx::query_as::<_, Shop>("SELECT * FROM shops WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(shop)
    }
}
