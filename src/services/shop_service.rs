// src/services/shop_service.rs

use uuid::Uuid;

use crate::{common::error::AppError, db::ShopRepository, models::shops::Shop};

#[derive(Clone)]
pub struct ShopService {
    shop_repo: ShopRepository,
}

impl ShopService {
    pub fn new(shop_repo: ShopRepository) -> Self {
        Self { shop_repo }
    }

    pub async fn create_shop(
        &self,
        shop_name: &str,
        address: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Shop, AppError> {
        let shop = self.shop_repo.create(shop_name, address, phone).await?;
        tracing::info!(shop_id = %shop.id, nome = %shop.shop_name, "🏬 Loja criada");
        Ok(shop)
    }

    pub async fn list_shops(&self) -> Result<Vec<Shop>, AppError> {
        self.shop_repo.list().await
    }

    pub async fn get_shop(&self, id: Uuid) -> Result<Shop, AppError> {
        self.shop_repo
            .find(id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Shop".to_string()))
    }
}
