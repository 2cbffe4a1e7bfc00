// src/services/customer_service.rs

use uuid::Uuid;

use crate::{common::error::AppError, db::CustomerRepository, models::customers::Customer};

#[derive(Clone)]
pub struct CustomerService {
    customer_repo: CustomerRepository,
}

impl CustomerService {
    pub fn new(customer_repo: CustomerRepository) -> Self {
        Self { customer_repo }
    }

    pub async fn create_customer(
        &self,
        shop_id: Uuid,
        first_name: &str,
        last_name: &str,
        phone: Option<&str>,
        email: Option<&str>,
        address: Option<&str>,
    ) -> Result<Customer, AppError> {
        self.customer_repo
            .create(shop_id, first_name, last_name, phone, email, address)
            .await
    }

    pub async fn list_customers(&self, shop_id: Uuid) -> Result<Vec<Customer>, AppError> {
        self.customer_repo.list_by_shop(shop_id).await
    }

    pub async fn get_customer(&self, shop_id: Uuid, id: Uuid) -> Result<Customer, AppError> {
        self.customer_repo
            .find_for_shop(shop_id, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Customer".to_string()))
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn update_customer(
        &self,
        shop_id: Uuid,
        id: Uuid,
        first_name: &str,
        last_name: &str,
        phone: Option<&str>,
        email: Option<&str>,
        address: Option<&str>,
    ) -> Result<Customer, AppError> {
        self.customer_repo
            .update(shop_id, id, first_name, last_name, phone, email, address)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Customer".to_string()))
    }
}
