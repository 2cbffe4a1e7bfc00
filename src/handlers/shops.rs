// src/handlers/shops.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    models::shops::Shop,
};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateShopPayload {
    #[validate(length(min = 1, message = "Shop name is required"))]
    #[schema(example = "Loja Centro")]
    pub shop_name: String,
    pub address: Option<String>,
    pub phone: Option<String>,
}

// POST /api/v1/shops
#[utoipa::path(
    post,
    path = "/api/v1/shops",
    tag = "Shops",
    request_body = CreateShopPayload,
    responses((status = 201, description = "Loja criada", body = Shop)),
    security(("api_jwt" = []))
)]
pub async fn create_shop(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateShopPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let shop = app_state
        .shop_service
        .create_shop(
            &payload.shop_name,
            payload.address.as_deref(),
            payload.phone.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(shop, "Shop created successfully")),
    ))
}

// GET /api/v1/shops
#[utoipa::path(
    get,
    path = "/api/v1/shops",
    tag = "Shops",
    responses((status = 200, description = "Lista de lojas", body = [Shop])),
    security(("api_jwt" = []))
)]
pub async fn list_shops(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let shops = app_state.shop_service.list_shops().await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(shops, "Shops retrieved successfully")),
    ))
}

// GET /api/v1/shops/{id}
#[utoipa::path(
    get,
    path = "/api/v1/shops/{id}",
    tag = "Shops",
    params(("id" = Uuid, Path, description = "ID da loja")),
    responses(
        (status = 200, description = "Loja", body = Shop),
        (status = 404, description = "Loja não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_shop(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let shop = app_state.shop_service.get_shop(id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(shop, "Shop retrieved successfully")),
    ))
}
