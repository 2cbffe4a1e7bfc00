// src/handlers/customers.rs

use axum::{
    extract::{Path, Query, State},
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
    models::customers::Customer,
};

#[derive(Debug, Deserialize)]
pub struct ShopScopeQuery {
    pub shop_id: Uuid,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCustomerPayload {
    pub shop_id: Uuid,

    #[validate(length(min = 1, message = "First name is required"))]
    #[schema(example = "Maria")]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    #[schema(example = "Silva")]
    pub last_name: String,

    pub phone: Option<String>,
    #[validate(email(message = "The email address is invalid"))]
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCustomerPayload {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    pub phone: Option<String>,
    #[validate(email(message = "The email address is invalid"))]
    pub email: Option<String>,
    pub address: Option<String>,
}

// POST /api/v1/customers
#[utoipa::path(
    post,
    path = "/api/v1/customers",
    tag = "Customers",
    request_body = CreateCustomerPayload,
    responses((status = 201, description = "Cliente criado", body = Customer)),
    security(("api_jwt" = []))
)]
pub async fn create_customer(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let customer = app_state
        .customer_service
        .create_customer(
            payload.shop_id,
            &payload.first_name,
            &payload.last_name,
            payload.phone.as_deref(),
            payload.email.as_deref(),
            payload.address.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(customer, "Customer created successfully")),
    ))
}

// GET /api/v1/customers/shop/{shop_id}
#[utoipa::path(
    get,
    path = "/api/v1/customers/shop/{shop_id}",
    tag = "Customers",
    params(("shop_id" = Uuid, Path, description = "ID da loja")),
    responses((status = 200, description = "Clientes da loja", body = [Customer])),
    security(("api_jwt" = []))
)]
pub async fn list_customers(
    State(app_state): State<AppState>,
    Path(shop_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let customers = app_state.customer_service.list_customers(shop_id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(customers, "Customers retrieved successfully")),
    ))
}

// GET /api/v1/customers/{id}?shop_id=
#[utoipa::path(
    get,
    path = "/api/v1/customers/{id}",
    tag = "Customers",
    params(
        ("id" = Uuid, Path, description = "ID do cliente"),
        ("shop_id" = Uuid, Query, description = "ID da loja dona do cliente")
    ),
    responses(
        (status = 200, description = "Cliente", body = Customer),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(scope): Query<ShopScopeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let customer = app_state
        .customer_service
        .get_customer(scope.shop_id, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(customer, "Customer retrieved successfully")),
    ))
}

// PUT /api/v1/customers/{id}?shop_id=
#[utoipa::path(
    put,
    path = "/api/v1/customers/{id}",
    tag = "Customers",
    request_body = UpdateCustomerPayload,
    params(
        ("id" = Uuid, Path, description = "ID do cliente"),
        ("shop_id" = Uuid, Query, description = "ID da loja dona do cliente")
    ),
    responses(
        (status = 200, description = "Cliente atualizado", body = Customer),
        (status = 404, description = "Cliente não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_customer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(scope): Query<ShopScopeQuery>,
    Json(payload): Json<UpdateCustomerPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let customer = app_state
        .customer_service
        .update_customer(
            scope.shop_id,
            id,
            &payload.first_name,
            &payload.last_name,
            payload.phone.as_deref(),
            payload.email.as_deref(),
            payload.address.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(customer, "Customer updated successfully")),
    ))
}
