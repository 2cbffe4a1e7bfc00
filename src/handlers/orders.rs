// src/handlers/orders.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    models::{
        orders::{Order, OrderStatus, PaymentType},
        payments::Payment,
    },
};

#[derive(Debug, Deserialize)]
pub struct ShopScopeQuery {
    pub shop_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    #[serde(default)]
    pub pending_only: bool,
}

fn campo_negativo(message: &'static str) -> ValidationError {
    let mut err = ValidationError::new("range");
    err.message = Some(message.into());
    err
}

// ---
// Payload: CreateOrder
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateOrderPayload {
    pub shop_id: Uuid,
    pub customer_id: Option<Uuid>,

    #[schema(example = "2000.00")]
    pub total_amount: Decimal,

    // Se o JSON não tiver esse campo, assume 0
    #[serde(default)]
    #[schema(example = "0.00")]
    pub delivery_charge: Decimal,

    pub notes: Option<String>,
    pub order_date: Option<DateTime<Utc>>,
}

impl CreateOrderPayload {
    // O `validator` não cobre ranges de Decimal; a checagem fica manual.
    fn validate_amounts(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.total_amount < Decimal::ZERO {
            errors.add("total_amount", campo_negativo("Total amount cannot be negative"));
        }
        if self.delivery_charge < Decimal::ZERO {
            errors.add(
                "delivery_charge",
                campo_negativo("Delivery charge cannot be negative"),
            );
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// POST /api/v1/orders
#[utoipa::path(
    post,
    path = "/api/v1/orders",
    tag = "Orders",
    request_body = CreateOrderPayload,
    responses((status = 201, description = "Pedido criado com campos de pagamento zerados", body = Order)),
    security(("api_jwt" = []))
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate_amounts().map_err(AppError::ValidationError)?;

    let order = app_state
        .order_service
        .create_order(
            payload.shop_id,
            payload.customer_id,
            payload.total_amount,
            payload.delivery_charge,
            payload.notes.as_deref(),
            payload.order_date,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(order, "Order created successfully")),
    ))
}

// GET /api/v1/orders/shop/{shop_id}?pending_only=
#[utoipa::path(
    get,
    path = "/api/v1/orders/shop/{shop_id}",
    tag = "Orders",
    params(
        ("shop_id" = Uuid, Path, description = "ID da loja"),
        ("pending_only" = Option<bool>, Query, description = "Apenas pedidos não quitados")
    ),
    responses((status = 200, description = "Pedidos da loja", body = [Order])),
    security(("api_jwt" = []))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    Path(shop_id): Path<Uuid>,
    Query(query): Query<ListOrdersQuery>,
) -> Result<impl IntoResponse, AppError> {
    let orders = app_state
        .order_service
        .list_orders(shop_id, query.pending_only)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(orders, "Orders retrieved successfully")),
    ))
}

// GET /api/v1/orders/{id}?shop_id=
#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}",
    tag = "Orders",
    params(
        ("id" = Uuid, Path, description = "ID do pedido"),
        ("shop_id" = Uuid, Query, description = "ID da loja dona do pedido")
    ),
    responses(
        (status = 200, description = "Pedido", body = Order),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(scope): Query<ShopScopeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state.order_service.get_order(scope.shop_id, id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(order, "Order retrieved successfully")),
    ))
}

// ---
// Payload: RecordOrderPayment (lançamento direto no razão do pedido)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RecordOrderPaymentPayload {
    pub shop_id: Uuid,

    #[schema(example = "500.00")]
    pub amount_paid: Decimal,

    #[schema(example = "advance")]
    pub payment_type: PaymentType,
}

impl RecordOrderPaymentPayload {
    fn validate_amounts(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.amount_paid <= Decimal::ZERO {
            errors.add(
                "amount_paid",
                campo_negativo("Payment amount must be greater than 0"),
            );
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// POST /api/v1/orders/{id}/payment
#[utoipa::path(
    post,
    path = "/api/v1/orders/{id}/payment",
    tag = "Orders",
    request_body = RecordOrderPaymentPayload,
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Razão do pedido atualizado", body = Order),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn record_order_payment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecordOrderPaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate_amounts().map_err(AppError::ValidationError)?;

    let order = app_state
        .order_service
        .record_payment(payload.shop_id, id, payload.amount_paid, payload.payment_type)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(order, "Payment recorded successfully")),
    ))
}

// ---
// Payload: UpdateOrderStatus
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateOrderStatusPayload {
    pub shop_id: Uuid,

    #[schema(example = "shipped")]
    pub order_status: OrderStatus,
}

// PUT /api/v1/orders/{id}/status
#[utoipa::path(
    put,
    path = "/api/v1/orders/{id}/status",
    tag = "Orders",
    request_body = UpdateOrderStatusPayload,
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Status atualizado", body = Order),
        (status = 400, description = "Pedido não quitado não pode ser enviado"),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_order_status(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusPayload>,
) -> Result<impl IntoResponse, AppError> {
    let order = app_state
        .order_service
        .update_status(payload.shop_id, id, payload.order_status)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(order, "Order status updated successfully")),
    ))
}

// GET /api/v1/orders/{id}/payments?shop_id=
#[utoipa::path(
    get,
    path = "/api/v1/orders/{id}/payments",
    tag = "Orders",
    params(
        ("id" = Uuid, Path, description = "ID do pedido"),
        ("shop_id" = Uuid, Query, description = "ID da loja dona do pedido")
    ),
    responses(
        (status = 200, description = "Pagamentos do pedido", body = [Payment]),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn order_payments(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(scope): Query<ShopScopeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let payments = app_state
        .order_service
        .order_payments(scope.shop_id, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(payments, "Order payments retrieved successfully")),
    ))
}
