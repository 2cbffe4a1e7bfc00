// src/handlers/payments.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    models::{
        orders::PaymentType,
        payments::{Payment, PaymentMethod, PaymentState},
        reports::PaymentSummary,
    },
    services::payment_service::{PaymentInput, PaymentPatch, RecordedPayment},
};

#[derive(Debug, Deserialize)]
pub struct ShopScopeQuery {
    pub shop_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

fn erro_de_campo(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

// ---
// Payload: CreatePayment
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreatePaymentPayload {
    pub shop_id: Uuid,
    pub order_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,

    pub payment_type: Option<PaymentType>,

    #[schema(example = "1500.00")]
    pub payment_amount: Decimal,

    // String livre: valores fora da lista caem em "other" (política de
    // fallback herdada, agora explícita).
    #[validate(length(min = 1, message = "Payment method is required"))]
    #[schema(example = "online_transfer")]
    pub payment_method: String,

    pub bank_account_id: Option<Uuid>,
    pub branch_name: Option<String>,

    pub transaction_id: Option<String>,
    pub payment_status: Option<PaymentState>,

    pub notes: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
}

impl CreatePaymentPayload {
    fn resolved_method(&self) -> PaymentMethod {
        PaymentMethod::from_input(&self.payment_method)
    }

    // Regras que o derive não expressa: valor positivo e campos bancários
    // condicionais ao método resolvido.
    fn validate_business(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let method = self.resolved_method();

        if self.payment_amount <= Decimal::ZERO {
            errors.add(
                "payment_amount",
                erro_de_campo("range", "Payment amount must be greater than 0"),
            );
        }

        if method.is_bank_linked() && self.bank_account_id.is_none() {
            errors.add(
                "bank_account_id",
                erro_de_campo("required", "Bank account is required for bank transfers"),
            );
        }

        if method == PaymentMethod::BankDeposit
            && self
                .branch_name
                .as_deref()
                .map(str::trim)
                .unwrap_or("")
                .is_empty()
        {
            errors.add(
                "branch_name",
                erro_de_campo("required", "Branch name is required for bank deposits"),
            );
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// POST /api/v1/payments
#[utoipa::path(
    post,
    path = "/api/v1/payments",
    tag = "Payments",
    request_body = CreatePaymentPayload,
    responses(
        (status = 201, description = "Pagamento registrado (com troco, se houve capping)", body = RecordedPayment),
        (status = 400, description = "Validação ou cliente inexistente"),
        (status = 404, description = "Pedido não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_payment(
    State(app_state): State<AppState>,
    Json(payload): Json<CreatePaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    payload.validate_business().map_err(AppError::ValidationError)?;

    let input = PaymentInput {
        shop_id: payload.shop_id,
        order_id: payload.order_id,
        customer_id: payload.customer_id,
        payment_type: payload.payment_type,
        amount: payload.payment_amount,
        method: payload.resolved_method(),
        bank_account_id: payload.bank_account_id,
        branch_name: payload.branch_name.clone(),
        transaction_id: payload.transaction_id.clone(),
        status: payload.payment_status.unwrap_or(PaymentState::Completed),
        notes: payload.notes.clone(),
        payment_date: payload.payment_date,
    };

    let recorded = app_state.payment_service.create_payment(input).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(recorded, "Payment created successfully")),
    ))
}

// ---
// Payload: UpdatePayment (parcial)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePaymentPayload {
    pub payment_type: Option<PaymentType>,
    pub payment_amount: Option<Decimal>,
    pub payment_method: Option<String>,
    pub bank_account_id: Option<Uuid>,
    pub branch_name: Option<String>,
    pub payment_status: Option<PaymentState>,
    pub notes: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
}

impl UpdatePaymentPayload {
    fn validate_business(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(amount) = self.payment_amount {
            if amount <= Decimal::ZERO {
                errors.add(
                    "payment_amount",
                    erro_de_campo("range", "Payment amount must be greater than 0"),
                );
            }
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn into_patch(self) -> PaymentPatch {
        PaymentPatch {
            payment_type: self.payment_type,
            amount: self.payment_amount,
            method: self.payment_method.as_deref().map(PaymentMethod::from_input),
            bank_account_id: self.bank_account_id,
            branch_name: self.branch_name,
            status: self.payment_status,
            notes: self.notes,
            payment_date: self.payment_date,
        }
    }
}

// PUT /api/v1/payments/{id}?shop_id=
#[utoipa::path(
    put,
    path = "/api/v1/payments/{id}",
    tag = "Payments",
    request_body = UpdatePaymentPayload,
    params(
        ("id" = Uuid, Path, description = "ID do pagamento"),
        ("shop_id" = Uuid, Query, description = "ID da loja dona do pagamento")
    ),
    responses(
        (status = 200, description = "Pagamento atualizado com razão bancário reconciliado", body = Payment),
        (status = 404, description = "Pagamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_payment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(scope): Query<ShopScopeQuery>,
    Json(payload): Json<UpdatePaymentPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate_business().map_err(AppError::ValidationError)?;

    let payment = app_state
        .payment_service
        .update_payment(scope.shop_id, id, payload.into_patch())
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(payment, "Payment updated successfully")),
    ))
}

// DELETE /api/v1/payments/{id}?shop_id=
#[utoipa::path(
    delete,
    path = "/api/v1/payments/{id}",
    tag = "Payments",
    params(
        ("id" = Uuid, Path, description = "ID do pagamento"),
        ("shop_id" = Uuid, Query, description = "ID da loja dona do pagamento")
    ),
    responses(
        (status = 200, description = "Pagamento removido com estorno bancário"),
        (status = 404, description = "Pagamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_payment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(scope): Query<ShopScopeQuery>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .payment_service
        .delete_payment(scope.shop_id, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::message("Payment deleted successfully")),
    ))
}

// GET /api/v1/payments/{id}?shop_id=
#[utoipa::path(
    get,
    path = "/api/v1/payments/{id}",
    tag = "Payments",
    params(
        ("id" = Uuid, Path, description = "ID do pagamento"),
        ("shop_id" = Uuid, Query, description = "ID da loja dona do pagamento")
    ),
    responses(
        (status = 200, description = "Pagamento", body = Payment),
        (status = 404, description = "Pagamento não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_payment(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(scope): Query<ShopScopeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let payment = app_state
        .payment_service
        .get_payment(scope.shop_id, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(payment, "Payment retrieved successfully")),
    ))
}

// GET /api/v1/payments/shop/{shop_id}
#[utoipa::path(
    get,
    path = "/api/v1/payments/shop/{shop_id}",
    tag = "Payments",
    params(("shop_id" = Uuid, Path, description = "ID da loja")),
    responses((status = 200, description = "Pagamentos da loja", body = [Payment])),
    security(("api_jwt" = []))
)]
pub async fn list_shop_payments(
    State(app_state): State<AppState>,
    Path(shop_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let payments = app_state.payment_service.list_shop_payments(shop_id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(payments, "Payments retrieved successfully")),
    ))
}

// GET /api/v1/payments/summary/{shop_id}?start_date=&end_date=
#[utoipa::path(
    get,
    path = "/api/v1/payments/summary/{shop_id}",
    tag = "Payments",
    params(
        ("shop_id" = Uuid, Path, description = "ID da loja"),
        ("start_date" = Option<String>, Query, description = "Data inicial (YYYY-MM-DD)"),
        ("end_date" = Option<String>, Query, description = "Data final (YYYY-MM-DD)")
    ),
    responses((status = 200, description = "Resumo dos pagamentos", body = PaymentSummary)),
    security(("api_jwt" = []))
)]
pub async fn payment_summary(
    State(app_state): State<AppState>,
    Path(shop_id): Path<Uuid>,
    Query(query): Query<SummaryQuery>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state
        .payment_service
        .summary(shop_id, query.start_date, query.end_date)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(summary, "Payment summary retrieved successfully")),
    ))
}
