// src/handlers/banking.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    common::{error::AppError, response::ApiResponse},
    config::AppState,
    models::banking::{BalanceAudit, BankAccount, BankAccountStatus, BankAccountType, BankCollection},
    services::banking_service::BankAccountPatch,
};

#[derive(Debug, Deserialize)]
pub struct ShopScopeQuery {
    pub shop_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
    #[serde(default)]
    pub active_only: bool,
}

fn erro_de_campo(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

// ---
// Payload: CreateBankAccount
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBankAccountPayload {
    pub shop_id: Uuid,

    #[validate(length(min = 1, message = "Bank name is required"))]
    #[schema(example = "Banco do Brasil")]
    pub bank_name: String,
    pub branch_name: Option<String>,

    #[validate(length(min = 1, message = "Account number is required"))]
    #[schema(example = "12345-6")]
    pub account_number: String,

    #[validate(length(min = 1, message = "Account holder name is required"))]
    pub account_holder_name: String,

    pub account_type: Option<BankAccountType>,
    pub ifsc_code: Option<String>,

    // Se o JSON não tiver esse campo, assume 0
    #[serde(default)]
    #[schema(example = "1000.00")]
    pub initial_balance: Decimal,
}

impl CreateBankAccountPayload {
    fn validate_amounts(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.initial_balance < Decimal::ZERO {
            errors.add(
                "initial_balance",
                erro_de_campo("range", "Initial balance cannot be negative"),
            );
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// POST /api/v1/bank-accounts
#[utoipa::path(
    post,
    path = "/api/v1/bank-accounts",
    tag = "Banking",
    request_body = CreateBankAccountPayload,
    responses(
        (status = 201, description = "Conta criada com saldo corrente = saldo inicial", body = BankAccount),
        (status = 409, description = "Número de conta duplicado na loja")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_bank_account(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateBankAccountPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    payload.validate_amounts().map_err(AppError::ValidationError)?;

    let account = app_state
        .banking_service
        .create_account(
            payload.shop_id,
            &payload.bank_name,
            payload.branch_name.as_deref(),
            &payload.account_number,
            &payload.account_holder_name,
            payload.account_type.unwrap_or(BankAccountType::Checking),
            payload.ifsc_code.as_deref(),
            payload.initial_balance,
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(account, "Bank account created successfully")),
    ))
}

// GET /api/v1/bank-accounts/{shop_id}?active_only=
#[utoipa::path(
    get,
    path = "/api/v1/bank-accounts/{shop_id}",
    tag = "Banking",
    params(
        ("shop_id" = Uuid, Path, description = "ID da loja"),
        ("active_only" = Option<bool>, Query, description = "Apenas contas ativas")
    ),
    responses((status = 200, description = "Contas da loja", body = [BankAccount])),
    security(("api_jwt" = []))
)]
pub async fn list_bank_accounts(
    State(app_state): State<AppState>,
    Path(shop_id): Path<Uuid>,
    Query(query): Query<ListAccountsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let accounts = app_state
        .banking_service
        .list_accounts(shop_id, query.active_only)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(accounts, "Bank accounts retrieved successfully")),
    ))
}

// ---
// Payload: UpdateBankAccount (parcial; saldo fica de fora)
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateBankAccountPayload {
    pub bank_name: Option<String>,
    pub branch_name: Option<String>,
    pub account_number: Option<String>,
    pub account_holder_name: Option<String>,
    pub account_type: Option<BankAccountType>,
    pub ifsc_code: Option<String>,
    pub status: Option<BankAccountStatus>,
}

// PUT /api/v1/bank-accounts/{id}?shop_id=
#[utoipa::path(
    put,
    path = "/api/v1/bank-accounts/{id}",
    tag = "Banking",
    request_body = UpdateBankAccountPayload,
    params(
        ("id" = Uuid, Path, description = "ID da conta"),
        ("shop_id" = Uuid, Query, description = "ID da loja dona da conta")
    ),
    responses(
        (status = 200, description = "Conta atualizada", body = BankAccount),
        (status = 404, description = "Conta não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_bank_account(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(scope): Query<ShopScopeQuery>,
    Json(payload): Json<UpdateBankAccountPayload>,
) -> Result<impl IntoResponse, AppError> {
    let patch = BankAccountPatch {
        bank_name: payload.bank_name,
        branch_name: payload.branch_name,
        account_number: payload.account_number,
        account_holder_name: payload.account_holder_name,
        account_type: payload.account_type,
        ifsc_code: payload.ifsc_code,
        status: payload.status,
    };

    let account = app_state
        .banking_service
        .update_account(scope.shop_id, id, patch)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(account, "Bank account updated successfully")),
    ))
}

// DELETE /api/v1/bank-accounts/{id}?shop_id=  (soft delete)
#[utoipa::path(
    delete,
    path = "/api/v1/bank-accounts/{id}",
    tag = "Banking",
    params(
        ("id" = Uuid, Path, description = "ID da conta"),
        ("shop_id" = Uuid, Query, description = "ID da loja dona da conta")
    ),
    responses(
        (status = 200, description = "Conta encerrada (histórico preservado)"),
        (status = 404, description = "Conta não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn close_bank_account(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(scope): Query<ShopScopeQuery>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .banking_service
        .close_account(scope.shop_id, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::message("Bank account closed successfully")),
    ))
}

// GET /api/v1/bank-accounts/{id}/audit?shop_id=
#[utoipa::path(
    get,
    path = "/api/v1/bank-accounts/{id}/audit",
    tag = "Banking",
    params(
        ("id" = Uuid, Path, description = "ID da conta"),
        ("shop_id" = Uuid, Query, description = "ID da loja dona da conta")
    ),
    responses(
        (status = 200, description = "Saldo armazenado x saldo derivado do histórico", body = BalanceAudit),
        (status = 404, description = "Conta não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn audit_bank_account(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(scope): Query<ShopScopeQuery>,
) -> Result<impl IntoResponse, AppError> {
    let audit = app_state
        .banking_service
        .audit_balance(scope.shop_id, id)
        .await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(audit, "Balance audit completed successfully")),
    ))
}

// ---
// Payload: CreateCollection
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCollectionPayload {
    pub shop_id: Uuid,
    pub bank_account_id: Uuid,

    #[schema(example = "300.00")]
    pub collection_amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2026-08-05")]
    pub collection_date: NaiveDate,

    pub notes: Option<String>,
}

impl CreateCollectionPayload {
    fn validate_amounts(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.collection_amount <= Decimal::ZERO {
            errors.add(
                "collection_amount",
                erro_de_campo("range", "Collection amount must be greater than 0"),
            );
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// POST /api/v1/bank-collections
#[utoipa::path(
    post,
    path = "/api/v1/bank-collections",
    tag = "Banking",
    request_body = CreateCollectionPayload,
    responses(
        (status = 201, description = "Coleta registrada e saldo debitado", body = BankCollection),
        (status = 400, description = "Saldo insuficiente (com os dois valores no erro)"),
        (status = 404, description = "Conta não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_collection(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateCollectionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate_amounts().map_err(AppError::ValidationError)?;

    let collection = app_state
        .banking_service
        .create_collection(
            payload.shop_id,
            payload.bank_account_id,
            payload.collection_amount,
            payload.collection_date,
            payload.notes.as_deref(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::ok(collection, "Collection recorded successfully")),
    ))
}

// GET /api/v1/bank-collections/{shop_id}
#[utoipa::path(
    get,
    path = "/api/v1/bank-collections/{shop_id}",
    tag = "Banking",
    params(("shop_id" = Uuid, Path, description = "ID da loja")),
    responses((status = 200, description = "Coletas da loja", body = [BankCollection])),
    security(("api_jwt" = []))
)]
pub async fn list_collections(
    State(app_state): State<AppState>,
    Path(shop_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let collections = app_state.banking_service.list_collections(shop_id).await?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::ok(collections, "Collections retrieved successfully")),
    ))
}
