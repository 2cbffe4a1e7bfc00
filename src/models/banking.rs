// src/models/banking.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "bank_account_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BankAccountType {
    Checking,
    Savings,
    Business,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "bank_account_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BankAccountStatus {
    Active,
    Inactive,
    Closed,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BankAccount {
    pub id: Uuid,
    pub shop_id: Uuid,

    #[schema(example = "Banco do Brasil")]
    pub bank_name: String,
    pub branch_name: Option<String>,

    #[schema(example = "12345-6")]
    pub account_number: String,
    pub account_holder_name: String,
    pub account_type: BankAccountType,
    pub ifsc_code: Option<String>,

    #[schema(example = "1000.00")]
    pub initial_balance: Decimal,
    // Saldo corrente mantido por UPDATEs atômicos de um único statement.
    #[schema(example = "1500.00")]
    pub current_balance: Decimal,

    pub status: BankAccountStatus,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Retirada manual do saldo rastreado (dinheiro fisicamente sacado).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct BankCollection {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub bank_account_id: Uuid,

    #[schema(example = "300.00")]
    pub collection_amount: Decimal,

    #[schema(value_type = String, format = Date, example = "2026-08-05")]
    pub collection_date: NaiveDate,
    pub collected_at: DateTime<Utc>,

    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

// Auditoria do razão bancário: saldo armazenado versus saldo derivado
// (initial + pagamentos bancários completed - coletas). Deriva na leitura
// para detectar deriva sem mudar o caminho de escrita.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BalanceAudit {
    pub bank_account_id: Uuid,
    pub stored_balance: Decimal,
    pub derived_balance: Decimal,
    pub drift: Decimal,
}
