// src/db/banking_repo.rs

use chrono::{DateTime, FixedOffset, NaiveDate};
use rust_decimal::Decimal;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::banking::{BankAccount, BankAccountStatus, BankAccountType, BankCollection},
};

#[derive(Clone)]
pub struct BankingRepository {
    pool: PgPool,
}

impl BankingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  CONTAS BANCÁRIAS
    // =========================================================================

    #[allow(clippy::too_many_arguments)]
    pub async fn insert_account(
        &self,
        shop_id: Uuid,
        bank_name: &str,
        branch_name: Option<&str>,
        account_number: &str,
        account_holder_name: &str,
        account_type: BankAccountType,
        ifsc_code: Option<&str>,
        initial_balance: Decimal,
    ) -> Result<BankAccount, AppError> {
        // current_balance nasce igual ao initial_balance.
        let account = sqlx::query_as::<_, BankAccount>(
            r#"
            INSERT INTO bank_accounts
                (shop_id, bank_name, branch_name, account_number, account_holder_name,
                 account_type, ifsc_code, initial_balance, current_balance)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING *
            "#,
        )
        .bind(shop_id)
        .bind(bank_name)
        .bind(branch_name)
        .bind(account_number)
        .bind(account_holder_name)
        .bind(account_type)
        .bind(ifsc_code)
        .bind(initial_balance)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db)
                if db.constraint() == Some("bank_accounts_shop_id_account_number_key") =>
            {
                AppError::Conflict(
                    "A bank account with this account number already exists".to_string(),
                )
            }
            _ => AppError::DatabaseError(e),
        })?;

        Ok(account)
    }

    pub async fn find_account<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        id: Uuid,
    ) -> Result<Option<BankAccount>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let account = sqlx::query_as::<_, BankAccount>(
            "SELECT * FROM bank_accounts WHERE id = $1 AND shop_id = $2",
        )
        .bind(id)
        .bind(shop_id)
        .fetch_optional(executor)
        .await?;

        Ok(account)
    }

    pub async fn list_accounts(
        &self,
        shop_id: Uuid,
        active_only: bool,
    ) -> Result<Vec<BankAccount>, AppError> {
        let accounts = if active_only {
            sqlx::query_as::<_, BankAccount>(
                r#"
                SELECT * FROM bank_accounts
                WHERE shop_id = $1 AND status = $2
                ORDER BY created_at DESC
                "#,
            )
            .bind(shop_id)
            .bind(BankAccountStatus::Active)
            .fetch_all(&self.pool)
            .await?
        } else {
            sqlx::query_as::<_, BankAccount>(
                "SELECT * FROM bank_accounts WHERE shop_id = $1 ORDER BY created_at DESC",
            )
            .bind(shop_id)
            .fetch_all(&self.pool)
            .await?
        };

        Ok(accounts)
    }

    /// Reescreve os campos editáveis de uma conta já mesclada pelo serviço.
    pub async fn update_account(&self, account: &BankAccount) -> Result<BankAccount, AppError> {
        let updated = sqlx::query_as::<_, BankAccount>(
            r#"
            UPDATE bank_accounts
            SET bank_name = $3, branch_name = $4, account_number = $5,
                account_holder_name = $6, account_type = $7, ifsc_code = $8,
                status = $9, updated_at = now()
            WHERE id = $1 AND shop_id = $2
            RETURNING *
            "#,
        )
        .bind(account.id)
        .bind(account.shop_id)
        .bind(&account.bank_name)
        .bind(account.branch_name.as_deref())
        .bind(&account.account_number)
        .bind(&account.account_holder_name)
        .bind(account.account_type)
        .bind(account.ifsc_code.as_deref())
        .bind(account.status)
        .fetch_one(&self.pool)
        .await?;

        Ok(updated)
    }

    // Soft delete: a conta sai de circulação mas o histórico permanece.
    pub async fn close_account(&self, shop_id: Uuid, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query(
            r#"
            UPDATE bank_accounts
            SET status = $3, updated_at = now()
            WHERE id = $1 AND shop_id = $2
            "#,
        )
        .bind(id)
        .bind(shop_id)
        .bind(BankAccountStatus::Closed)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    /// Credita/debita o saldo corrente num único UPDATE atômico.
    /// Nunca ler-modificar-gravar do lado da aplicação: duas requisições
    /// simultâneas serializam no row lock deste statement.
    pub async fn apply_balance_delta<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        account_id: Uuid,
        delta: Decimal,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query(
            r#"
            UPDATE bank_accounts
            SET current_balance = current_balance + $3, updated_at = now()
            WHERE id = $1 AND shop_id = $2
            "#,
        )
        .bind(account_id)
        .bind(shop_id)
        .bind(delta)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    //  COLETAS (Retiradas)
    // =========================================================================

    pub async fn insert_collection<'e, E>(
        &self,
        executor: E,
        shop_id: Uuid,
        bank_account_id: Uuid,
        collection_amount: Decimal,
        collection_date: NaiveDate,
        collected_at: DateTime<FixedOffset>,
        notes: Option<&str>,
    ) -> Result<BankCollection, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let collection = sqlx::query_as::<_, BankCollection>(
            r#"
            INSERT INTO bank_collections
                (shop_id, bank_account_id, collection_amount, collection_date,
                 collected_at, notes)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(shop_id)
        .bind(bank_account_id)
        .bind(collection_amount)
        .bind(collection_date)
        .bind(collected_at)
        .bind(notes)
        .fetch_one(executor)
        .await?;

        Ok(collection)
    }

    pub async fn list_collections(&self, shop_id: Uuid) -> Result<Vec<BankCollection>, AppError> {
        let collections = sqlx::query_as::<_, BankCollection>(
            "SELECT * FROM bank_collections WHERE shop_id = $1 ORDER BY collected_at DESC",
        )
        .bind(shop_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(collections)
    }

    /// Saldo derivado na leitura:
    /// initial + Σ(pagamentos bancários completed) - Σ(coletas).
    pub async fn derived_balance(
        &self,
        shop_id: Uuid,
        account_id: Uuid,
    ) -> Result<Option<Decimal>, AppError> {
        let derived = sqlx::query_scalar::<_, Decimal>(
            r#"
            SELECT ba.initial_balance
                 + COALESCE((SELECT SUM(p.payment_amount)
                             FROM payments p
                             WHERE p.bank_account_id = ba.id
                               AND p.payment_status = 'completed'
                               AND p.payment_method IN ('online_transfer', 'bank_deposit')), 0)
                 - COALESCE((SELECT SUM(bc.collection_amount)
                             FROM bank_collections bc
                             WHERE bc.bank_account_id = ba.id), 0)
            FROM bank_accounts ba
            WHERE ba.id = $1 AND ba.shop_id = $2
            "#,
        )
        .bind(account_id)
        .bind(shop_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(derived)
    }
}
