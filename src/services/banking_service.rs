// src/services/banking_service.rs

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::BankingRepository,
    models::banking::{
        BalanceAudit, BankAccount, BankAccountStatus, BankAccountType, BankCollection,
    },
};

// As coletas são registradas no fuso fixo da operação (UTC+5:30),
// independente de onde o servidor rode.
const COLLECTION_OFFSET_SECS: i32 = 5 * 3600 + 1800;

// Atualização parcial de conta; saldo não entra aqui (só os razões mexem nele).
#[derive(Debug, Clone, Default)]
pub struct BankAccountPatch {
    pub bank_name: Option<String>,
    pub branch_name: Option<String>,
    pub account_number: Option<String>,
    pub account_holder_name: Option<String>,
    pub account_type: Option<BankAccountType>,
    pub ifsc_code: Option<String>,
    pub status: Option<BankAccountStatus>,
}

#[derive(Clone)]
pub struct BankingService {
    banking_repo: BankingRepository,
    pool: PgPool,
}

impl BankingService {
    pub fn new(banking_repo: BankingRepository, pool: PgPool) -> Self {
        Self { banking_repo, pool }
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create_account(
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
        let account = self
            .banking_repo
            .insert_account(
                shop_id,
                bank_name,
                branch_name,
                account_number,
                account_holder_name,
                account_type,
                ifsc_code,
                initial_balance,
            )
            .await?;

        tracing::info!(account_id = %account.id, banco = %account.bank_name, "🏦 Conta bancária criada");
        Ok(account)
    }

    pub async fn list_accounts(
        &self,
        shop_id: Uuid,
        active_only: bool,
    ) -> Result<Vec<BankAccount>, AppError> {
        self.banking_repo.list_accounts(shop_id, active_only).await
    }

    pub async fn update_account(
        &self,
        shop_id: Uuid,
        id: Uuid,
        patch: BankAccountPatch,
    ) -> Result<BankAccount, AppError> {
        let original = self
            .banking_repo
            .find_account(&self.pool, shop_id, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Bank account".to_string()))?;

        let merged = BankAccount {
            bank_name: patch.bank_name.unwrap_or(original.bank_name),
            branch_name: patch.branch_name.or(original.branch_name),
            account_number: patch.account_number.unwrap_or(original.account_number),
            account_holder_name: patch
                .account_holder_name
                .unwrap_or(original.account_holder_name),
            account_type: patch.account_type.unwrap_or(original.account_type),
            ifsc_code: patch.ifsc_code.or(original.ifsc_code),
            status: patch.status.unwrap_or(original.status),
            ..original
        };

        self.banking_repo.update_account(&merged).await
    }

    pub async fn close_account(&self, shop_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let closed = self.banking_repo.close_account(shop_id, id).await?;
        if closed == 0 {
            return Err(AppError::ResourceNotFound("Bank account".to_string()));
        }
        Ok(())
    }

    /// Retirada do saldo rastreado. Tudo numa transação: a conta precisa
    /// existir e cobrir o valor; a linha de coleta é gravada com carimbo
    /// no fuso fixo e o saldo é debitado num UPDATE atômico.
    pub async fn create_collection(
        &self,
        shop_id: Uuid,
        bank_account_id: Uuid,
        collection_amount: Decimal,
        collection_date: NaiveDate,
        notes: Option<&str>,
    ) -> Result<BankCollection, AppError> {
        let mut tx = self.pool.begin().await?;

        let account = self
            .banking_repo
            .find_account(&mut *tx, shop_id, bank_account_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Bank account".to_string()))?;

        ensure_sufficient(account.current_balance, collection_amount)?;

        let collection = self
            .banking_repo
            .insert_collection(
                &mut *tx,
                shop_id,
                bank_account_id,
                collection_amount,
                collection_date,
                collection_timestamp(Utc::now()),
                notes,
            )
            .await?;

        self.banking_repo
            .apply_balance_delta(&mut *tx, shop_id, bank_account_id, -collection_amount)
            .await?;

        tx.commit().await?;

        tracing::info!(
            account_id = %bank_account_id,
            valor = %collection_amount,
            "🏧 Coleta registrada e saldo debitado"
        );
        Ok(collection)
    }

    pub async fn list_collections(&self, shop_id: Uuid) -> Result<Vec<BankCollection>, AppError> {
        self.banking_repo.list_collections(shop_id).await
    }

    /// Compara o saldo corrente armazenado com o saldo derivado do
    /// histórico (initial + pagamentos bancários completed - coletas).
    /// Detecta deriva introduzida por caminhos de escrita que esqueceram
    /// o razão.
    pub async fn audit_balance(&self, shop_id: Uuid, id: Uuid) -> Result<BalanceAudit, AppError> {
        let account = self
            .banking_repo
            .find_account(&self.pool, shop_id, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Bank account".to_string()))?;

        let derived = self
            .banking_repo
            .derived_balance(shop_id, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Bank account".to_string()))?;

        Ok(BalanceAudit {
            bank_account_id: account.id,
            stored_balance: account.current_balance,
            derived_balance: derived,
            drift: account.current_balance - derived,
        })
    }
}

/// Trava da coleta: o saldo precisa cobrir o valor, e o erro devolve os
/// dois números.
pub(crate) fn ensure_sufficient(available: Decimal, requested: Decimal) -> Result<(), AppError> {
    if available < requested {
        return Err(AppError::InsufficientBalance {
            available,
            requested,
        });
    }
    Ok(())
}

pub(crate) fn collection_timestamp(now: DateTime<Utc>) -> DateTime<FixedOffset> {
    let offset = FixedOffset::east_opt(COLLECTION_OFFSET_SECS).expect("offset fixo válido");
    now.with_timezone(&offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn coleta_acima_do_saldo_e_rejeitada_com_os_dois_valores() {
        let err = ensure_sufficient(dec!(100), dec!(250)).unwrap_err();
        match err {
            AppError::InsufficientBalance {
                available,
                requested,
            } => {
                assert_eq!(available, dec!(100));
                assert_eq!(requested, dec!(250));
            }
            outro => panic!("erro inesperado: {outro:?}"),
        }
    }

    #[test]
    fn coleta_igual_ao_saldo_e_permitida() {
        assert!(ensure_sufficient(dec!(250), dec!(250)).is_ok());
        assert!(ensure_sufficient(dec!(300), dec!(250)).is_ok());
    }

    #[test]
    fn carimbo_da_coleta_usa_o_fuso_fixo() {
        let agora = "2026-08-05T10:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let carimbo = collection_timestamp(agora);
        assert_eq!(carimbo.offset().local_minus_utc(), 19800);
        // mesmo instante, outro relógio de parede
        assert_eq!(carimbo.with_timezone(&Utc), agora);
        assert_eq!(carimbo.to_rfc3339(), "2026-08-05T15:30:00+05:30");
    }
}
