// src/services/payment_service.rs
//
// O núcleo de reconciliação: manter pedido, diário de pagamentos e razão
// bancário mutuamente consistentes a cada evento financeiro. Toda mutação
// multi-linha roda dentro de UMA transação; qualquer falha desfaz tudo.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::PgPool;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BankingRepository, OrderRepository, PaymentRepository},
    models::{
        orders::PaymentType,
        payments::{NewPaymentRecord, Payment, PaymentMethod, PaymentState},
    },
};

// Entrada já validada pelo handler (valor positivo, método resolvido,
// campos bancários condicionais presentes).
#[derive(Debug, Clone)]
pub struct PaymentInput {
    pub shop_id: Uuid,
    pub order_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub payment_type: Option<PaymentType>,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub bank_account_id: Option<Uuid>,
    pub branch_name: Option<String>,
    pub transaction_id: Option<String>,
    pub status: PaymentState,
    pub notes: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
}

// Atualização parcial: campo ausente preserva o valor armazenado.
#[derive(Debug, Clone, Default)]
pub struct PaymentPatch {
    pub payment_type: Option<PaymentType>,
    pub amount: Option<Decimal>,
    pub method: Option<PaymentMethod>,
    pub bank_account_id: Option<Uuid>,
    pub branch_name: Option<String>,
    pub status: Option<PaymentState>,
    pub notes: Option<String>,
    pub payment_date: Option<DateTime<Utc>>,
}

// O que o caller recebe de volta: a linha registrada e o troco
// (excedente que NÃO entrou no diário por causa do capping).
#[derive(Debug, Serialize, ToSchema)]
pub struct RecordedPayment {
    pub payment: Payment,
    #[schema(example = "500.00")]
    pub change_given: Decimal,
}

#[derive(Clone)]
pub struct PaymentService {
    payment_repo: PaymentRepository,
    order_repo: OrderRepository,
    banking_repo: BankingRepository,
    pool: PgPool,
}

impl PaymentService {
    pub fn new(
        payment_repo: PaymentRepository,
        order_repo: OrderRepository,
        banking_repo: BankingRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            payment_repo,
            order_repo,
            banking_repo,
            pool,
        }
    }

    /// Registra um pagamento: capping contra o valor do pedido, linha no
    /// diário com transaction_id unificado, lançamento no razão do pedido
    /// e crédito no razão bancário quando aplicável.
    pub async fn create_payment(&self, input: PaymentInput) -> Result<RecordedPayment, AppError> {
        let mut tx = self.pool.begin().await?;

        // Com pedido vinculado, o valor registrado é limitado ao valor do
        // pedido; o excedente vira troco e nunca entra no diário.
        let (recorded_amount, change_given, ledger_target) = match input.order_id {
            Some(order_id) => {
                let order = self
                    .order_repo
                    .find_for_shop(&mut *tx, input.shop_id, order_id)
                    .await?
                    .ok_or_else(|| AppError::ResourceNotFound("Order".to_string()))?;

                let (recorded, change) = cap_amount(input.amount, order.final_amount);
                (recorded, change, Some(order))
            }
            None => (input.amount, Decimal::ZERO, None),
        };

        let transaction_id = make_transaction_id(
            input.transaction_id.as_deref(),
            Utc::now().timestamp_millis(),
        );

        let record = NewPaymentRecord {
            shop_id: input.shop_id,
            order_id: input.order_id,
            customer_id: input.customer_id,
            payment_type: input.payment_type,
            payment_amount: recorded_amount,
            payment_method: input.method,
            bank_account_id: input.bank_account_id,
            branch_name: input.branch_name.clone(),
            transaction_id,
            payment_status: input.status,
            notes: input.notes.clone(),
            payment_date: input.payment_date.unwrap_or_else(Utc::now),
        };

        let payment = self.payment_repo.insert(&mut *tx, &record).await?;

        // Lançamento no razão do pedido (tipo default: balance).
        if let Some(order) = ledger_target {
            let kind = input.payment_type.unwrap_or(PaymentType::Balance);
            let update = order.ledger_after(recorded_amount, kind);
            self.order_repo
                .apply_ledger(&mut *tx, input.shop_id, order.id, &update)
                .await?;
        }

        // Crédito no razão bancário, só para completed + método bancário.
        if let Some((account_id, amount)) = payment.bank_effect() {
            let touched = self
                .banking_repo
                .apply_balance_delta(&mut *tx, input.shop_id, account_id, amount)
                .await?;
            if touched == 0 {
                // Conta inexistente ou de outra loja: aborta tudo.
                return Err(AppError::ResourceNotFound("Bank account".to_string()));
            }
        }

        tx.commit().await?;

        tracing::info!(
            payment_id = %payment.id,
            amount = %payment.payment_amount,
            change = %change_given,
            "💸 Pagamento registrado"
        );

        Ok(RecordedPayment {
            payment,
            change_given,
        })
    }

    /// Edição administrativa. Em duas fases, na mesma transação:
    /// primeiro desfaz o efeito bancário do estado ORIGINAL, depois aplica
    /// o efeito do estado RESULTANTE (original + patch). Assim o razão
    /// permanece correto mesmo trocando valor, método ou conta de destino.
    pub async fn update_payment(
        &self,
        shop_id: Uuid,
        id: Uuid,
        patch: PaymentPatch,
    ) -> Result<Payment, AppError> {
        let mut tx = self.pool.begin().await?;

        let original = self
            .payment_repo
            .find_for_shop(&mut *tx, shop_id, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Payment".to_string()))?;

        if let Some((account_id, amount)) = original.bank_effect() {
            self.banking_repo
                .apply_balance_delta(&mut *tx, shop_id, account_id, -amount)
                .await?;
        }

        let merged = merge_patch(&original, &patch);

        if let Some((account_id, amount)) = merged.bank_effect() {
            let touched = self
                .banking_repo
                .apply_balance_delta(&mut *tx, shop_id, account_id, amount)
                .await?;
            if touched == 0 {
                return Err(AppError::ResourceNotFound("Bank account".to_string()));
            }
        }

        let updated = self.payment_repo.update_row(&mut *tx, &merged).await?;
        tx.commit().await?;

        tracing::info!(payment_id = %updated.id, "Pagamento atualizado");
        Ok(updated)
    }

    /// Remoção com estorno: a mesma reversão do update, com estado alvo
    /// "apagado" — desfaz o efeito bancário original e remove a linha.
    /// O razão do pedido não é recomposto (comportamento herdado).
    pub async fn delete_payment(&self, shop_id: Uuid, id: Uuid) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let original = self
            .payment_repo
            .find_for_shop(&mut *tx, shop_id, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Payment".to_string()))?;

        if let Some((account_id, amount)) = original.bank_effect() {
            self.banking_repo
                .apply_balance_delta(&mut *tx, shop_id, account_id, -amount)
                .await?;
        }

        self.payment_repo.delete(&mut *tx, shop_id, id).await?;
        tx.commit().await?;

        tracing::info!(payment_id = %id, "Pagamento removido com estorno bancário");
        Ok(())
    }

    pub async fn get_payment(&self, shop_id: Uuid, id: Uuid) -> Result<Payment, AppError> {
        self.payment_repo
            .find_for_shop(&self.pool, shop_id, id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Payment".to_string()))
    }

    pub async fn list_shop_payments(&self, shop_id: Uuid) -> Result<Vec<Payment>, AppError> {
        self.payment_repo.list_by_shop(shop_id).await
    }

    pub async fn summary(
        &self,
        shop_id: Uuid,
        start_date: Option<chrono::NaiveDate>,
        end_date: Option<chrono::NaiveDate>,
    ) -> Result<crate::models::reports::PaymentSummary, AppError> {
        self.payment_repo.summary(shop_id, start_date, end_date).await
    }
}

/// Capping de sobrepagamento: registra no máximo o valor devido; o
/// excedente é devolvido como troco. O diário nunca mostra mais pago
/// do que o devido.
pub(crate) fn cap_amount(requested: Decimal, order_amount: Decimal) -> (Decimal, Decimal) {
    let cap = order_amount.max(Decimal::ZERO);
    if requested > cap {
        (cap, requested - cap)
    } else {
        (requested, Decimal::ZERO)
    }
}

/// Garante unicidade do transaction_id: o id do caller ganha um sufixo de
/// timestamp; sem id, gera um `TXN-<ts>-<sufixo>`.
pub(crate) fn make_transaction_id(supplied: Option<&str>, now_ms: i64) -> String {
    match supplied.map(str::trim).filter(|s| !s.is_empty()) {
        Some(supplied) => format!("{}-{}", supplied, now_ms),
        None => {
            let suffix = Uuid::new_v4().simple().to_string();
            format!("TXN-{}-{}", now_ms, &suffix[..8])
        }
    }
}

// Estado resultante de uma edição parcial sobre a linha original.
pub(crate) fn merge_patch(original: &Payment, patch: &PaymentPatch) -> Payment {
    Payment {
        payment_type: patch.payment_type.or(original.payment_type),
        payment_amount: patch.amount.unwrap_or(original.payment_amount),
        payment_method: patch.method.unwrap_or(original.payment_method),
        bank_account_id: patch.bank_account_id.or(original.bank_account_id),
        branch_name: patch
            .branch_name
            .clone()
            .or_else(|| original.branch_name.clone()),
        payment_status: patch.status.unwrap_or(original.payment_status),
        notes: patch.notes.clone().or_else(|| original.notes.clone()),
        payment_date: patch.payment_date.unwrap_or(original.payment_date),
        ..original.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn capping_registra_o_devido_e_devolve_o_troco() {
        assert_eq!(cap_amount(dec!(1500), dec!(1000)), (dec!(1000), dec!(500)));
        assert_eq!(cap_amount(dec!(800), dec!(1000)), (dec!(800), dec!(0)));
        assert_eq!(cap_amount(dec!(1000), dec!(1000)), (dec!(1000), dec!(0)));
    }

    #[test]
    fn capping_com_pedido_zerado_nao_registra_nada() {
        assert_eq!(cap_amount(dec!(300), Decimal::ZERO), (dec!(0), dec!(300)));
    }

    #[test]
    fn transaction_id_do_caller_ganha_sufixo_de_timestamp() {
        let id = make_transaction_id(Some("PIX-123"), 1754380800000);
        assert_eq!(id, "PIX-123-1754380800000");
    }

    #[test]
    fn transaction_id_vazio_e_tratado_como_ausente() {
        let id = make_transaction_id(Some("   "), 1754380800000);
        assert!(id.starts_with("TXN-1754380800000-"));
    }

    #[test]
    fn transaction_id_gerado_tem_prefixo_e_sufixo_aleatorio() {
        let a = make_transaction_id(None, 1754380800000);
        let b = make_transaction_id(None, 1754380800000);
        assert!(a.starts_with("TXN-1754380800000-"));
        assert_ne!(a, b);
    }

    fn pagamento_bancario(conta: Uuid, valor: Decimal) -> Payment {
        let agora = Utc::now();
        Payment {
            id: Uuid::new_v4(),
            shop_id: Uuid::new_v4(),
            order_id: None,
            customer_id: None,
            payment_type: None,
            payment_amount: valor,
            payment_method: PaymentMethod::OnlineTransfer,
            bank_account_id: Some(conta),
            branch_name: None,
            transaction_id: "TXN-TEST".to_string(),
            payment_status: PaymentState::Completed,
            notes: None,
            payment_date: agora,
            created_at: agora,
            updated_at: agora,
        }
    }

    // Editar o valor de A para A' na mesma conta tem efeito líquido
    // A' - A, nunca +A'.
    #[test]
    fn reversao_e_reaplicacao_mudando_o_valor() {
        let conta = Uuid::new_v4();
        let original = pagamento_bancario(conta, dec!(100));
        let patch = PaymentPatch {
            amount: Some(dec!(150)),
            ..Default::default()
        };

        let reverso = original.bank_effect().unwrap();
        let merged = merge_patch(&original, &patch);
        let reaplicado = merged.bank_effect().unwrap();

        assert_eq!(reverso, (conta, dec!(100)));
        assert_eq!(reaplicado, (conta, dec!(150)));
        assert_eq!(reaplicado.1 - reverso.1, dec!(50));
    }

    #[test]
    fn trocar_a_conta_de_destino_move_o_efeito_inteiro() {
        let conta_a = Uuid::new_v4();
        let conta_b = Uuid::new_v4();
        let original = pagamento_bancario(conta_a, dec!(200));
        let patch = PaymentPatch {
            bank_account_id: Some(conta_b),
            ..Default::default()
        };

        let merged = merge_patch(&original, &patch);
        assert_eq!(original.bank_effect(), Some((conta_a, dec!(200))));
        assert_eq!(merged.bank_effect(), Some((conta_b, dec!(200))));
    }

    #[test]
    fn estornar_para_refunded_remove_o_efeito_bancario() {
        let conta = Uuid::new_v4();
        let original = pagamento_bancario(conta, dec!(200));
        let patch = PaymentPatch {
            status: Some(PaymentState::Refunded),
            ..Default::default()
        };

        let merged = merge_patch(&original, &patch);
        assert_eq!(merged.bank_effect(), None);
    }

    #[test]
    fn mudar_o_metodo_para_dinheiro_remove_o_efeito_bancario() {
        let conta = Uuid::new_v4();
        let original = pagamento_bancario(conta, dec!(75));
        let patch = PaymentPatch {
            method: Some(PaymentMethod::Cash),
            ..Default::default()
        };

        let merged = merge_patch(&original, &patch);
        assert_eq!(merged.bank_effect(), None);
        // os campos não tocados permanecem
        assert_eq!(merged.payment_amount, dec!(75));
        assert_eq!(merged.bank_account_id, Some(conta));
    }
}
