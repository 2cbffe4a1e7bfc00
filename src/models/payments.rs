// src/models/payments.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::orders::PaymentType;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_method", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    OnlineTransfer,
    BankDeposit,
    Card,
    Other,
}

impl PaymentMethod {
    /// Converte a string vinda do cliente para o enum fechado.
    /// Valores fora da lista caem em `Other` — política explícita de
    /// fallback (o legado fazia isso por acidente num if/else).
    pub fn from_input(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "cash" => PaymentMethod::Cash,
            "online_transfer" => PaymentMethod::OnlineTransfer,
            "bank_deposit" => PaymentMethod::BankDeposit,
            "card" => PaymentMethod::Card,
            _ => PaymentMethod::Other,
        }
    }

    // Métodos que implicam entrada de fundos numa conta bancária rastreada.
    pub fn is_bank_linked(&self) -> bool {
        matches!(
            self,
            PaymentMethod::OnlineTransfer | PaymentMethod::BankDeposit
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_state", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    Completed,
    Pending,
    Failed,
    Refunded,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Payment {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub order_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,

    pub payment_type: Option<PaymentType>,

    #[schema(example = "500.00")]
    pub payment_amount: Decimal,
    pub payment_method: PaymentMethod,

    pub bank_account_id: Option<Uuid>,
    pub branch_name: Option<String>,

    #[schema(example = "TXN-1754380800000-9f3c21aa")]
    pub transaction_id: String,
    pub payment_status: PaymentState,

    pub notes: Option<String>,
    pub payment_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Linha nova do diário, já validada e com o valor efetivamente
// registrado (pós-capping) e o transaction_id final.
#[derive(Debug, Clone)]
pub struct NewPaymentRecord {
    pub shop_id: Uuid,
    pub order_id: Option<Uuid>,
    pub customer_id: Option<Uuid>,
    pub payment_type: Option<PaymentType>,
    pub payment_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub bank_account_id: Option<Uuid>,
    pub branch_name: Option<String>,
    pub transaction_id: String,
    pub payment_status: PaymentState,
    pub notes: Option<String>,
    pub payment_date: DateTime<Utc>,
}

impl Payment {
    /// O efeito deste pagamento sobre o razão bancário, se houver:
    /// só pagamentos `completed` com método bancário e conta vinculada
    /// movimentam saldo.
    pub fn bank_effect(&self) -> Option<(Uuid, Decimal)> {
        if self.payment_status == PaymentState::Completed && self.payment_method.is_bank_linked() {
            self.bank_account_id
                .map(|account| (account, self.payment_amount))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn metodo_desconhecido_cai_em_other() {
        assert_eq!(PaymentMethod::from_input("pix"), PaymentMethod::Other);
        assert_eq!(PaymentMethod::from_input(""), PaymentMethod::Other);
        assert_eq!(PaymentMethod::from_input("CHEQUE"), PaymentMethod::Other);
    }

    #[test]
    fn metodos_conhecidos_sao_reconhecidos_sem_case() {
        assert_eq!(PaymentMethod::from_input("cash"), PaymentMethod::Cash);
        assert_eq!(PaymentMethod::from_input(" Card "), PaymentMethod::Card);
        assert_eq!(
            PaymentMethod::from_input("Online_Transfer"),
            PaymentMethod::OnlineTransfer
        );
        assert_eq!(
            PaymentMethod::from_input("bank_deposit"),
            PaymentMethod::BankDeposit
        );
    }

    #[test]
    fn apenas_transferencia_e_deposito_sao_bancarios() {
        assert!(PaymentMethod::OnlineTransfer.is_bank_linked());
        assert!(PaymentMethod::BankDeposit.is_bank_linked());
        assert!(!PaymentMethod::Cash.is_bank_linked());
        assert!(!PaymentMethod::Card.is_bank_linked());
        assert!(!PaymentMethod::Other.is_bank_linked());
    }

    fn pagamento(
        status: PaymentState,
        metodo: PaymentMethod,
        conta: Option<Uuid>,
        valor: Decimal,
    ) -> Payment {
        let agora = Utc::now();
        Payment {
            id: Uuid::new_v4(),
            shop_id: Uuid::new_v4(),
            order_id: None,
            customer_id: None,
            payment_type: None,
            payment_amount: valor,
            payment_method: metodo,
            bank_account_id: conta,
            branch_name: None,
            transaction_id: "TXN-TEST".to_string(),
            payment_status: status,
            notes: None,
            payment_date: agora,
            created_at: agora,
            updated_at: agora,
        }
    }

    #[test]
    fn efeito_bancario_exige_completed_metodo_e_conta() {
        let conta = Uuid::new_v4();

        let p = pagamento(
            PaymentState::Completed,
            PaymentMethod::OnlineTransfer,
            Some(conta),
            dec!(250),
        );
        assert_eq!(p.bank_effect(), Some((conta, dec!(250))));

        // pendente não movimenta saldo
        let p = pagamento(
            PaymentState::Pending,
            PaymentMethod::OnlineTransfer,
            Some(conta),
            dec!(250),
        );
        assert_eq!(p.bank_effect(), None);

        // dinheiro vivo não movimenta saldo, mesmo com conta preenchida
        let p = pagamento(PaymentState::Completed, PaymentMethod::Cash, Some(conta), dec!(250));
        assert_eq!(p.bank_effect(), None);

        // método bancário sem conta vinculada
        let p = pagamento(
            PaymentState::Completed,
            PaymentMethod::BankDeposit,
            None,
            dec!(250),
        );
        assert_eq!(p.bank_effect(), None);
    }
}
