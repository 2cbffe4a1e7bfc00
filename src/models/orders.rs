// src/models/orders.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_payment_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Unpaid,
    Partial,
    FullyPaid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

// Tipo do lançamento contra o razão do pedido.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Advance,
    Balance,
    Full,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub shop_id: Uuid,
    pub customer_id: Option<Uuid>,

    #[schema(example = "ORD-20260805-1024")]
    pub order_number: String,

    // Subtotal da venda, antes da entrega.
    #[schema(example = "2000.00")]
    pub total_amount: Decimal,
    #[schema(example = "0.00")]
    pub delivery_charge: Decimal,

    // Nasce igual ao total geral (valor devido); os lançamentos do razão
    // o redefinem como acumulado pago. Comportamento herdado do legado.
    #[schema(example = "2000.00")]
    pub final_amount: Decimal,
    #[schema(example = "0.00")]
    pub advance_paid: Decimal,
    #[schema(example = "2000.00")]
    pub balance_due: Decimal,

    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,

    pub notes: Option<String>,
    pub order_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Resultado da aritmética do razão: os quatro campos que um lançamento
// reescreve no pedido, prontos para um único UPDATE.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LedgerUpdate {
    pub advance_paid: Decimal,
    pub final_amount: Decimal,
    pub balance_due: Decimal,
    pub payment_status: PaymentStatus,
}

impl Order {
    pub fn grand_total(&self) -> Decimal {
        self.total_amount + self.delivery_charge
    }

    // Quanto já entrou, deduzido do que falta. balance_due só diminui,
    // então isto é monotônico mesmo com a sobrecarga de final_amount.
    pub fn total_paid(&self) -> Decimal {
        (self.grand_total() - self.balance_due).max(Decimal::ZERO)
    }

    /// Aritmética pura de um lançamento de pagamento sobre este pedido.
    /// Nenhum efeito colateral: o chamador persiste o resultado.
    ///
    /// Todo lançamento abate `balance_due` (com piso em zero). Além disso:
    /// - `advance`: acumula em `advance_paid` e redefine `final_amount`
    ///   como o total adiantado;
    /// - `balance`: soma ao `final_amount`;
    /// - `full`: quita o total geral e zera `advance_paid`/`balance_due`.
    pub fn ledger_after(&self, amount: Decimal, kind: PaymentType) -> LedgerUpdate {
        let (advance_paid, final_amount, balance_due) = match kind {
            PaymentType::Advance => {
                let advance = self.advance_paid + amount;
                (
                    advance,
                    advance,
                    (self.balance_due - amount).max(Decimal::ZERO),
                )
            }
            PaymentType::Balance => (
                self.advance_paid,
                self.final_amount + amount,
                (self.balance_due - amount).max(Decimal::ZERO),
            ),
            PaymentType::Full => (Decimal::ZERO, self.grand_total(), Decimal::ZERO),
        };

        LedgerUpdate {
            advance_paid,
            final_amount,
            balance_due,
            payment_status: derive_payment_status(advance_paid, balance_due, self.grand_total()),
        }
    }
}

/// `fully_paid` sse `balance_due <= 0`; `partial` se algo já foi pago mas
/// resta saldo; `unpaid` caso contrário. "Algo já foi pago" é detectado por
/// `advance_paid > 0` ou `balance_due < total geral`, já que todo lançamento
/// abate `balance_due`.
pub fn derive_payment_status(
    advance_paid: Decimal,
    balance_due: Decimal,
    grand_total: Decimal,
) -> PaymentStatus {
    if balance_due <= Decimal::ZERO {
        PaymentStatus::FullyPaid
    } else if advance_paid > Decimal::ZERO || balance_due < grand_total {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Unpaid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn pedido(total: Decimal, entrega: Decimal) -> Order {
        let agora = Utc::now();
        Order {
            id: Uuid::new_v4(),
            shop_id: Uuid::new_v4(),
            customer_id: None,
            order_number: "ORD-TEST-1".to_string(),
            total_amount: total,
            delivery_charge: entrega,
            final_amount: total + entrega,
            advance_paid: Decimal::ZERO,
            balance_due: total + entrega,
            payment_status: PaymentStatus::Unpaid,
            order_status: OrderStatus::Pending,
            notes: None,
            order_date: agora,
            created_at: agora,
            updated_at: agora,
        }
    }

    fn aplicado(pedido: &Order, upd: LedgerUpdate) -> Order {
        Order {
            advance_paid: upd.advance_paid,
            final_amount: upd.final_amount,
            balance_due: upd.balance_due,
            payment_status: upd.payment_status,
            ..pedido.clone()
        }
    }

    // Cenário do fluxo clássico: sinal de 500, depois saldo de 1500.
    #[test]
    fn sinal_e_depois_saldo_quitam_o_pedido() {
        let p0 = pedido(dec!(2000), Decimal::ZERO);

        let upd = p0.ledger_after(dec!(500), PaymentType::Advance);
        assert_eq!(upd.advance_paid, dec!(500));
        assert_eq!(upd.final_amount, dec!(500));
        assert_eq!(upd.balance_due, dec!(1500));
        assert_eq!(upd.payment_status, PaymentStatus::Partial);

        let p1 = aplicado(&p0, upd);
        let upd = p1.ledger_after(dec!(1500), PaymentType::Balance);
        assert_eq!(upd.balance_due, Decimal::ZERO);
        assert_eq!(upd.final_amount, dec!(2000));
        assert_eq!(upd.payment_status, PaymentStatus::FullyPaid);
    }

    #[test]
    fn status_permanece_parcial_enquanto_nao_atinge_o_total() {
        let mut p = pedido(dec!(1000), dec!(200));
        for parcela in [dec!(100), dec!(300), dec!(400)] {
            let upd = p.ledger_after(parcela, PaymentType::Balance);
            assert_eq!(upd.payment_status, PaymentStatus::Partial);
            p = aplicado(&p, upd);
        }
        // 800 de 1200 pagos; a última parcela fecha a conta.
        let upd = p.ledger_after(dec!(400), PaymentType::Balance);
        assert_eq!(upd.payment_status, PaymentStatus::FullyPaid);

        // Quitado permanece quitado: balance_due nunca volta a subir.
        let p = aplicado(&p, upd);
        let upd = p.ledger_after(dec!(50), PaymentType::Advance);
        assert_eq!(upd.balance_due, Decimal::ZERO);
        assert_eq!(upd.payment_status, PaymentStatus::FullyPaid);
    }

    #[test]
    fn pagamento_integral_zera_sinal_e_saldo() {
        let p0 = pedido(dec!(750), dec!(50));
        let upd0 = p0.ledger_after(dec!(200), PaymentType::Advance);
        let p1 = aplicado(&p0, upd0);

        let upd = p1.ledger_after(dec!(800), PaymentType::Full);
        assert_eq!(upd.advance_paid, Decimal::ZERO);
        assert_eq!(upd.balance_due, Decimal::ZERO);
        assert_eq!(upd.final_amount, dec!(800));
        assert_eq!(upd.payment_status, PaymentStatus::FullyPaid);
    }

    #[test]
    fn abatimento_tem_piso_em_zero() {
        let p = pedido(dec!(100), Decimal::ZERO);
        let upd = p.ledger_after(dec!(150), PaymentType::Balance);
        assert_eq!(upd.balance_due, Decimal::ZERO);
        assert_eq!(upd.payment_status, PaymentStatus::FullyPaid);
    }

    #[test]
    fn pedido_sem_pagamento_segue_unpaid() {
        let p = pedido(dec!(300), Decimal::ZERO);
        assert_eq!(
            derive_payment_status(p.advance_paid, p.balance_due, p.grand_total()),
            PaymentStatus::Unpaid
        );
        assert_eq!(p.total_paid(), Decimal::ZERO);
    }
}
