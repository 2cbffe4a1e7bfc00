// src/services/order_service.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{OrderRepository, PaymentRepository},
    models::{
        orders::{Order, OrderStatus, PaymentType},
        payments::Payment,
    },
};

#[derive(Clone)]
pub struct OrderService {
    order_repo: OrderRepository,
    payment_repo: PaymentRepository,
    pool: PgPool,
}

impl OrderService {
    pub fn new(order_repo: OrderRepository, payment_repo: PaymentRepository, pool: PgPool) -> Self {
        Self {
            order_repo,
            payment_repo,
            pool,
        }
    }

    pub async fn create_order(
        &self,
        shop_id: Uuid,
        customer_id: Option<Uuid>,
        total_amount: Decimal,
        delivery_charge: Decimal,
        notes: Option<&str>,
        order_date: Option<DateTime<Utc>>,
    ) -> Result<Order, AppError> {
        let order_number = make_order_number(Utc::now());

        let order = self
            .order_repo
            .create(
                shop_id,
                customer_id,
                &order_number,
                total_amount,
                delivery_charge,
                notes,
                order_date.unwrap_or_else(Utc::now),
            )
            .await?;

        tracing::info!(order_id = %order.id, numero = %order.order_number, "🧾 Pedido criado");
        Ok(order)
    }

    /// Lançamento de pagamento direto no razão do pedido. Aritmética pura
    /// seguida de um único UPDATE — toca uma linha só, sem transação.
    pub async fn record_payment(
        &self,
        shop_id: Uuid,
        order_id: Uuid,
        amount_paid: Decimal,
        payment_type: PaymentType,
    ) -> Result<Order, AppError> {
        let order = self
            .order_repo
            .find_for_shop(&self.pool, shop_id, order_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Order".to_string()))?;

        let update = order.ledger_after(amount_paid, payment_type);

        let updated = self
            .order_repo
            .apply_ledger(&self.pool, shop_id, order_id, &update)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Order".to_string()))?;

        tracing::info!(
            order_id = %order_id,
            valor = %amount_paid,
            tipo = ?payment_type,
            status = ?updated.payment_status,
            "Lançamento aplicado ao razão do pedido"
        );
        Ok(updated)
    }

    /// Transição de status com a trava de envio: nada é despachado antes
    /// de o subtotal da venda estar coberto.
    pub async fn update_status(
        &self,
        shop_id: Uuid,
        order_id: Uuid,
        new_status: OrderStatus,
    ) -> Result<Order, AppError> {
        let order = self
            .order_repo
            .find_for_shop(&self.pool, shop_id, order_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Order".to_string()))?;

        if new_status == OrderStatus::Shipped {
            ensure_shippable(&order)?;
        }

        let updated = self
            .order_repo
            .update_status(shop_id, order_id, new_status)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Order".to_string()))?;

        Ok(updated)
    }

    pub async fn get_order(&self, shop_id: Uuid, order_id: Uuid) -> Result<Order, AppError> {
        self.order_repo
            .find_for_shop(&self.pool, shop_id, order_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Order".to_string()))
    }

    pub async fn list_orders(
        &self,
        shop_id: Uuid,
        pending_only: bool,
    ) -> Result<Vec<Order>, AppError> {
        self.order_repo.list_by_shop(shop_id, pending_only).await
    }

    pub async fn order_payments(
        &self,
        shop_id: Uuid,
        order_id: Uuid,
    ) -> Result<Vec<Payment>, AppError> {
        // 404 se o pedido não for da loja, antes de listar o diário.
        self.order_repo
            .find_for_shop(&self.pool, shop_id, order_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Order".to_string()))?;

        self.payment_repo.list_by_order(shop_id, order_id).await
    }
}

/// Trava de envio: exige total pago >= subtotal da venda e devolve o que
/// falta no erro.
pub(crate) fn ensure_shippable(order: &Order) -> Result<(), AppError> {
    let total_paid = order.total_paid();
    if total_paid < order.total_amount {
        return Err(AppError::OrderNotFullyPaid {
            remaining: order.total_amount - total_paid,
        });
    }
    Ok(())
}

pub(crate) fn make_order_number(now: DateTime<Utc>) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "ORD-{}-{}",
        now.format("%Y%m%d"),
        suffix[..6].to_ascii_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::orders::PaymentStatus;
    use rust_decimal_macros::dec;

    fn pedido_pago_parcial(total: Decimal, balance_due: Decimal) -> Order {
        let agora = Utc::now();
        Order {
            id: Uuid::new_v4(),
            shop_id: Uuid::new_v4(),
            customer_id: None,
            order_number: "ORD-TEST-2".to_string(),
            total_amount: total,
            delivery_charge: Decimal::ZERO,
            final_amount: total,
            advance_paid: Decimal::ZERO,
            balance_due,
            payment_status: PaymentStatus::Partial,
            order_status: OrderStatus::Processing,
            notes: None,
            order_date: agora,
            created_at: agora,
            updated_at: agora,
        }
    }

    #[test]
    fn pedido_com_saldo_nao_pode_ser_enviado() {
        let pedido = pedido_pago_parcial(dec!(1000), dec!(400));
        let err = ensure_shippable(&pedido).unwrap_err();
        match err {
            AppError::OrderNotFullyPaid { remaining } => assert_eq!(remaining, dec!(400)),
            outro => panic!("erro inesperado: {outro:?}"),
        }
    }

    #[test]
    fn pedido_quitado_pode_ser_enviado() {
        let pedido = pedido_pago_parcial(dec!(1000), Decimal::ZERO);
        assert!(ensure_shippable(&pedido).is_ok());
    }

    #[test]
    fn numero_de_pedido_carrega_a_data() {
        let agora = "2026-08-05T10:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let numero = make_order_number(agora);
        assert!(numero.starts_with("ORD-20260805-"));
        assert_eq!(numero.len(), "ORD-20260805-".len() + 6);
    }
}
