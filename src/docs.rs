// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;
use crate::services;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Shops ---
        handlers::shops::create_shop,
        handlers::shops::list_shops,
        handlers::shops::get_shop,

        // --- Customers ---
        handlers::customers::create_customer,
        handlers::customers::list_customers,
        handlers::customers::get_customer,
        handlers::customers::update_customer,

        // --- Orders ---
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::record_order_payment,
        handlers::orders::update_order_status,
        handlers::orders::order_payments,

        // --- Payments ---
        handlers::payments::create_payment,
        handlers::payments::update_payment,
        handlers::payments::delete_payment,
        handlers::payments::get_payment,
        handlers::payments::list_shop_payments,
        handlers::payments::payment_summary,

        // --- Banking ---
        handlers::banking::create_bank_account,
        handlers::banking::list_bank_accounts,
        handlers::banking::update_bank_account,
        handlers::banking::close_bank_account,
        handlers::banking::audit_bank_account,
        handlers::banking::create_collection,
        handlers::banking::list_collections,

        // --- Reports ---
        handlers::reports::order_summary,
        handlers::reports::payment_summary,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Shops ---
            models::shops::Shop,
            handlers::shops::CreateShopPayload,

            // --- Customers ---
            models::customers::Customer,
            handlers::customers::CreateCustomerPayload,
            handlers::customers::UpdateCustomerPayload,

            // --- Orders ---
            models::orders::Order,
            models::orders::OrderStatus,
            models::orders::PaymentStatus,
            models::orders::PaymentType,
            handlers::orders::CreateOrderPayload,
            handlers::orders::RecordOrderPaymentPayload,
            handlers::orders::UpdateOrderStatusPayload,

            // --- Payments ---
            models::payments::Payment,
            models::payments::PaymentMethod,
            models::payments::PaymentState,
            services::payment_service::RecordedPayment,
            handlers::payments::CreatePaymentPayload,
            handlers::payments::UpdatePaymentPayload,

            // --- Banking ---
            models::banking::BankAccount,
            models::banking::BankAccountType,
            models::banking::BankAccountStatus,
            models::banking::BankCollection,
            models::banking::BalanceAudit,
            handlers::banking::CreateBankAccountPayload,
            handlers::banking::UpdateBankAccountPayload,
            handlers::banking::CreateCollectionPayload,

            // --- Reports ---
            models::reports::OrderSummary,
            models::reports::PaymentSummary,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Shops", description = "Gestão de Lojas"),
        (name = "Customers", description = "Gestão de Clientes"),
        (name = "Orders", description = "Pedidos e Razão de Pagamentos"),
        (name = "Payments", description = "Diário de Pagamentos e Reconciliação"),
        (name = "Banking", description = "Contas Bancárias e Coletas"),
        (name = "Reports", description = "Resumos e Indicadores")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
