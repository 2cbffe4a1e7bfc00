// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post, put},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

// Declaração dos nossos módulos
mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas de autenticação
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    let user_routes = Router::new().route("/me", get(handlers::auth::get_me));

    let shop_routes = Router::new()
        .route(
            "/",
            post(handlers::shops::create_shop).get(handlers::shops::list_shops),
        )
        .route("/{id}", get(handlers::shops::get_shop));

    let customer_routes = Router::new()
        .route("/", post(handlers::customers::create_customer))
        .route("/shop/{shop_id}", get(handlers::customers::list_customers))
        .route(
            "/{id}",
            get(handlers::customers::get_customer).put(handlers::customers::update_customer),
        );

    let order_routes = Router::new()
        .route("/", post(handlers::orders::create_order))
        .route("/shop/{shop_id}", get(handlers::orders::list_orders))
        .route("/{id}", get(handlers::orders::get_order))
        .route("/{id}/payment", post(handlers::orders::record_order_payment))
        .route("/{id}/status", put(handlers::orders::update_order_status))
        .route("/{id}/payments", get(handlers::orders::order_payments));

    let payment_routes = Router::new()
        .route("/", post(handlers::payments::create_payment))
        .route("/shop/{shop_id}", get(handlers::payments::list_shop_payments))
        .route("/summary/{shop_id}", get(handlers::payments::payment_summary))
        .route(
            "/{id}",
            get(handlers::payments::get_payment)
                .put(handlers::payments::update_payment)
                .delete(handlers::payments::delete_payment),
        );

    // O GET em "/{id}" lista as contas da loja (o parâmetro é o shop_id,
    // como o frontend legado espera); PUT/DELETE operam numa conta.
    let bank_account_routes = Router::new()
        .route("/", post(handlers::banking::create_bank_account))
        .route(
            "/{id}",
            get(handlers::banking::list_bank_accounts)
                .put(handlers::banking::update_bank_account)
                .delete(handlers::banking::close_bank_account),
        )
        .route("/{id}/audit", get(handlers::banking::audit_bank_account));

    let collection_routes = Router::new()
        .route("/", post(handlers::banking::create_collection))
        .route("/{shop_id}", get(handlers::banking::list_collections));

    let report_routes = Router::new()
        .route("/orders/{shop_id}", get(handlers::reports::order_summary))
        .route("/payments/{shop_id}", get(handlers::reports::payment_summary));

    // Tudo abaixo exige Bearer token
    let protected_routes = Router::new()
        .nest("/users", user_routes)
        .nest("/shops", shop_routes)
        .nest("/customers", customer_routes)
        .nest("/orders", order_routes)
        .nest("/payments", payment_routes)
        .nest("/bank-accounts", bank_account_routes)
        .nest("/bank-collections", collection_routes)
        .nest("/reports", report_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .nest("/api/v1/auth", auth_routes)
        .nest("/api/v1", protected_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state);

    // Inicia o servidor
    let addr =
        std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
