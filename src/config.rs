// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        BankingRepository, CustomerRepository, OrderRepository, PaymentRepository,
        ReportsRepository, ShopRepository, UserRepository,
    },
    services::{
        AuthService, BankingService, CustomerService, OrderService, PaymentService,
        ReportsService, ShopService,
    },
};

// O estado compartilhado que será acessível em toda a aplicação.
// Os serviços são construídos UMA vez aqui e injetados por referência —
// nada de singletons escondidos em módulos.
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub auth_service: AuthService,
    pub shop_service: ShopService,
    pub customer_service: CustomerService,
    pub order_service: OrderService,
    pub payment_service: PaymentService,
    pub banking_service: BankingService,
    pub reports_service: ReportsService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let shop_repo = ShopRepository::new(db_pool.clone());
        let customer_repo = CustomerRepository::new(db_pool.clone());
        let order_repo = OrderRepository::new(db_pool.clone());
        let payment_repo = PaymentRepository::new(db_pool.clone());
        let banking_repo = BankingRepository::new(db_pool.clone());
        let reports_repo = ReportsRepository::new(db_pool.clone());

        let auth_service = AuthService::new(user_repo, jwt_secret.clone(), db_pool.clone());
        let shop_service = ShopService::new(shop_repo);
        let customer_service = CustomerService::new(customer_repo);
        let order_service = OrderService::new(
            order_repo.clone(),
            payment_repo.clone(),
            db_pool.clone(),
        );
        let payment_service = PaymentService::new(
            payment_repo,
            order_repo,
            banking_repo.clone(),
            db_pool.clone(),
        );
        let banking_service = BankingService::new(banking_repo, db_pool.clone());
        let reports_service = ReportsService::new(reports_repo);

        Ok(Self {
            db_pool,
            jwt_secret,
            auth_service,
            shop_service,
            customer_service,
            order_service,
            payment_service,
            banking_service,
            reports_service,
        })
    }
}
