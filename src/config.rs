// src/config.rs

use std::{env, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::{
    db::{
        CredentialStore, InventoryRepository, InventoryStore, OrderRepository, OrderStore, ProfileRepository,
        ProfileStore, TargetRepository, TargetStore, UserRepository,
    },
    services::{
        auth::AuthService, dashboard_service::DashboardService, inventory_service::InventoryService,
        order_service::OrderService, profile_service::ProfileService, target_service::TargetService,
    },
};

// Configuração lida do ambiente (.env)
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub bind_addr: String,
    pub db_max_connections: u32,
    pub token_ttl_hours: i64,
    pub dashboard_poll_secs: u64,
    pub run_migrations: bool,
    pub bcrypt_cost: u32,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL deve ser definida")?,
            jwt_secret: env::var("JWT_SECRET").context("JWT_SECRET deve ser definido")?,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_string()),
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", 5)?,
            token_ttl_hours: parse_var("TOKEN_TTL_HOURS", 168)?,
            dashboard_poll_secs: parse_var("DASHBOARD_POLL_SECS", 30)?,
            run_migrations: parse_var("RUN_MIGRATIONS", false)?,
            bcrypt_cost: parse_var("BCRYPT_COST", bcrypt::DEFAULT_COST)?,
        })
    }

    pub fn poll_period(&self) -> Duration {
        Duration::from_secs(self.dashboard_poll_secs.max(1))
    }
}

fn parse_var<T>(name: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} tem um valor inválido: '{}'", name, raw)),
        Err(_) => Ok(default),
    }
}

// Os stores que os serviços usam. Postgres em produção; memória nos testes.
#[derive(Clone)]
pub struct Stores {
    pub credentials: Arc<dyn CredentialStore>,
    pub profiles: Arc<dyn ProfileStore>,
    pub orders: Arc<dyn OrderStore>,
    pub targets: Arc<dyn TargetStore>,
    pub inventory: Arc<dyn InventoryStore>,
}

impl Stores {
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            credentials: Arc::new(UserRepository::new(pool.clone())),
            profiles: Arc::new(ProfileRepository::new(pool.clone())),
            orders: Arc::new(OrderRepository::new(pool.clone())),
            targets: Arc::new(TargetRepository::new(pool.clone())),
            inventory: Arc::new(InventoryRepository::new(pool)),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth_service: AuthService,
    pub profile_service: ProfileService,
    pub order_service: OrderService,
    pub target_service: TargetService,
    pub dashboard_service: DashboardService,
    pub inventory_service: InventoryService,
}

impl AppState {
    /// Conecta ao banco e monta o gráfico de dependências.
    pub async fn connect(config: AppConfig) -> anyhow::Result<(Self, PgPool)> {
        let db_pool = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&config.database_url)
            .await
            .context("Falha ao conectar ao banco de dados")?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        let state = Self::from_stores(config, Stores::postgres(db_pool.clone()));
        Ok((state, db_pool))
    }

    pub fn from_stores(config: AppConfig, stores: Stores) -> Self {
        let profile_service = ProfileService::new(stores.profiles.clone());
        let auth_service = AuthService::new(
            stores.credentials,
            profile_service.clone(),
            config.jwt_secret.clone(),
            chrono::Duration::hours(config.token_ttl_hours),
            config.bcrypt_cost,
        );

        Self {
            order_service: OrderService::new(stores.orders.clone()),
            target_service: TargetService::new(stores.targets.clone(), stores.profiles.clone()),
            dashboard_service: DashboardService::new(
                stores.orders,
                stores.targets,
                stores.profiles,
                stores.inventory.clone(),
            ),
            inventory_service: InventoryService::new(stores.inventory),
            auth_service,
            profile_service,
            config: Arc::new(config),
        }
    }
}
