//src/main.rs

use anyhow::Context;
use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post},
    Json, Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::{AppConfig, AppState};
use crate::docs::ApiDoc;
use crate::middleware::auth::auth_guard;

const DEFAULT_LOG_FILTER: &str = "feedmill_backend=info,tower_http=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = AppConfig::from_env()?;
    let bind_addr = config.bind_addr.clone();
    let run_migrations = config.run_migrations;

    let (app_state, db_pool) = AppState::connect(config).await?;

    // O schema é do banco hospedado; migrações só quando pedido
    if run_migrations {
        sqlx::migrate!()
            .run(&db_pool)
            .await
            .context("Falha ao rodar as migrações do banco de dados.")?;
        tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");
    }

    let app = build_router(app_state);

    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Falha ao iniciar o listener TCP em {}", bind_addr))?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, app).await.context("Erro no servidor Axum")?;
    Ok(())
}

pub fn build_router(app_state: AppState) -> Router {
    // Define as rotas de autenticação (públicas)
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Daqui para baixo tudo passa pelo auth_guard
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/me/navigation", get(handlers::auth::get_navigation))
        .route("/logout", post(handlers::auth::logout));

    let profile_routes = Router::new().route(
        "/",
        get(handlers::profiles::list_profiles).post(handlers::profiles::create_profile),
    );

    let order_routes = Router::new()
        .route("/"
               ,get(handlers::orders::list_orders)
               .post(handlers::orders::create_order)
        )
        .route("/categories", get(handlers::orders::list_feed_categories))
        .route("/{id}", get(handlers::orders::get_order))
        .route("/{id}/status", patch(handlers::orders::update_order_status));

    let target_routes = Router::new().route(
        "/",
        get(handlers::targets::list_targets).put(handlers::targets::upsert_target),
    );

    let dashboard_routes = Router::new()
        .route("/", get(handlers::dashboard::get_dashboard))
        .route("/production/stream", get(handlers::dashboard::stream_production));

    let inventory_routes = Router::new()
        .route("/items", get(handlers::inventory::list_items))
        .route("/usage"
               ,get(handlers::inventory::list_usage)
               .post(handlers::inventory::record_usage)
        );

    let protected = Router::new()
        .nest("/users", user_routes)
        .nest("/profiles", profile_routes)
        .nest("/orders", order_routes)
        .nest("/targets", target_routes)
        .nest("/dashboard", dashboard_routes)
        .nest("/inventory", inventory_routes)
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Combina tudo no router principal
    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api/auth", auth_routes)
        .nest("/api", protected)
        .with_state(app_state)
}
