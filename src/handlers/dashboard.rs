// src/handlers/dashboard.rs

use std::convert::Infallible;

use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use chrono::Utc;
use futures_util::Stream;

use crate::{
    common::{error::AppError, time_window::MonthQuery},
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{ProductionStaff, RequireRole},
    },
    models::dashboard::{ProductionDashboard, RoleDashboard},
    services::poller::spawn_poller,
};

// GET /api/dashboard
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = "Dashboard",
    params(MonthQuery),
    responses(
        (status = 200, description = "Painel do cargo de quem chamou", body = RoleDashboard),
        (status = 400, description = "Mês inválido"),
        (status = 401, description = "Não autorizado"),
        (status = 403, description = "Conta aguardando aprovação")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_dashboard(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Query(query): Query<MonthQuery>,
) -> Result<Json<RoleDashboard>, AppError> {
    let dashboard = app_state
        .dashboard_service
        .dashboard_for(&identity, query.resolve()?)
        .await?;

    Ok(Json(dashboard))
}

// GET /api/dashboard/production/stream
#[utoipa::path(
    get,
    path = "/api/dashboard/production/stream",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Eventos SSE `production` com o painel de produção do mês corrente", content_type = "text/event-stream", body = ProductionDashboard),
        (status = 403, description = "Apenas dono e gerente de produção")
    ),
    security(("api_jwt" = []))
)]
pub async fn stream_production(
    State(app_state): State<AppState>,
    _gate: RequireRole<ProductionStaff>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let service = app_state.dashboard_service.clone();
    let handle = spawn_poller(app_state.config.poll_period(), move || {
        let service = service.clone();
        async move { service.production_dashboard(Utc::now().date_naive()).await }
    });

    // O stream é dono do handle: cliente desconectou, o polling para
    let stream = async_stream::stream! {
        let handle = handle;
        let mut latest = handle.subscribe();

        while latest.changed().await.is_ok() {
            let snapshot = latest.borrow_and_update().clone();
            if let Some(dashboard) = snapshot {
                match serde_json::to_string(&dashboard) {
                    Ok(json) => yield Ok(Event::default().event("production").data(json)),
                    Err(e) => tracing::warn!("Falha ao serializar o painel de produção: {}", e),
                }
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::default())
}
