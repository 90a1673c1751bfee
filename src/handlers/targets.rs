// src/handlers/targets.rs

use axum::{
    extract::{Query, State},
    Json,
};
use validator::Validate;

use crate::{
    common::{error::AppError, time_window::MonthQuery},
    config::AppState,
    middleware::rbac::{RequireRole, TargetManagers},
    models::target::{Target, UpsertTargetPayload},
};

// PUT /api/targets
#[utoipa::path(
    put,
    path = "/api/targets",
    tag = "Targets",
    request_body = UpsertTargetPayload,
    responses(
        (status = 200, description = "Meta gravada (reatribuir sobrescreve)", body = Target),
        (status = 400, description = "Escopo ou mês inválido"),
        (status = 403, description = "Fora da sua equipe")
    ),
    security(("api_jwt" = []))
)]
pub async fn upsert_target(
    State(app_state): State<AppState>,
    gate: RequireRole<TargetManagers>,
    Json(payload): Json<UpsertTargetPayload>,
) -> Result<Json<Target>, AppError> {
    payload.validate()?;

    let target = app_state.target_service.upsert_target(&gate.user.0, payload).await?;
    Ok(Json(target))
}

// GET /api/targets?month=YYYY-MM
#[utoipa::path(
    get,
    path = "/api/targets",
    tag = "Targets",
    params(MonthQuery),
    responses(
        (status = 200, description = "Metas do mês", body = Vec<Target>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_targets(
    State(app_state): State<AppState>,
    _gate: RequireRole<TargetManagers>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<Target>>, AppError> {
    let targets = app_state.target_service.list_targets(query.resolve()?).await?;
    Ok(Json(targets))
}
