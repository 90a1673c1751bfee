// src/handlers/inventory.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        time_window::{MonthQuery, TimeWindow},
    },
    config::AppState,
    middleware::rbac::{ProductionStaff, RequireRole},
    models::inventory::{InventoryLevel, InventoryUsage, RecordUsagePayload},
};

// GET /api/inventory/items
#[utoipa::path(
    get,
    path = "/api/inventory/items",
    tag = "Inventory",
    responses(
        (status = 200, description = "Níveis de estoque da produção", body = Vec<InventoryLevel>),
        (status = 403, description = "Apenas dono e gerente de produção")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_items(
    State(app_state): State<AppState>,
    _gate: RequireRole<ProductionStaff>,
) -> Result<Json<Vec<InventoryLevel>>, AppError> {
    let levels = app_state.inventory_service.list_levels().await?;
    Ok(Json(levels))
}

// POST /api/inventory/usage
#[utoipa::path(
    post,
    path = "/api/inventory/usage",
    tag = "Inventory",
    request_body = RecordUsagePayload,
    responses(
        (status = 201, description = "Consumo registrado e saldo baixado", body = InventoryUsage),
        (status = 404, description = "Item não encontrado"),
        (status = 422, description = "Estoque insuficiente")
    ),
    security(("api_jwt" = []))
)]
pub async fn record_usage(
    State(app_state): State<AppState>,
    gate: RequireRole<ProductionStaff>,
    Json(payload): Json<RecordUsagePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let usage = app_state.inventory_service.record_usage(&gate.user.0, &payload).await?;

    Ok((StatusCode::CREATED, Json(usage)))
}

// GET /api/inventory/usage?month=YYYY-MM
#[utoipa::path(
    get,
    path = "/api/inventory/usage",
    tag = "Inventory",
    params(MonthQuery),
    responses(
        (status = 200, description = "Consumo do mês", body = Vec<InventoryUsage>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_usage(
    State(app_state): State<AppState>,
    _gate: RequireRole<ProductionStaff>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<InventoryUsage>>, AppError> {
    let window = TimeWindow::month_of(query.resolve()?);
    let usage = app_state.inventory_service.list_usage(window).await?;
    Ok(Json(usage))
}
