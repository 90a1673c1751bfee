// src/handlers/orders.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::{
        error::AppError,
        pagination::{Page, PageParams, Paginated},
    },
    config::AppState,
    middleware::{
        auth::AuthenticatedUser,
        rbac::{OrderCreators, OrderOperators, RequireRole},
    },
    models::order::{CreateOrderPayload, FeedCategory, Order, OrderQuery, UpdateOrderStatusPayload},
};

// GET /api/orders
#[utoipa::path(
    get,
    path = "/api/orders",
    tag = "Orders",
    params(OrderQuery, PageParams),
    responses(
        (status = 200, description = "Pedidos visíveis para o cargo, mais recentes primeiro", body = Paginated<Order>),
        (status = 400, description = "Filtro inválido"),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Query(query): Query<OrderQuery>,
    Query(page): Query<PageParams>,
) -> Result<Json<Paginated<Order>>, AppError> {
    let orders = app_state
        .order_service
        .list_orders(&identity, &query, Page::from(page))
        .await?;

    Ok(Json(orders))
}

// POST /api/orders
#[utoipa::path(
    post,
    path = "/api/orders",
    tag = "Orders",
    request_body = CreateOrderPayload,
    responses(
        (status = 201, description = "Pedido criado como pendente", body = Order),
        (status = 403, description = "Cargo sem permissão"),
        (status = 422, description = "Categoria de ração desconhecida")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_order(
    State(app_state): State<AppState>,
    gate: RequireRole<OrderCreators>,
    Json(payload): Json<CreateOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let order = app_state.order_service.create_order(&gate.user.0, payload).await?;

    Ok((StatusCode::CREATED, Json(order)))
}

// GET /api/orders/{id}
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    tag = "Orders",
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Pedido", body = Order),
        (status = 404, description = "Pedido não encontrado ou fora do recorte do cargo")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_order(
    State(app_state): State<AppState>,
    AuthenticatedUser(identity): AuthenticatedUser,
    Path(order_id): Path<Uuid>,
) -> Result<Json<Order>, AppError> {
    let order = app_state.order_service.get_order(&identity, order_id).await?;
    Ok(Json(order))
}

// PATCH /api/orders/{id}/status
#[utoipa::path(
    patch,
    path = "/api/orders/{id}/status",
    tag = "Orders",
    request_body = UpdateOrderStatusPayload,
    params(("id" = Uuid, Path, description = "ID do pedido")),
    responses(
        (status = 200, description = "Status atualizado", body = Order),
        (status = 403, description = "Cargo sem permissão"),
        (status = 404, description = "Pedido não encontrado"),
        (status = 422, description = "Status desconhecido")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_order_status(
    State(app_state): State<AppState>,
    _gate: RequireRole<OrderOperators>,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<UpdateOrderStatusPayload>,
) -> Result<Json<Order>, AppError> {
    let order = app_state.order_service.update_status(order_id, &payload.status).await?;
    Ok(Json(order))
}

// GET /api/orders/categories
#[utoipa::path(
    get,
    path = "/api/orders/categories",
    tag = "Orders",
    responses(
        (status = 200, description = "Catálogo de rações", body = Vec<FeedCategory>)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_feed_categories(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<Json<Vec<FeedCategory>>, AppError> {
    let categories = app_state.order_service.list_feed_categories().await?;
    Ok(Json(categories))
}
