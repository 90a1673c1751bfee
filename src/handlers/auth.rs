// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::{
        auth::{AuthResponse, LoginResponse, LoginUserPayload, RegisterUserPayload, SessionView},
        profile::NavItem,
    },
    services::session::{SessionEvent, SessionState},
};

// Handler de registro
#[utoipa::path(
    post,
    path = "/api/auth/register",
    tag = "Auth",
    request_body = RegisterUserPayload,
    responses(
        (status = 201, description = "Conta criada (aguarda o perfil ser cadastrado)", body = AuthResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 409, description = "E-mail já cadastrado")
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let token = app_state.auth_service.register_user(&payload.email, &payload.password).await?;

    Ok((StatusCode::CREATED, Json(AuthResponse { token })))
}

// Handler de login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginUserPayload,
    responses(
        (status = 200, description = "Sessão aberta", body = LoginResponse),
        (status = 401, description = "Credenciais inválidas"),
        (status = 403, description = "Conta aguardando aprovação")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginUserPayload>,
) -> Result<Json<LoginResponse>, AppError> {
    payload.validate()?;

    let (token, identity) = app_state.auth_service.login_user(&payload.email, &payload.password).await?;
    let session = SessionState::Unauthenticated.apply(SessionEvent::LoginCompleted(identity));

    Ok(Json(LoginResponse { token, session: session.view() }))
}

// O token é descartado pelo cliente; aqui só devolvemos a sessão encerrada
#[utoipa::path(
    post,
    path = "/api/users/logout",
    tag = "Auth",
    responses(
        (status = 200, description = "Sessão encerrada", body = SessionView),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn logout(AuthenticatedUser(identity): AuthenticatedUser) -> Json<SessionView> {
    let session = SessionState::Authenticated(identity).apply(SessionEvent::LogoutCompleted);
    Json(session.view())
}

// Handler da rota protegida /me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    responses(
        (status = 200, description = "Sessão atual", body = SessionView),
        (status = 401, description = "Não autorizado"),
        (status = 403, description = "Conta aguardando aprovação")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_me(AuthenticatedUser(identity): AuthenticatedUser) -> Json<SessionView> {
    Json(SessionState::Authenticated(identity).view())
}

#[utoipa::path(
    get,
    path = "/api/users/me/navigation",
    tag = "Users",
    responses(
        (status = 200, description = "Menu do cargo", body = Vec<NavItem>),
        (status = 401, description = "Não autorizado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_navigation(AuthenticatedUser(identity): AuthenticatedUser) -> Json<Vec<NavItem>> {
    Json(identity.role.navigation())
}
