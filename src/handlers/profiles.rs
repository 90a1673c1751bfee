// src/handlers/profiles.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::rbac::{OwnerOnly, RequireRole},
    models::profile::{CreateProfilePayload, Profile, ProfileFilter},
};

// POST /api/profiles
#[utoipa::path(
    post,
    path = "/api/profiles",
    tag = "Profiles",
    request_body = CreateProfilePayload,
    responses(
        (status = 201, description = "Perfil cadastrado", body = Profile),
        (status = 403, description = "Apenas o dono"),
        (status = 409, description = "Já existe perfil com este e-mail")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_profile(
    State(app_state): State<AppState>,
    _gate: RequireRole<OwnerOnly>,
    Json(payload): Json<CreateProfilePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let profile = app_state.profile_service.create_profile(&payload).await?;

    Ok((StatusCode::CREATED, Json(profile)))
}

// GET /api/profiles
#[utoipa::path(
    get,
    path = "/api/profiles",
    tag = "Profiles",
    params(ProfileFilter),
    responses(
        (status = 200, description = "Perfis cadastrados", body = Vec<Profile>),
        (status = 403, description = "Apenas o dono")
    ),
    security(("api_jwt" = []))
)]
pub async fn list_profiles(
    State(app_state): State<AppState>,
    _gate: RequireRole<OwnerOnly>,
    Query(filter): Query<ProfileFilter>,
) -> Result<Json<Vec<Profile>>, AppError> {
    let profiles = app_state.profile_service.list_profiles(&filter).await?;
    Ok(Json(profiles))
}
