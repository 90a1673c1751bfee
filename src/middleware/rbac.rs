// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{common::error::AppError, middleware::auth::AuthenticatedUser, models::profile::Role};

/// 1. O Trait que define quem passa pelo portão
pub trait RoleGate: Send + Sync + 'static {
    fn allows(role: Role) -> bool;

    fn describe() -> &'static str;
}

/// 2. O Extractor (Guardião). Entrega a identidade já conferida.
pub struct RequireRole<G> {
    pub user: AuthenticatedUser,
    _gate: PhantomData<G>,
}

impl<G, S> FromRequestParts<S> for RequireRole<G>
where
    G: RoleGate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthenticatedUser::from_request_parts(parts, state).await?;

        if !G::allows(user.0.role) {
            return Err(AppError::Forbidden(format!(
                "Apenas {} podem realizar esta ação.",
                G::describe()
            )));
        }

        Ok(RequireRole { user, _gate: PhantomData })
    }
}

// ---
// DEFINIÇÃO DOS PORTÕES (TIPOS)
// ---

pub struct OwnerOnly;
impl RoleGate for OwnerOnly {
    fn allows(role: Role) -> bool {
        matches!(role, Role::Owner)
    }
    fn describe() -> &'static str { "o dono" }
}

// Quem lança pedidos
pub struct OrderCreators;
impl RoleGate for OrderCreators {
    fn allows(role: Role) -> bool {
        match role {
            Role::Owner | Role::MarketingManager | Role::MarketingExecutive | Role::Employee => true,
            Role::ProductionManager => false,
        }
    }
    fn describe() -> &'static str { "dono, gerente de marketing, executivos e funcionários" }
}

// Quem movimenta o status dos pedidos
pub struct OrderOperators;
impl RoleGate for OrderOperators {
    fn allows(role: Role) -> bool {
        match role {
            Role::Owner | Role::MarketingManager | Role::ProductionManager => true,
            Role::MarketingExecutive | Role::Employee => false,
        }
    }
    fn describe() -> &'static str { "dono e gerentes" }
}

pub struct TargetManagers;
impl RoleGate for TargetManagers {
    fn allows(role: Role) -> bool {
        match role {
            Role::Owner | Role::MarketingManager => true,
            Role::ProductionManager | Role::MarketingExecutive | Role::Employee => false,
        }
    }
    fn describe() -> &'static str { "dono e gerente de marketing" }
}

pub struct ProductionStaff;
impl RoleGate for ProductionStaff {
    fn allows(role: Role) -> bool {
        match role {
            Role::Owner | Role::ProductionManager => true,
            Role::MarketingManager | Role::MarketingExecutive | Role::Employee => false,
        }
    }
    fn describe() -> &'static str { "dono e gerente de produção" }
}
