// src/models/profile.rs

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// --- Enums ---

// Conjunto fechado de cargos. Não existe cargo "padrão": string desconhecida é erro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Owner,
    MarketingManager,
    ProductionManager,
    MarketingExecutive,
    Employee,
}

#[derive(Debug, Error)]
#[error("cargo desconhecido: '{0}'")]
pub struct UnknownRole(pub String);

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Owner,
        Role::MarketingManager,
        Role::ProductionManager,
        Role::MarketingExecutive,
        Role::Employee,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::MarketingManager => "marketing_manager",
            Role::ProductionManager => "production_manager",
            Role::MarketingExecutive => "marketing_executive",
            Role::Employee => "employee",
        }
    }

    /// Cargos de campo cujas vendas entram no ranking da equipe.
    pub fn is_field_sales(&self) -> bool {
        match self {
            Role::MarketingExecutive | Role::Employee => true,
            Role::Owner | Role::MarketingManager | Role::ProductionManager => false,
        }
    }

    /// Menu de navegação de cada cargo.
    pub fn navigation(&self) -> Vec<NavItem> {
        let items: &[(&str, &str)] = match self {
            Role::Owner => &[
                ("Painel", "/owner/dashboard"),
                ("Pedidos", "/orders"),
                ("Metas", "/targets"),
                ("Equipe", "/profiles"),
                ("Produção", "/production"),
                ("Estoque", "/inventory"),
            ],
            Role::MarketingManager => &[
                ("Painel", "/marketing/dashboard"),
                ("Pedidos", "/orders"),
                ("Metas da Equipe", "/targets"),
            ],
            Role::ProductionManager => &[
                ("Painel", "/production/dashboard"),
                ("Fila de Pedidos", "/orders"),
                ("Estoque", "/inventory"),
                ("Consumo", "/inventory/usage"),
            ],
            Role::MarketingExecutive | Role::Employee => &[
                ("Painel", "/me/dashboard"),
                ("Novo Pedido", "/orders/new"),
                ("Meus Pedidos", "/orders"),
            ],
        };

        items
            .iter()
            .map(|(label, path)| NavItem { label: (*label).to_string(), path: (*path).to_string() })
            .collect()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    // O banco tem tanto "marketing_manager" quanto "Marketing Manager"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == normalized)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

impl TryFrom<String> for Role {
    type Error = UnknownRole;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct NavItem {
    pub label: String,
    pub path: String,
}

// --- Perfil ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    // Preenchido no primeiro login que casar pelo e-mail
    pub user_id: Option<Uuid>,
    #[schema(example = "ravi@example.com")]
    pub email: String,
    #[schema(example = "Ravi Patil")]
    pub full_name: String,
    #[sqlx(try_from = "String")]
    pub role: Role,
    #[schema(example = "Kolhapur")]
    pub district: Option<String>,
    pub branch: Option<String>,
    pub joining_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProfilePayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub full_name: String,
    pub role: Role,
    pub district: Option<String>,
    pub branch: Option<String>,
    pub joining_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProfileFilter {
    pub role: Option<Role>,
    pub district: Option<String>,
}
