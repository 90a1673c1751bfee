// src/models/target.rs

use std::{fmt, str::FromStr};

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

const ALL_SCOPE_KEY: &str = "all";

// A meta vale para a empresa toda ou para um funcionário (id do perfil)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TargetScope {
    All,
    Employee(Uuid),
}

#[derive(Debug, Error)]
#[error("escopo de meta inválido: '{0}'")]
pub struct InvalidScope(pub String);

impl TargetScope {
    pub fn key(&self) -> String {
        match self {
            TargetScope::All => ALL_SCOPE_KEY.to_string(),
            TargetScope::Employee(id) => id.to_string(),
        }
    }
}

impl fmt::Display for TargetScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

impl FromStr for TargetScope {
    type Err = InvalidScope;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case(ALL_SCOPE_KEY) {
            return Ok(TargetScope::All);
        }
        Uuid::parse_str(trimmed)
            .map(TargetScope::Employee)
            .map_err(|_| InvalidScope(s.to_string()))
    }
}

impl TryFrom<String> for TargetScope {
    type Error = InvalidScope;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TargetScope> for String {
    fn from(scope: TargetScope) -> Self {
        scope.key()
    }
}

// --- Meta ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub id: Uuid,
    #[sqlx(rename = "scope_key", try_from = "String")]
    #[schema(value_type = String, example = "all")]
    pub scope: TargetScope,
    // Sempre o dia 1 do mês
    pub target_month: NaiveDate,
    #[schema(example = "500000.00")]
    pub revenue_target: Option<Decimal>,
    #[schema(example = 50)]
    pub order_target: Option<i32>,
    pub remarks: Option<String>,
    pub assigned_by: Option<Uuid>,
    pub assigned_at: DateTime<Utc>,
}

// Dados normalizados para o upsert
#[derive(Debug, Clone)]
pub struct NewTarget {
    pub scope: TargetScope,
    pub target_month: NaiveDate,
    pub revenue_target: Decimal,
    pub order_target: i32,
    pub remarks: Option<String>,
    pub assigned_by: Uuid,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpsertTargetPayload {
    /// `"all"` ou o id do perfil do funcionário
    #[schema(example = "all")]
    pub scope: String,
    /// `YYYY-MM` (ou uma data qualquer do mês)
    #[schema(example = "2024-03")]
    pub month: String,
    #[validate(custom(function = "non_negative_amount"))]
    #[schema(example = "500000")]
    pub revenue_target: Decimal,
    #[validate(range(min = 0, message = "A meta de pedidos não pode ser negativa."))]
    #[schema(example = 50)]
    pub order_target: i32,
    pub remarks: Option<String>,
}

fn non_negative_amount(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() {
        return Err(ValidationError::new("non_negative")
            .with_message("A meta de faturamento não pode ser negativa.".into()));
    }
    Ok(())
}
