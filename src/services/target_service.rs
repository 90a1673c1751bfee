// src/services/target_service.rs

use std::sync::Arc;

use chrono::NaiveDate;

use crate::{
    common::{error::AppError, time_window::parse_month},
    db::{ProfileStore, TargetStore},
    models::{
        profile::Role,
        target::{NewTarget, Target, TargetScope, UpsertTargetPayload},
    },
    services::{aggregation::district_key, session::Identity},
};

#[derive(Clone)]
pub struct TargetService {
    targets: Arc<dyn TargetStore>,
    profiles: Arc<dyn ProfileStore>,
}

impl TargetService {
    pub fn new(targets: Arc<dyn TargetStore>, profiles: Arc<dyn ProfileStore>) -> Self {
        Self { targets, profiles }
    }

    /// Atribui a meta do mês. Reatribuir o mesmo (escopo, mês) sobrescreve.
    pub async fn upsert_target(&self, caller: &Identity, payload: UpsertTargetPayload) -> Result<Target, AppError> {
        let scope: TargetScope = payload
            .scope
            .parse()
            .map_err(|_| AppError::InvalidTargetScope(payload.scope.clone()))?;
        let target_month = parse_month(&payload.month).ok_or_else(|| AppError::InvalidMonth(payload.month.clone()))?;

        self.authorize(caller, scope).await?;

        let target = self
            .targets
            .upsert_target(&NewTarget {
                scope,
                target_month,
                revenue_target: payload.revenue_target,
                order_target: payload.order_target,
                remarks: payload.remarks,
                assigned_by: caller.profile_id(),
            })
            .await?;

        tracing::info!("🎯 Meta {} de {} atribuída por {}", target.scope, target.target_month, caller.profile_id());
        Ok(target)
    }

    // Dono atribui qualquer meta; gerente só para a equipe de campo do próprio distrito
    async fn authorize(&self, caller: &Identity, scope: TargetScope) -> Result<(), AppError> {
        let manager_district = match caller.role {
            Role::Owner => None,
            Role::MarketingManager => Some(caller.district().unwrap_or_default()),
            Role::ProductionManager | Role::MarketingExecutive | Role::Employee => {
                return Err(AppError::Forbidden("Seu cargo não atribui metas.".into()));
            }
        };

        let employee_id = match scope {
            TargetScope::All if manager_district.is_some() => {
                return Err(AppError::Forbidden("Só o dono define a meta da empresa.".into()));
            }
            TargetScope::All => return Ok(()),
            TargetScope::Employee(id) => id,
        };

        let employee = self
            .profiles
            .find_by_id(employee_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Perfil {}", employee_id)))?;

        if let Some(district) = manager_district {
            let same_district = employee
                .district
                .as_deref()
                .is_some_and(|d| !district.trim().is_empty() && district_key(d) == district_key(district));
            if !employee.role.is_field_sales() || !same_district {
                return Err(AppError::Forbidden("Funcionário fora da sua equipe.".into()));
            }
        }

        Ok(())
    }

    pub async fn list_targets(&self, month: NaiveDate) -> Result<Vec<Target>, AppError> {
        self.targets.list_targets(month).await
    }
}
