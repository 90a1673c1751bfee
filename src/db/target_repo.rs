// src/db/target_repo.rs

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::stores::TargetStore,
    models::target::{NewTarget, Target, TargetScope},
};

const TARGET_COLUMNS: &str =
    "id, scope_key, target_month, revenue_target, order_target, remarks, assigned_by, assigned_at";

#[derive(Clone)]
pub struct TargetRepository {
    pool: PgPool,
}

impl TargetRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TargetStore for TargetRepository {
    async fn upsert_target(&self, target: &NewTarget) -> Result<Target, AppError> {
        // UPSERT: reatribuir sobrescreve, não versiona
        let saved = sqlx::query_as::<_, Target>(&format!(
            r#"
            INSERT INTO employee_targets (
                scope_key, target_month, revenue_target, order_target, remarks, assigned_by
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (scope_key, target_month)
            DO UPDATE SET
                revenue_target = EXCLUDED.revenue_target,
                order_target = EXCLUDED.order_target,
                remarks = EXCLUDED.remarks,
                assigned_by = EXCLUDED.assigned_by,
                assigned_at = NOW()
            RETURNING {TARGET_COLUMNS}
            "#
        ))
            .bind(target.scope.key())
            .bind(target.target_month)
            .bind(target.revenue_target)
            .bind(target.order_target)
            .bind(&target.remarks)
            .bind(target.assigned_by)
            .fetch_one(&self.pool)
            .await?;

        Ok(saved)
    }

    async fn find_target(&self, scope: TargetScope, month: NaiveDate) -> Result<Option<Target>, AppError> {
        let target = sqlx::query_as::<_, Target>(&format!(
            "SELECT {TARGET_COLUMNS} FROM employee_targets WHERE scope_key = $1 AND target_month = $2"
        ))
            .bind(scope.key())
            .bind(month)
            .fetch_optional(&self.pool)
            .await?;

        Ok(target)
    }

    async fn list_targets(&self, month: NaiveDate) -> Result<Vec<Target>, AppError> {
        let targets = sqlx::query_as::<_, Target>(&format!(
            "SELECT {TARGET_COLUMNS} FROM employee_targets WHERE target_month = $1 ORDER BY scope_key ASC"
        ))
            .bind(month)
            .fetch_all(&self.pool)
            .await?;

        Ok(targets)
    }
}
