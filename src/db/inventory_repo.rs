// src/db/inventory_repo.rs

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::{error::AppError, time_window::TimeWindow},
    db::stores::InventoryStore,
    models::inventory::{InventoryItem, InventoryUsage},
};

#[derive(Clone)]
pub struct InventoryRepository {
    pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl InventoryStore for InventoryRepository {
    // ---
    // Funções de "Leitura"
    // ---

    async fn list_items(&self) -> Result<Vec<InventoryItem>, AppError> {
        let items = sqlx::query_as::<_, InventoryItem>(
            r#"
            SELECT id, material_name, unit, quantity_on_hand, reorder_level, updated_at
            FROM inventory_items
            ORDER BY material_name ASC
            "#,
        )
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    async fn list_usage(&self, window: TimeWindow) -> Result<Vec<InventoryUsage>, AppError> {
        let usage = sqlx::query_as::<_, InventoryUsage>(
            r#"
            SELECT id, item_id, quantity, notes, recorded_by, used_at
            FROM inventory_usage
            WHERE used_at >= $1 AND used_at < $2
            ORDER BY used_at DESC
            "#,
        )
            .bind(window.start)
            .bind(window.end)
            .fetch_all(&self.pool)
            .await?;

        Ok(usage)
    }

    // ---
    // Funções de "Escrita" (Transacionais)
    // ---

    async fn record_usage(
        &self,
        item_id: Uuid,
        quantity: Decimal,
        notes: Option<&str>,
        recorded_by: Uuid,
    ) -> Result<InventoryUsage, AppError> {
        let mut tx = self.pool.begin().await?;

        // Baixa o saldo só se houver quantidade suficiente (atômico, sem "race condition")
        let updated: Option<(String,)> = sqlx::query_as(
            r#"
            UPDATE inventory_items
            SET quantity_on_hand = quantity_on_hand - $2, updated_at = NOW()
            WHERE id = $1 AND quantity_on_hand >= $2
            RETURNING material_name
            "#,
        )
            .bind(item_id)
            .bind(quantity)
            .fetch_optional(&mut *tx)
            .await?;

        if updated.is_none() {
            // Descobre se o item não existe ou se faltou saldo
            let existing: Option<(String,)> =
                sqlx::query_as("SELECT material_name FROM inventory_items WHERE id = $1")
                    .bind(item_id)
                    .fetch_optional(&mut *tx)
                    .await?;

            return Err(match existing {
                Some((name,)) => AppError::InsufficientStock(name),
                None => AppError::ResourceNotFound(format!("Item de estoque {}", item_id)),
            });
        }

        let usage = sqlx::query_as::<_, InventoryUsage>(
            r#"
            INSERT INTO inventory_usage (item_id, quantity, notes, recorded_by)
            VALUES ($1, $2, $3, $4)
            RETURNING id, item_id, quantity, notes, recorded_by, used_at
            "#,
        )
            .bind(item_id)
            .bind(quantity)
            .bind(notes)
            .bind(recorded_by)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(usage)
    }
}
