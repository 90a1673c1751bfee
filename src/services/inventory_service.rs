// src/services/inventory_service.rs

use std::sync::Arc;

use crate::{
    common::{error::AppError, time_window::TimeWindow},
    db::InventoryStore,
    models::inventory::{InventoryLevel, InventoryUsage, RecordUsagePayload},
    services::session::Identity,
};

#[derive(Clone)]
pub struct InventoryService {
    inventory: Arc<dyn InventoryStore>,
}

impl InventoryService {
    pub fn new(inventory: Arc<dyn InventoryStore>) -> Self {
        Self { inventory }
    }

    pub async fn list_levels(&self) -> Result<Vec<InventoryLevel>, AppError> {
        let items = self.inventory.list_items().await?;
        Ok(items.into_iter().map(InventoryLevel::from).collect())
    }

    pub async fn record_usage(
        &self,
        caller: &Identity,
        payload: &RecordUsagePayload,
    ) -> Result<InventoryUsage, AppError> {
        let usage = self
            .inventory
            .record_usage(payload.item_id, payload.quantity, payload.notes.as_deref(), caller.profile_id())
            .await?;

        tracing::info!("Consumo de {} registrado no item {}", usage.quantity, usage.item_id);
        Ok(usage)
    }

    pub async fn list_usage(&self, window: TimeWindow) -> Result<Vec<InventoryUsage>, AppError> {
        self.inventory.list_usage(window).await
    }
}
