// src/models/inventory.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

// Matéria-prima do estoque de produção (milho, torta de algodão, sal mineral...)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    pub id: Uuid,
    #[schema(example = "Torta de algodão")]
    pub material_name: String,
    #[schema(example = "kg")]
    pub unit: String,
    #[schema(example = "1200.000")]
    pub quantity_on_hand: Decimal,
    pub reorder_level: Option<Decimal>,
    pub updated_at: DateTime<Utc>,
}

impl InventoryItem {
    pub fn is_low_stock(&self) -> bool {
        self.reorder_level
            .is_some_and(|level| self.quantity_on_hand <= level)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryUsage {
    pub id: Uuid,
    pub item_id: Uuid,
    pub quantity: Decimal,
    pub notes: Option<String>,
    pub recorded_by: Option<Uuid>,
    pub used_at: DateTime<Utc>,
}

// Nível de estoque como o painel mostra
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InventoryLevel {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub low_stock: bool,
}

impl From<InventoryItem> for InventoryLevel {
    fn from(item: InventoryItem) -> Self {
        let low_stock = item.is_low_stock();
        Self { item, low_stock }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecordUsagePayload {
    pub item_id: Uuid,
    #[validate(custom(function = "positive_quantity"))]
    #[schema(example = "250.5")]
    pub quantity: Decimal,
    pub notes: Option<String>,
}

fn positive_quantity(value: &Decimal) -> Result<(), ValidationError> {
    if *value <= Decimal::ZERO {
        return Err(ValidationError::new("positive")
            .with_message("A quantidade consumida deve ser maior que zero.".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(on_hand: i64, reorder: Option<i64>) -> InventoryItem {
        InventoryItem {
            id: Uuid::new_v4(),
            material_name: "Milho".into(),
            unit: "kg".into(),
            quantity_on_hand: Decimal::from(on_hand),
            reorder_level: reorder.map(Decimal::from),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn flags_low_stock_at_reorder_level() {
        assert!(item(100, Some(100)).is_low_stock());
        assert!(!item(101, Some(100)).is_low_stock());
        assert!(!item(0, None).is_low_stock());
    }

    #[test]
    fn usage_quantity_must_be_positive() {
        let payload = RecordUsagePayload { item_id: Uuid::new_v4(), quantity: Decimal::ZERO, notes: None };
        assert!(payload.validate().is_err());

        let payload = RecordUsagePayload { item_id: Uuid::new_v4(), quantity: Decimal::new(5, 1), notes: None };
        assert!(payload.validate().is_ok());
    }
}
