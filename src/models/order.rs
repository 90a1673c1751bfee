// src/models/order.rs

use std::fmt;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

// --- Enums ---

// Status do pedido. Qualquer status pode ir para qualquer outro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Packing,
    ReadyForDispatch,
    Dispatched,
    Delivered,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 7] = [
        OrderStatus::Pending,
        OrderStatus::Packing,
        OrderStatus::ReadyForDispatch,
        OrderStatus::Dispatched,
        OrderStatus::Delivered,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Packing => "packing",
            OrderStatus::ReadyForDispatch => "ready_for_dispatch",
            OrderStatus::Dispatched => "dispatched",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Comparação sem diferenciar maiúsculas; aceita espaço e hífen como separador.
    /// Devolve `None` para status fora da enumeração.
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_lowercase().replace([' ', '-'], "_");
        OrderStatus::ALL.into_iter().find(|s| s.as_str() == normalized)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// Unidade de peso gravada em cada pedido
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeightUnit {
    Ton,
    Kg,
    Gram,
}

impl WeightUnit {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "ton" | "tons" | "tonne" | "tonnes" | "t" => Some(WeightUnit::Ton),
            "kg" | "kgs" | "kilogram" | "kilograms" => Some(WeightUnit::Kg),
            "g" | "gm" | "gms" | "gram" | "grams" => Some(WeightUnit::Gram),
            _ => None,
        }
    }

    pub fn to_tons(&self, value: Decimal) -> Decimal {
        match self {
            WeightUnit::Ton => value,
            WeightUnit::Kg => value / Decimal::ONE_THOUSAND,
            WeightUnit::Gram => value / Decimal::from(1_000_000),
        }
    }
}

// --- Catálogo ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedCategory {
    #[schema(example = "Pashu Aahar Gold")]
    pub name: String,
    #[schema(example = "50.0")]
    pub bag_weight_kg: Decimal,
    #[schema(example = "1250.00")]
    pub price_per_bag: Decimal,
}

impl FeedCategory {
    /// (peso total em kg, preço total) para `bags` sacos.
    pub fn price_order(&self, bags: i32) -> (Decimal, Decimal) {
        let bags = Decimal::from(bags);
        (bags * self.bag_weight_kg, bags * self.price_per_bag)
    }
}

// --- Pedido ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,
    #[schema(example = "Shivaji Dairy Farm")]
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub feed_category: String,
    #[schema(example = 40)]
    pub bag_count: i32,
    pub total_weight: Option<Decimal>,
    #[schema(example = "kg")]
    pub weight_unit: Option<String>,
    pub total_price: Option<Decimal>,
    // Texto livre no banco; ver `parsed_status`
    #[schema(example = "pending")]
    pub status: String,
    pub district: Option<String>,
    pub taluka: Option<String>,
    pub created_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Order {
    pub fn parsed_status(&self) -> Option<OrderStatus> {
        OrderStatus::parse(&self.status)
    }
}

// Dados já calculados para inserir um pedido
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub feed_category: String,
    pub bag_count: i32,
    pub total_weight: Decimal,
    pub weight_unit: String,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub district: Option<String>,
    pub taluka: Option<String>,
    pub created_by: Uuid,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    #[validate(length(min = 1, message = "O nome do cliente é obrigatório."))]
    pub customer_name: String,
    pub customer_phone: Option<String>,
    #[validate(length(min = 1, message = "A categoria da ração é obrigatória."))]
    pub feed_category: String,
    #[validate(range(min = 1, message = "Informe ao menos 1 saco."))]
    pub bag_count: i32,
    pub district: Option<String>,
    pub taluka: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrderStatusPayload {
    #[schema(example = "ready_for_dispatch")]
    pub status: String,
}

// Filtros de listagem (`?status=&district=&month=`)
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderQuery {
    pub status: Option<String>,
    pub district: Option<String>,
    /// `YYYY-MM`
    pub month: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_is_case_insensitive() {
        assert_eq!(OrderStatus::parse("Pending"), Some(OrderStatus::Pending));
        assert_eq!(OrderStatus::parse("READY_FOR_DISPATCH"), Some(OrderStatus::ReadyForDispatch));
        assert_eq!(OrderStatus::parse("Ready for dispatch"), Some(OrderStatus::ReadyForDispatch));
        assert_eq!(OrderStatus::parse("on hold"), None);
    }

    #[test]
    fn converts_weights_to_tons() {
        assert_eq!(WeightUnit::parse("Kg").unwrap().to_tons(Decimal::from(2500)), Decimal::new(25, 1));
        assert_eq!(WeightUnit::parse("tons").unwrap().to_tons(Decimal::from(3)), Decimal::from(3));
        assert_eq!(
            WeightUnit::parse("gram").unwrap().to_tons(Decimal::from(500_000)),
            Decimal::new(5, 1)
        );
        assert_eq!(WeightUnit::parse("quintal"), None);
    }

    #[test]
    fn prices_orders_from_category() {
        let category = FeedCategory {
            name: "Pashu Aahar Gold".into(),
            bag_weight_kg: Decimal::from(50),
            price_per_bag: Decimal::new(125000, 2),
        };
        let (weight, price) = category.price_order(40);
        assert_eq!(weight, Decimal::from(2000));
        assert_eq!(price, Decimal::from(50_000));
    }
}
