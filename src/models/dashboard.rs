// src/models/dashboard.rs

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::{
    inventory::InventoryLevel,
    order::OrderStatus,
    profile::Role,
};

// 1. Agregado de pedidos (os cards do topo)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderAggregate {
    pub total_count: u64,
    // Todos os status da enumeração aparecem, mesmo com zero
    #[schema(value_type = std::collections::HashMap<String, u64>)]
    pub status_counts: BTreeMap<OrderStatus, u64>,
    // Pedidos com status fora da enumeração (só entram no total)
    pub unrecognized_count: u64,
    pub total_price: Decimal,
    pub total_weight: Decimal,
}

impl OrderAggregate {
    pub fn count_of(&self, status: OrderStatus) -> u64 {
        self.status_counts.get(&status).copied().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DistrictAggregate {
    #[schema(example = "Kolhapur")]
    pub district: String,
    #[serde(flatten)]
    pub aggregate: OrderAggregate,
}

// 2. Gráfico de vendas (por mês, em toneladas)
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesChartEntry {
    #[schema(example = "2024-03")]
    pub month: String,
    pub order_count: u64,
    pub total_tons: Decimal,
    pub total_revenue: Decimal,
}

// 3. Progresso contra a meta
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub achieved_revenue: Decimal,
    pub achieved_orders: u64,
    pub revenue_target: Decimal,
    pub order_target: i64,
    // Frações em [0, 1]
    pub revenue_progress: Decimal,
    pub order_progress: Decimal,
    pub overall_progress: Decimal,
    #[schema(example = "27.00")]
    pub overall_percent: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MemberProgress {
    pub profile_id: Uuid,
    pub full_name: String,
    pub role: Role,
    pub progress: Progress,
}

// 4. Painéis por cargo
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDashboard {
    pub month: NaiveDate,
    pub summary: OrderAggregate,
    pub by_district: Vec<DistrictAggregate>,
    pub sales_chart: Vec<SalesChartEntry>,
    pub company_progress: Progress,
    pub team: Vec<MemberProgress>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MarketingDashboard {
    pub month: NaiveDate,
    pub district: Option<String>,
    pub summary: OrderAggregate,
    pub team: Vec<MemberProgress>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PersonalDashboard {
    pub month: NaiveDate,
    pub summary: OrderAggregate,
    pub progress: Progress,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductionDashboard {
    pub month: NaiveDate,
    pub queue: OrderAggregate,
    pub pending: u64,
    pub packing: u64,
    pub ready_for_dispatch: u64,
    pub inventory: Vec<InventoryLevel>,
}

// O painel certo para cada cargo
#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoleDashboard {
    Owner(OwnerDashboard),
    Marketing(MarketingDashboard),
    Personal(PersonalDashboard),
    Production(ProductionDashboard),
}
