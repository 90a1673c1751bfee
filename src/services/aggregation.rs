// src/services/aggregation.rs

//! Agregação de pedidos feita do lado do serviço: contagem por status,
//! soma de preço e peso, agrupamentos por distrito, por membro e por mês.

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::{
    dashboard::{DistrictAggregate, OrderAggregate, SalesChartEntry},
    order::{Order, OrderStatus, WeightUnit},
};

pub const UNASSIGNED_DISTRICT: &str = "Unassigned";

// Recorte de pedidos de uma consulta
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderScope {
    All,
    District(String),
    Individual(Uuid),
}

impl OrderScope {
    pub fn matches(&self, order: &Order) -> bool {
        match self {
            OrderScope::All => true,
            OrderScope::District(district) => order
                .district
                .as_deref()
                .is_some_and(|d| district_key(d) == district_key(district)),
            OrderScope::Individual(profile_id) => order.created_by == Some(*profile_id),
        }
    }
}

/// Chave de comparação de distrito: sem espaços nas pontas e em minúsculas.
pub fn district_key(raw: &str) -> String {
    raw.trim().to_lowercase()
}

fn empty_status_counts() -> BTreeMap<OrderStatus, u64> {
    OrderStatus::ALL.into_iter().map(|s| (s, 0)).collect()
}

impl Default for OrderAggregate {
    fn default() -> Self {
        Self {
            total_count: 0,
            status_counts: empty_status_counts(),
            unrecognized_count: 0,
            total_price: Decimal::ZERO,
            total_weight: Decimal::ZERO,
        }
    }
}

impl OrderAggregate {
    fn push(&mut self, order: &Order) {
        self.total_count += 1;
        match order.parsed_status() {
            Some(status) => *self.status_counts.entry(status).or_insert(0) += 1,
            None => self.unrecognized_count += 1,
        }
        // Campos nulos contam como zero
        self.total_price += order.total_price.unwrap_or(Decimal::ZERO);
        self.total_weight += order.total_weight.unwrap_or(Decimal::ZERO);
    }
}

/// Agrega um conjunto de pedidos. Conjunto vazio dá tudo zerado.
pub fn aggregate<'a, I>(orders: I) -> OrderAggregate
where
    I: IntoIterator<Item = &'a Order>,
{
    let mut acc = OrderAggregate::default();
    for order in orders {
        acc.push(order);
    }
    acc
}

/// Um agregado por distrito, em ordem alfabética. Grafias que diferem só
/// em maiúsculas caem no mesmo grupo, com o nome da primeira vista.
pub fn aggregate_by_district(orders: &[Order]) -> Vec<DistrictAggregate> {
    let mut groups: BTreeMap<String, DistrictAggregate> = BTreeMap::new();
    for order in orders {
        let district = order
            .district
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .unwrap_or(UNASSIGNED_DISTRICT);

        groups
            .entry(district_key(district))
            .or_insert_with(|| DistrictAggregate {
                district: district.to_string(),
                aggregate: OrderAggregate::default(),
            })
            .aggregate
            .push(order);
    }

    groups.into_values().collect()
}

/// Agregado por criador do pedido (id do perfil). Pedidos sem criador ficam de fora.
pub fn aggregate_by_member(orders: &[Order]) -> HashMap<Uuid, OrderAggregate> {
    let mut groups: HashMap<Uuid, OrderAggregate> = HashMap::new();
    for order in orders {
        if let Some(creator) = order.created_by {
            groups.entry(creator).or_default().push(order);
        }
    }
    groups
}

/// Série mensal do gráfico de vendas. O peso de cada pedido é convertido
/// para toneladas; unidade desconhecida não soma peso.
pub fn sales_by_month(orders: &[Order]) -> Vec<SalesChartEntry> {
    let mut months: BTreeMap<String, SalesChartEntry> = BTreeMap::new();

    for order in orders {
        let key = order.created_at.format("%Y-%m").to_string();
        let entry = months.entry(key.clone()).or_insert_with(|| SalesChartEntry {
            month: key,
            order_count: 0,
            total_tons: Decimal::ZERO,
            total_revenue: Decimal::ZERO,
        });

        entry.order_count += 1;
        entry.total_revenue += order.total_price.unwrap_or(Decimal::ZERO);

        let tons = match (order.total_weight, order.weight_unit.as_deref().and_then(WeightUnit::parse)) {
            (Some(weight), Some(unit)) => unit.to_tons(weight),
            _ => Decimal::ZERO,
        };
        entry.total_tons += tons;
    }

    months.into_values().collect()
}
