// src/db/stores.rs

//! Contratos entre os serviços e o banco hospedado. Em produção quem
//! implementa são os repositórios Postgres; nos testes, os stores em memória.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{error::AppError, pagination::Page, time_window::TimeWindow},
    models::{
        auth::UserAccount,
        inventory::{InventoryItem, InventoryUsage},
        order::{FeedCategory, NewOrder, Order, OrderStatus},
        profile::{CreateProfilePayload, Profile, ProfileFilter},
        target::{NewTarget, Target, TargetScope},
    },
    services::aggregation::OrderScope,
};

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, AppError>;

    async fn create_account(&self, email: &str, password_hash: &str) -> Result<UserAccount, AppError>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, AppError>;

    // Sem diferenciar maiúsculas
    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, AppError>;

    async fn find_by_id(&self, profile_id: Uuid) -> Result<Option<Profile>, AppError>;

    /// Grava o vínculo conta -> perfil se ainda estiver vazio.
    async fn link_user_id(&self, profile_id: Uuid, user_id: Uuid) -> Result<(), AppError>;

    async fn create_profile(&self, input: &CreateProfilePayload) -> Result<Profile, AppError>;

    async fn list_profiles(&self, filter: &ProfileFilter) -> Result<Vec<Profile>, AppError>;
}

// Filtro de listagem de pedidos
#[derive(Debug, Clone)]
pub struct OrderFilter {
    pub scope: OrderScope,
    pub window: Option<TimeWindow>,
    pub status: Option<OrderStatus>,
    pub page: Option<Page>,
}

impl OrderFilter {
    pub fn in_window(scope: OrderScope, window: TimeWindow) -> Self {
        Self { scope, window: Some(window), status: None, page: None }
    }
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Mais recentes primeiro.
    async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>, AppError>;

    async fn find_order(&self, order_id: Uuid) -> Result<Option<Order>, AppError>;

    async fn insert_order(&self, order: &NewOrder) -> Result<Order, AppError>;

    /// `None` quando o pedido não existe.
    async fn update_status(&self, order_id: Uuid, status: OrderStatus) -> Result<Option<Order>, AppError>;

    async fn find_feed_category(&self, name: &str) -> Result<Option<FeedCategory>, AppError>;

    async fn list_feed_categories(&self) -> Result<Vec<FeedCategory>, AppError>;
}

#[async_trait]
pub trait TargetStore: Send + Sync {
    /// Insere ou sobrescreve a meta de (escopo, mês).
    async fn upsert_target(&self, target: &NewTarget) -> Result<Target, AppError>;

    async fn find_target(&self, scope: TargetScope, month: NaiveDate) -> Result<Option<Target>, AppError>;

    async fn list_targets(&self, month: NaiveDate) -> Result<Vec<Target>, AppError>;
}

#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn list_items(&self) -> Result<Vec<InventoryItem>, AppError>;

    /// Registra o consumo e baixa o saldo na mesma transação.
    async fn record_usage(
        &self,
        item_id: Uuid,
        quantity: Decimal,
        notes: Option<&str>,
        recorded_by: Uuid,
    ) -> Result<InventoryUsage, AppError>;

    async fn list_usage(&self, window: TimeWindow) -> Result<Vec<InventoryUsage>, AppError>;
}
