// src/db/memory.rs

//! Stores em memória para os testes de serviço e de rotas.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Mutex,
};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::{error::AppError, time_window::TimeWindow},
    db::stores::{
        CredentialStore, InventoryStore, OrderFilter, OrderStore, ProfileStore, TargetStore,
    },
    models::{
        auth::UserAccount,
        inventory::{InventoryItem, InventoryUsage},
        order::{FeedCategory, NewOrder, Order, OrderStatus},
        profile::{CreateProfilePayload, Profile, ProfileFilter},
        target::{NewTarget, Target, TargetScope},
    },
    services::aggregation::district_key,
};

#[derive(Default)]
pub struct MemoryCredentials {
    accounts: Mutex<Vec<UserAccount>>,
}

#[async_trait]
impl CredentialStore for MemoryCredentials {
    async fn find_by_email(&self, email: &str) -> Result<Option<UserAccount>, AppError> {
        let accounts = self.accounts.lock().unwrap();
        Ok(accounts.iter().find(|a| a.email.eq_ignore_ascii_case(email)).cloned())
    }

    async fn create_account(&self, email: &str, password_hash: &str) -> Result<UserAccount, AppError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|a| a.email.eq_ignore_ascii_case(email)) {
            return Err(AppError::EmailAlreadyExists);
        }
        let account = UserAccount {
            id: Uuid::new_v4(),
            email: email.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        accounts.push(account.clone());
        Ok(account)
    }
}

#[derive(Default)]
pub struct MemoryProfiles {
    profiles: Mutex<Vec<Profile>>,
    // Simula o banco fora do ar
    pub fail_lookups: AtomicBool,
    pub fail_links: AtomicBool,
}

impl MemoryProfiles {
    pub fn insert(&self, profile: Profile) {
        self.profiles.lock().unwrap().push(profile);
    }

    pub fn get(&self, profile_id: Uuid) -> Option<Profile> {
        self.profiles.lock().unwrap().iter().find(|p| p.id == profile_id).cloned()
    }

    fn check_lookup(&self) -> Result<(), AppError> {
        if self.fail_lookups.load(Ordering::SeqCst) {
            return Err(AppError::InternalServerError(anyhow::anyhow!("conexão recusada")));
        }
        Ok(())
    }
}

#[async_trait]
impl ProfileStore for MemoryProfiles {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, AppError> {
        self.check_lookup()?;
        let profiles = self.profiles.lock().unwrap();
        Ok(profiles.iter().find(|p| p.user_id == Some(user_id)).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Profile>, AppError> {
        self.check_lookup()?;
        let profiles = self.profiles.lock().unwrap();
        Ok(profiles.iter().find(|p| p.email.eq_ignore_ascii_case(email)).cloned())
    }

    async fn find_by_id(&self, profile_id: Uuid) -> Result<Option<Profile>, AppError> {
        self.check_lookup()?;
        Ok(self.get(profile_id))
    }

    async fn link_user_id(&self, profile_id: Uuid, user_id: Uuid) -> Result<(), AppError> {
        if self.fail_links.load(Ordering::SeqCst) {
            return Err(AppError::InternalServerError(anyhow::anyhow!("update negado")));
        }
        let mut profiles = self.profiles.lock().unwrap();
        if let Some(profile) = profiles.iter_mut().find(|p| p.id == profile_id && p.user_id.is_none()) {
            profile.user_id = Some(user_id);
        }
        Ok(())
    }

    async fn create_profile(&self, input: &CreateProfilePayload) -> Result<Profile, AppError> {
        let mut profiles = self.profiles.lock().unwrap();
        if profiles.iter().any(|p| p.email.eq_ignore_ascii_case(&input.email)) {
            return Err(AppError::EmailAlreadyExists);
        }
        let profile = Profile {
            id: Uuid::new_v4(),
            user_id: None,
            email: input.email.clone(),
            full_name: input.full_name.clone(),
            role: input.role,
            district: input.district.clone(),
            branch: input.branch.clone(),
            joining_date: input.joining_date,
            created_at: Utc::now(),
        };
        profiles.push(profile.clone());
        Ok(profile)
    }

    async fn list_profiles(&self, filter: &ProfileFilter) -> Result<Vec<Profile>, AppError> {
        self.check_lookup()?;
        let profiles = self.profiles.lock().unwrap();
        let mut matching: Vec<Profile> = profiles
            .iter()
            .filter(|p| filter.role.is_none_or(|role| p.role == role))
            .filter(|p| match &filter.district {
                Some(district) => p.district.as_deref().is_some_and(|d| district_key(d) == district_key(district)),
                None => true,
            })
            .cloned()
            .collect();
        matching.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(matching)
    }
}

#[derive(Default)]
pub struct MemoryOrders {
    orders: Mutex<Vec<Order>>,
    categories: Mutex<Vec<FeedCategory>>,
}

impl MemoryOrders {
    pub fn insert(&self, order: Order) {
        self.orders.lock().unwrap().push(order);
    }

    pub fn add_category(&self, category: FeedCategory) {
        self.categories.lock().unwrap().push(category);
    }
}

#[async_trait]
impl OrderStore for MemoryOrders {
    async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>, AppError> {
        let orders = self.orders.lock().unwrap();
        let mut matching: Vec<Order> = orders
            .iter()
            .filter(|o| filter.scope.matches(o))
            .filter(|o| filter.window.is_none_or(|w| w.contains(o.created_at)))
            .filter(|o| filter.status.is_none_or(|s| o.parsed_status() == Some(s)))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        if let Some(page) = filter.page {
            matching = matching
                .into_iter()
                .skip(page.offset() as usize)
                .take(page.limit() as usize)
                .collect();
        }
        Ok(matching)
    }

    async fn find_order(&self, order_id: Uuid) -> Result<Option<Order>, AppError> {
        Ok(self.orders.lock().unwrap().iter().find(|o| o.id == order_id).cloned())
    }

    async fn insert_order(&self, order: &NewOrder) -> Result<Order, AppError> {
        let created = Order {
            id: Uuid::new_v4(),
            customer_name: order.customer_name.clone(),
            customer_phone: order.customer_phone.clone(),
            feed_category: order.feed_category.clone(),
            bag_count: order.bag_count,
            total_weight: Some(order.total_weight),
            weight_unit: Some(order.weight_unit.clone()),
            total_price: Some(order.total_price),
            status: order.status.as_str().to_string(),
            district: order.district.clone(),
            taluka: order.taluka.clone(),
            created_by: Some(order.created_by),
            created_at: Utc::now(),
            updated_at: None,
        };
        self.orders.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_status(&self, order_id: Uuid, status: OrderStatus) -> Result<Option<Order>, AppError> {
        let mut orders = self.orders.lock().unwrap();
        Ok(orders.iter_mut().find(|o| o.id == order_id).map(|o| {
            o.status = status.as_str().to_string();
            o.updated_at = Some(Utc::now());
            o.clone()
        }))
    }

    async fn find_feed_category(&self, name: &str) -> Result<Option<FeedCategory>, AppError> {
        let categories = self.categories.lock().unwrap();
        Ok(categories.iter().find(|c| c.name.eq_ignore_ascii_case(name)).cloned())
    }

    async fn list_feed_categories(&self) -> Result<Vec<FeedCategory>, AppError> {
        Ok(self.categories.lock().unwrap().clone())
    }
}

#[derive(Default)]
pub struct MemoryTargets {
    targets: Mutex<Vec<Target>>,
}

impl MemoryTargets {
    pub fn count(&self) -> usize {
        self.targets.lock().unwrap().len()
    }
}

#[async_trait]
impl TargetStore for MemoryTargets {
    async fn upsert_target(&self, target: &NewTarget) -> Result<Target, AppError> {
        let mut targets = self.targets.lock().unwrap();
        let saved = Target {
            id: Uuid::new_v4(),
            scope: target.scope,
            target_month: target.target_month,
            revenue_target: Some(target.revenue_target),
            order_target: Some(target.order_target),
            remarks: target.remarks.clone(),
            assigned_by: Some(target.assigned_by),
            assigned_at: Utc::now(),
        };

        match targets
            .iter()
            .position(|t| t.scope == target.scope && t.target_month == target.target_month)
        {
            Some(index) => {
                let id = targets[index].id;
                targets[index] = Target { id, ..saved };
                Ok(targets[index].clone())
            }
            None => {
                targets.push(saved.clone());
                Ok(saved)
            }
        }
    }

    async fn find_target(&self, scope: TargetScope, month: NaiveDate) -> Result<Option<Target>, AppError> {
        let targets = self.targets.lock().unwrap();
        Ok(targets.iter().find(|t| t.scope == scope && t.target_month == month).cloned())
    }

    async fn list_targets(&self, month: NaiveDate) -> Result<Vec<Target>, AppError> {
        let targets = self.targets.lock().unwrap();
        Ok(targets.iter().filter(|t| t.target_month == month).cloned().collect())
    }
}

#[derive(Default)]
pub struct MemoryInventory {
    items: Mutex<Vec<InventoryItem>>,
    usage: Mutex<Vec<InventoryUsage>>,
}

impl MemoryInventory {
    pub fn insert(&self, item: InventoryItem) {
        self.items.lock().unwrap().push(item);
    }
}

#[async_trait]
impl InventoryStore for MemoryInventory {
    async fn list_items(&self) -> Result<Vec<InventoryItem>, AppError> {
        let mut items = self.items.lock().unwrap().clone();
        items.sort_by(|a, b| a.material_name.cmp(&b.material_name));
        Ok(items)
    }

    async fn record_usage(
        &self,
        item_id: Uuid,
        quantity: Decimal,
        notes: Option<&str>,
        recorded_by: Uuid,
    ) -> Result<InventoryUsage, AppError> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| AppError::ResourceNotFound(format!("Item de estoque {}", item_id)))?;
        if item.quantity_on_hand < quantity {
            return Err(AppError::InsufficientStock(item.material_name.clone()));
        }
        item.quantity_on_hand -= quantity;
        item.updated_at = Utc::now();

        let usage = InventoryUsage {
            id: Uuid::new_v4(),
            item_id,
            quantity,
            notes: notes.map(str::to_string),
            recorded_by: Some(recorded_by),
            used_at: Utc::now(),
        };
        self.usage.lock().unwrap().push(usage.clone());
        Ok(usage)
    }

    async fn list_usage(&self, window: TimeWindow) -> Result<Vec<InventoryUsage>, AppError> {
        let usage = self.usage.lock().unwrap();
        Ok(usage.iter().filter(|u| window.contains(u.used_at)).cloned().collect())
    }
}
