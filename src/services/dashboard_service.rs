// src/services/dashboard_service.rs

use std::{collections::HashMap, sync::Arc};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::{
    common::{error::AppError, time_window::TimeWindow},
    db::{InventoryStore, OrderFilter, OrderStore, ProfileStore, TargetStore},
    models::{
        dashboard::{
            MarketingDashboard, MemberProgress, OrderAggregate, OwnerDashboard, PersonalDashboard,
            ProductionDashboard, RoleDashboard,
        },
        inventory::InventoryLevel,
        order::{Order, OrderStatus},
        profile::{Profile, ProfileFilter, Role},
        target::{Target, TargetScope},
    },
    services::{
        aggregation::{aggregate, aggregate_by_district, aggregate_by_member, sales_by_month, OrderScope},
        progress::{compute_progress, rank_by_progress, Achievement},
        session::Identity,
    },
};

// Meses no gráfico de vendas do dono
const SALES_CHART_MONTHS: u32 = 12;

#[derive(Clone)]
pub struct DashboardService {
    orders: Arc<dyn OrderStore>,
    targets: Arc<dyn TargetStore>,
    profiles: Arc<dyn ProfileStore>,
    inventory: Arc<dyn InventoryStore>,
}

impl DashboardService {
    pub fn new(
        orders: Arc<dyn OrderStore>,
        targets: Arc<dyn TargetStore>,
        profiles: Arc<dyn ProfileStore>,
        inventory: Arc<dyn InventoryStore>,
    ) -> Self {
        Self { orders, targets, profiles, inventory }
    }

    /// Painel do cargo de quem chamou, para o mês de `month`.
    pub async fn dashboard_for(&self, caller: &Identity, month: NaiveDate) -> Result<RoleDashboard, AppError> {
        let dashboard = match caller.role {
            Role::Owner => RoleDashboard::Owner(self.owner_dashboard(month).await?),
            Role::MarketingManager => RoleDashboard::Marketing(self.marketing_dashboard(caller, month).await?),
            Role::MarketingExecutive | Role::Employee => {
                RoleDashboard::Personal(self.personal_dashboard(caller, month).await?)
            }
            Role::ProductionManager => RoleDashboard::Production(self.production_dashboard(month).await?),
        };
        Ok(dashboard)
    }

    pub async fn owner_dashboard(&self, month: NaiveDate) -> Result<OwnerDashboard, AppError> {
        let window = TimeWindow::month_of(month);
        let orders = self.orders_in(OrderScope::All, window).await?;
        let summary = aggregate(&orders);

        let history = self
            .orders_in(OrderScope::All, TimeWindow::trailing_months(month, SALES_CHART_MONTHS))
            .await?;

        let company_target = self.targets.find_target(TargetScope::All, window.month_start()).await?;
        let company_progress = compute_progress(company_target.as_ref(), Achievement::from(&summary));

        let members = self.field_team(None).await?;
        let team = self.team_progress(&orders, members, window.month_start()).await?;

        Ok(OwnerDashboard {
            month: window.month_start(),
            by_district: aggregate_by_district(&orders),
            sales_chart: sales_by_month(&history),
            summary,
            company_progress,
            team,
        })
    }

    pub async fn marketing_dashboard(&self, caller: &Identity, month: NaiveDate) -> Result<MarketingDashboard, AppError> {
        let window = TimeWindow::month_of(month);
        let district = caller.district().map(str::to_string);

        // Gerente sem distrito não tem equipe nem pedidos
        let Some(name) = district.clone() else {
            return Ok(MarketingDashboard {
                month: window.month_start(),
                district,
                summary: OrderAggregate::default(),
                team: Vec::new(),
            });
        };

        let orders = self.orders_in(OrderScope::District(name.clone()), window).await?;
        let members = self.field_team(Some(name)).await?;
        let team = self.team_progress(&orders, members, window.month_start()).await?;

        Ok(MarketingDashboard { month: window.month_start(), district, summary: aggregate(&orders), team })
    }

    pub async fn personal_dashboard(&self, caller: &Identity, month: NaiveDate) -> Result<PersonalDashboard, AppError> {
        let window = TimeWindow::month_of(month);
        let orders = self.orders_in(OrderScope::Individual(caller.profile_id()), window).await?;
        let summary = aggregate(&orders);

        let target = self
            .targets
            .find_target(TargetScope::Employee(caller.profile_id()), window.month_start())
            .await?;
        let progress = compute_progress(target.as_ref(), Achievement::from(&summary));

        Ok(PersonalDashboard { month: window.month_start(), summary, progress })
    }

    pub async fn production_dashboard(&self, month: NaiveDate) -> Result<ProductionDashboard, AppError> {
        let window = TimeWindow::month_of(month);
        let orders = self.orders_in(OrderScope::All, window).await?;
        let queue = aggregate(&orders);

        let inventory = self
            .inventory
            .list_items()
            .await?
            .into_iter()
            .map(InventoryLevel::from)
            .collect();

        Ok(ProductionDashboard {
            month: window.month_start(),
            pending: queue.count_of(OrderStatus::Pending),
            packing: queue.count_of(OrderStatus::Packing),
            ready_for_dispatch: queue.count_of(OrderStatus::ReadyForDispatch),
            queue,
            inventory,
        })
    }

    async fn orders_in(&self, scope: OrderScope, window: TimeWindow) -> Result<Vec<Order>, AppError> {
        self.orders.list_orders(&OrderFilter::in_window(scope, window)).await
    }

    // Executivos e funcionários (a equipe de campo), opcionalmente de um distrito
    async fn field_team(&self, district: Option<String>) -> Result<Vec<Profile>, AppError> {
        let profiles = self.profiles.list_profiles(&ProfileFilter { role: None, district }).await?;
        Ok(profiles.into_iter().filter(|p| p.role.is_field_sales()).collect())
    }

    async fn team_progress(
        &self,
        orders: &[Order],
        members: Vec<Profile>,
        month: NaiveDate,
    ) -> Result<Vec<MemberProgress>, AppError> {
        let mut by_member = aggregate_by_member(orders);
        let targets: HashMap<Uuid, Target> = self
            .targets
            .list_targets(month)
            .await?
            .into_iter()
            .filter_map(|t| match t.scope {
                TargetScope::Employee(id) => Some((id, t)),
                TargetScope::All => None,
            })
            .collect();

        let mut team: Vec<MemberProgress> = members
            .into_iter()
            .map(|member| {
                let achieved = by_member.remove(&member.id).unwrap_or_default();
                MemberProgress {
                    progress: compute_progress(targets.get(&member.id), Achievement::from(&achieved)),
                    profile_id: member.id,
                    full_name: member.full_name,
                    role: member.role,
                }
            })
            .collect();

        rank_by_progress(&mut team);
        Ok(team)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::memory::{MemoryInventory, MemoryOrders, MemoryProfiles, MemoryTargets},
        models::target::NewTarget,
        services::{aggregation::tests::order, profile_service::tests::profile},
    };
    use rust_decimal::Decimal;

    struct Fixture {
        service: DashboardService,
        orders: Arc<MemoryOrders>,
        targets: Arc<MemoryTargets>,
        profiles: Arc<MemoryProfiles>,
    }

    fn fixture() -> Fixture {
        let orders = Arc::new(MemoryOrders::default());
        let targets = Arc::new(MemoryTargets::default());
        let profiles = Arc::new(MemoryProfiles::default());
        let service = DashboardService::new(
            orders.clone(),
            targets.clone(),
            profiles.clone(),
            Arc::new(MemoryInventory::default()),
        );
        Fixture { service, orders, targets, profiles }
    }

    fn march() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn sale(seller: &Profile, status: &str, price: i64) -> Order {
        let mut o = order(status, Some(price), Some(1000));
        o.created_by = Some(seller.id);
        o.district = seller.district.clone();
        o
    }

    async fn assign(fx: &Fixture, scope: TargetScope, revenue: i64, orders: i32) {
        fx.targets
            .upsert_target(&NewTarget {
                scope,
                target_month: march(),
                revenue_target: Decimal::from(revenue),
                order_target: orders,
                remarks: None,
                assigned_by: Uuid::new_v4(),
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn personal_dashboard_tracks_progress_against_own_target() {
        let fx = fixture();
        let seller = profile("e1@example.com", Role::Employee, Some("Pune"));
        fx.orders.insert(sale(&seller, "pending", 100_000));
        fx.orders.insert(sale(&seller, "delivered", 150_000));
        assign(&fx, TargetScope::Employee(seller.id), 500_000, 50).await;

        let caller = Identity::new(Uuid::new_v4(), "e1@example.com", seller);
        let dashboard = fx.service.personal_dashboard(&caller, march()).await.unwrap();

        assert_eq!(dashboard.summary.total_price, Decimal::from(250_000));
        assert_eq!(dashboard.progress.achieved_orders, 2);
        assert_eq!(dashboard.progress.overall_progress, Decimal::new(27, 2));
    }

    #[tokio::test]
    async fn owner_team_is_ranked_by_progress() {
        let fx = fixture();
        let slow = profile("lento@example.com", Role::MarketingExecutive, Some("Pune"));
        let fast = profile("rapido@example.com", Role::Employee, Some("Satara"));
        let manager = profile("gm@example.com", Role::MarketingManager, Some("Pune"));
        for p in [&slow, &fast, &manager] {
            fx.profiles.insert(p.clone());
        }
        fx.orders.insert(sale(&slow, "pending", 10_000));
        fx.orders.insert(sale(&fast, "completed", 90_000));
        assign(&fx, TargetScope::Employee(slow.id), 100_000, 10).await;
        assign(&fx, TargetScope::Employee(fast.id), 100_000, 1).await;
        assign(&fx, TargetScope::All, 1_000_000, 100).await;

        let dashboard = fx.service.owner_dashboard(march()).await.unwrap();

        assert_eq!(dashboard.summary.total_count, 2);
        assert_eq!(dashboard.by_district.len(), 2);
        assert_eq!(dashboard.team.len(), 2);
        assert_eq!(dashboard.team[0].profile_id, fast.id);
        assert_eq!(dashboard.team[1].profile_id, slow.id);
        assert_eq!(dashboard.company_progress.revenue_progress, Decimal::new(1, 1));
        assert_eq!(dashboard.sales_chart.len(), 1);
    }

    #[tokio::test]
    async fn dispatches_on_role() {
        let fx = fixture();
        let manager = profile("gm@example.com", Role::MarketingManager, Some("Pune"));
        let member = profile("e1@example.com", Role::Employee, Some("Pune"));
        fx.profiles.insert(member.clone());
        fx.orders.insert(sale(&member, "packing", 5_000));

        let caller = Identity::new(Uuid::new_v4(), "gm@example.com", manager);
        let RoleDashboard::Marketing(dashboard) = fx.service.dashboard_for(&caller, march()).await.unwrap() else {
            panic!("esperava o painel de marketing");
        };
        assert_eq!(dashboard.summary.count_of(OrderStatus::Packing), 1);
        assert_eq!(dashboard.team.len(), 1);

        let pm = Identity::new(Uuid::new_v4(), "pm@example.com", profile("pm@example.com", Role::ProductionManager, None));
        let RoleDashboard::Production(production) = fx.service.dashboard_for(&pm, march()).await.unwrap() else {
            panic!("esperava o painel de produção");
        };
        assert_eq!(production.packing, 1);
        assert_eq!(production.pending, 0);
    }
}
