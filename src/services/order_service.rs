// src/services/order_service.rs

use std::sync::Arc;

use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        pagination::{Page, Paginated},
        time_window::{parse_month, TimeWindow},
    },
    db::{OrderFilter, OrderStore},
    models::{
        order::{CreateOrderPayload, FeedCategory, NewOrder, Order, OrderQuery, OrderStatus},
        profile::Role,
    },
    services::{aggregation::OrderScope, session::Identity},
};

// Peso dos pedidos novos sempre gravado em kg
const ORDER_WEIGHT_UNIT: &str = "kg";

/// Quais pedidos o cargo enxerga.
pub fn visible_scope(identity: &Identity) -> Result<OrderScope, AppError> {
    match identity.role {
        Role::Owner | Role::ProductionManager => Ok(OrderScope::All),
        Role::MarketingManager => identity
            .district()
            .map(|d| OrderScope::District(d.to_string()))
            .ok_or_else(|| AppError::Forbidden("Gerente sem distrito atribuído.".into())),
        Role::MarketingExecutive | Role::Employee => Ok(OrderScope::Individual(identity.profile_id())),
    }
}

#[derive(Clone)]
pub struct OrderService {
    orders: Arc<dyn OrderStore>,
}

impl OrderService {
    pub fn new(orders: Arc<dyn OrderStore>) -> Self {
        Self { orders }
    }

    pub async fn create_order(&self, caller: &Identity, payload: CreateOrderPayload) -> Result<Order, AppError> {
        let category = self
            .orders
            .find_feed_category(payload.feed_category.trim())
            .await?
            .ok_or_else(|| AppError::UnknownFeedCategory(payload.feed_category.clone()))?;

        let (total_weight, total_price) = category.price_order(payload.bag_count);

        let new_order = NewOrder {
            customer_name: payload.customer_name.trim().to_string(),
            customer_phone: payload.customer_phone,
            feed_category: category.name,
            bag_count: payload.bag_count,
            total_weight,
            weight_unit: ORDER_WEIGHT_UNIT.to_string(),
            total_price,
            status: OrderStatus::Pending,
            // Sem distrito no formulário, vale o do vendedor
            district: payload.district.or_else(|| caller.profile.district.clone()),
            taluka: payload.taluka,
            created_by: caller.profile_id(),
        };

        let order = self.orders.insert_order(&new_order).await?;
        tracing::info!("Pedido {} criado por {}", order.id, caller.profile_id());

        Ok(order)
    }

    /// Qualquer status reconhecido pode substituir qualquer outro.
    pub async fn update_status(&self, order_id: Uuid, raw_status: &str) -> Result<Order, AppError> {
        let status = OrderStatus::parse(raw_status)
            .ok_or_else(|| AppError::InvalidOrderStatus(raw_status.to_string()))?;

        self.orders
            .update_status(order_id, status)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound(format!("Pedido {}", order_id)))
    }

    /// Um pedido, se estiver no recorte do cargo. Fora do recorte vale como inexistente.
    pub async fn get_order(&self, caller: &Identity, order_id: Uuid) -> Result<Order, AppError> {
        let scope = visible_scope(caller)?;

        self.orders
            .find_order(order_id)
            .await?
            .filter(|order| scope.matches(order))
            .ok_or_else(|| AppError::ResourceNotFound(format!("Pedido {}", order_id)))
    }

    pub async fn list_orders(
        &self,
        caller: &Identity,
        query: &OrderQuery,
        page: Page,
    ) -> Result<Paginated<Order>, AppError> {
        let mut scope = visible_scope(caller)?;

        // O filtro de distrito só vale para quem enxerga todos os pedidos
        if let (OrderScope::All, Some(district)) = (&scope, query.district.as_deref()) {
            scope = OrderScope::District(district.to_string());
        }

        let status = query
            .status
            .as_deref()
            .map(|raw| OrderStatus::parse(raw).ok_or_else(|| AppError::InvalidOrderStatus(raw.to_string())))
            .transpose()?;

        let window = query
            .month
            .as_deref()
            .map(|raw| {
                parse_month(raw)
                    .map(TimeWindow::month_of)
                    .ok_or_else(|| AppError::InvalidMonth(raw.to_string()))
            })
            .transpose()?;

        let filter = OrderFilter { scope, window, status, page: Some(page) };
        let orders = self.orders.list_orders(&filter).await?;

        Ok(Paginated::new(orders, page))
    }

    pub async fn list_feed_categories(&self) -> Result<Vec<FeedCategory>, AppError> {
        self.orders.list_feed_categories().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        common::pagination::PageParams,
        db::memory::MemoryOrders,
        models::profile::Role,
        services::{aggregation::tests::order, profile_service::tests::profile},
    };
    use rust_decimal::Decimal;

    fn identity(role: Role, district: Option<&str>) -> Identity {
        Identity::new(Uuid::new_v4(), "x@example.com", profile("x@example.com", role, district))
    }

    fn service() -> (OrderService, Arc<MemoryOrders>) {
        let store = Arc::new(MemoryOrders::default());
        store.add_category(FeedCategory {
            name: "Pashu Aahar Gold".into(),
            bag_weight_kg: Decimal::from(50),
            price_per_bag: Decimal::new(125000, 2),
        });
        (OrderService::new(store.clone()), store)
    }

    fn payload(category: &str, bags: i32) -> CreateOrderPayload {
        CreateOrderPayload {
            customer_name: "Shivaji Dairy".into(),
            customer_phone: None,
            feed_category: category.into(),
            bag_count: bags,
            district: None,
            taluka: Some("Karveer".into()),
        }
    }

    #[tokio::test]
    async fn creates_priced_pending_order() {
        let (service, _) = service();
        let seller = identity(Role::MarketingExecutive, Some("Kolhapur"));

        let order = service.create_order(&seller, payload("pashu aahar gold", 40)).await.unwrap();

        assert_eq!(order.status, "pending");
        assert_eq!(order.total_weight, Some(Decimal::from(2000)));
        assert_eq!(order.total_price, Some(Decimal::from(50_000)));
        assert_eq!(order.weight_unit.as_deref(), Some("kg"));
        assert_eq!(order.district.as_deref(), Some("Kolhapur"));
        assert_eq!(order.created_by, Some(seller.profile_id()));
    }

    #[tokio::test]
    async fn unknown_category_is_rejected() {
        let (service, _) = service();
        let err = service
            .create_order(&identity(Role::Owner, None), payload("Silver", 1))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnknownFeedCategory(_)));
    }

    #[tokio::test]
    async fn status_update_accepts_any_known_status() {
        let (service, _) = service();
        let order = service
            .create_order(&identity(Role::Owner, None), payload("Pashu Aahar Gold", 2))
            .await
            .unwrap();

        let updated = service.update_status(order.id, "Delivered").await.unwrap();
        assert_eq!(updated.status, "delivered");
        let back = service.update_status(order.id, "pending").await.unwrap();
        assert_eq!(back.status, "pending");

        let err = service.update_status(order.id, "lost").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidOrderStatus(_)));

        let err = service.update_status(Uuid::new_v4(), "pending").await.unwrap_err();
        assert!(matches!(err, AppError::ResourceNotFound(_)));
    }

    #[tokio::test]
    async fn executives_only_list_their_own_orders() {
        let (service, _) = service();
        let mine = identity(Role::MarketingExecutive, Some("Pune"));
        let other = identity(Role::Employee, Some("Pune"));
        service.create_order(&mine, payload("Pashu Aahar Gold", 1)).await.unwrap();
        service.create_order(&other, payload("Pashu Aahar Gold", 1)).await.unwrap();

        let page = Page::from(PageParams::default());
        let listed = service.list_orders(&mine, &OrderQuery::default(), page).await.unwrap();
        assert_eq!(listed.items.len(), 1);
        assert_eq!(listed.items[0].created_by, Some(mine.profile_id()));

        let manager = identity(Role::MarketingManager, Some("pune"));
        let listed = service.list_orders(&manager, &OrderQuery::default(), page).await.unwrap();
        assert_eq!(listed.items.len(), 2);
    }

    #[tokio::test]
    async fn managers_do_not_see_other_districts() {
        let (service, _) = service();
        let pune_seller = identity(Role::Employee, Some("Pune"));
        let satara_seller = identity(Role::Employee, Some("Satara"));
        service.create_order(&pune_seller, payload("Pashu Aahar Gold", 1)).await.unwrap();
        let foreign = service.create_order(&satara_seller, payload("Pashu Aahar Gold", 3)).await.unwrap();

        let manager = identity(Role::MarketingManager, Some("Pune"));
        let page = Page::from(PageParams::default());

        // Filtro de distrito de quem tem recorte restrito não amplia a visão
        let query = OrderQuery { district: Some("Satara".into()), ..Default::default() };
        let listed = service.list_orders(&manager, &query, page).await.unwrap();
        assert_eq!(listed.items.len(), 1);
        assert!(listed.items.iter().all(|o| o.district.as_deref() == Some("Pune")));

        let err = service.get_order(&manager, foreign.id).await.unwrap_err();
        assert!(matches!(err, AppError::ResourceNotFound(_)));

        let owner = identity(Role::Owner, None);
        assert_eq!(service.get_order(&owner, foreign.id).await.unwrap().id, foreign.id);
    }

    #[tokio::test]
    async fn status_filter_matches_spaced_stored_statuses() {
        let (service, store) = service();
        store.insert(order("Ready for dispatch", Some(100), Some(50)));
        store.insert(order("ready-for-dispatch", Some(100), Some(50)));
        store.insert(order("pending", Some(100), Some(50)));

        let query = OrderQuery { status: Some("ready_for_dispatch".into()), ..Default::default() };
        let owner = identity(Role::Owner, None);
        let listed = service
            .list_orders(&owner, &query, Page::from(PageParams::default()))
            .await
            .unwrap();

        assert_eq!(listed.items.len(), 2);
        assert!(listed.items.iter().all(|o| o.parsed_status() == Some(OrderStatus::ReadyForDispatch)));
    }

    #[tokio::test]
    async fn list_rejects_bad_filters() {
        let (service, _) = service();
        let owner = identity(Role::Owner, None);
        let page = Page::from(PageParams::default());

        let query = OrderQuery { status: Some("unknown".into()), ..Default::default() };
        let err = service.list_orders(&owner, &query, page).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidOrderStatus(_)));

        let query = OrderQuery { month: Some("março".into()), ..Default::default() };
        let err = service.list_orders(&owner, &query, page).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidMonth(_)));
    }

    #[test]
    fn manager_without_district_is_forbidden() {
        let err = visible_scope(&identity(Role::MarketingManager, None)).unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}
