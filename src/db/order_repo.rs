// src/db/order_repo.rs

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::stores::{OrderFilter, OrderStore},
    models::order::{FeedCategory, NewOrder, Order, OrderStatus},
    services::aggregation::OrderScope,
};

const ORDER_COLUMNS: &str = r#"
    id, customer_name, customer_phone, feed_category, bag_count,
    total_weight, weight_unit, total_price, status, district, taluka,
    created_by, created_at, updated_at
"#;

#[derive(Clone)]
pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Mesma normalização de `OrderStatus::parse`: minúsculas, espaço e hífen viram `_`
const NORMALIZED_STATUS: &str = "regexp_replace(lower(trim(status)), '[ -]', '_', 'g')";

fn list_query(filter: &OrderFilter) -> QueryBuilder<'static, Postgres> {
    let mut query: QueryBuilder<Postgres> =
        QueryBuilder::new(format!("SELECT {ORDER_COLUMNS} FROM orders WHERE TRUE"));

    match &filter.scope {
        OrderScope::All => {}
        OrderScope::District(district) => {
            query.push(" AND lower(trim(district)) = lower(trim(").push_bind(district.clone()).push("))");
        }
        OrderScope::Individual(profile_id) => {
            query.push(" AND created_by = ").push_bind(*profile_id);
        }
    }

    // Janela semiaberta [start, end)
    if let Some(window) = filter.window {
        query.push(" AND created_at >= ").push_bind(window.start);
        query.push(" AND created_at < ").push_bind(window.end);
    }

    if let Some(status) = filter.status {
        query.push(format!(" AND {NORMALIZED_STATUS} = ")).push_bind(status.as_str());
    }

    query.push(" ORDER BY created_at DESC");

    if let Some(page) = filter.page {
        query.push(" LIMIT ").push_bind(page.limit());
        query.push(" OFFSET ").push_bind(page.offset());
    }

    query
}

#[async_trait]
impl OrderStore for OrderRepository {
    async fn list_orders(&self, filter: &OrderFilter) -> Result<Vec<Order>, AppError> {
        let orders = list_query(filter)
            .build_query_as::<Order>()
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }

    async fn find_order(&self, order_id: Uuid) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    async fn insert_order(&self, order: &NewOrder) -> Result<Order, AppError> {
        let created = sqlx::query_as::<_, Order>(&format!(
            r#"
            INSERT INTO orders (
                customer_name, customer_phone, feed_category, bag_count,
                total_weight, weight_unit, total_price, status,
                district, taluka, created_by
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
            .bind(&order.customer_name)
            .bind(&order.customer_phone)
            .bind(&order.feed_category)
            .bind(order.bag_count)
            .bind(order.total_weight)
            .bind(&order.weight_unit)
            .bind(order.total_price)
            .bind(order.status.as_str())
            .bind(&order.district)
            .bind(&order.taluka)
            .bind(order.created_by)
            .fetch_one(&self.pool)
            .await?;

        Ok(created)
    }

    async fn update_status(&self, order_id: Uuid, status: OrderStatus) -> Result<Option<Order>, AppError> {
        let updated = sqlx::query_as::<_, Order>(&format!(
            r#"
            UPDATE orders
            SET status = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING {ORDER_COLUMNS}
            "#
        ))
            .bind(status.as_str())
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(updated)
    }

    async fn find_feed_category(&self, name: &str) -> Result<Option<FeedCategory>, AppError> {
        let category = sqlx::query_as::<_, FeedCategory>(
            "SELECT name, bag_weight_kg, price_per_bag FROM feed_categories WHERE lower(name) = lower($1)",
        )
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        Ok(category)
    }

    async fn list_feed_categories(&self) -> Result<Vec<FeedCategory>, AppError> {
        let categories = sqlx::query_as::<_, FeedCategory>(
            "SELECT name, bag_weight_kg, price_per_bag FROM feed_categories ORDER BY name ASC",
        )
            .fetch_all(&self.pool)
            .await?;

        Ok(categories)
    }
}
