use serde::Serialize;
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::orders::repo_types::{Order, OrderStatus};

const ORDER_COLUMNS: &str = "id, user_id, service, country, number, amount, status, created_at";

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct OrderStats {
    pub total_orders: i64,
    pub success_orders: i64,
}

pub async fn stats_for_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<OrderStats> {
    let total_orders =
        sqlx::query_scalar::<_, i64>("SELECT count(*) FROM orders WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(db)
            .await?;

    let success_orders = sqlx::query_scalar::<_, i64>(
        "SELECT count(*) FROM orders WHERE user_id = $1 AND status = $2",
    )
    .bind(user_id)
    .bind(OrderStatus::Completed.as_str())
    .fetch_one(db)
    .await?;

    Ok(OrderStats {
        total_orders,
        success_orders,
    })
}

pub async fn list_by_user(
    db: &PgPool,
    user_id: Uuid,
    limit: i64,
    offset: i64,
) -> anyhow::Result<Vec<Order>> {
    let rows = sqlx::query_as::<_, Order>(&format!(
        r#"
        SELECT {ORDER_COLUMNS}
        FROM orders
        WHERE user_id = $1
        ORDER BY created_at DESC
        LIMIT $2 OFFSET $3
        "#
    ))
    .bind(user_id)
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn find_for_user(
    db: &PgPool,
    user_id: Uuid,
    order_id: Uuid,
) -> anyhow::Result<Option<Order>> {
    let row = sqlx::query_as::<_, Order>(&format!(
        r#"
        SELECT {ORDER_COLUMNS}
        FROM orders
        WHERE id = $1 AND user_id = $2
        "#
    ))
    .bind(order_id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;
    Ok(row)
}

pub async fn create(
    exec: impl PgExecutor<'_>,
    user_id: Uuid,
    service: &str,
    country: &str,
    number: Option<&str>,
    amount: f64,
) -> anyhow::Result<Order> {
    let order = sqlx::query_as::<_, Order>(&format!(
        r#"
        INSERT INTO orders (user_id, service, country, number, amount, status)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {ORDER_COLUMNS}
        "#
    ))
    .bind(user_id)
    .bind(service)
    .bind(country)
    .bind(number)
    .bind(amount)
    .bind(OrderStatus::Pending.as_str())
    .fetch_one(exec)
    .await?;
    Ok(order)
}

pub async fn set_status(db: &PgPool, order_id: Uuid, status: OrderStatus) -> anyhow::Result<Order> {
    let order = sqlx::query_as::<_, Order>(&format!(
        r#"
        UPDATE orders
        SET status = $2
        WHERE id = $1
        RETURNING {ORDER_COLUMNS}
        "#
    ))
    .bind(order_id)
    .bind(status.as_str())
    .fetch_one(db)
    .await?;
    Ok(order)
}
