//! Database operations for `orders`.

use cementlife_core::{CoreError, NewOrder, OrderDetail, OrderStatus};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

/// A row from the `orders` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OrderRow {
    pub id: i64,
    pub public_id: Uuid,
    pub customer_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    /// Whole VND.
    pub total_amount: i64,
    pub order_detail: serde_json::Value,
    /// One of `PENDING`, `COMPLETED`, `CANCELED`; enforced by a CHECK constraint.
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrderRow {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidOrderStatus`] if the stored value is not a
    /// known status.
    pub fn status(&self) -> Result<OrderStatus, CoreError> {
        self.status.parse()
    }

    /// Decode the JSONB detail column.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Serialize`] if the stored JSON does not match
    /// [`OrderDetail`].
    pub fn detail(&self) -> Result<OrderDetail, DbError> {
        Ok(serde_json::from_value(self.order_detail.clone())?)
    }
}

/// Inserts a new order. A fresh UUID is bound to `public_id`; `status` comes
/// from the order itself (always `PENDING` for checkout submissions).
///
/// # Errors
///
/// Returns [`DbError::Serialize`] if the detail cannot be encoded, or
/// [`DbError::Sqlx`] if the insert fails.
pub async fn insert_order(pool: &PgPool, order: &NewOrder) -> Result<OrderRow, DbError> {
    let public_id = Uuid::new_v4();
    let detail = serde_json::to_value(&order.detail)?;

    let row = sqlx::query_as::<_, OrderRow>(
        "INSERT INTO orders \
             (public_id, customer_name, email, phone, address, total_amount, order_detail, status) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) \
         RETURNING id, public_id, customer_name, email, phone, address, total_amount, \
                   order_detail, status, created_at, updated_at",
    )
    .bind(public_id)
    .bind(&order.customer_name)
    .bind(&order.email)
    .bind(&order.phone)
    .bind(&order.address)
    .bind(order.total_amount)
    .bind(detail)
    .bind(order.status.as_str())
    .fetch_one(pool)
    .await?;

    tracing::info!(
        order_id = row.id,
        total_amount = row.total_amount,
        lines = order.detail.lines.len(),
        "order inserted"
    );
    Ok(row)
}

/// Sets an order's status and bumps `updated_at`. Any status may follow any
/// other; the admin side decides the lifecycle.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no order has `id`, or [`DbError::Sqlx`]
/// if the update fails.
pub async fn update_order_status(
    pool: &PgPool,
    id: i64,
    status: OrderStatus,
) -> Result<OrderRow, DbError> {
    let row = sqlx::query_as::<_, OrderRow>(
        "UPDATE orders \
         SET status = $1, updated_at = NOW() \
         WHERE id = $2 \
         RETURNING id, public_id, customer_name, email, phone, address, total_amount, \
                   order_detail, status, created_at, updated_at",
    )
    .bind(status.as_str())
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound(id))?;

    tracing::info!(order_id = id, %status, "order status updated");
    Ok(row)
}

/// Fetches a single order by `id`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no order has `id`, or [`DbError::Sqlx`]
/// if the query fails.
pub async fn get_order(pool: &PgPool, id: i64) -> Result<OrderRow, DbError> {
    let row = sqlx::query_as::<_, OrderRow>(
        "SELECT id, public_id, customer_name, email, phone, address, total_amount, \
                order_detail, status, created_at, updated_at \
         FROM orders \
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or(DbError::NotFound(id))?;

    Ok(row)
}

/// Returns the most recent `limit` orders, newest first, optionally filtered
/// by status.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_orders(
    pool: &PgPool,
    status: Option<OrderStatus>,
    limit: i64,
) -> Result<Vec<OrderRow>, DbError> {
    let rows = sqlx::query_as::<_, OrderRow>(
        "SELECT id, public_id, customer_name, email, phone, address, total_amount, \
                order_detail, status, created_at, updated_at \
         FROM orders \
         WHERE ($1::TEXT IS NULL OR status = $1) \
         ORDER BY created_at DESC, id DESC \
         LIMIT $2",
    )
    .bind(status.map(OrderStatus::as_str))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
