//! [`OrderStore`] over a Postgres pool.

use cementlife_core::{NewOrder, OrderReceipt, OrderStatus, OrderStore};
use sqlx::PgPool;

use crate::{orders, DbError};

#[derive(Debug, Clone)]
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl OrderStore for PgOrderStore {
    type Error = DbError;

    async fn insert_order(&self, order: &NewOrder) -> Result<OrderReceipt, DbError> {
        let row = orders::insert_order(&self.pool, order).await?;
        Ok(OrderReceipt {
            order_id: Some(row.id),
        })
    }

    async fn update_order_status(&self, order_id: i64, status: OrderStatus) -> Result<(), DbError> {
        orders::update_order_status(&self.pool, order_id, status).await?;
        Ok(())
    }
}
