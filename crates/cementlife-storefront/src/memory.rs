//! In-process [`OrderStore`] used for dry runs and tests.

use cementlife_core::{NewOrder, OrderReceipt, OrderStatus, OrderStore};
use thiserror::Error;
use tokio::sync::Mutex;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MemoryStoreError {
    #[error("order {0} not found")]
    NotFound(i64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredOrder {
    pub id: i64,
    pub order: NewOrder,
}

/// Ids start at 1 and increase by one per insert.
#[derive(Debug, Default)]
pub struct MemoryOrderStore {
    orders: Mutex<Vec<StoredOrder>>,
}

impl MemoryOrderStore {
    pub async fn orders(&self) -> Vec<StoredOrder> {
        self.orders.lock().await.clone()
    }
}

impl OrderStore for MemoryOrderStore {
    type Error = MemoryStoreError;

    async fn insert_order(&self, order: &NewOrder) -> Result<OrderReceipt, MemoryStoreError> {
        let mut orders = self.orders.lock().await;
        let id = orders.last().map_or(1, |last| last.id + 1);
        orders.push(StoredOrder {
            id,
            order: order.clone(),
        });
        Ok(OrderReceipt { order_id: Some(id) })
    }

    async fn update_order_status(
        &self,
        order_id: i64,
        status: OrderStatus,
    ) -> Result<(), MemoryStoreError> {
        let mut orders = self.orders.lock().await;
        let stored = orders
            .iter_mut()
            .find(|stored| stored.id == order_id)
            .ok_or(MemoryStoreError::NotFound(order_id))?;
        stored.order.status = status;
        Ok(())
    }
}
