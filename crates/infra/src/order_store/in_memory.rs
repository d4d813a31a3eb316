use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use uuid::Uuid;

use orderflow_core::OrderId;
use orderflow_orders::{Order, OrderRepository, RepositoryError};

/// In-memory order repository.
///
/// Intended for tests/dev. Not optimized for performance.
///
/// Records are kept whole, tombstones included: `delete` only stamps
/// `deleted_at`, and both `find` and `delete` filter stamped records so that
/// a tombstoned order behaves exactly like a missing one.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    orders: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw record access, tombstones included (inspection only).
    pub fn record(&self, order_id: OrderId) -> Option<Order> {
        self.orders.read().ok()?.get(&order_id).cloned()
    }
}

impl OrderRepository for InMemoryOrderStore {
    fn next_id(&self) -> Result<Uuid, RepositoryError> {
        Ok(Uuid::now_v7())
    }

    fn store(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|_| RepositoryError::backend("lock poisoned"))?;

        orders.insert(order.id, order.clone());
        Ok(())
    }

    fn find(&self, order_id: OrderId) -> Result<Order, RepositoryError> {
        let orders = self
            .orders
            .read()
            .map_err(|_| RepositoryError::backend("lock poisoned"))?;

        match orders.get(&order_id) {
            Some(order) if !order.is_deleted() => Ok(order.clone()),
            _ => Err(RepositoryError::NotFound),
        }
    }

    fn delete(&self, order_id: OrderId) -> Result<(), RepositoryError> {
        let mut orders = self
            .orders
            .write()
            .map_err(|_| RepositoryError::backend("lock poisoned"))?;

        // Liveness is re-checked under the write lock: a record tombstoned
        // since the caller's find reports NotFound instead of deleting twice.
        match orders.get_mut(&order_id) {
            Some(order) if !order.is_deleted() => {
                order.deleted_at = Some(Utc::now());
                Ok(())
            }
            _ => Err(RepositoryError::NotFound),
        }
    }
}
