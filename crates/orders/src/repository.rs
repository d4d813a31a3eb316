//! Order persistence port.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use orderflow_core::OrderId;

use crate::order::Order;

/// Repository operation error.
///
/// These are **persistence errors** (missing record, storage failure) as
/// opposed to domain errors (status guards, item lookups), which live with the
/// service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// No live record under the requested identifier (absent or soft-deleted).
    #[error("order not found")]
    NotFound,

    /// The storage backend failed (IO, connectivity, poisoned lock, ...).
    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl RepositoryError {
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}

/// Record-per-order persistence for the order aggregate.
///
/// The repository stores whole aggregate records keyed by order id. It makes
/// no assumptions about the backend: in-memory maps for tests/dev, SQL/NoSQL
/// for production.
///
/// ## Identifier Allocation
///
/// `next_id()` is the single allocation point for fresh identifiers; the
/// service draws from it for order *and* item ids. Returning raw [`Uuid`]s
/// keeps the allocator ignorant of what the id will name - call sites wrap it
/// in the right newtype.
///
/// ## Soft-Delete Contract
///
/// Deleting is tombstoning: `delete()` sets `deleted_at` and keeps the record.
/// Implementations must treat tombstoned records as absent in **both** `find`
/// and `delete` - the filter belongs in the storage layer, not in callers.
/// `delete` on an already-tombstoned record is `NotFound`, never a silent
/// success, so two racing deletes cannot both report completion.
pub trait OrderRepository: Send + Sync {
    /// Allocate a fresh identifier (time-ordered).
    fn next_id(&self) -> Result<Uuid, RepositoryError>;

    /// Insert or overwrite the full order record.
    fn store(&self, order: &Order) -> Result<(), RepositoryError>;

    /// Fetch a live (non-tombstoned) order.
    fn find(&self, order_id: OrderId) -> Result<Order, RepositoryError>;

    /// Tombstone a live order.
    fn delete(&self, order_id: OrderId) -> Result<(), RepositoryError>;
}

impl<R> OrderRepository for Arc<R>
where
    R: OrderRepository + ?Sized,
{
    fn next_id(&self) -> Result<Uuid, RepositoryError> {
        (**self).next_id()
    }

    fn store(&self, order: &Order) -> Result<(), RepositoryError> {
        (**self).store(order)
    }

    fn find(&self, order_id: OrderId) -> Result<Order, RepositoryError> {
        (**self).find(order_id)
    }

    fn delete(&self, order_id: OrderId) -> Result<(), RepositoryError> {
        (**self).delete(order_id)
    }
}
