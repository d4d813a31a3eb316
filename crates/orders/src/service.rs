//! Order operations pipeline (application-level orchestration).
//!
//! Every public operation runs the same synchronous pipeline:
//!
//! ```text
//! Operation
//!   ↓
//! 1. Load the order record from the repository
//!   ↓
//! 2. Validate the mutation against current state (status guards, item lookup)
//!   ↓
//! 3. Mutate the record in memory (refresh `updated_at`)
//!   ↓
//! 4. Persist the full record via the repository
//!   ↓
//! 5. Dispatch the one matching domain event
//! ```
//!
//! ## Why This Orchestration?
//!
//! The aggregate stays a plain record; centralizing the load/validate/persist
//! sequence here keeps every operation's guarantees identical and keeps the
//! domain testable against in-memory collaborators.
//!
//! ## Execution Guarantees
//!
//! - **Persist-then-dispatch**: the event goes out only after the state change
//!   is durable; a failed persist dispatches nothing
//! - **One event per mutation**: each successful operation emits exactly one
//!   event describing it
//! - **At-least-once**: a dispatch failure after a successful persist is
//!   returned as an error even though the state change stands; callers see
//!   persisted-but-not-notified and decide how to reconcile
//!
//! ## Error Semantics
//!
//! Deterministic rule violations ( [`OrderServiceError::InvalidOrderStatus`],
//! [`OrderServiceError::ItemNotFound`] ) never touch storage. Repository and
//! dispatcher failures pass through as their own variants.

use chrono::Utc;
use thiserror::Error;
use tracing::warn;

use orderflow_core::{CustomerId, ItemId, OrderId, ProductId};
use orderflow_events::{Event, EventDispatcher};

use crate::order::{
    Item, Order, OrderCreated, OrderDeleted, OrderEvent, OrderItemsChanged, OrderStatus,
    OrderStatusChanged,
};
use crate::repository::{OrderRepository, RepositoryError};

/// Order operation error.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderServiceError {
    /// No live order under the given identifier (absent or soft-deleted).
    #[error("order not found")]
    OrderNotFound,

    /// The order's current status forbids this operation.
    #[error("invalid order status for this operation")]
    InvalidOrderStatus,

    /// The order holds no item with the given identifier.
    #[error("item not found in order")]
    ItemNotFound,

    /// Identifier allocation, store or delete failed in the repository.
    #[error("repository failure: {0}")]
    Repository(RepositoryError),

    /// Event dispatch failed after the state change was persisted
    /// (at-least-once; the mutation stands).
    #[error("event dispatch failed after persistence: {0}")]
    Dispatch(String),
}

impl From<RepositoryError> for OrderServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => OrderServiceError::OrderNotFound,
            other => OrderServiceError::Repository(other),
        }
    }
}

/// Stateless order lifecycle service.
///
/// Holds exactly two injected collaborators and no further state, so one
/// instance can serve any number of orders and threads (given `Send + Sync`
/// collaborators).
///
/// ## Generic Parameters
///
/// - `R`: repository implementation (storage port)
/// - `D`: dispatcher implementation (event transport port)
///
/// In-memory implementations of both exist for tests/dev; production wires in
/// real backends without touching this type.
#[derive(Debug)]
pub struct OrderService<R, D> {
    repo: R,
    dispatcher: D,
}

impl<R, D> OrderService<R, D> {
    pub fn new(repo: R, dispatcher: D) -> Self {
        Self { repo, dispatcher }
    }

    pub fn into_parts(self) -> (R, D) {
        (self.repo, self.dispatcher)
    }
}

impl<R, D> OrderService<R, D>
where
    R: OrderRepository,
    D: EventDispatcher<OrderEvent>,
{
    /// Place a new, empty order for `customer_id`.
    ///
    /// The fresh order starts `Open` with no items and both timestamps at the
    /// current instant. Emits [`OrderCreated`].
    pub fn create_order(&self, customer_id: CustomerId) -> Result<OrderId, OrderServiceError> {
        let order_id = OrderId::from_uuid(self.repo.next_id()?);

        let order = Order::new(order_id, customer_id, Utc::now());
        self.repo.store(&order)?;

        self.dispatch_after_persist(
            order_id,
            OrderEvent::OrderCreated(OrderCreated {
                order_id,
                customer_id,
            }),
        )?;

        Ok(order_id)
    }

    /// Soft-delete an order.
    ///
    /// The record is tombstoned, not removed; afterwards every lookup treats
    /// it as absent. Emits [`OrderDeleted`].
    pub fn delete_order(&self, order_id: OrderId) -> Result<(), OrderServiceError> {
        self.repo.find(order_id)?;

        // The repository re-checks liveness itself: if the order was
        // tombstoned between find and delete, this reports NotFound rather
        // than deleting twice.
        self.repo.delete(order_id)?;

        self.dispatch_after_persist(order_id, OrderEvent::OrderDeleted(OrderDeleted { order_id }))
    }

    /// Overwrite the order's status.
    ///
    /// Rejected only when the current status is terminal (`Cancelled`); the
    /// target value itself is not validated, redundant transitions included.
    /// Emits [`OrderStatusChanged`].
    pub fn set_status(
        &self,
        order_id: OrderId,
        new_status: OrderStatus,
    ) -> Result<(), OrderServiceError> {
        let mut order = self.repo.find(order_id)?;

        if order.is_cancelled() {
            return Err(OrderServiceError::InvalidOrderStatus);
        }

        order.status = new_status;
        order.updated_at = Utc::now();
        self.repo.store(&order)?;

        self.dispatch_after_persist(
            order_id,
            OrderEvent::OrderStatusChanged(OrderStatusChanged {
                order_id,
                new_status,
            }),
        )
    }

    /// Append a line item to an open order.
    ///
    /// `price` is the snapshot captured now; later catalog changes don't
    /// touch it. Emits [`OrderItemsChanged`] listing the added item.
    pub fn add_item(
        &self,
        order_id: OrderId,
        product_id: ProductId,
        price: u64,
    ) -> Result<ItemId, OrderServiceError> {
        let mut order = self.repo.find(order_id)?;

        if !order.is_modifiable() {
            return Err(OrderServiceError::InvalidOrderStatus);
        }

        let item_id = ItemId::from_uuid(self.repo.next_id()?);
        order.items.push(Item {
            id: item_id,
            product_id,
            price,
        });
        order.updated_at = Utc::now();
        self.repo.store(&order)?;

        self.dispatch_after_persist(
            order_id,
            OrderEvent::OrderItemsChanged(OrderItemsChanged {
                order_id,
                added_items: vec![item_id],
                removed_items: Vec::new(),
            }),
        )?;

        Ok(item_id)
    }

    /// Remove one line item from an open order.
    ///
    /// The remaining items keep their insertion order. Emits
    /// [`OrderItemsChanged`] listing the removed item.
    pub fn delete_item(&self, order_id: OrderId, item_id: ItemId) -> Result<(), OrderServiceError> {
        let mut order = self.repo.find(order_id)?;

        if !order.is_modifiable() {
            return Err(OrderServiceError::InvalidOrderStatus);
        }

        let item_index = order
            .items
            .iter()
            .position(|item| item.id == item_id)
            .ok_or(OrderServiceError::ItemNotFound)?;

        order.items.remove(item_index);
        order.updated_at = Utc::now();
        self.repo.store(&order)?;

        self.dispatch_after_persist(
            order_id,
            OrderEvent::OrderItemsChanged(OrderItemsChanged {
                order_id,
                added_items: Vec::new(),
                removed_items: vec![item_id],
            }),
        )
    }

    /// Dispatch the event describing an already-persisted mutation.
    ///
    /// Runs strictly after the repository write succeeded. On failure the
    /// state change stands; the caller gets the error and must reconcile.
    fn dispatch_after_persist(
        &self,
        order_id: OrderId,
        event: OrderEvent,
    ) -> Result<(), OrderServiceError> {
        let event_type = event.event_type();

        self.dispatcher.dispatch(event).map_err(|e| {
            warn!(
                order_id = %order_id,
                event_type = event_type,
                error = ?e,
                "event dispatch failed after persistence"
            );
            OrderServiceError::Dispatch(format!("{e:?}"))
        })
    }
}
