use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use orderflow_core::{CustomerId, Entity, ItemId, OrderId, ProductId};
use orderflow_events::Event;

/// Order status lifecycle.
///
/// `Cancelled` is terminal: no further status change is accepted once reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Paid,
    Shipped,
    Cancelled,
}

/// Line item: product reference plus the price captured when it was added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub product_id: ProductId,
    /// Price in smallest currency unit (e.g., cents), snapshot at add time.
    pub price: u64,
}

impl Entity for Item {
    type Id = ItemId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Aggregate root: Order.
///
/// A plain record: all mutation decisions live in the service layer, the
/// aggregate only answers what its current state permits. A set `deleted_at`
/// tombstones the order; tombstoned records are physically retained but must
/// be treated as absent by every lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub status: OrderStatus,
    pub items: Vec<Item>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Order {
    /// A freshly placed order: open, no items, both timestamps at `now`.
    pub fn new(id: OrderId, customer_id: CustomerId, now: DateTime<Utc>) -> Self {
        Self {
            id,
            customer_id,
            status: OrderStatus::Open,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Whether the item collection may still change.
    pub fn is_modifiable(&self) -> bool {
        matches!(self.status, OrderStatus::Open)
    }

    /// Whether the status has reached its terminal value.
    pub fn is_cancelled(&self) -> bool {
        matches!(self.status, OrderStatus::Cancelled)
    }

    /// Whether the order has been soft-deleted.
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Event: OrderCreated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderCreated {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
}

/// Event: OrderItemsChanged.
///
/// One mutation emits one event: either `added_items` or `removed_items` is
/// populated, the other stays empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemsChanged {
    pub order_id: OrderId,
    pub added_items: Vec<ItemId>,
    pub removed_items: Vec<ItemId>,
}

/// Event: OrderStatusChanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderStatusChanged {
    pub order_id: OrderId,
    pub new_status: OrderStatus,
}

/// Event: OrderDeleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderDeleted {
    pub order_id: OrderId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderEvent {
    OrderCreated(OrderCreated),
    OrderItemsChanged(OrderItemsChanged),
    OrderStatusChanged(OrderStatusChanged),
    OrderDeleted(OrderDeleted),
}

impl Event for OrderEvent {
    fn event_type(&self) -> &'static str {
        match self {
            OrderEvent::OrderCreated(_) => "orders.order.created",
            OrderEvent::OrderItemsChanged(_) => "orders.order.items_changed",
            OrderEvent::OrderStatusChanged(_) => "orders.order.status_changed",
            OrderEvent::OrderDeleted(_) => "orders.order.deleted",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}
