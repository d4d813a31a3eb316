//! Order lifecycle domain module.
//!
//! Business rules for retail orders: creation, line-item changes, status
//! transitions, soft deletion. Storage and event transport stay behind the
//! [`OrderRepository`] and dispatcher ports; this crate performs no IO of its
//! own.

pub mod order;
pub mod repository;
pub mod service;

pub use order::{
    Item, Order, OrderCreated, OrderDeleted, OrderEvent, OrderItemsChanged, OrderStatus,
    OrderStatusChanged,
};
pub use repository::{OrderRepository, RepositoryError};
pub use service::{OrderService, OrderServiceError};
