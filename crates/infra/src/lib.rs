//! Infrastructure layer: storage adapters and full-pipeline wiring.

pub mod order_store;

pub use order_store::InMemoryOrderStore;
