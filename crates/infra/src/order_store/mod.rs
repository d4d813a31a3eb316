//! Order storage boundary.
//!
//! Storage adapters behind the order repository port, without making any
//! backend assumptions. The in-memory implementation backs tests/dev; a SQL
//! adapter would slot in alongside it without touching the domain.

pub mod in_memory;

pub use in_memory::InMemoryOrderStore;
