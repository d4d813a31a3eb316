//! `orderflow-events` — event contracts and transport-free dispatch plumbing.
//!
//! This crate defines what an event *is* and how the domain hands events to
//! the outside world. It carries no broker bindings; the in-memory dispatcher
//! here is the test/dev transport.

pub mod dispatcher;
pub mod event;
pub mod in_memory;

pub use dispatcher::{EventDispatcher, Subscription};
pub use event::Event;
pub use in_memory::{InMemoryDispatchError, InMemoryDispatcher};
