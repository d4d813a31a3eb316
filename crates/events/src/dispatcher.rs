//! Event dispatch abstraction (mechanics only).
//!
//! This module provides the **dispatcher pattern** - the outbound port through
//! which the domain hands freshly-persisted events to whatever distributes them
//! (in-memory channels, a broker client, an outbox writer, etc.).
//!
//! ## Design Philosophy
//!
//! The dispatcher is intentionally **lightweight** and makes minimal assumptions:
//!
//! - **Transport-agnostic**: Works with in-memory channels, Redis pub/sub, message queues, etc.
//! - **At-least-once delivery**: Events may be delivered multiple times; consumers must be idempotent
//! - **No ordering guarantees**: Events may arrive out of order (unless implementation provides ordering)
//! - **No persistence**: Dispatch is distribution, not storage (the repository record is the source of truth)
//!
//! ## Why At-Least-Once?
//!
//! State is **persisted first**, then the matching event is dispatched. If
//! dispatch fails the mutation is already durable; the failure is surfaced to
//! the caller, which can re-drive the operation or reconcile out of band.
//! Consumers must therefore be idempotent - processing the same event twice
//! should produce the same result (or be a no-op).

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// A subscription to a dispatched-event stream.
///
/// Each subscription gets a copy of every event put through the transport it
/// was created from (broadcast semantics).
///
/// ## Usage Pattern
///
/// ```ignore
/// let subscription = dispatcher.subscribe();
///
/// loop {
///     match subscription.recv_timeout(Duration::from_secs(1)) {
///         Ok(event) => process(event)?,
///         Err(std::sync::mpsc::RecvTimeoutError::Timeout) => continue,  // Check for shutdown
///         Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,  // Transport closed
///     }
/// }
/// ```
///
/// ## Thread Safety
///
/// Subscriptions are designed for single-threaded consumption. Each subscription
/// should be used by one thread (or use a mutex/channel to distribute events to
/// multiple threads).
#[derive(Debug)]
pub struct Subscription<E> {
    receiver: Receiver<E>,
}

impl<E> Subscription<E> {
    pub fn new(receiver: Receiver<E>) -> Self {
        Self { receiver }
    }

    /// Block until the next event is available.
    pub fn recv(&self) -> Result<E, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive an event without blocking.
    pub fn try_recv(&self) -> Result<E, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for an event.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<E, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }
}

/// Domain-agnostic event dispatcher (outbound port).
///
/// The dispatcher sits between the domain service and event consumers:
///
/// ```text
/// Service → Repository (persist state) → Dispatcher (dispatch) → Consumers
/// ```
///
/// Events are dispatched **strictly after** the state change they describe has
/// been persisted. A dispatch failure therefore never means lost state - it
/// means persisted-but-not-notified, which the caller sees as an error result.
///
/// ## Error Handling
///
/// `dispatch()` can fail (transport down, channel closed, ...). The associated
/// `Error` type is opaque to the domain; callers stringify it for their own
/// error surface rather than matching on transport details.
///
/// ## Thread Safety
///
/// The trait requires `Send + Sync`, meaning implementations must be safe to
/// share across threads. Multiple threads can dispatch events concurrently.
pub trait EventDispatcher<E>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn dispatch(&self, event: E) -> Result<(), Self::Error>;
}

impl<E, D> EventDispatcher<E> for Arc<D>
where
    D: EventDispatcher<E> + ?Sized,
{
    type Error = D::Error;

    fn dispatch(&self, event: E) -> Result<(), Self::Error> {
        (**self).dispatch(event)
    }
}
