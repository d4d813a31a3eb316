//! In-memory event dispatcher for tests/dev.

use std::sync::{Mutex, mpsc};

use crate::dispatcher::{EventDispatcher, Subscription};

#[derive(Debug)]
pub enum InMemoryDispatchError {
    /// Dispatch failed due to internal lock poisoning.
    Poisoned,
}

/// In-memory fan-out dispatcher.
///
/// - No IO / no async
/// - Best-effort fan-out
/// - At-least-once acceptable (subscribers must be idempotent)
#[derive(Debug)]
pub struct InMemoryDispatcher<E> {
    subscribers: Mutex<Vec<mpsc::Sender<E>>>,
}

impl<E> InMemoryDispatcher<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber; it receives every event dispatched from now on.
    pub fn subscribe(&self) -> Subscription<E> {
        let (tx, rx) = mpsc::channel();

        // If the lock is poisoned, we still return a subscription;
        // it just won't receive events until the process restarts.
        if let Ok(mut subs) = self.subscribers.lock() {
            subs.push(tx);
        }

        Subscription::new(rx)
    }
}

impl<E> Default for InMemoryDispatcher<E> {
    fn default() -> Self {
        Self {
            subscribers: Mutex::new(Vec::new()),
        }
    }
}

impl<E> EventDispatcher<E> for InMemoryDispatcher<E>
where
    E: Clone + Send + 'static,
{
    type Error = InMemoryDispatchError;

    fn dispatch(&self, event: E) -> Result<(), Self::Error> {
        let mut subs = self
            .subscribers
            .lock()
            .map_err(|_| InMemoryDispatchError::Poisoned)?;

        // Drop any dead subscribers while fanning out.
        subs.retain(|tx| tx.send(event.clone()).is_ok());

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderflow_core::OrderId;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct OrderTouched {
        order_id: OrderId,
        seq: u32,
    }

    fn touched(seq: u32) -> OrderTouched {
        OrderTouched {
            order_id: OrderId::new(),
            seq,
        }
    }

    #[test]
    fn every_subscriber_receives_each_event() {
        let dispatcher = InMemoryDispatcher::new();
        let first = dispatcher.subscribe();
        let second = dispatcher.subscribe();

        let event = touched(1);
        dispatcher.dispatch(event.clone()).unwrap();

        assert_eq!(first.try_recv().unwrap(), event);
        assert_eq!(second.try_recv().unwrap(), event);
    }

    #[test]
    fn events_arrive_in_dispatch_order() {
        let dispatcher = InMemoryDispatcher::new();
        let sub = dispatcher.subscribe();

        for seq in 1..=3 {
            dispatcher.dispatch(touched(seq)).unwrap();
        }

        assert_eq!(sub.try_recv().unwrap().seq, 1);
        assert_eq!(sub.try_recv().unwrap().seq, 2);
        assert_eq!(sub.try_recv().unwrap().seq, 3);
    }

    #[test]
    fn dropped_subscribers_are_pruned() {
        let dispatcher = InMemoryDispatcher::new();
        let sub = dispatcher.subscribe();
        drop(sub);

        dispatcher.dispatch(touched(1)).unwrap();

        assert!(dispatcher.subscribers.lock().unwrap().is_empty());
    }

    #[test]
    fn dispatch_without_subscribers_is_ok() {
        let dispatcher = InMemoryDispatcher::new();
        assert!(dispatcher.dispatch(touched(1)).is_ok());
    }
}
