//! In-process event bus.
//!
//! A reference implementation of the `EventBus` contract for the daemon and
//! tests: sequential delivery per publication, priority-ordered, honoring
//! the cancelled-event policy. A production game server may supply its own
//! bus at the same seam.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use questline_core::event::{EventBus, EventHandler, EventPriority, GameEvent};

struct Subscription {
    priority: EventPriority,
    ignore_cancelled: bool,
    handler: EventHandler,
}

/// Sequential, priority-ordered in-process bus.
#[derive(Default)]
pub struct InProcessEventBus {
    subscriptions: RwLock<HashMap<&'static str, Vec<Subscription>>>,
}

impl InProcessEventBus {
    /// Creates an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delivers one event to all subscribers of its type, in priority
    /// order, awaiting each handler before the next (sequential delivery).
    pub async fn publish(&self, event: Arc<dyn GameEvent>) {
        let handlers: Vec<(bool, EventHandler)> = {
            let subscriptions = self
                .subscriptions
                .read()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            subscriptions
                .get(event.event_type())
                .map(|subs| {
                    subs.iter()
                        .map(|sub| (sub.ignore_cancelled, Arc::clone(&sub.handler)))
                        .collect()
                })
                .unwrap_or_default()
        };
        for (ignore_cancelled, handler) in handlers {
            if ignore_cancelled && event.is_cancelled() {
                continue;
            }
            handler(Arc::clone(&event)).await;
        }
    }
}

impl EventBus for InProcessEventBus {
    fn subscribe(
        &self,
        event_type: &'static str,
        priority: EventPriority,
        ignore_cancelled: bool,
        handler: EventHandler,
    ) {
        let mut subscriptions = self
            .subscriptions
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let subs = subscriptions.entry(event_type).or_default();
        subs.push(Subscription {
            priority,
            ignore_cancelled,
            handler,
        });
        // Stable sort keeps registration order within a priority.
        subs.sort_by_key(|sub| sub.priority);
    }
}

impl std::fmt::Debug for InProcessEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InProcessEventBus").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Debug)]
    struct Ping {
        cancelled: bool,
    }

    impl GameEvent for Ping {
        fn event_type(&self) -> &'static str {
            "test.ping"
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }

        fn is_cancelled(&self) -> bool {
            self.cancelled
        }
    }

    fn recording_handler(log: Arc<Mutex<Vec<&'static str>>>, tag: &'static str) -> EventHandler {
        Arc::new(move |_event| {
            let log = Arc::clone(&log);
            Box::pin(async move {
                log.lock().unwrap().push(tag);
            })
        })
    }

    #[tokio::test]
    async fn test_publish_delivers_in_priority_order() {
        // Arrange
        let bus = InProcessEventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        bus.subscribe(
            "test.ping",
            EventPriority::Monitor,
            true,
            recording_handler(Arc::clone(&log), "monitor"),
        );
        bus.subscribe(
            "test.ping",
            EventPriority::Lowest,
            true,
            recording_handler(Arc::clone(&log), "lowest"),
        );
        bus.subscribe(
            "test.ping",
            EventPriority::Normal,
            true,
            recording_handler(Arc::clone(&log), "normal"),
        );

        // Act
        bus.publish(Arc::new(Ping { cancelled: false })).await;

        // Assert
        assert_eq!(*log.lock().unwrap(), vec!["lowest", "normal", "monitor"]);
    }

    #[tokio::test]
    async fn test_publish_skips_cancelled_for_ignoring_subscribers() {
        // Arrange
        let bus = InProcessEventBus::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        bus.subscribe(
            "test.ping",
            EventPriority::Normal,
            true,
            recording_handler(Arc::clone(&log), "ignoring"),
        );
        bus.subscribe(
            "test.ping",
            EventPriority::Normal,
            false,
            recording_handler(Arc::clone(&log), "accepting"),
        );

        // Act
        bus.publish(Arc::new(Ping { cancelled: true })).await;

        // Assert
        assert_eq!(*log.lock().unwrap(), vec!["accepting"]);
    }
}
