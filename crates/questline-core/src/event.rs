//! Domain event and event-bus abstractions.
//!
//! The game engine's event bus is an external collaborator: it must deliver
//! events sequentially and at-least-once per subscription. The engine only
//! ever *subscribes*; publication belongs to the host.

use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Trait that all domain (game) events implement.
///
/// Events are delivered type-erased; objective types downcast via
/// [`GameEvent::as_any`] to read their concrete payload.
pub trait GameEvent: Send + Sync + std::fmt::Debug {
    /// Returns the event type name (used for subscription routing).
    fn event_type(&self) -> &'static str;

    /// Upcast for downcasting to the concrete event type.
    fn as_any(&self) -> &dyn Any;

    /// Whether the host has cancelled this event.
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Subscription priority, in delivery order.
///
/// `Monitor` subscribers run last and must not mutate the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventPriority {
    /// Runs first.
    Lowest,
    /// Runs early.
    Low,
    /// Default priority.
    Normal,
    /// Runs late.
    High,
    /// Runs after `High`.
    Highest,
    /// Observes the final outcome; runs last.
    Monitor,
}

/// A boxed asynchronous event handler.
///
/// Handlers receive the event behind an `Arc` so async routing can detach
/// without copying the payload.
pub type EventHandler =
    Arc<dyn Fn(Arc<dyn GameEvent>) -> Pin<Box<dyn Future<Output = ()> + Send>> + Send + Sync>;

/// The subscription seam to the host event bus.
///
/// Contract: sequential, at-least-once delivery per subscription, in
/// priority order; subscriptions live for the lifetime of the process.
pub trait EventBus: Send + Sync {
    /// Subscribes a handler to one event type.
    ///
    /// When `ignore_cancelled` is true, events already cancelled by an
    /// earlier subscriber are not delivered to this handler.
    fn subscribe(
        &self,
        event_type: &'static str,
        priority: EventPriority,
        ignore_cancelled: bool,
        handler: EventHandler,
    );
}
