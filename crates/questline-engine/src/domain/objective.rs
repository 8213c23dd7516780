//! The objective type contract.
//!
//! An objective type is a named, polymorphic unit: the event class it reacts
//! to, an actor extractor, a condition set, and lifecycle callbacks.
//! Concrete types are registered explicitly once at startup (see
//! `application::registry`).

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use questline_core::actor::ActorId;
use questline_core::capability::Dependency;
use questline_core::error::EngineError;
use questline_core::event::{EventPriority, GameEvent};

use super::conditions::ConditionSet;
use super::task::{Task, TaskConfig};

/// Contract every objective type satisfies.
///
/// Implementations are singletons per concrete kind, shared across all
/// tasks bound to them; all state lives in the [`Task`].
#[async_trait]
pub trait ObjectiveType: Send + Sync {
    /// Globally unique objective type name (registry key).
    fn name(&self) -> &str;

    /// Identifier of the domain event class this type listens for.
    fn event_type(&self) -> &'static str;

    /// Whether this type needs an event subscription at all. Tick-driven
    /// types return false.
    fn is_listener(&self) -> bool {
        true
    }

    /// Event subscription priority.
    fn priority(&self) -> EventPriority {
        EventPriority::Normal
    }

    /// Whether cancelled events are skipped for this subscription.
    fn ignore_cancelled(&self) -> bool {
        true
    }

    /// Whether routing runs detached from the event-delivery path.
    fn is_async(&self) -> bool {
        false
    }

    /// Optional host capability/version dependency, checked once at
    /// registration.
    fn dependency(&self) -> Option<Dependency> {
        None
    }

    /// Extracts the acting actor from an event; `None` discards the event.
    fn extract_actor(&self, event: &dyn GameEvent) -> Option<ActorId>;

    /// The condition set this type evaluates.
    fn conditions(&self) -> &ConditionSet;

    /// Evaluates the task's configured conditions against an event.
    ///
    /// Deliberately asynchronous: predicates may require further I/O, so
    /// callers must not assume synchronous completion. The default
    /// implementation AND-combines the condition set synchronously.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Condition`] when a predicate's own I/O fails;
    /// the caller treats that evaluation as unsatisfied.
    async fn check_condition(
        &self,
        config: &TaskConfig,
        event: &dyn GameEvent,
    ) -> Result<bool, EngineError> {
        Ok(self.conditions().evaluate(&config.conditions, event))
    }

    /// Advances task progress after a successful condition pass.
    fn on_continue(&self, task: &mut Task, event: &dyn GameEvent);

    /// Whether the task's own completion criterion holds.
    ///
    /// Must be pure and idempotent: it is re-run redundantly by both the
    /// event cascade and the tick sweep.
    fn is_completed(&self, task: &Task, now: DateTime<Utc>) -> bool;
}
