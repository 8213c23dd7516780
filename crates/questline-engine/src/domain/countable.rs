//! Countable objective types.
//!
//! Most built-in objective types are "do X n times": every condition pass
//! adds an event-derived amount to the task counter, and the task completes
//! once the counter reaches the template's goal. This builder lets a plugin
//! declare such a type without writing an `ObjectiveType` impl by hand.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use questline_core::actor::ActorId;
use questline_core::capability::Dependency;
use questline_core::event::{EventPriority, GameEvent};
use serde_json::Value;

use super::conditions::ConditionSet;
use super::objective::ObjectiveType;
use super::task::Task;

type ActorExtractor = Box<dyn Fn(&dyn GameEvent) -> Option<ActorId> + Send + Sync>;
type CountFn = Box<dyn Fn(&dyn GameEvent) -> u64 + Send + Sync>;

/// A declaratively-built countable objective type.
pub struct CountableObjective {
    name: String,
    event_type: &'static str,
    priority: EventPriority,
    ignore_cancelled: bool,
    asynchronous: bool,
    dependency: Option<Dependency>,
    actor: ActorExtractor,
    conditions: ConditionSet,
    count: CountFn,
}

impl CountableObjective {
    /// Starts a countable objective type reacting to events of type `E`.
    ///
    /// `actor` extracts the acting actor from the event; returning `None`
    /// discards the delivery. Each condition pass counts 1 unless
    /// [`Self::count`] overrides the amount.
    #[must_use]
    pub fn new<E, F>(name: impl Into<String>, event_type: &'static str, actor: F) -> Self
    where
        E: GameEvent + 'static,
        F: Fn(&E) -> Option<ActorId> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            event_type,
            priority: EventPriority::Normal,
            ignore_cancelled: true,
            asynchronous: false,
            dependency: None,
            actor: Box::new(move |event| {
                event.as_any().downcast_ref::<E>().and_then(&actor)
            }),
            conditions: ConditionSet::new(),
            count: Box::new(|_| 1),
        }
    }

    /// Declares a host capability/version dependency.
    #[must_use]
    pub fn dependency(mut self, dependency: Dependency) -> Self {
        self.dependency = Some(dependency);
        self
    }

    /// Overrides the subscription priority.
    #[must_use]
    pub fn priority(mut self, priority: EventPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets whether cancelled events are skipped (default true).
    #[must_use]
    pub fn ignore_cancelled(mut self, ignore: bool) -> Self {
        self.ignore_cancelled = ignore;
        self
    }

    /// Marks routing as detached from the event-delivery path.
    #[must_use]
    pub fn asynchronous(mut self) -> Self {
        self.asynchronous = true;
        self
    }

    /// Adds a named condition (see [`ConditionSet::condition`]).
    #[must_use]
    pub fn condition<E, F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        E: GameEvent + 'static,
        F: Fn(&Value, &E) -> bool + Send + Sync + 'static,
    {
        self.conditions = self.conditions.condition(name, predicate);
        self
    }

    /// Adds a named condition variable (see [`ConditionSet::variable`]).
    #[must_use]
    pub fn variable<E, F>(mut self, name: impl Into<String>, extractor: F) -> Self
    where
        E: GameEvent + 'static,
        F: Fn(&E) -> Value + Send + Sync + 'static,
    {
        self.conditions = self.conditions.variable(name, extractor);
        self
    }

    /// Overrides the per-event count amount (default 1 per pass).
    #[must_use]
    pub fn count<E, F>(mut self, count: F) -> Self
    where
        E: GameEvent + 'static,
        F: Fn(&E) -> u64 + Send + Sync + 'static,
    {
        self.count = Box::new(move |event| {
            event.as_any().downcast_ref::<E>().map_or(0, &count)
        });
        self
    }

    /// Finishes the declaration.
    #[must_use]
    pub fn build(self) -> Arc<dyn ObjectiveType> {
        Arc::new(self)
    }
}

impl ObjectiveType for CountableObjective {
    fn name(&self) -> &str {
        &self.name
    }

    fn event_type(&self) -> &'static str {
        self.event_type
    }

    fn priority(&self) -> EventPriority {
        self.priority
    }

    fn ignore_cancelled(&self) -> bool {
        self.ignore_cancelled
    }

    fn is_async(&self) -> bool {
        self.asynchronous
    }

    fn dependency(&self) -> Option<Dependency> {
        self.dependency.clone()
    }

    fn extract_actor(&self, event: &dyn GameEvent) -> Option<ActorId> {
        (self.actor)(event)
    }

    fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }

    fn on_continue(&self, task: &mut Task, event: &dyn GameEvent) {
        task.progress.count += (self.count)(event);
    }

    fn is_completed(&self, task: &Task, _now: DateTime<Utc>) -> bool {
        task.progress.count >= task.config.goal.amount
    }
}

impl std::fmt::Debug for CountableObjective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CountableObjective")
            .field("name", &self.name)
            .field("event_type", &self.event_type)
            .field("asynchronous", &self.asynchronous)
            .field("dependency", &self.dependency)
            .finish()
    }
}
