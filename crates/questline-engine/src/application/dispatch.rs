//! The dispatch engine: event-to-task routing.
//!
//! One subscription per listening objective type, held for the process
//! lifetime. Per delivery: the `using` gate discards events for types no
//! loaded template references (O(1), before any actor lookup), then the
//! acting actor is extracted and their in-progress tasks routed to the
//! completion cascade — inline for synchronous types, detached via
//! `tokio::spawn` for types marked async.

use std::sync::Arc;

use questline_core::clock::Clock;
use questline_core::event::{EventBus, GameEvent};

use crate::domain::objective::ObjectiveType;
use crate::domain::profile::{ProfileHandle, ProfileProvider};

use super::audit::{AuditKind, AuditRecord, AuditSink, TracingAuditSink};
use super::cascade::{self, CascadeHooks, NoopHooks};
use super::registry::{ObjectiveRegistry, RegisteredObjective};

/// Routes domain events to in-progress tasks.
pub struct Dispatcher {
    registry: Arc<ObjectiveRegistry>,
    profiles: Arc<dyn ProfileProvider>,
    clock: Arc<dyn Clock>,
    hooks: Arc<dyn CascadeHooks>,
    audit: Arc<dyn AuditSink>,
}

impl Dispatcher {
    /// Creates a dispatcher with no-op hooks and the tracing audit sink.
    #[must_use]
    pub fn new(
        registry: Arc<ObjectiveRegistry>,
        profiles: Arc<dyn ProfileProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            registry,
            profiles,
            clock,
            hooks: Arc::new(NoopHooks),
            audit: Arc::new(TracingAuditSink),
        }
    }

    /// Replaces the cascade hooks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: Arc<dyn CascadeHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Subscribes one handler per listening objective type.
    ///
    /// Subscriptions are never added or removed as templates reload — only
    /// the `using` gate changes. The subscriptions keep the dispatcher
    /// alive for the lifetime of the bus.
    pub fn subscribe_all(self: Arc<Self>, bus: &dyn EventBus) {
        for entry in self.registry.listeners() {
            let objective = Arc::clone(entry.objective());
            let dispatcher = Arc::clone(&self);
            bus.subscribe(
                objective.event_type(),
                objective.priority(),
                objective.ignore_cancelled(),
                Arc::new(move |event| {
                    let dispatcher = Arc::clone(&dispatcher);
                    let entry = Arc::clone(&entry);
                    Box::pin(async move {
                        dispatcher.deliver(&entry, event).await;
                    })
                }),
            );
        }
    }

    /// Handles one event delivery for one objective type.
    ///
    /// All misses here (inactive type, no actor, no loaded profile) are
    /// silent discards — expected under normal event volume.
    pub async fn deliver(&self, entry: &Arc<RegisteredObjective>, event: Arc<dyn GameEvent>) {
        if !entry.is_using() {
            return;
        }
        let objective = Arc::clone(entry.objective());
        let Some(actor) = objective.extract_actor(event.as_ref()) else {
            return;
        };
        if !self.profiles.is_loaded(actor) {
            return;
        }
        let Some(profile) = self.profiles.profile(actor) else {
            return;
        };
        if objective.is_async() {
            // Fire-and-forget: no ordering guarantee relative to other
            // async routings; the completed signature and idempotent
            // completion checks make redundant delivery safe.
            let clock = Arc::clone(&self.clock);
            let hooks = Arc::clone(&self.hooks);
            let audit = Arc::clone(&self.audit);
            tokio::spawn(async move {
                route(
                    &objective,
                    profile,
                    event,
                    clock.as_ref(),
                    hooks.as_ref(),
                    audit.as_ref(),
                )
                .await;
            });
        } else {
            route(
                &objective,
                profile,
                event,
                self.clock.as_ref(),
                self.hooks.as_ref(),
                self.audit.as_ref(),
            )
            .await;
        }
    }
}

/// Routes all matching `(quest, task)` pairs of one actor to the cascade,
/// in profile-defined order.
///
/// The profile lock is taken only for the timeout pass and the index
/// computation; the cascade re-acquires it around its own state mutations
/// so condition awaits run unlocked.
async fn route(
    objective: &Arc<dyn ObjectiveType>,
    profile: ProfileHandle,
    event: Arc<dyn GameEvent>,
    clock: &dyn Clock,
    hooks: &dyn CascadeHooks,
    audit: &dyn AuditSink,
) {
    let now = clock.now();
    let pairs = {
        let mut guard = profile.lock().await;

        // Lazy timeout: a quest past its deadline fails here rather than
        // waiting for the next tick, so none of its tasks reach condition
        // evaluation.
        let actor = guard.actor;
        for quest in &mut guard.quests {
            if quest.is_active() && quest.is_timed_out(now) && quest.fail_timeout() {
                audit.record(AuditRecord {
                    actor,
                    quest_id: quest.id,
                    template_id: quest.template_id.clone(),
                    task_key: None,
                    kind: AuditKind::QuestFailedTimeout,
                    at: now,
                });
            }
        }

        guard.task_indices_for(objective.name())
    };

    for (quest_index, task_index) in pairs {
        cascade::handle_task(
            &profile,
            quest_index,
            task_index,
            event.as_ref(),
            hooks,
            audit,
            now,
        )
        .await;
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("registry", &self.registry)
            .finish()
    }
}
