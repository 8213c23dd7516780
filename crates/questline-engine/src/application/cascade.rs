//! The completion state machine.
//!
//! Per routed `(profile, task, quest, event)`: completed-signature guard →
//! asynchronous condition evaluation → cancellable pre-continuation hook →
//! progress continuation → audit → observational post-continuation hook →
//! per-task completion check → cascading quest completion check.
//!
//! The profile lock is held only around state reads and mutations, never
//! across the condition await: the task's config is snapshotted under the
//! lock, the lock is released while the condition resolves, and the guards
//! are re-checked after re-acquiring. A stuck predicate therefore stalls
//! only its own routing, not the tick sweep or other routings for the same
//! actor.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use questline_core::event::GameEvent;

use crate::domain::profile::ProfileHandle;

use super::audit::{AuditKind, AuditRecord, AuditSink};

/// Identifies the cascade step being hooked.
#[derive(Debug, Clone)]
pub struct CascadeContext {
    /// The acting actor.
    pub actor: questline_core::actor::ActorId,
    /// The quest instance.
    pub quest_id: uuid::Uuid,
    /// The quest's template id.
    pub template_id: String,
    /// The task key within the template.
    pub task_key: String,
    /// The objective type name.
    pub objective: String,
}

/// Extension points around the continuation step.
///
/// `before_continue` is the sole cancellation point in the cascade;
/// `after_continue` is purely observational.
pub trait CascadeHooks: Send + Sync {
    /// Runs before progress is advanced; returning false cancels the
    /// cascade for this routing, leaving task state unchanged.
    fn before_continue(&self, context: &CascadeContext) -> bool {
        let _ = context;
        true
    }

    /// Runs after progress has advanced.
    fn after_continue(&self, context: &CascadeContext) {
        let _ = context;
    }
}

/// Hooks that do nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHooks;

impl CascadeHooks for NoopHooks {}

/// Runs the cascade for one routed task.
///
/// Re-acquiring the lock after the condition resolves means other routings
/// may have advanced the same task in between; the completed-signature and
/// active-quest guards are re-checked on re-entry, and the completion
/// checks themselves are idempotent, so redundant invocations are safe.
pub(crate) async fn handle_task(
    profile: &ProfileHandle,
    quest_index: usize,
    task_index: usize,
    event: &dyn GameEvent,
    hooks: &dyn CascadeHooks,
    audit: &dyn AuditSink,
    now: DateTime<Utc>,
) {
    // Snapshot everything the condition needs, then release the lock.
    let (objective, config, actor, quest_id, template_id, task_key) = {
        let guard = profile.lock().await;
        let quest = &guard.quests[quest_index];
        // Tasks of quests that left the active state earlier in this
        // routing batch never reach condition evaluation.
        if !quest.is_active() {
            return;
        }
        let task = &quest.tasks[task_index];
        // Completed signature: guards against duplicate firing after
        // completion, e.g. from overlapping async routings.
        if task.is_completed() {
            return;
        }
        (
            Arc::clone(&task.objective),
            task.config.clone(),
            guard.actor,
            quest.id,
            quest.template_id.clone(),
            task.key.clone(),
        )
    };

    let passed = match objective.check_condition(&config, event).await {
        Ok(passed) => passed,
        Err(error) => {
            // Per-task error boundary: a failing predicate counts as
            // unsatisfied and must not abort routing for other tasks.
            tracing::warn!(
                objective = objective.name(),
                task = %task_key,
                %error,
                "condition evaluation failed"
            );
            false
        }
    };
    if !passed {
        return;
    }

    let context = CascadeContext {
        actor,
        quest_id,
        template_id: template_id.clone(),
        task_key: task_key.clone(),
        objective: objective.name().to_owned(),
    };
    if !hooks.before_continue(&context) {
        return;
    }

    // Re-entry: the quest or task may have reached a terminal state while
    // the lock was released.
    let mut guard = profile.lock().await;
    let quest = &mut guard.quests[quest_index];
    if !quest.is_active() {
        return;
    }
    let task = &mut quest.tasks[task_index];
    if task.is_completed() {
        return;
    }

    objective.on_continue(task, event);
    audit.record(AuditRecord {
        actor,
        quest_id,
        template_id: template_id.clone(),
        task_key: Some(task_key.clone()),
        kind: AuditKind::TaskContinued,
        at: now,
    });
    hooks.after_continue(&context);

    if task.check_complete(now) {
        audit.record(AuditRecord {
            actor,
            quest_id,
            template_id: template_id.clone(),
            task_key: Some(task_key),
            kind: AuditKind::TaskCompleted,
            at: now,
        });
    }
    if quest.check_complete() {
        audit.record(AuditRecord {
            actor,
            quest_id,
            template_id,
            task_key: None,
            kind: AuditKind::QuestCompleted,
            at: now,
        });
    }
}
