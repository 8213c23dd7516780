//! The tick scheduler: a fixed-period sweep independent of domain events.
//!
//! Per loaded profile: fail any active quest past its deadline, otherwise
//! re-run the per-task and quest-level completion checks. The checks are the
//! same idempotent primitives the event cascade uses, so running them
//! redundantly from both triggers is always safe — sweeping twice with no
//! intervening events changes nothing the second time.

use std::sync::Arc;
use std::time::Duration;

use questline_core::clock::Clock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::domain::profile::ProfileProvider;

use super::audit::{AuditKind, AuditRecord, AuditSink, TracingAuditSink};

/// Periodic quest state re-validation.
pub struct TickScheduler {
    profiles: Arc<dyn ProfileProvider>,
    clock: Arc<dyn Clock>,
    audit: Arc<dyn AuditSink>,
}

impl TickScheduler {
    /// Creates a scheduler with the tracing audit sink.
    #[must_use]
    pub fn new(profiles: Arc<dyn ProfileProvider>, clock: Arc<dyn Clock>) -> Self {
        Self {
            profiles,
            clock,
            audit: Arc::new(TracingAuditSink),
        }
    }

    /// Replaces the audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Arc<dyn AuditSink>) -> Self {
        self.audit = audit;
        self
    }

    /// Runs one sweep over every loaded profile.
    ///
    /// Covers objective types with no event source (time- or state-based
    /// completion) and quest deadlines.
    pub async fn run_sweep(&self) {
        for handle in self.profiles.loaded_profiles() {
            let mut profile = handle.lock().await;
            let now = self.clock.now();
            let actor = profile.actor;
            for quest in &mut profile.quests {
                if !quest.is_active() {
                    continue;
                }
                if quest.is_timed_out(now) {
                    if quest.fail_timeout() {
                        self.audit.record(AuditRecord {
                            actor,
                            quest_id: quest.id,
                            template_id: quest.template_id.clone(),
                            task_key: None,
                            kind: AuditKind::QuestFailedTimeout,
                            at: now,
                        });
                    }
                    continue;
                }
                for task in &mut quest.tasks {
                    if task.check_complete(now) {
                        self.audit.record(AuditRecord {
                            actor,
                            quest_id: quest.id,
                            template_id: quest.template_id.clone(),
                            task_key: Some(task.key.clone()),
                            kind: AuditKind::TaskCompleted,
                            at: now,
                        });
                    }
                }
                if quest.check_complete() {
                    self.audit.record(AuditRecord {
                        actor,
                        quest_id: quest.id,
                        template_id: quest.template_id.clone(),
                        task_key: None,
                        kind: AuditKind::QuestCompleted,
                        at: now,
                    });
                }
            }
        }
    }

    /// Spawns the sweep on a fixed period until the handle is aborted.
    pub fn spawn(self: Arc<Self>, period: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                interval.tick().await;
                self.run_sweep().await;
            }
        })
    }
}

impl std::fmt::Debug for TickScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TickScheduler").finish_non_exhaustive()
    }
}
