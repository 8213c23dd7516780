//! Audit records for quest state transitions.

use chrono::{DateTime, Utc};
use questline_core::actor::ActorId;
use uuid::Uuid;

/// Kind of state transition being recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditKind {
    /// A task's progress advanced after a condition pass.
    TaskContinued,
    /// A task reached its completion criterion.
    TaskCompleted,
    /// A quest completed (all tasks done).
    QuestCompleted,
    /// A quest failed its deadline.
    QuestFailedTimeout,
}

/// One audit record.
#[derive(Debug, Clone)]
pub struct AuditRecord {
    /// The actor whose state changed.
    pub actor: ActorId,
    /// The quest instance involved.
    pub quest_id: Uuid,
    /// The quest's template id (diagnostic).
    pub template_id: String,
    /// The task key, for task-level transitions.
    pub task_key: Option<String>,
    /// What happened.
    pub kind: AuditKind,
    /// When it happened.
    pub at: DateTime<Utc>,
}

/// Sink for audit records.
pub trait AuditSink: Send + Sync {
    /// Records one transition.
    fn record(&self, record: AuditRecord);
}

/// Default sink: structured log lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

impl AuditSink for TracingAuditSink {
    fn record(&self, record: AuditRecord) {
        tracing::info!(
            actor = %record.actor,
            quest = %record.quest_id,
            template = %record.template_id,
            task = record.task_key.as_deref(),
            kind = ?record.kind,
            "quest state transition"
        );
    }
}
