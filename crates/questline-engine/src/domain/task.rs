//! Tasks: one actor's progress against one objective type within one quest.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::objective::ObjectiveType;

/// Completion goal for a countable task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    /// Progress count required to complete the task.
    pub amount: u64,
}

impl Default for Goal {
    fn default() -> Self {
        Self { amount: 1 }
    }
}

/// Per-task configuration taken from the template's task entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskConfig {
    /// Condition name → config value, selecting which of the objective
    /// type's conditions apply and with what parameters.
    #[serde(default)]
    pub conditions: BTreeMap<String, Value>,
    /// The completion goal.
    #[serde(default)]
    pub goal: Goal,
}

/// Mutable per-actor progress state.
#[derive(Debug, Clone, Default)]
pub struct TaskProgress {
    /// Accumulated count for countable objectives.
    pub count: u64,
    /// Free-form progress data for objective types that need more than a
    /// counter.
    pub data: BTreeMap<String, Value>,
    /// The completed signature: once set, no further condition evaluation
    /// may change this task's progress.
    pub completed: bool,
}

/// One actor's progress instance against one objective type within one
/// quest.
pub struct Task {
    /// The task's key within its template (ordering-significant).
    pub key: String,
    /// The objective type this task is bound to.
    pub objective: Arc<dyn ObjectiveType>,
    /// Condition configuration from the template.
    pub config: TaskConfig,
    /// Mutable progress state.
    pub progress: TaskProgress,
    /// When the enclosing quest was instantiated for the actor.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a fresh task with zero progress.
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        objective: Arc<dyn ObjectiveType>,
        config: TaskConfig,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            key: key.into(),
            objective,
            config,
            progress: TaskProgress::default(),
            created_at,
        }
    }

    /// Whether the completed signature is set.
    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.progress.completed
    }

    /// Runs the objective type's completion check and sets the completed
    /// signature if it passes.
    ///
    /// Idempotent: returns true only on the transition. Safe to call
    /// redundantly from both the event cascade and the tick sweep.
    pub fn check_complete(&mut self, now: DateTime<Utc>) -> bool {
        if self.progress.completed {
            return false;
        }
        let objective = Arc::clone(&self.objective);
        if objective.is_completed(self, now) {
            self.progress.completed = true;
            return true;
        }
        false
    }
}

impl std::fmt::Debug for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("key", &self.key)
            .field("objective", &self.objective.name())
            .field("config", &self.config)
            .field("progress", &self.progress)
            .field("created_at", &self.created_at)
            .finish()
    }
}
