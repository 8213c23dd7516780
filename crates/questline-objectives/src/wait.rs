//! "wait" — a tick-driven objective with no event source.
//!
//! Completes once the task has existed for the configured number of
//! seconds. Nothing routes events to it; only the tick sweep's completion
//! re-check can finish it.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use questline_core::actor::ActorId;
use questline_core::event::GameEvent;
use questline_engine::domain::conditions::ConditionSet;
use questline_engine::domain::objective::ObjectiveType;
use questline_engine::domain::task::Task;

struct Wait {
    conditions: ConditionSet,
}

impl ObjectiveType for Wait {
    fn name(&self) -> &str {
        "wait"
    }

    fn event_type(&self) -> &'static str {
        "questline.none"
    }

    fn is_listener(&self) -> bool {
        false
    }

    fn extract_actor(&self, _event: &dyn GameEvent) -> Option<ActorId> {
        None
    }

    fn conditions(&self) -> &ConditionSet {
        &self.conditions
    }

    fn on_continue(&self, _task: &mut Task, _event: &dyn GameEvent) {}

    fn is_completed(&self, task: &Task, now: DateTime<Utc>) -> bool {
        let seconds = task
            .config
            .conditions
            .get("duration")
            .and_then(serde_json::Value::as_i64)
            .unwrap_or(0);
        now - task.created_at >= chrono::Duration::seconds(seconds)
    }
}

/// Completes after the task's configured `duration` (seconds) has elapsed.
#[must_use]
pub fn wait() -> Arc<dyn ObjectiveType> {
    Arc::new(Wait {
        conditions: ConditionSet::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use questline_engine::domain::task::TaskConfig;
    use serde_json::json;

    #[test]
    fn test_wait_completes_once_duration_elapsed() {
        // Arrange
        let start = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let mut config = TaskConfig::default();
        config.conditions.insert("duration".to_owned(), json!(60));
        let task = Task::new("0", wait(), config, start);

        // Act / Assert
        assert!(!wait().is_completed(&task, start + chrono::Duration::seconds(59)));
        assert!(wait().is_completed(&task, start + chrono::Duration::seconds(60)));
    }
}
