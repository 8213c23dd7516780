//! Quests: an actor's instantiation of a template, owning ordered tasks.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::task::Task;

/// Quest lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestStatus {
    /// In progress.
    Active,
    /// All tasks completed. Terminal.
    Completed,
    /// Deadline passed while active. Terminal.
    FailedTimeout,
}

/// An actor's quest instance.
#[derive(Debug)]
pub struct Quest {
    /// Quest instance identifier.
    pub id: Uuid,
    /// Template this quest was instantiated from (diagnostic).
    pub template_id: String,
    /// Ordered tasks.
    pub tasks: Vec<Task>,
    /// When the quest was instantiated.
    pub started_at: DateTime<Utc>,
    /// Optional deadline; past it the quest fails on the next check.
    pub deadline: Option<DateTime<Utc>>,
    status: QuestStatus,
}

impl Quest {
    /// Creates an active quest.
    #[must_use]
    pub fn new(
        template_id: impl Into<String>,
        tasks: Vec<Task>,
        started_at: DateTime<Utc>,
        deadline: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            template_id: template_id.into(),
            tasks,
            started_at,
            deadline,
            status: QuestStatus::Active,
        }
    }

    /// Current lifecycle status.
    #[must_use]
    pub fn status(&self) -> QuestStatus {
        self.status
    }

    /// Whether the quest is still in progress.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == QuestStatus::Active
    }

    /// Whether the deadline has passed.
    #[must_use]
    pub fn is_timed_out(&self, now: DateTime<Utc>) -> bool {
        self.deadline.is_some_and(|deadline| now > deadline)
    }

    /// Transitions an active quest to failed-timeout.
    ///
    /// Returns true only on the transition; terminal states are never left.
    pub fn fail_timeout(&mut self) -> bool {
        if self.status == QuestStatus::Active {
            self.status = QuestStatus::FailedTimeout;
            return true;
        }
        false
    }

    /// Transitions an active quest to completed iff every task is completed.
    ///
    /// Idempotent: re-checking an already-completed (or failed) quest is a
    /// no-op. Returns true only on the transition.
    pub fn check_complete(&mut self) -> bool {
        if self.status == QuestStatus::Active && self.tasks.iter().all(Task::is_completed) {
            self.status = QuestStatus::Completed;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::countable::CountableObjective;
    use crate::domain::task::TaskConfig;
    use chrono::TimeZone;
    use questline_core::actor::ActorId;
    use questline_core::event::GameEvent;

    #[derive(Debug)]
    struct Noop;

    impl GameEvent for Noop {
        fn event_type(&self) -> &'static str {
            "test.noop"
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    fn quest_with_tasks(completed: &[bool]) -> Quest {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let objective =
            CountableObjective::new("noop", "test.noop", |_: &Noop| Some(ActorId::new())).build();
        let tasks = completed
            .iter()
            .enumerate()
            .map(|(i, done)| {
                let mut task = Task::new(
                    i.to_string(),
                    std::sync::Arc::clone(&objective),
                    TaskConfig::default(),
                    now,
                );
                task.progress.completed = *done;
                task
            })
            .collect();
        Quest::new("tpl", tasks, now, None)
    }

    #[test]
    fn test_quest_completes_only_when_all_tasks_completed() {
        // Arrange
        let mut partial = quest_with_tasks(&[true, false]);
        let mut full = quest_with_tasks(&[true, true]);

        // Act / Assert
        assert!(!partial.check_complete());
        assert_eq!(partial.status(), QuestStatus::Active);
        assert!(full.check_complete());
        assert_eq!(full.status(), QuestStatus::Completed);
        // Idempotent: second check is a no-op.
        assert!(!full.check_complete());
    }

    #[test]
    fn test_fail_timeout_only_from_active() {
        // Arrange
        let mut quest = quest_with_tasks(&[true, true]);
        assert!(quest.check_complete());

        // Act / Assert — completed is terminal.
        assert!(!quest.fail_timeout());
        assert_eq!(quest.status(), QuestStatus::Completed);
    }

    #[test]
    fn test_failed_timeout_never_completes() {
        // Arrange
        let mut quest = quest_with_tasks(&[true, true]);
        assert!(quest.fail_timeout());

        // Act / Assert
        assert!(!quest.check_complete());
        assert_eq!(quest.status(), QuestStatus::FailedTimeout);
    }

    #[test]
    fn test_is_timed_out_uses_deadline() {
        // Arrange
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let mut quest = quest_with_tasks(&[false]);
        quest.deadline = Some(now);

        // Act / Assert
        assert!(!quest.is_timed_out(now));
        assert!(quest.is_timed_out(now + chrono::Duration::seconds(1)));
    }
}
