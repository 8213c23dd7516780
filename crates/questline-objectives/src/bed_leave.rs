//! "bed leave" — count bed-leave events.

use std::sync::Arc;

use questline_core::capability::Dependency;
use questline_engine::domain::countable::CountableObjective;
use questline_engine::domain::objective::ObjectiveType;
use serde_json::Value;

use crate::events::{PLAYER_BED_LEAVE, PlayerBedLeaveEvent};

/// Completes once the actor has left a bed the configured number of times.
/// Condition `bed` restricts which bed block counts.
#[must_use]
pub fn bed_leave() -> Arc<dyn ObjectiveType> {
    CountableObjective::new(
        "bed leave",
        PLAYER_BED_LEAVE,
        |event: &PlayerBedLeaveEvent| Some(event.actor),
    )
    .dependency(Dependency::on("minecraft"))
    .condition("bed", |config: &Value, event: &PlayerBedLeaveEvent| {
        config.as_str().is_some_and(|bed| bed == event.bed)
    })
    .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use questline_core::actor::ActorId;
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_bed_condition_matches_block_identifier() {
        // Arrange
        let objective = bed_leave();
        let mut config = BTreeMap::new();
        config.insert("bed".to_owned(), json!("red_bed"));
        let event = PlayerBedLeaveEvent {
            actor: ActorId::new(),
            bed: "red_bed".to_owned(),
        };

        // Act / Assert
        assert!(objective.conditions().evaluate(&config, &event));
        let other = PlayerBedLeaveEvent {
            bed: "white_bed".to_owned(),
            ..event
        };
        assert!(!objective.conditions().evaluate(&config, &other));
    }
}
