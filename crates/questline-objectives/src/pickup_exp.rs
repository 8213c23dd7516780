//! "pickup exp" — count experience collected from orbs.

use std::sync::Arc;

use questline_core::capability::Dependency;
use questline_engine::domain::countable::CountableObjective;
use questline_engine::domain::objective::ObjectiveType;
use serde_json::{Value, json};

use crate::events::{PLAYER_PICKUP_EXP, PlayerPickupExpEvent};

/// Completes once the counted experience reaches the goal. Conditions:
/// `exp` (orb must carry at least the configured amount) and `reason`
/// (orb spawn reason must match one of the configured names).
#[must_use]
pub fn pickup_exp() -> Arc<dyn ObjectiveType> {
    CountableObjective::new(
        "pickup exp",
        PLAYER_PICKUP_EXP,
        |event: &PlayerPickupExpEvent| Some(event.actor),
    )
    .dependency(Dependency::on("minecraft"))
    .condition("exp", |config: &Value, event: &PlayerPickupExpEvent| {
        config.as_u64().is_some_and(|min| event.amount >= min)
    })
    .condition("reason", |config: &Value, event: &PlayerPickupExpEvent| {
        match config {
            Value::String(reason) => reason.eq_ignore_ascii_case(&event.reason),
            Value::Array(reasons) => reasons.iter().any(|reason| {
                reason
                    .as_str()
                    .is_some_and(|reason| reason.eq_ignore_ascii_case(&event.reason))
            }),
            _ => false,
        }
    })
    .variable("exp", |event: &PlayerPickupExpEvent| json!(event.amount))
    .count(|event: &PlayerPickupExpEvent| event.amount)
    .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use questline_core::actor::ActorId;
    use std::collections::BTreeMap;

    fn event(amount: u64, reason: &str) -> PlayerPickupExpEvent {
        PlayerPickupExpEvent {
            actor: ActorId::new(),
            amount,
            reason: reason.to_owned(),
        }
    }

    #[test]
    fn test_exp_condition_is_a_minimum() {
        // Arrange
        let objective = pickup_exp();
        let mut config = BTreeMap::new();
        config.insert("exp".to_owned(), json!(10));

        // Act / Assert
        assert!(objective.conditions().evaluate(&config, &event(15, "MOB_KILL")));
        assert!(objective.conditions().evaluate(&config, &event(10, "MOB_KILL")));
        assert!(!objective.conditions().evaluate(&config, &event(9, "MOB_KILL")));
    }

    #[test]
    fn test_reason_condition_accepts_string_or_list() {
        // Arrange
        let objective = pickup_exp();
        let mut single = BTreeMap::new();
        single.insert("reason".to_owned(), json!("mob_kill"));
        let mut list = BTreeMap::new();
        list.insert("reason".to_owned(), json!(["BREEDING", "MOB_KILL"]));

        // Act / Assert
        assert!(objective.conditions().evaluate(&single, &event(1, "MOB_KILL")));
        assert!(objective.conditions().evaluate(&list, &event(1, "MOB_KILL")));
        assert!(!objective.conditions().evaluate(&list, &event(1, "FURNACE")));
    }

    #[test]
    fn test_exp_variable_reads_the_orb_amount() {
        // Arrange
        let objective = pickup_exp();

        // Act / Assert
        assert_eq!(
            objective.conditions().extract("exp", &event(7, "MOB_KILL")),
            Some(json!(7))
        );
    }
}
