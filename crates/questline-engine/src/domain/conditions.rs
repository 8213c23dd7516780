//! Condition sets: named predicates and variable extractors per objective
//! type.
//!
//! A task's template config selects which conditions apply by name; the set
//! AND-combines exactly those. Predicates are written against the concrete
//! event type and type-erased here — a predicate delivered an event of the
//! wrong type evaluates to false.

use std::collections::BTreeMap;

use questline_core::event::GameEvent;
use serde_json::Value;

type Predicate = Box<dyn Fn(&Value, &dyn GameEvent) -> bool + Send + Sync>;
type Extractor = Box<dyn Fn(&dyn GameEvent) -> Option<Value> + Send + Sync>;

/// Named boolean predicates and variable extractors for one objective type.
#[derive(Default)]
pub struct ConditionSet {
    predicates: BTreeMap<String, Predicate>,
    variables: BTreeMap<String, Extractor>,
}

impl ConditionSet {
    /// Creates an empty condition set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named predicate over the concrete event type `E`.
    ///
    /// The predicate receives the condition's config value from the task's
    /// template entry. Names are unique per set; re-adding a name replaces
    /// the previous predicate.
    #[must_use]
    pub fn condition<E, F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        E: GameEvent + 'static,
        F: Fn(&Value, &E) -> bool + Send + Sync + 'static,
    {
        self.predicates.insert(
            name.into(),
            Box::new(move |config, event| {
                event
                    .as_any()
                    .downcast_ref::<E>()
                    .is_some_and(|event| predicate(config, event))
            }),
        );
        self
    }

    /// Adds a named variable extractor over the concrete event type `E`.
    #[must_use]
    pub fn variable<E, F>(mut self, name: impl Into<String>, extractor: F) -> Self
    where
        E: GameEvent + 'static,
        F: Fn(&E) -> Value + Send + Sync + 'static,
    {
        self.variables.insert(
            name.into(),
            Box::new(move |event| event.as_any().downcast_ref::<E>().map(&extractor)),
        );
        self
    }

    /// Evaluates the conditions named in `config` against `event`.
    ///
    /// All named conditions must hold. Config keys with no registered
    /// predicate are ignored (they belong to other layers of the template,
    /// not to this objective type).
    #[must_use]
    pub fn evaluate(&self, config: &BTreeMap<String, Value>, event: &dyn GameEvent) -> bool {
        config.iter().all(|(name, value)| {
            self.predicates
                .get(name)
                .is_none_or(|predicate| predicate(value, event))
        })
    }

    /// Extracts the named variable from `event`, if registered and the event
    /// type matches.
    #[must_use]
    pub fn extract(&self, name: &str, event: &dyn GameEvent) -> Option<Value> {
        self.variables.get(name).and_then(|extract| extract(event))
    }
}

impl std::fmt::Debug for ConditionSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConditionSet")
            .field("predicates", &self.predicates.keys())
            .field("variables", &self.variables.keys())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug)]
    struct Pickup {
        amount: u64,
    }

    impl GameEvent for Pickup {
        fn event_type(&self) -> &'static str {
            "test.pickup"
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    #[derive(Debug)]
    struct Other;

    impl GameEvent for Other {
        fn event_type(&self) -> &'static str {
            "test.other"
        }

        fn as_any(&self) -> &dyn std::any::Any {
            self
        }
    }

    fn exp_set() -> ConditionSet {
        ConditionSet::new()
            .condition("exp", |config: &Value, event: &Pickup| {
                config.as_u64().is_some_and(|min| event.amount >= min)
            })
            .variable("exp", |event: &Pickup| json!(event.amount))
    }

    #[test]
    fn test_evaluate_ands_named_conditions() {
        // Arrange
        let set = exp_set();
        let mut config = BTreeMap::new();
        config.insert("exp".to_owned(), json!(10));

        // Act / Assert
        assert!(set.evaluate(&config, &Pickup { amount: 15 }));
        assert!(!set.evaluate(&config, &Pickup { amount: 5 }));
    }

    #[test]
    fn test_evaluate_ignores_unregistered_config_keys() {
        // Arrange
        let set = exp_set();
        let mut config = BTreeMap::new();
        config.insert("unrelated".to_owned(), json!("x"));

        // Act / Assert
        assert!(set.evaluate(&config, &Pickup { amount: 1 }));
    }

    #[test]
    fn test_wrong_event_type_fails_the_predicate() {
        // Arrange
        let set = exp_set();
        let mut config = BTreeMap::new();
        config.insert("exp".to_owned(), json!(0));

        // Act / Assert
        assert!(!set.evaluate(&config, &Other));
        assert_eq!(set.extract("exp", &Other), None);
    }

    #[test]
    fn test_extract_variable() {
        // Arrange
        let set = exp_set();

        // Act / Assert
        assert_eq!(set.extract("exp", &Pickup { amount: 7 }), Some(json!(7)));
        assert_eq!(set.extract("missing", &Pickup { amount: 7 }), None);
    }
}
