//! The objective registry and its active-set cache.
//!
//! Process-wide table of objective type name → objective type, populated
//! explicitly at startup and read thereafter. Event listeners stay
//! subscribed for the process lifetime; the per-type `using` flag is the
//! activation cache that gates their work, recomputed on every template
//! reload. The flag is an atomic so the event path never takes the registry
//! lock.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use questline_core::capability::HostCapabilities;

use crate::domain::objective::ObjectiveType;

/// A registered objective type plus its activation flag.
pub struct RegisteredObjective {
    objective: Arc<dyn ObjectiveType>,
    using: AtomicBool,
}

impl RegisteredObjective {
    /// The objective type.
    #[must_use]
    pub fn objective(&self) -> &Arc<dyn ObjectiveType> {
        &self.objective
    }

    /// Whether any loaded template currently references this type.
    #[must_use]
    pub fn is_using(&self) -> bool {
        self.using.load(Ordering::Relaxed)
    }
}

impl std::fmt::Debug for RegisteredObjective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredObjective")
            .field("name", &self.objective.name())
            .field("using", &self.is_using())
            .finish()
    }
}

/// Process-wide objective type table.
#[derive(Default)]
pub struct ObjectiveRegistry {
    entries: RwLock<HashMap<String, Arc<RegisteredObjective>>>,
}

impl ObjectiveRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an objective type, gated on its host dependency.
    ///
    /// A declared capability absent from the host, or a host version below
    /// the minimum, skips registration silently (optional integrations are
    /// expected to be absent). Registration is idempotent: re-registering a
    /// name overwrites the previous entry (last write wins).
    ///
    /// Returns whether the type was registered.
    pub fn register(
        &self,
        objective: Arc<dyn ObjectiveType>,
        host: &dyn HostCapabilities,
    ) -> bool {
        if let Some(dependency) = objective.dependency() {
            if !host.satisfies(&dependency) {
                tracing::debug!(
                    objective = objective.name(),
                    capability = dependency.capability,
                    "skipping objective type, host dependency unsatisfied"
                );
                return false;
            }
        }
        let entry = Arc::new(RegisteredObjective {
            objective,
            using: AtomicBool::new(false),
        });
        let mut entries = self.entries.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        entries.insert(entry.objective.name().to_owned(), entry);
        true
    }

    /// Looks up a registered type by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<RegisteredObjective>> {
        self.entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All registered types that need an event subscription.
    #[must_use]
    pub fn listeners(&self) -> Vec<Arc<RegisteredObjective>> {
        self.entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .values()
            .filter(|entry| entry.objective.is_listener())
            .cloned()
            .collect()
    }

    /// Recomputes every `using` flag from the set of objective type names
    /// the loaded templates reference.
    ///
    /// Must run after every template reload; stale flags never survive.
    pub fn recompute_active_set<'a, I>(&self, referenced: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let entries = self
            .entries
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        for entry in entries.values() {
            entry.using.store(false, Ordering::Relaxed);
        }
        for name in referenced {
            if let Some(entry) = entries.get(name) {
                entry.using.store(true, Ordering::Relaxed);
            }
        }
    }
}

impl std::fmt::Debug for ObjectiveRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectiveRegistry")
            .field("len", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::countable::CountableObjective;
    use questline_core::actor::ActorId;
    use questline_core::capability::{Dependency, StaticCapabilities};
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

    fn objective(name: &str) -> Arc<dyn crate::domain::objective::ObjectiveType> {
        CountableObjective::new(name, "test.noop", |_: &Noop| Some(ActorId::new())).build()
    }

    fn host() -> StaticCapabilities {
        StaticCapabilities::new(["base"], 10)
    }

    #[test]
    fn test_register_overwrites_by_name() {
        // Arrange
        let registry = ObjectiveRegistry::new();
        let first = objective("pickup exp");
        let second = CountableObjective::new("pickup exp", "test.noop", |_: &Noop| None).build();

        // Act
        assert!(registry.register(first, &host()));
        assert!(registry.register(Arc::clone(&second), &host()));

        // Assert — only the second is retrievable.
        assert_eq!(registry.len(), 1);
        let entry = registry.get("pickup exp").unwrap();
        assert!(Arc::ptr_eq(entry.objective(), &second));
    }

    #[test]
    fn test_register_skips_unsatisfied_dependency_silently() {
        // Arrange
        let registry = ObjectiveRegistry::new();
        let missing = CountableObjective::new("lands leave", "test.noop", |_: &Noop| None)
            .dependency(Dependency::on("lands"))
            .build();
        let too_old = CountableObjective::new("new thing", "test.noop", |_: &Noop| None)
            .dependency(Dependency::on("base").min_version(11))
            .build();

        // Act / Assert
        assert!(!registry.register(missing, &host()));
        assert!(!registry.register(too_old, &host()));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_recompute_active_set_clears_stale_flags() {
        // Arrange
        let registry = ObjectiveRegistry::new();
        registry.register(objective("a"), &host());
        registry.register(objective("b"), &host());

        // Act — "a" referenced, then a reload that references only "b".
        registry.recompute_active_set(["a"]);
        assert!(registry.get("a").unwrap().is_using());
        assert!(!registry.get("b").unwrap().is_using());

        registry.recompute_active_set(["b", "not registered"]);

        // Assert — no stale true flag survives.
        assert!(!registry.get("a").unwrap().is_using());
        assert!(registry.get("b").unwrap().is_using());
    }
}
