//! Questline Objectives — built-in objective types.
//!
//! Each built-in is a declarative instance of the objective type contract;
//! the engine knows nothing about any of them. `register_builtins` is the
//! explicit startup registration table.

pub mod events;

mod bed_leave;
mod lands_leave;
mod pickup_exp;
mod wait;

pub use bed_leave::bed_leave;
pub use lands_leave::lands_leave;
pub use pickup_exp::pickup_exp;
pub use wait::wait;

use questline_core::capability::HostCapabilities;
use questline_engine::application::registry::ObjectiveRegistry;

/// Registers every built-in objective type, honoring each type's host
/// dependency gate. Returns how many were registered.
pub fn register_builtins(registry: &ObjectiveRegistry, host: &dyn HostCapabilities) -> usize {
    [pickup_exp(), bed_leave(), lands_leave(), wait()]
        .into_iter()
        .filter(|objective| registry.register(std::sync::Arc::clone(objective), host))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use questline_core::capability::StaticCapabilities;

    #[test]
    fn test_register_builtins_gates_on_capabilities() {
        // Arrange
        let with_lands = StaticCapabilities::new(["minecraft", "lands"], 1);
        let without_lands = StaticCapabilities::new(["minecraft"], 1);

        // Act / Assert
        let registry = ObjectiveRegistry::new();
        assert_eq!(register_builtins(&registry, &with_lands), 4);
        assert!(registry.get("lands leave").is_some());

        let registry = ObjectiveRegistry::new();
        assert_eq!(register_builtins(&registry, &without_lands), 3);
        assert!(registry.get("lands leave").is_none());
    }
}
