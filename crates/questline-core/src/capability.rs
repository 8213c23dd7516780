//! Host capability and version gate.
//!
//! Objective types may declare a dependency on an optional host integration
//! (another installed game feature) and a minimum host version. Registration
//! consults this gate once at startup; a failed gate is a silent skip, not
//! an error — optional integrations are expected to be absent.

use std::collections::HashSet;

/// Declarative dependency metadata attached to an objective type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    /// Name of the required host capability (e.g. an installed feature).
    pub capability: String,
    /// Minimum host version the objective type supports.
    pub minimum_version: u32,
}

impl Dependency {
    /// Declares a dependency on `capability` with no version floor.
    #[must_use]
    pub fn on(capability: impl Into<String>) -> Self {
        Self {
            capability: capability.into(),
            minimum_version: 0,
        }
    }

    /// Raises the minimum host version.
    #[must_use]
    pub fn min_version(mut self, version: u32) -> Self {
        self.minimum_version = version;
        self
    }
}

/// Lookup into the host environment's installed capabilities and version.
pub trait HostCapabilities: Send + Sync {
    /// Whether the named capability is present in the host environment.
    fn capability_present(&self, name: &str) -> bool;

    /// The host's version number.
    fn host_version(&self) -> u32;

    /// Whether `dependency` is satisfied by this host.
    fn satisfies(&self, dependency: &Dependency) -> bool {
        self.capability_present(&dependency.capability)
            && self.host_version() >= dependency.minimum_version
    }
}

/// A fixed capability set, built at startup from host configuration.
#[derive(Debug, Clone)]
pub struct StaticCapabilities {
    capabilities: HashSet<String>,
    version: u32,
}

impl StaticCapabilities {
    /// Creates a capability set from names and a host version.
    #[must_use]
    pub fn new<I, S>(capabilities: I, version: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            capabilities: capabilities.into_iter().map(Into::into).collect(),
            version,
        }
    }
}

impl HostCapabilities for StaticCapabilities {
    fn capability_present(&self, name: &str) -> bool {
        self.capabilities.contains(name)
    }

    fn host_version(&self) -> u32 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_satisfies_requires_capability_and_version() {
        // Arrange
        let host = StaticCapabilities::new(["lands"], 12);

        // Act / Assert
        assert!(host.satisfies(&Dependency::on("lands")));
        assert!(host.satisfies(&Dependency::on("lands").min_version(12)));
        assert!(!host.satisfies(&Dependency::on("lands").min_version(13)));
        assert!(!host.satisfies(&Dependency::on("economy")));
    }
}
