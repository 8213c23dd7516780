//! In-memory profile provider.
//!
//! The engine never creates or destroys profiles; the host loads them on
//! join and unloads on quit. This provider backs the daemon and tests with
//! a concurrent map of loaded profiles.

use std::sync::Arc;

use dashmap::DashMap;
use questline_core::actor::ActorId;
use tokio::sync::Mutex;

use crate::domain::profile::{PlayerProfile, ProfileHandle, ProfileProvider};

/// Concurrent map of loaded actor profiles.
#[derive(Debug, Default)]
pub struct MemoryProfileProvider {
    profiles: DashMap<ActorId, ProfileHandle>,
}

impl MemoryProfileProvider {
    /// Creates an empty provider.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a profile, returning its shared handle.
    pub fn insert(&self, profile: PlayerProfile) -> ProfileHandle {
        let actor = profile.actor;
        let handle: ProfileHandle = Arc::new(Mutex::new(profile));
        self.profiles.insert(actor, Arc::clone(&handle));
        handle
    }

    /// Unloads an actor's profile.
    pub fn remove(&self, actor: ActorId) -> Option<ProfileHandle> {
        self.profiles.remove(&actor).map(|(_, handle)| handle)
    }
}

impl ProfileProvider for MemoryProfileProvider {
    fn is_loaded(&self, actor: ActorId) -> bool {
        self.profiles.contains_key(&actor)
    }

    fn profile(&self, actor: ActorId) -> Option<ProfileHandle> {
        self.profiles.get(&actor).map(|entry| Arc::clone(&entry))
    }

    fn loaded_profiles(&self) -> Vec<ProfileHandle> {
        self.profiles
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect()
    }
}
