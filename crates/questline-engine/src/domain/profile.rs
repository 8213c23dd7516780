//! Actor profiles: the actor-owned quest collection and the provider seam.
//!
//! Profile persistence and loading is the host's concern; the engine only
//! iterates and mutates quest/task state within profiles it is handed. Each
//! profile handle is a `tokio::sync::Mutex`, so state mutations for one
//! actor serialize while other actors proceed; the lock is never held
//! across condition awaits.

use std::sync::Arc;

use questline_core::actor::ActorId;
use tokio::sync::Mutex;

use super::quest::Quest;

/// Shared handle to one actor's loaded profile.
pub type ProfileHandle = Arc<Mutex<PlayerProfile>>;

/// One actor's loaded quest state.
#[derive(Debug)]
pub struct PlayerProfile {
    /// The owning actor.
    pub actor: ActorId,
    /// The actor's quests, in load order.
    pub quests: Vec<Quest>,
}

impl PlayerProfile {
    /// Creates an empty profile.
    #[must_use]
    pub fn new(actor: ActorId) -> Self {
        Self {
            actor,
            quests: Vec::new(),
        }
    }

    /// Adds a quest to the profile.
    pub fn add_quest(&mut self, quest: Quest) {
        self.quests.push(quest);
    }

    /// Indices of all in-progress `(quest, task)` pairs bound to the named
    /// objective type, across active quests, in profile order.
    ///
    /// Tasks of completed or failed quests never match, so their conditions
    /// are never evaluated.
    #[must_use]
    pub fn task_indices_for(&self, objective_name: &str) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (quest_index, quest) in self.quests.iter().enumerate() {
            if !quest.is_active() {
                continue;
            }
            for (task_index, task) in quest.tasks.iter().enumerate() {
                if task.objective.name() == objective_name {
                    pairs.push((quest_index, task_index));
                }
            }
        }
        pairs
    }
}

/// Provider of loaded actor profiles (external collaborator).
pub trait ProfileProvider: Send + Sync {
    /// Whether the actor currently has a loaded profile.
    fn is_loaded(&self, actor: ActorId) -> bool;

    /// The actor's profile handle, if loaded.
    fn profile(&self, actor: ActorId) -> Option<ProfileHandle>;

    /// Handles of every currently loaded profile (tick sweep input).
    fn loaded_profiles(&self) -> Vec<ProfileHandle>;
}
