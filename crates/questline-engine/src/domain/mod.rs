//! Domain model: objective types, condition sets, tasks, quests, profiles.

pub mod conditions;
pub mod countable;
pub mod objective;
pub mod profile;
pub mod quest;
pub mod task;
