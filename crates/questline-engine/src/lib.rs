//! Questline Engine — objective dispatch and completion.
//!
//! The engine routes domain events to in-progress quest tasks, evaluates
//! completion conditions asynchronously, and drives the cascading task/quest
//! completion state machine. A periodic tick sweep covers quest timeouts and
//! objective types that complete from ambient state rather than events.

pub mod application;
pub mod domain;
