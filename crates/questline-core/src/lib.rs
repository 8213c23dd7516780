//! Questline Core — shared abstractions.
//!
//! This crate defines the fundamental traits and types the engine and its
//! collaborators depend on: the clock, the error taxonomy, the domain event
//! and event-bus seams, actor identity, and the host capability gate. It
//! contains no engine logic.

pub mod actor;
pub mod capability;
pub mod clock;
pub mod error;
pub mod event;
