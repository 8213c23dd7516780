//! Shared test mocks and utilities for the Questline engine.

mod audit;
mod clock;
mod hooks;

pub use audit::RecordingAuditSink;
pub use clock::{FixedClock, SteppingClock};
pub use hooks::RecordingHooks;
