//! Recording cascade hooks.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use questline_engine::application::cascade::{CascadeContext, CascadeHooks};

/// Hooks that count invocations and can be told to cancel the cascade.
#[derive(Debug, Default)]
pub struct RecordingHooks {
    cancel: AtomicBool,
    before_calls: AtomicUsize,
    after_calls: AtomicUsize,
}

impl RecordingHooks {
    /// Creates hooks that let every cascade proceed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes `before_continue` cancel subsequent cascades.
    pub fn cancel_next(&self) {
        self.cancel.store(true, Ordering::Relaxed);
    }

    /// How often the pre-continuation hook fired.
    #[must_use]
    pub fn before_calls(&self) -> usize {
        self.before_calls.load(Ordering::Relaxed)
    }

    /// How often the post-continuation hook fired.
    #[must_use]
    pub fn after_calls(&self) -> usize {
        self.after_calls.load(Ordering::Relaxed)
    }
}

impl CascadeHooks for RecordingHooks {
    fn before_continue(&self, _context: &CascadeContext) -> bool {
        self.before_calls.fetch_add(1, Ordering::Relaxed);
        !self.cancel.load(Ordering::Relaxed)
    }

    fn after_continue(&self, _context: &CascadeContext) {
        self.after_calls.fetch_add(1, Ordering::Relaxed);
    }
}
