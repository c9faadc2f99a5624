//! Change tracking for compiled material state

use std::sync::atomic::{AtomicBool, Ordering};

/// Marks whether a renderer's compiled copy of a material is stale
///
/// The flag is bookkeeping for the consumer, not material data, so it is
/// writable through a shared reference.
#[derive(Debug)]
pub struct DirtyFlag(AtomicBool);

impl DirtyFlag {
    /// Create a flag in the given state
    pub const fn new(dirty: bool) -> Self {
        Self(AtomicBool::new(dirty))
    }

    /// Current state
    pub fn get(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    /// Overwrite the state
    pub fn set(&self, dirty: bool) {
        self.0.store(dirty, Ordering::Release);
    }

    /// Mark stale
    pub fn mark(&self) {
        self.set(true);
    }
}

impl Default for DirtyFlag {
    /// New materials have never been compiled
    fn default() -> Self {
        Self::new(true)
    }
}

impl Clone for DirtyFlag {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}
