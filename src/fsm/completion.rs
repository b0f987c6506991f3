//! State machine domain: completion signals for suspended transition hooks.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// One-shot flag shared between a suspended hook and the collaborator that
/// eventually finishes the work (usually the sound player).
#[derive(Debug, Clone, Default)]
pub struct Completion {
    done: Arc<AtomicBool>,
}

impl Completion {
    pub fn new() -> Self {
        Self::default()
    }

    /// A signal that has already fired.
    pub fn resolved() -> Self {
        let completion = Self::new();
        completion.complete();
        completion
    }

    pub fn complete(&self) {
        self.done.store(true, Ordering::Release);
    }

    pub fn is_complete(&self) -> bool {
        self.done.load(Ordering::Acquire)
    }
}
