//! State machine domain: error taxonomy for transitions and hooks.

use thiserror::Error;

/// Everything that can go wrong while driving a [`crate::fsm::StateMachine`].
///
/// Any of these is fatal to the owning entity: the machine stops accepting
/// work and the entity is despawned by its system.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StateError {
    #[error("{machine}: cannot change to `{requested}` while `{current}` is still transitioning")]
    TransitionInProgress {
        machine: &'static str,
        current: &'static str,
        requested: &'static str,
    },
    #[error("{machine}: machine faulted and refuses further work")]
    Faulted { machine: &'static str },
    #[error("{machine}: machine was stopped")]
    Stopped { machine: &'static str },
    #[error("state `{state}` has no running inner machine")]
    NotEntered { state: &'static str },
    #[error("state `{state}` failed: {reason}")]
    Failed { state: &'static str, reason: String },
}

impl StateError {
    pub fn failed(state: &'static str, reason: impl Into<String>) -> Self {
        Self::Failed {
            state,
            reason: reason.into(),
        }
    }
}
