//! State machine domain: hierarchical states with suspendable transitions.

mod completion;
mod error;
mod machine;


pub use completion::Completion;
pub use error::StateError;
pub use machine::{
    DEFAULT_TRANSITION_TIMEOUT_MS, Hook, MachineStatus, State, StateMachine, Step,
};
