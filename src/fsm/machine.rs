//! State machine domain: the shared state contract and the machine that sequences it.
//!
//! A machine owns exactly one current state. The only way to replace it is
//! [`StateMachine::change_state`], which runs `exit` on the old state, swaps,
//! then runs `enter` on the new one. Either hook may suspend by returning
//! [`Hook::Await`]; the machine then polls the completion once per tick and
//! does not update any state until the transition has finished.

use std::fmt;

use bevy::prelude::*;

use crate::fsm::{Completion, StateError};

/// Suspensions longer than this are abandoned and the transition proceeds.
pub const DEFAULT_TRANSITION_TIMEOUT_MS: f32 = 3000.0;

/// Result of an `enter`/`exit` hook.
#[derive(Debug, Clone)]
pub enum Hook {
    Ready,
    /// Hold the transition until the completion fires (or the timeout elapses).
    Await(Completion),
}

/// What a state asks of its machine after an update.
pub enum Step<C> {
    Stay,
    Change(Box<dyn State<C>>),
    /// The state's work is done. Inner machines use this to hand control back
    /// to the composite state that owns them.
    Complete,
}

impl<C> Step<C> {
    pub fn to(state: impl State<C> + 'static) -> Self {
        Self::Change(Box::new(state))
    }
}

impl<C> fmt::Debug for Step<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stay => write!(f, "Stay"),
            Self::Change(next) => write!(f, "Change({})", next.name()),
            Self::Complete => write!(f, "Complete"),
        }
    }
}

/// Contract shared by every leaf and composite state.
///
/// `C` is the entity context: physics, vitals, shared variables and the
/// effect queue. It is passed into every call and is the only channel through
/// which sibling states communicate.
pub trait State<C>: Send + Sync {
    fn name(&self) -> &'static str;

    fn enter(&mut self, _ctx: &mut C) -> Result<Hook, StateError> {
        Ok(Hook::Ready)
    }

    fn update(&mut self, ctx: &mut C, delta_ms: f32) -> Result<Step<C>, StateError>;

    fn exit(&mut self, _ctx: &mut C) -> Result<Hook, StateError> {
        Ok(Hook::Ready)
    }

    /// Path of the active state, e.g. `Rush/Charge` for composites.
    fn describe(&self) -> String {
        self.name().to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineStatus {
    Running,
    Transitioning,
    Complete,
}

#[derive(Debug)]
struct Pending {
    completion: Completion,
    waited_ms: f32,
}

impl Pending {
    fn new(completion: Completion) -> Self {
        Self {
            completion,
            waited_ms: 0.0,
        }
    }

    /// Returns `None` while still waiting, `Some(timed_out)` once finished.
    fn poll(&mut self, delta_ms: f32, timeout_ms: f32) -> Option<bool> {
        if self.completion.is_complete() {
            return Some(false);
        }
        self.waited_ms += delta_ms;
        (self.waited_ms >= timeout_ms).then_some(true)
    }
}

enum Phase<C> {
    Entering(Pending),
    Active,
    Exiting {
        next: Box<dyn State<C>>,
        pending: Pending,
    },
    Complete,
    Stopped,
    Faulted,
}

impl<C> Phase<C> {
    fn label(&self) -> &'static str {
        match self {
            Self::Entering(_) => "entering",
            Self::Active => "active",
            Self::Exiting { .. } => "exiting",
            Self::Complete => "complete",
            Self::Stopped => "stopped",
            Self::Faulted => "faulted",
        }
    }
}

pub struct StateMachine<C> {
    label: &'static str,
    current: Box<dyn State<C>>,
    phase: Phase<C>,
    transition_timeout_ms: f32,
}

impl<C> fmt::Debug for StateMachine<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("label", &self.label)
            .field("current", &self.current.describe())
            .field("phase", &self.phase.label())
            .finish()
    }
}

impl<C> StateMachine<C> {
    /// Create a machine and enter `initial`. The state cannot be updated
    /// before this returns, which is what makes update-before-enter
    /// unrepresentable.
    pub fn start(
        label: &'static str,
        initial: impl State<C> + 'static,
        ctx: &mut C,
    ) -> Result<Self, StateError> {
        Self::start_with_timeout(label, initial, ctx, DEFAULT_TRANSITION_TIMEOUT_MS)
    }

    pub fn start_with_timeout(
        label: &'static str,
        initial: impl State<C> + 'static,
        ctx: &mut C,
        transition_timeout_ms: f32,
    ) -> Result<Self, StateError> {
        let mut machine = Self {
            label,
            current: Box::new(initial),
            phase: Phase::Active,
            transition_timeout_ms,
        };
        debug!("[{}] start in `{}`", label, machine.current.name());
        machine.begin_enter(ctx)?;
        Ok(machine)
    }

    pub fn current_name(&self) -> &'static str {
        self.current.name()
    }

    pub fn describe(&self) -> String {
        self.current.describe()
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, Phase::Entering(_) | Phase::Exiting { .. })
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, Phase::Complete)
    }

    pub fn is_faulted(&self) -> bool {
        matches!(self.phase, Phase::Faulted)
    }

    /// Exit the current state, swap in `next`, enter it.
    ///
    /// Rejected while a previous transition is still suspended; the in-flight
    /// transition is left untouched in that case.
    pub fn change_state(
        &mut self,
        next: Box<dyn State<C>>,
        ctx: &mut C,
    ) -> Result<(), StateError> {
        match self.phase {
            Phase::Active | Phase::Complete => {}
            Phase::Entering(_) | Phase::Exiting { .. } => {
                return Err(StateError::TransitionInProgress {
                    machine: self.label,
                    current: self.current.name(),
                    requested: next.name(),
                });
            }
            Phase::Stopped => return Err(StateError::Stopped { machine: self.label }),
            Phase::Faulted => return Err(StateError::Faulted { machine: self.label }),
        }

        debug!(
            "[{}] `{}` -> `{}`",
            self.label,
            self.current.name(),
            next.name()
        );

        match self.current.exit(ctx) {
            Ok(Hook::Ready) => self.swap_and_enter(next, ctx),
            Ok(Hook::Await(completion)) => {
                self.phase = Phase::Exiting {
                    next,
                    pending: Pending::new(completion),
                };
                Ok(())
            }
            Err(error) => Err(self.fault(error)),
        }
    }

    /// Advance one tick: finish a suspended transition, or update the state.
    pub fn update(&mut self, ctx: &mut C, delta_ms: f32) -> Result<MachineStatus, StateError> {
        match std::mem::replace(&mut self.phase, Phase::Active) {
            Phase::Active => {}
            Phase::Complete => {
                self.phase = Phase::Complete;
                return Ok(MachineStatus::Complete);
            }
            Phase::Entering(mut pending) => {
                match pending.poll(delta_ms, self.transition_timeout_ms) {
                    Some(timed_out) => {
                        if timed_out {
                            self.warn_timeout("enter");
                        }
                    }
                    None => self.phase = Phase::Entering(pending),
                }
                return Ok(MachineStatus::Transitioning);
            }
            Phase::Exiting { next, mut pending } => {
                match pending.poll(delta_ms, self.transition_timeout_ms) {
                    Some(timed_out) => {
                        if timed_out {
                            self.warn_timeout("exit");
                        }
                        self.swap_and_enter(next, ctx)?;
                    }
                    None => self.phase = Phase::Exiting { next, pending },
                }
                return Ok(MachineStatus::Transitioning);
            }
            Phase::Stopped => {
                self.phase = Phase::Stopped;
                return Err(StateError::Stopped { machine: self.label });
            }
            Phase::Faulted => {
                self.phase = Phase::Faulted;
                return Err(StateError::Faulted { machine: self.label });
            }
        }

        match self.current.update(ctx, delta_ms) {
            Ok(Step::Stay) => Ok(MachineStatus::Running),
            Ok(Step::Change(next)) => {
                self.change_state(next, ctx)?;
                Ok(if self.is_transitioning() {
                    MachineStatus::Transitioning
                } else {
                    MachineStatus::Running
                })
            }
            Ok(Step::Complete) => {
                debug!("[{}] `{}` complete", self.label, self.current.name());
                self.phase = Phase::Complete;
                Ok(MachineStatus::Complete)
            }
            Err(error) => Err(self.fault(error)),
        }
    }

    /// Exit the current state for good. Composite states call this from
    /// their own `exit` so the inner state is exited exactly once.
    pub fn stop(&mut self, ctx: &mut C) -> Result<Hook, StateError> {
        match std::mem::replace(&mut self.phase, Phase::Stopped) {
            Phase::Active | Phase::Complete | Phase::Entering(_) => {
                debug!("[{}] stop in `{}`", self.label, self.current.name());
                self.current.exit(ctx).map_err(|error| self.fault(error))
            }
            // The exit already ran; the queued state was never entered.
            Phase::Exiting { pending, .. } => Ok(Hook::Await(pending.completion)),
            Phase::Stopped | Phase::Faulted => Ok(Hook::Ready),
        }
    }

    fn swap_and_enter(&mut self, next: Box<dyn State<C>>, ctx: &mut C) -> Result<(), StateError> {
        self.current = next;
        self.begin_enter(ctx)
    }

    fn begin_enter(&mut self, ctx: &mut C) -> Result<(), StateError> {
        match self.current.enter(ctx) {
            Ok(Hook::Ready) => {
                self.phase = Phase::Active;
                Ok(())
            }
            Ok(Hook::Await(completion)) => {
                self.phase = Phase::Entering(Pending::new(completion));
                Ok(())
            }
            Err(error) => Err(self.fault(error)),
        }
    }

    fn fault(&mut self, error: StateError) -> StateError {
        debug!(
            "[{}] faulted in `{}`: {}",
            self.label,
            self.current.name(),
            error
        );
        self.phase = Phase::Faulted;
        error
    }

    fn warn_timeout(&self, hook: &str) {
        warn!(
            "[{}] `{}` {} did not complete within {}ms, continuing",
            self.label,
            self.current.name(),
            hook,
            self.transition_timeout_ms
        );
    }
}
