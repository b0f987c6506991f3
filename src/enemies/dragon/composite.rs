//! Enemies domain: the inner machine the attack composites delegate to.

use crate::enemies::dragon::context::BossContext;
use crate::enemies::dragon::states::Idle;
use crate::fsm::{Hook, MachineStatus, State, StateError, StateMachine, Step};

/// Owned by a composite state. Started in the composite's `enter`, stopped in
/// its `exit`; when the inner machine completes the composite returns to Idle.
#[derive(Debug)]
pub(crate) struct Inner {
    owner: &'static str,
    machine: Option<StateMachine<BossContext>>,
}

impl Inner {
    pub(crate) fn new(owner: &'static str) -> Self {
        Self {
            owner,
            machine: None,
        }
    }

    pub(crate) fn start(
        &mut self,
        initial: impl State<BossContext> + 'static,
        ctx: &mut BossContext,
    ) -> Result<Hook, StateError> {
        let timeout_ms = ctx.transition_timeout_ms;
        self.machine = Some(StateMachine::start_with_timeout(
            self.owner, initial, ctx, timeout_ms,
        )?);
        Ok(Hook::Ready)
    }

    pub(crate) fn update(
        &mut self,
        ctx: &mut BossContext,
        delta_ms: f32,
    ) -> Result<Step<BossContext>, StateError> {
        let machine = self
            .machine
            .as_mut()
            .ok_or(StateError::NotEntered { state: self.owner })?;
        match machine.update(ctx, delta_ms)? {
            MachineStatus::Complete => Ok(Step::to(Idle::default())),
            MachineStatus::Running | MachineStatus::Transitioning => Ok(Step::Stay),
        }
    }

    pub(crate) fn stop(&mut self, ctx: &mut BossContext) -> Result<Hook, StateError> {
        match self.machine.take() {
            Some(mut machine) => machine.stop(ctx),
            None => Ok(Hook::Ready),
        }
    }

    pub(crate) fn describe(&self) -> String {
        match &self.machine {
            Some(machine) => format!("{}/{}", self.owner, machine.describe()),
            None => self.owner.to_string(),
        }
    }
}
