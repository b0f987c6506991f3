//! Hero domain: locomotion states.

mod dash;
mod dead;
mod grounded;
mod jump;
mod stomp;

pub use dash::Dash;
pub use dead::Dead;
pub use grounded::{Idle, Walk};
pub use jump::Jump;
pub use stomp::{AfterStomp, Stomp};

use crate::fsm::Step;
use crate::hero::context::HeroContext;
use crate::hero::tuning::COYOTE_TIME_MS;

/// Exits shared by the two ground states, in priority order.
fn leave_ground(ctx: &HeroContext) -> Option<Step<HeroContext>> {
    if ctx.can_dash() {
        return Some(Step::to(Dash::default()));
    }
    if ctx.wants_jump() {
        return Some(Step::to(Jump::launch()));
    }
    if ctx.shared.air_time_ms > COYOTE_TIME_MS {
        return Some(Step::to(Jump::falling()));
    }
    None
}

/// Idle or Walk depending on the held direction.
fn settle(ctx: &HeroContext) -> Step<HeroContext> {
    if ctx.input.axis != 0.0 {
        Step::to(Walk)
    } else {
        Step::to(Idle)
    }
}
