//! Hero domain: standing and walking.

use crate::fsm::{State, StateError, Step};
use crate::hero::context::HeroContext;
use crate::hero::states::leave_ground;

#[derive(Debug, Default)]
pub struct Idle;

impl State<HeroContext> for Idle {
    fn name(&self) -> &'static str {
        "Idle"
    }

    fn update(&mut self, ctx: &mut HeroContext, delta_ms: f32) -> Result<Step<HeroContext>, StateError> {
        let step = leave_ground(ctx).unwrap_or_else(|| {
            if ctx.input.axis != 0.0 {
                Step::to(Walk)
            } else {
                Step::Stay
            }
        });
        ctx.integrate(delta_ms);
        Ok(step)
    }
}

#[derive(Debug, Default)]
pub struct Walk;

impl State<HeroContext> for Walk {
    fn name(&self) -> &'static str {
        "Walk"
    }

    fn update(&mut self, ctx: &mut HeroContext, delta_ms: f32) -> Result<Step<HeroContext>, StateError> {
        let step = leave_ground(ctx).unwrap_or_else(|| {
            if ctx.input.axis == 0.0 {
                Step::to(Idle)
            } else {
                Step::Stay
            }
        });
        if matches!(step, Step::Stay) {
            ctx.steer(delta_ms);
        }
        ctx.integrate(delta_ms);
        Ok(step)
    }
}
