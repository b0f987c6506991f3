//! Hero domain: the horizontal dash.

use bevy::prelude::*;

use crate::core::SoundCue;
use crate::fsm::{Hook, State, StateError, Step};
use crate::hero::context::HeroContext;
use crate::hero::states::{Jump, settle};
use crate::hero::tuning::{DASH_ACCELERATION, DASH_TIME_MS};

#[derive(Debug, Default)]
pub struct Dash {
    elapsed_ms: f32,
}

impl State<HeroContext> for Dash {
    fn name(&self) -> &'static str {
        "Dash"
    }

    fn enter(&mut self, ctx: &mut HeroContext) -> Result<Hook, StateError> {
        ctx.shared.dash_available = false;
        ctx.shared.time_since_dash_ms = 0.0;
        if ctx.input.axis != 0.0 {
            ctx.shared.facing = ctx.input.axis.signum();
        }
        ctx.physics.disable_gravity();
        ctx.physics.reset_vertical_velocity();
        ctx.effects.play_sound(SoundCue::Dash);
        Ok(Hook::Ready)
    }

    fn update(&mut self, ctx: &mut HeroContext, delta_ms: f32) -> Result<Step<HeroContext>, StateError> {
        self.elapsed_ms += delta_ms;
        let step = if self.elapsed_ms >= DASH_TIME_MS {
            if ctx.physics.standing() {
                settle(ctx)
            } else {
                Step::to(Jump::falling())
            }
        } else {
            ctx.physics.add_to_external_force(Vec3::new(
                ctx.shared.facing * DASH_ACCELERATION * delta_ms,
                0.0,
                0.0,
            ));
            Step::Stay
        };
        ctx.integrate(delta_ms);
        Ok(step)
    }

    fn exit(&mut self, ctx: &mut HeroContext) -> Result<Hook, StateError> {
        ctx.physics.enable_gravity();
        Ok(Hook::Ready)
    }
}
