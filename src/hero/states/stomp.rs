//! Hero domain: the downward stomp and its landing recovery.

use bevy::prelude::*;

use crate::core::SoundCue;
use crate::fsm::{Hook, State, StateError, Step};
use crate::hero::context::HeroContext;
use crate::hero::states::{Jump, settle};
use crate::hero::tuning::{AFTER_STOMP_RECOVERY_MS, STOMP_ACCELERATION};

#[derive(Debug, Default)]
pub struct Stomp;

impl State<HeroContext> for Stomp {
    fn name(&self) -> &'static str {
        "Stomp"
    }

    fn enter(&mut self, ctx: &mut HeroContext) -> Result<Hook, StateError> {
        ctx.physics.reset_velocity();
        ctx.shared.time_since_stomp_ms = 0.0;
        ctx.shared.stomp_landed = false;
        ctx.shared.pending_bounce = false;
        ctx.effects.play_sound(SoundCue::Stomp);
        Ok(Hook::Ready)
    }

    fn update(&mut self, ctx: &mut HeroContext, delta_ms: f32) -> Result<Step<HeroContext>, StateError> {
        let step = if ctx.shared.pending_bounce {
            ctx.shared.pending_bounce = false;
            Step::to(Jump::bounce())
        } else if ctx.physics.standing() {
            ctx.effects.play_sound(SoundCue::StompImpact);
            Step::to(AfterStomp::default())
        } else {
            ctx.physics
                .add_to_external_force(Vec3::new(0.0, STOMP_ACCELERATION * delta_ms, 0.0));
            Step::Stay
        };
        ctx.integrate(delta_ms);
        Ok(step)
    }
}

#[derive(Debug, Default)]
pub struct AfterStomp {
    elapsed_ms: f32,
}

impl State<HeroContext> for AfterStomp {
    fn name(&self) -> &'static str {
        "AfterStomp"
    }

    fn enter(&mut self, ctx: &mut HeroContext) -> Result<Hook, StateError> {
        ctx.physics.reset_velocity();
        Ok(Hook::Ready)
    }

    fn update(&mut self, ctx: &mut HeroContext, delta_ms: f32) -> Result<Step<HeroContext>, StateError> {
        self.elapsed_ms += delta_ms;
        let step = if self.elapsed_ms >= AFTER_STOMP_RECOVERY_MS {
            settle(ctx)
        } else {
            Step::Stay
        };
        ctx.integrate(delta_ms);
        Ok(step)
    }
}
