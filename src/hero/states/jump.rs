//! Hero domain: rising and falling.

use bevy::prelude::*;

use crate::core::SoundCue;
use crate::fsm::{Hook, State, StateError, Step};
use crate::hero::context::HeroContext;
use crate::hero::states::{Dash, Stomp, settle};
use crate::hero::tuning::{BOUNCE_TIME_MS, JUMP_ACCELERATION, JUMP_TIME_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Launch {
    /// Player jump; lift only lasts while the button is held.
    Held,
    /// Off a stomped enemy; full lift regardless of input.
    Bounce,
    /// Walked off a ledge.
    None,
}

#[derive(Debug)]
pub struct Jump {
    launch: Launch,
    remaining_jump_time_ms: f32,
    airborne: bool,
}

impl Jump {
    pub fn launch() -> Self {
        Self {
            launch: Launch::Held,
            remaining_jump_time_ms: JUMP_TIME_MS,
            airborne: false,
        }
    }

    pub fn bounce() -> Self {
        Self {
            launch: Launch::Bounce,
            remaining_jump_time_ms: BOUNCE_TIME_MS,
            airborne: true,
        }
    }

    pub fn falling() -> Self {
        Self {
            launch: Launch::None,
            remaining_jump_time_ms: 0.0,
            airborne: true,
        }
    }

    fn lift(&mut self, ctx: &mut HeroContext, delta_ms: f32) {
        if self.remaining_jump_time_ms <= 0.0 {
            return;
        }
        if self.launch == Launch::Held && !ctx.input.jump_held {
            self.remaining_jump_time_ms = 0.0;
            return;
        }
        ctx.physics
            .add_to_external_force(Vec3::new(0.0, -JUMP_ACCELERATION * delta_ms, 0.0));
        self.remaining_jump_time_ms = (self.remaining_jump_time_ms - delta_ms).max(0.0);
    }
}

impl State<HeroContext> for Jump {
    fn name(&self) -> &'static str {
        "Jump"
    }

    fn enter(&mut self, ctx: &mut HeroContext) -> Result<Hook, StateError> {
        if self.launch != Launch::None {
            ctx.physics.reset_vertical_velocity();
            ctx.effects.play_sound(SoundCue::Jump);
        }
        Ok(Hook::Ready)
    }

    fn update(&mut self, ctx: &mut HeroContext, delta_ms: f32) -> Result<Step<HeroContext>, StateError> {
        // A ceiling bump also grounds the body; only a floor ends the jump.
        let standing = ctx.physics.standing();
        if !standing {
            self.airborne = true;
        }

        let step = if ctx.can_dash() {
            Step::to(Dash::default())
        } else if ctx.can_stomp() {
            Step::to(Stomp::default())
        } else if self.airborne && standing {
            ctx.effects.play_sound(SoundCue::Land);
            settle(ctx)
        } else {
            Step::Stay
        };

        if matches!(step, Step::Stay) {
            self.lift(ctx, delta_ms);
            ctx.steer(delta_ms);
        }
        ctx.integrate(delta_ms);
        Ok(step)
    }
}
