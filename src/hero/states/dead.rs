//! Hero domain: terminal state until a respawn rebuilds the hero.

use crate::core::SoundCue;
use crate::fsm::{Hook, State, StateError, Step};
use crate::hero::context::HeroContext;
use crate::hero::tuning::RESPAWN_DELAY_MS;

#[derive(Debug, Default)]
pub struct Dead {
    elapsed_ms: f32,
    respawn_requested: bool,
}

impl State<HeroContext> for Dead {
    fn name(&self) -> &'static str {
        "Dead"
    }

    fn enter(&mut self, ctx: &mut HeroContext) -> Result<Hook, StateError> {
        ctx.physics.reset_velocity();
        ctx.physics.enable_gravity();
        ctx.effects.stop_sound();
        Ok(Hook::Await(ctx.effects.play_sound_awaited(SoundCue::Death)))
    }

    fn update(&mut self, ctx: &mut HeroContext, delta_ms: f32) -> Result<Step<HeroContext>, StateError> {
        self.elapsed_ms += delta_ms;
        if self.elapsed_ms >= RESPAWN_DELAY_MS && !self.respawn_requested {
            self.respawn_requested = true;
            ctx.effects.request_respawn();
        }
        ctx.integrate(delta_ms);
        Ok(Step::Stay)
    }
}
