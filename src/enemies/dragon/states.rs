//! Enemies domain: the dragon's top-level leaf states.

use crate::core::SoundCue;
use crate::enemies::dragon::context::BossContext;
use crate::enemies::dragon::{FlyAttack, GroundAttack, Rush};
use crate::enemies::tuning::{
    ATTACK_COOLDOWN_MS, DEFEATED_LINGER_MS, ENTRY_DESCENT_ACCELERATION, FLY_ATTACK_BAND, RUSH_BAND,
};
use crate::fsm::{Hook, State, StateError, Step};

/// Flies down into the arena and roars once it lands.
#[derive(Debug, Default)]
pub struct EnterArena;

impl State<BossContext> for EnterArena {
    fn name(&self) -> &'static str {
        "EnterArena"
    }

    fn enter(&mut self, ctx: &mut BossContext) -> Result<Hook, StateError> {
        ctx.physics.set_flying(true);
        Ok(Hook::Ready)
    }

    fn update(&mut self, ctx: &mut BossContext, delta_ms: f32) -> Result<Step<BossContext>, StateError> {
        let step = if ctx.physics.on_ground() {
            Step::to(Idle::default())
        } else {
            ctx.push_y(1.0, ENTRY_DESCENT_ACCELERATION, delta_ms);
            Step::Stay
        };
        ctx.face_target();
        ctx.integrate(delta_ms);
        Ok(step)
    }

    fn exit(&mut self, ctx: &mut BossContext) -> Result<Hook, StateError> {
        ctx.physics.set_flying(false);
        ctx.physics.reset_velocity();
        Ok(Hook::Await(ctx.effects.play_sound_awaited(SoundCue::Roar)))
    }
}

/// Waits out the attack cooldown, then rolls for the next attack.
#[derive(Debug, Default)]
pub struct Idle;

/// Attack picked by a roll in `[0, 1)`.
pub fn attack_for_roll(roll: f32) -> Step<BossContext> {
    if roll < FLY_ATTACK_BAND {
        Step::to(FlyAttack::new())
    } else if roll < RUSH_BAND {
        Step::to(Rush::new())
    } else {
        Step::to(GroundAttack::new())
    }
}

impl State<BossContext> for Idle {
    fn name(&self) -> &'static str {
        "Idle"
    }

    fn enter(&mut self, ctx: &mut BossContext) -> Result<Hook, StateError> {
        ctx.physics.set_flying(false);
        ctx.shared.attacking = false;
        Ok(Hook::Ready)
    }

    fn update(&mut self, ctx: &mut BossContext, delta_ms: f32) -> Result<Step<BossContext>, StateError> {
        ctx.face_target();
        let step = if ctx.shared.time_since_last_attack_ms >= ATTACK_COOLDOWN_MS {
            let roll = ctx.rng.roll();
            attack_for_roll(roll)
        } else {
            Step::Stay
        };
        ctx.integrate(delta_ms);
        Ok(step)
    }
}

/// Terminal: plays the defeat cue, then removes the boss.
#[derive(Debug, Default)]
pub struct Defeated {
    elapsed_ms: f32,
    despawned: bool,
}

impl State<BossContext> for Defeated {
    fn name(&self) -> &'static str {
        "Defeated"
    }

    fn enter(&mut self, ctx: &mut BossContext) -> Result<Hook, StateError> {
        ctx.shared.attacking = false;
        ctx.physics.set_flying(false);
        ctx.physics.enable_gravity();
        ctx.physics.reset_velocity();
        ctx.effects.stop_sound();
        Ok(Hook::Await(ctx.effects.play_sound_awaited(SoundCue::Defeated)))
    }

    fn update(&mut self, ctx: &mut BossContext, delta_ms: f32) -> Result<Step<BossContext>, StateError> {
        self.elapsed_ms += delta_ms;
        if self.elapsed_ms >= DEFEATED_LINGER_MS && !self.despawned {
            self.despawned = true;
            ctx.effects.despawn_self();
        }
        ctx.integrate(delta_ms);
        Ok(Step::Stay)
    }
}
