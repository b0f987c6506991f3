//! Enemies domain: the Rush attack. Back off, charge the hero, then lunge.

use crate::core::SoundCue;
use crate::enemies::dragon::composite::Inner;
use crate::enemies::dragon::context::BossContext;
use crate::enemies::tuning::{
    BACKING_ACCELERATION, BACKING_CLOSE_DISTANCE, BACKING_CLOSE_TIME_MS, BACKING_MAX_TIME_MS,
    CHARGE_ACCELERATION, CHARGE_STRIKE_DISTANCE, LUNGE_ACCELERATION, LUNGE_TIME_MS,
    RUSH_PRE_ATTACK_MS, RUSH_WINDUP_MS,
};
use crate::fsm::{Hook, State, StateError, Step};

#[derive(Debug)]
pub struct Rush {
    inner: Inner,
}

impl Rush {
    pub fn new() -> Self {
        Self {
            inner: Inner::new("Rush"),
        }
    }
}

impl Default for Rush {
    fn default() -> Self {
        Self::new()
    }
}

impl State<BossContext> for Rush {
    fn name(&self) -> &'static str {
        "Rush"
    }

    fn enter(&mut self, ctx: &mut BossContext) -> Result<Hook, StateError> {
        ctx.face_target();
        self.inner.start(RushStart::default(), ctx)
    }

    /// Keeps facing the hero whatever the inner state, except mid-lunge.
    fn update(&mut self, ctx: &mut BossContext, delta_ms: f32) -> Result<Step<BossContext>, StateError> {
        if !ctx.shared.attacking {
            ctx.face_target();
        }
        self.inner.update(ctx, delta_ms)
    }

    fn exit(&mut self, ctx: &mut BossContext) -> Result<Hook, StateError> {
        ctx.shared.time_since_last_attack_ms = 0.0;
        self.inner.stop(ctx)
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }
}

/// Short wind-up facing the hero.
#[derive(Debug, Default)]
pub struct RushStart {
    elapsed_ms: f32,
}

impl State<BossContext> for RushStart {
    fn name(&self) -> &'static str {
        "Start"
    }

    fn enter(&mut self, ctx: &mut BossContext) -> Result<Hook, StateError> {
        ctx.effects.play_sound(SoundCue::Roar);
        Ok(Hook::Ready)
    }

    fn update(&mut self, ctx: &mut BossContext, delta_ms: f32) -> Result<Step<BossContext>, StateError> {
        self.elapsed_ms += delta_ms;
        let step = if self.elapsed_ms >= RUSH_WINDUP_MS {
            Step::to(RushBacking::default())
        } else {
            Step::Stay
        };
        ctx.integrate(delta_ms);
        Ok(step)
    }
}

/// Retreats from the hero. Charges once the hero has stayed close for a
/// while (the boss is cornered) or the retreat has gone on long enough.
#[derive(Debug, Default)]
pub struct RushBacking {
    elapsed_ms: f32,
    close_ms: f32,
}

impl State<BossContext> for RushBacking {
    fn name(&self) -> &'static str {
        "Backing"
    }

    fn update(&mut self, ctx: &mut BossContext, delta_ms: f32) -> Result<Step<BossContext>, StateError> {
        self.elapsed_ms += delta_ms;
        if ctx.distance_to_target() < BACKING_CLOSE_DISTANCE {
            self.close_ms += delta_ms;
        } else {
            self.close_ms = 0.0;
        }

        let step = if self.close_ms > BACKING_CLOSE_TIME_MS || self.elapsed_ms > BACKING_MAX_TIME_MS
        {
            Step::to(RushCharge)
        } else {
            let away = -ctx.shared.facing;
            ctx.push_x(away, BACKING_ACCELERATION, delta_ms);
            Step::Stay
        };
        ctx.integrate(delta_ms);
        Ok(step)
    }
}

/// Runs at the hero until within striking range.
#[derive(Debug, Default)]
pub struct RushCharge;

impl State<BossContext> for RushCharge {
    fn name(&self) -> &'static str {
        "Charge"
    }

    fn enter(&mut self, ctx: &mut BossContext) -> Result<Hook, StateError> {
        ctx.physics.reset_velocity();
        Ok(Hook::Ready)
    }

    fn update(&mut self, ctx: &mut BossContext, delta_ms: f32) -> Result<Step<BossContext>, StateError> {
        let step = if ctx.dx_to_target().abs() < CHARGE_STRIKE_DISTANCE {
            Step::to(RushPreAttack::default())
        } else {
            let facing = ctx.shared.facing;
            ctx.push_x(facing, CHARGE_ACCELERATION, delta_ms);
            Step::Stay
        };
        ctx.integrate(delta_ms);
        Ok(step)
    }
}

/// Brakes and telegraphs the lunge.
#[derive(Debug, Default)]
pub struct RushPreAttack {
    elapsed_ms: f32,
}

impl State<BossContext> for RushPreAttack {
    fn name(&self) -> &'static str {
        "PreAttack"
    }

    fn enter(&mut self, ctx: &mut BossContext) -> Result<Hook, StateError> {
        ctx.physics.reset_velocity();
        ctx.effects.play_sound(SoundCue::ChargeUp);
        Ok(Hook::Ready)
    }

    fn update(&mut self, ctx: &mut BossContext, delta_ms: f32) -> Result<Step<BossContext>, StateError> {
        self.elapsed_ms += delta_ms;
        let step = if self.elapsed_ms >= RUSH_PRE_ATTACK_MS {
            Step::to(RushAttack::default())
        } else {
            Step::Stay
        };
        ctx.integrate(delta_ms);
        Ok(step)
    }
}

/// Lunges in the facing direction; the rush is over afterwards.
#[derive(Debug, Default)]
pub struct RushAttack {
    elapsed_ms: f32,
}

impl State<BossContext> for RushAttack {
    fn name(&self) -> &'static str {
        "Attack"
    }

    fn enter(&mut self, ctx: &mut BossContext) -> Result<Hook, StateError> {
        ctx.shared.attacking = true;
        ctx.effects.play_sound(SoundCue::Slash);
        Ok(Hook::Ready)
    }

    fn update(&mut self, ctx: &mut BossContext, delta_ms: f32) -> Result<Step<BossContext>, StateError> {
        self.elapsed_ms += delta_ms;
        let step = if self.elapsed_ms >= LUNGE_TIME_MS {
            Step::Complete
        } else {
            let facing = ctx.shared.facing;
            ctx.push_x(facing, LUNGE_ACCELERATION, delta_ms);
            Step::Stay
        };
        ctx.integrate(delta_ms);
        Ok(step)
    }

    fn exit(&mut self, ctx: &mut BossContext) -> Result<Hook, StateError> {
        ctx.shared.attacking = false;
        Ok(Hook::Ready)
    }
}
