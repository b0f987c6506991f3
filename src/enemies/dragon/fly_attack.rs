//! Enemies domain: the FlyAttack. Climb, sweep while spitting fireballs, dive.

use bevy::prelude::*;

use crate::core::{SoundCue, SpawnRequest};
use crate::enemies::dragon::composite::Inner;
use crate::enemies::dragon::context::BossContext;
use crate::enemies::tuning::{
    CLIMB_ACCELERATION, CLIMB_MAX_TIME_MS, DIVE_ACCELERATION, DIVE_ALIGN_DISTANCE,
    DIVE_MAX_TIME_MS, FIREBALL_INTERVAL_MS, FIREBALL_SIZE, FIREBALL_SPEED, FLY_ALTITUDE_Y,
    HOVER_MS, SWEEP_ACCELERATION, SWEEP_MAX_TIME_MS, SWEEP_MIN_TIME_MS,
};
use crate::fsm::{Hook, State, StateError, Step};
use crate::physics::Axis;

#[derive(Debug)]
pub struct FlyAttack {
    inner: Inner,
}

impl FlyAttack {
    pub fn new() -> Self {
        Self {
            inner: Inner::new("FlyAttack"),
        }
    }
}

impl Default for FlyAttack {
    fn default() -> Self {
        Self::new()
    }
}

impl State<BossContext> for FlyAttack {
    fn name(&self) -> &'static str {
        "FlyAttack"
    }

    fn enter(&mut self, ctx: &mut BossContext) -> Result<Hook, StateError> {
        ctx.physics.set_flying(true);
        self.inner.start(ReachAltitude::default(), ctx)
    }

    fn update(&mut self, ctx: &mut BossContext, delta_ms: f32) -> Result<Step<BossContext>, StateError> {
        self.inner.update(ctx, delta_ms)
    }

    fn exit(&mut self, ctx: &mut BossContext) -> Result<Hook, StateError> {
        ctx.shared.time_since_last_attack_ms = 0.0;
        let hook = self.inner.stop(ctx);
        ctx.physics.set_flying(false);
        hook
    }

    fn describe(&self) -> String {
        self.inner.describe()
    }
}

/// Climbs to sweeping altitude, sliding sideways when something is overhead.
#[derive(Debug, Default)]
pub struct ReachAltitude {
    elapsed_ms: f32,
}

impl State<BossContext> for ReachAltitude {
    fn name(&self) -> &'static str {
        "ReachAltitude"
    }

    fn update(&mut self, ctx: &mut BossContext, delta_ms: f32) -> Result<Step<BossContext>, StateError> {
        self.elapsed_ms += delta_ms;
        let step = if ctx.physics.position().y <= FLY_ALTITUDE_Y
            || self.elapsed_ms >= CLIMB_MAX_TIME_MS
        {
            Step::to(Sweeping::default())
        } else {
            ctx.push_y(-1.0, CLIMB_ACCELERATION, delta_ms);
            if ctx.physics.colliding() {
                let facing = ctx.shared.facing;
                ctx.push_x(facing, SWEEP_ACCELERATION, delta_ms);
            }
            Step::Stay
        };
        ctx.integrate(delta_ms);
        Ok(step)
    }
}

/// Patrols the ceiling, bouncing off walls and dropping fireballs at the hero.
#[derive(Debug, Default)]
pub struct Sweeping {
    elapsed_ms: f32,
}

impl Sweeping {
    fn fire(ctx: &mut BossContext) {
        let center = ctx.center();
        let aim = (ctx.target - center).normalize_or(Vec2::Y);
        let position = center - FIREBALL_SIZE * 0.5;
        ctx.effects.play_sound(SoundCue::Fireball);
        ctx.effects.spawn(SpawnRequest::Fireball {
            position: position.extend(0.0),
            velocity: (aim * FIREBALL_SPEED).extend(0.0),
        });
        ctx.shared.time_since_last_fireball_ms = 0.0;
    }
}

impl State<BossContext> for Sweeping {
    fn name(&self) -> &'static str {
        "Sweeping"
    }

    fn update(&mut self, ctx: &mut BossContext, delta_ms: f32) -> Result<Step<BossContext>, StateError> {
        self.elapsed_ms += delta_ms;
        let aligned = ctx.dx_to_target().abs() < DIVE_ALIGN_DISTANCE;
        let step = if (self.elapsed_ms >= SWEEP_MIN_TIME_MS && aligned)
            || self.elapsed_ms >= SWEEP_MAX_TIME_MS
        {
            Step::to(FlyPreAttack::default())
        } else {
            if ctx.physics.blocked_x() || ctx.physics.will_collide_along(Axis::X, delta_ms) {
                ctx.shared.facing = -ctx.shared.facing;
                ctx.physics.reset_velocity();
            }
            let facing = ctx.shared.facing;
            ctx.push_x(facing, SWEEP_ACCELERATION, delta_ms);
            if ctx.shared.time_since_last_fireball_ms >= FIREBALL_INTERVAL_MS {
                Self::fire(ctx);
            }
            Step::Stay
        };
        ctx.integrate(delta_ms);
        Ok(step)
    }
}

/// Hovers in place before the dive.
#[derive(Debug, Default)]
pub struct FlyPreAttack {
    elapsed_ms: f32,
}

impl State<BossContext> for FlyPreAttack {
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
        let step = if self.elapsed_ms >= HOVER_MS {
            Step::to(Dive::default())
        } else {
            Step::Stay
        };
        ctx.integrate(delta_ms);
        Ok(step)
    }
}

/// Drops straight down until something stops it.
#[derive(Debug, Default)]
pub struct Dive {
    elapsed_ms: f32,
}

impl State<BossContext> for Dive {
    fn name(&self) -> &'static str {
        "Attack"
    }

    fn enter(&mut self, ctx: &mut BossContext) -> Result<Hook, StateError> {
        ctx.shared.attacking = true;
        Ok(Hook::Ready)
    }

    fn update(&mut self, ctx: &mut BossContext, delta_ms: f32) -> Result<Step<BossContext>, StateError> {
        self.elapsed_ms += delta_ms;
        let step = if ctx.physics.on_ground() {
            ctx.effects.play_sound(SoundCue::Slam);
            Step::Complete
        } else if self.elapsed_ms >= DIVE_MAX_TIME_MS {
            Step::Complete
        } else {
            ctx.push_y(1.0, DIVE_ACCELERATION, delta_ms);
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
