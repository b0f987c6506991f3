//! Enemies domain: the GroundAttack. Close in on foot, then slam out shockwaves.

use bevy::prelude::*;

use crate::core::{SoundCue, SpawnRequest};
use crate::enemies::dragon::composite::Inner;
use crate::enemies::dragon::context::BossContext;
use crate::enemies::tuning::{
    GROUND_STRIKE_DISTANCE, GROUND_SWEEP_ACCELERATION, GROUND_SWEEP_MAX_TIME_MS,
    SHOCKWAVE_SIZE, SLAM_RECOVERY_MS,
};
use crate::fsm::{Hook, State, StateError, Step};

#[derive(Debug)]
pub struct GroundAttack {
    inner: Inner,
}

impl GroundAttack {
    pub fn new() -> Self {
        Self {
            inner: Inner::new("GroundAttack"),
        }
    }
}

impl Default for GroundAttack {
    fn default() -> Self {
        Self::new()
    }
}

impl State<BossContext> for GroundAttack {
    fn name(&self) -> &'static str {
        "GroundAttack"
    }

    fn enter(&mut self, ctx: &mut BossContext) -> Result<Hook, StateError> {
        ctx.physics.set_flying(false);
        ctx.face_target();
        self.inner.start(GroundSweeping::default(), ctx)
    }

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

/// Stalks the hero on foot.
#[derive(Debug, Default)]
pub struct GroundSweeping {
    elapsed_ms: f32,
}

impl State<BossContext> for GroundSweeping {
    fn name(&self) -> &'static str {
        "Sweeping"
    }

    fn update(&mut self, ctx: &mut BossContext, delta_ms: f32) -> Result<Step<BossContext>, StateError> {
        self.elapsed_ms += delta_ms;
        let step = if ctx.dx_to_target().abs() < GROUND_STRIKE_DISTANCE
            || self.elapsed_ms >= GROUND_SWEEP_MAX_TIME_MS
        {
            Step::to(Slam::default())
        } else {
            let facing = ctx.shared.facing;
            ctx.push_x(facing, GROUND_SWEEP_ACCELERATION, delta_ms);
            Step::Stay
        };
        ctx.integrate(delta_ms);
        Ok(step)
    }
}

/// Slams the ground, sending a shockwave out on each side.
#[derive(Debug, Default)]
pub struct Slam {
    elapsed_ms: f32,
}

impl State<BossContext> for Slam {
    fn name(&self) -> &'static str {
        "Attack"
    }

    fn enter(&mut self, ctx: &mut BossContext) -> Result<Hook, StateError> {
        ctx.physics.reset_velocity();
        ctx.shared.attacking = true;
        ctx.effects.play_sound(SoundCue::Slam);

        let bounds = ctx.physics.bounds();
        let y = bounds.max_y() - SHOCKWAVE_SIZE.y;
        for (x, direction) in [
            (bounds.min_x() - SHOCKWAVE_SIZE.x, -1.0),
            (bounds.max_x(), 1.0),
        ] {
            ctx.effects.spawn(SpawnRequest::Shockwave {
                position: Vec3::new(x, y, 0.0),
                direction,
            });
        }
        Ok(Hook::Ready)
    }

    fn update(&mut self, ctx: &mut BossContext, delta_ms: f32) -> Result<Step<BossContext>, StateError> {
        self.elapsed_ms += delta_ms;
        let step = if self.elapsed_ms >= SLAM_RECOVERY_MS {
            Step::Complete
        } else {
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
