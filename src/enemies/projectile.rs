//! Enemies domain: fireballs and shockwaves released by the dragon.

use std::sync::Arc;

use bevy::prelude::*;

use crate::core::{Effects, SpawnRequest};
use crate::enemies::tuning::{
    FIREBALL_SIZE, PROJECTILE_DAMAGE, PROJECTILE_LIFETIME_MS, SHOCKWAVE_SIZE, SHOCKWAVE_SPEED,
};
use crate::fsm::{Hook, MachineStatus, State, StateError, StateMachine, Step};
use crate::physics::{AIR_DAMPING, Aabb, Axis, GROUND_DAMPING, PhysicsComponent, TileCollider};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectileKind {
    /// Flies straight, ignoring gravity.
    Fireball,
    /// Slides along the floor under gravity.
    Shockwave,
}

#[derive(Debug)]
pub struct ProjectileContext {
    pub physics: PhysicsComponent,
    pub kind: ProjectileKind,
    /// Steady-state velocity the projectile keeps up against damping.
    pub cruise_velocity: Vec3,
    /// Set by combat once the projectile hit the hero.
    pub spent: bool,
    pub effects: Effects,
}

impl ProjectileContext {
    /// Force that exactly cancels one tick of damping at cruise velocity.
    fn sustain_force(&self) -> Vec3 {
        let damping = match self.kind {
            ProjectileKind::Fireball => AIR_DAMPING,
            ProjectileKind::Shockwave if self.physics.on_ground() => GROUND_DAMPING,
            ProjectileKind::Shockwave => AIR_DAMPING,
        };
        let mut force = self.cruise_velocity * (1.0 - damping);
        if self.kind == ProjectileKind::Shockwave {
            force.y = 0.0;
        }
        force
    }
}

#[derive(Debug, Default)]
pub struct Flying {
    elapsed_ms: f32,
}

impl State<ProjectileContext> for Flying {
    fn name(&self) -> &'static str {
        "Flying"
    }

    fn enter(&mut self, ctx: &mut ProjectileContext) -> Result<Hook, StateError> {
        let mut launch = ctx.cruise_velocity;
        if ctx.kind == ProjectileKind::Shockwave {
            launch.y = 0.0;
        }
        ctx.physics.add_to_external_force(launch);
        Ok(Hook::Ready)
    }

    fn update(
        &mut self,
        ctx: &mut ProjectileContext,
        delta_ms: f32,
    ) -> Result<Step<ProjectileContext>, StateError> {
        self.elapsed_ms += delta_ms;
        let blocked = match ctx.kind {
            ProjectileKind::Fireball => ctx.physics.colliding(),
            ProjectileKind::Shockwave => {
                ctx.physics.blocked_x() || ctx.physics.will_collide_along(Axis::X, delta_ms)
            }
        };
        if ctx.spent
            || blocked
            || ctx.physics.outside_level()
            || self.elapsed_ms >= PROJECTILE_LIFETIME_MS
        {
            return Ok(Step::to(Expired));
        }

        let force = ctx.sustain_force();
        ctx.physics.add_to_external_force(force);
        ctx.physics.update(delta_ms);
        Ok(Step::Stay)
    }
}

#[derive(Debug, Default)]
pub struct Expired;

impl State<ProjectileContext> for Expired {
    fn name(&self) -> &'static str {
        "Expired"
    }

    fn enter(&mut self, ctx: &mut ProjectileContext) -> Result<Hook, StateError> {
        ctx.spent = true;
        ctx.effects.despawn_self();
        Ok(Hook::Ready)
    }

    fn update(
        &mut self,
        _ctx: &mut ProjectileContext,
        _delta_ms: f32,
    ) -> Result<Step<ProjectileContext>, StateError> {
        Ok(Step::Stay)
    }
}

#[derive(Component, Debug)]
pub struct ProjectileBehavior {
    machine: StateMachine<ProjectileContext>,
    ctx: ProjectileContext,
}

impl ProjectileBehavior {
    pub fn new(
        request: SpawnRequest,
        collider: Arc<dyn TileCollider>,
        transition_timeout_ms: f32,
    ) -> Result<Self, StateError> {
        let (kind, position, cruise_velocity) = match request {
            SpawnRequest::Fireball { position, velocity } => {
                (ProjectileKind::Fireball, position, velocity)
            }
            SpawnRequest::Shockwave {
                position,
                direction,
            } => (
                ProjectileKind::Shockwave,
                position,
                Vec3::new(direction.signum() * SHOCKWAVE_SPEED, 0.0, 0.0),
            ),
        };
        let physics = PhysicsComponent::new(position, Vec2::ZERO, Self::size_of(kind), collider)
            .with_flying(kind == ProjectileKind::Fireball);

        let mut ctx = ProjectileContext {
            physics,
            kind,
            cruise_velocity,
            spent: false,
            effects: Effects::default(),
        };
        let machine = StateMachine::start_with_timeout(
            "projectile",
            Flying::default(),
            &mut ctx,
            transition_timeout_ms,
        )?;
        Ok(Self { machine, ctx })
    }

    pub fn size_of(kind: ProjectileKind) -> Vec2 {
        match kind {
            ProjectileKind::Fireball => FIREBALL_SIZE,
            ProjectileKind::Shockwave => SHOCKWAVE_SIZE,
        }
    }

    pub fn tick(&mut self, delta_ms: f32) -> Result<MachineStatus, StateError> {
        self.machine.update(&mut self.ctx, delta_ms)
    }

    /// Damage on contact with the hero, or `None` once spent.
    pub fn contact_damage(&self) -> Option<f32> {
        (!self.ctx.spent).then_some(PROJECTILE_DAMAGE)
    }

    pub fn mark_spent(&mut self) {
        self.ctx.spent = true;
    }

    pub fn kind(&self) -> ProjectileKind {
        self.ctx.kind
    }

    pub fn bounds(&self) -> Aabb {
        self.ctx.physics.bounds()
    }

    pub fn physics(&self) -> &PhysicsComponent {
        &self.ctx.physics
    }

    pub fn effects_mut(&mut self) -> &mut Effects {
        &mut self.ctx.effects
    }

    pub fn state_name(&self) -> &'static str {
        self.machine.current_name()
    }

    pub fn describe(&self) -> String {
        self.machine.describe()
    }

    pub fn is_faulted(&self) -> bool {
        self.machine.is_faulted()
    }
}
