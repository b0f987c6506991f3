//! Enemies domain: the walker, a ground patroller that turns at walls.

use std::sync::Arc;

use bevy::prelude::*;

use crate::combat::{DamageOutcome, Hit, Vitals};
use crate::core::{Effects, SoundCue};
use crate::enemies::tuning::{
    PATROL_ACCELERATION, WALKER_CONTACT_DAMAGE, WALKER_INVINCIBILITY_MS, WALKER_MAX_HEALTH,
    WALKER_SIZE,
};
use crate::fsm::{Hook, MachineStatus, State, StateError, StateMachine, Step};
use crate::physics::{Aabb, Axis, PhysicsComponent, TileCollider};

#[derive(Debug)]
pub struct WalkerContext {
    pub physics: PhysicsComponent,
    /// -1 walking left, +1 walking right.
    pub facing: f32,
    pub vitals: Vitals,
    pub effects: Effects,
}

impl WalkerContext {
    fn integrate(&mut self, delta_ms: f32) {
        let pushback = self.vitals.pushback_force();
        self.physics.add_to_external_force(pushback);
        self.physics.update(delta_ms);
    }
}

#[derive(Debug, Default)]
pub struct Patrol;

impl State<WalkerContext> for Patrol {
    fn name(&self) -> &'static str {
        "Patrol"
    }

    fn update(&mut self, ctx: &mut WalkerContext, delta_ms: f32) -> Result<Step<WalkerContext>, StateError> {
        if ctx.physics.outside_level() {
            return Ok(Step::to(WalkerDead::default()));
        }
        if ctx.physics.blocked_x() || ctx.physics.will_collide_along(Axis::X, delta_ms) {
            ctx.facing = -ctx.facing;
        }
        ctx.physics.add_to_external_force(Vec3::new(
            ctx.facing * PATROL_ACCELERATION * delta_ms,
            0.0,
            0.0,
        ));
        ctx.integrate(delta_ms);
        Ok(Step::Stay)
    }
}

/// Plays the death cue, then removes the walker.
#[derive(Debug, Default)]
pub struct WalkerDead {
    despawned: bool,
}

impl State<WalkerContext> for WalkerDead {
    fn name(&self) -> &'static str {
        "Dead"
    }

    fn enter(&mut self, ctx: &mut WalkerContext) -> Result<Hook, StateError> {
        ctx.physics.reset_velocity();
        Ok(Hook::Await(ctx.effects.play_sound_awaited(SoundCue::Death)))
    }

    fn update(&mut self, ctx: &mut WalkerContext, delta_ms: f32) -> Result<Step<WalkerContext>, StateError> {
        if !self.despawned {
            self.despawned = true;
            ctx.effects.despawn_self();
        }
        ctx.integrate(delta_ms);
        Ok(Step::Stay)
    }
}

#[derive(Component, Debug)]
pub struct WalkerBehavior {
    machine: StateMachine<WalkerContext>,
    ctx: WalkerContext,
}

impl WalkerBehavior {
    pub fn new(
        position: Vec3,
        facing: f32,
        collider: Arc<dyn TileCollider>,
        transition_timeout_ms: f32,
    ) -> Result<Self, StateError> {
        let mut ctx = WalkerContext {
            physics: PhysicsComponent::new(position, Vec2::ZERO, WALKER_SIZE, collider),
            facing,
            vitals: Vitals::new(WALKER_MAX_HEALTH, WALKER_INVINCIBILITY_MS),
            effects: Effects::default(),
        };
        let machine =
            StateMachine::start_with_timeout("walker", Patrol, &mut ctx, transition_timeout_ms)?;
        Ok(Self { machine, ctx })
    }

    pub fn tick(&mut self, delta_ms: f32) -> Result<MachineStatus, StateError> {
        self.ctx.vitals.tick(delta_ms);
        if self.ctx.vitals.is_dead()
            && !self.ctx.vitals.is_terminal()
            && !self.machine.is_transitioning()
        {
            self.ctx.vitals.mark_terminal();
            self.machine
                .change_state(Box::new(WalkerDead::default()), &mut self.ctx)?;
        }
        self.machine.update(&mut self.ctx, delta_ms)
    }

    pub fn take_stomp(&mut self, hit: Hit) -> DamageOutcome {
        self.ctx.vitals.damage(hit)
    }

    pub fn contact_damage(&self) -> Option<f32> {
        (!self.ctx.vitals.is_terminal() && !self.ctx.vitals.is_dead())
            .then_some(WALKER_CONTACT_DAMAGE)
    }

    pub fn bounds(&self) -> Aabb {
        self.ctx.physics.bounds()
    }

    pub fn physics(&self) -> &PhysicsComponent {
        &self.ctx.physics
    }

    pub fn facing(&self) -> f32 {
        self.ctx.facing
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
