//! Enemies domain: the component that owns the dragon's machine and context.

use std::sync::Arc;

use bevy::prelude::*;

use crate::combat::{DamageOutcome, Hit, Vitals};
use crate::core::{Effects, RandomSource};
use crate::enemies::dragon::context::{BossContext, BossShared};
use crate::enemies::dragon::states::{Defeated, EnterArena};
use crate::enemies::tuning::{
    BOSS_ATTACK_DAMAGE, BOSS_CONTACT_DAMAGE, BOSS_INVINCIBILITY_MS, BOSS_MAX_HEALTH, BOSS_SIZE,
};
use crate::fsm::{MachineStatus, StateError, StateMachine};
use crate::physics::{Aabb, PhysicsComponent, TileCollider};

#[derive(Component, Debug)]
pub struct DragonBehavior {
    machine: StateMachine<BossContext>,
    ctx: BossContext,
}

impl DragonBehavior {
    /// A boss starting at `position` (usually above the arena) in EnterArena.
    pub fn new(
        position: Vec3,
        collider: Arc<dyn TileCollider>,
        rng: Box<dyn RandomSource>,
        transition_timeout_ms: f32,
    ) -> Result<Self, StateError> {
        let mut ctx = BossContext {
            physics: PhysicsComponent::new(position, Vec2::ZERO, BOSS_SIZE, collider)
                .with_flying(true),
            shared: BossShared::default(),
            vitals: Vitals::new(BOSS_MAX_HEALTH, BOSS_INVINCIBILITY_MS),
            target: position.truncate(),
            rng,
            effects: Effects::default(),
            transition_timeout_ms,
        };
        let machine =
            StateMachine::start_with_timeout("dragon", EnterArena, &mut ctx, transition_timeout_ms)?;
        Ok(Self { machine, ctx })
    }

    pub fn tick(&mut self, target: Vec2, delta_ms: f32) -> Result<MachineStatus, StateError> {
        self.ctx.target = target;
        self.ctx.shared.time_since_last_attack_ms += delta_ms;
        self.ctx.shared.time_since_last_fireball_ms += delta_ms;
        self.ctx.vitals.tick(delta_ms);

        if self.ctx.vitals.is_dead()
            && !self.ctx.vitals.is_terminal()
            && !self.machine.is_transitioning()
        {
            self.ctx.vitals.mark_terminal();
            info!("Dragon defeated");
            self.machine
                .change_state(Box::new(Defeated::default()), &mut self.ctx)?;
        }

        self.machine.update(&mut self.ctx, delta_ms)
    }

    /// Stomps land here; they bypass the invincibility window.
    pub fn take_stomp(&mut self, hit: Hit) -> DamageOutcome {
        self.ctx.vitals.damage(hit)
    }

    /// Damage the boss deals on contact right now, or `None` once defeated.
    pub fn contact_damage(&self) -> Option<f32> {
        if self.ctx.vitals.is_terminal() || self.ctx.vitals.is_dead() {
            None
        } else if self.ctx.shared.attacking {
            Some(BOSS_ATTACK_DAMAGE)
        } else {
            Some(BOSS_CONTACT_DAMAGE)
        }
    }

    pub fn bounds(&self) -> Aabb {
        self.ctx.physics.bounds()
    }

    pub fn physics(&self) -> &PhysicsComponent {
        &self.ctx.physics
    }

    pub fn vitals(&self) -> &Vitals {
        &self.ctx.vitals
    }

    pub fn shared(&self) -> &BossShared {
        &self.ctx.shared
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

    pub fn is_transitioning(&self) -> bool {
        self.machine.is_transitioning()
    }

    pub fn is_faulted(&self) -> bool {
        self.machine.is_faulted()
    }
}
