//! Hero domain: the component that owns the hero's machine and context.

use std::sync::Arc;

use bevy::prelude::*;

use crate::combat::{DamageOutcome, Hit, Vitals};
use crate::core::{Effects, SoundCue};
use crate::fsm::{Hook, MachineStatus, StateError, StateMachine};
use crate::hero::context::{HeroContext, HeroInput, HeroShared};
use crate::hero::states::{Dead, Idle};
use crate::hero::tuning::{HERO_INVINCIBILITY_MS, HERO_MAX_HEALTH, HERO_SIZE};
use crate::physics::{Aabb, PhysicsComponent, TileCollider};

#[derive(Component, Debug)]
pub struct HeroBehavior {
    machine: StateMachine<HeroContext>,
    ctx: HeroContext,
    transition_timeout_ms: f32,
}

impl HeroBehavior {
    pub fn new(
        position: Vec3,
        collider: Arc<dyn TileCollider>,
        transition_timeout_ms: f32,
    ) -> Result<Self, StateError> {
        let mut ctx = HeroContext {
            physics: PhysicsComponent::new(position, Vec2::ZERO, HERO_SIZE, collider)
                .with_level_clipping(true),
            shared: HeroShared::default(),
            vitals: Vitals::new(HERO_MAX_HEALTH, HERO_INVINCIBILITY_MS),
            input: HeroInput::default(),
            effects: Effects::default(),
        };
        let machine = StateMachine::start_with_timeout("hero", Idle, &mut ctx, transition_timeout_ms)?;
        Ok(Self {
            machine,
            ctx,
            transition_timeout_ms,
        })
    }

    /// One frame: timers, the death check, then the active state.
    pub fn tick(&mut self, input: HeroInput, delta_ms: f32) -> Result<MachineStatus, StateError> {
        self.ctx.input = input;
        self.ctx.shared.advance(delta_ms, self.ctx.physics.standing());
        self.ctx.vitals.tick(delta_ms);

        if self.ctx.vitals.is_dead()
            && !self.ctx.vitals.is_terminal()
            && !self.machine.is_transitioning()
        {
            self.ctx.vitals.mark_terminal();
            self.machine.change_state(Box::new(Dead::default()), &mut self.ctx)?;
        }

        self.machine.update(&mut self.ctx, delta_ms)
    }

    /// Rebuild the hero at `position` with full health.
    pub fn respawn(&mut self, position: Vec3) -> Result<(), StateError> {
        // The old state never gets another update; its exit hook is not awaited.
        match self.machine.stop(&mut self.ctx) {
            Ok(Hook::Ready) => {}
            Ok(Hook::Await(_)) => debug!(
                "Hero respawn abandons the pending exit of `{}`",
                self.machine.current_name()
            ),
            Err(error) => warn!("Hero exit failed during respawn: {error}"),
        }
        self.ctx.physics.teleport(position);
        self.ctx.physics.enable_gravity();
        self.ctx.vitals.restore();
        self.ctx.shared = HeroShared::default();
        self.ctx.effects.stop_sound();
        self.machine = StateMachine::start_with_timeout(
            "hero",
            Idle,
            &mut self.ctx,
            self.transition_timeout_ms,
        )?;
        info!("Hero respawned at {:?}", position);
        Ok(())
    }

    /// Contact damage, respecting the invincibility window.
    pub fn take_hit(&mut self, hit: Hit) -> DamageOutcome {
        let outcome = self.ctx.vitals.damage_with_invincibility_considered(hit);
        if outcome == DamageOutcome::Applied {
            self.ctx.effects.play_sound(SoundCue::Hurt);
        }
        outcome
    }

    pub fn is_stomping(&self) -> bool {
        self.machine.current_name() == "Stomp" && !self.machine.is_transitioning()
    }

    /// Record a stomp hit. Only the first hit of a dive counts; it also asks
    /// the stomp state to bounce.
    pub fn land_stomp(&mut self) -> bool {
        if self.ctx.shared.stomp_landed {
            return false;
        }
        self.ctx.shared.stomp_landed = true;
        self.ctx.shared.pending_bounce = true;
        true
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

    pub fn shared(&self) -> &HeroShared {
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

    pub fn is_faulted(&self) -> bool {
        self.machine.is_faulted()
    }
}
