//! Hero domain: the record every hero state reads and writes.

use bevy::prelude::*;

use crate::combat::Vitals;
use crate::core::Effects;
use crate::hero::tuning::{
    AIR_CONTROL, COYOTE_TIME_MS, DASH_COOLDOWN_MS, STOMP_COOLDOWN_MS, WALK_ACCELERATION,
};
use crate::physics::PhysicsComponent;

/// Sampled controls for one frame.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq)]
pub struct HeroInput {
    /// -1, 0 or +1.
    pub axis: f32,
    pub jump_pressed: bool,
    pub jump_held: bool,
    pub stomp_pressed: bool,
    pub dash_pressed: bool,
}

/// Variables shared across hero states.
#[derive(Debug, Clone, PartialEq)]
pub struct HeroShared {
    /// -1 facing left, +1 facing right.
    pub facing: f32,
    pub dash_available: bool,
    pub time_since_dash_ms: f32,
    pub time_since_stomp_ms: f32,
    /// Time since the body last stood on a floor.
    pub air_time_ms: f32,
    /// A stomp already hit something during the current dive.
    pub stomp_landed: bool,
    /// Combat asks the active state to bounce off a stomped enemy.
    pub pending_bounce: bool,
}

impl Default for HeroShared {
    fn default() -> Self {
        Self {
            facing: 1.0,
            dash_available: true,
            time_since_dash_ms: f32::MAX,
            time_since_stomp_ms: f32::MAX,
            air_time_ms: 0.0,
            stomp_landed: false,
            pending_bounce: false,
        }
    }
}

impl HeroShared {
    pub(crate) fn advance(&mut self, delta_ms: f32, standing: bool) {
        self.time_since_dash_ms += delta_ms;
        self.time_since_stomp_ms += delta_ms;
        if standing {
            self.air_time_ms = 0.0;
            self.dash_available = true;
        } else {
            self.air_time_ms += delta_ms;
        }
    }
}

#[derive(Debug)]
pub struct HeroContext {
    pub physics: PhysicsComponent,
    pub shared: HeroShared,
    pub vitals: Vitals,
    pub input: HeroInput,
    pub effects: Effects,
}

impl HeroContext {
    /// Pushback and then physics; every hero state ends its update with this.
    pub fn integrate(&mut self, delta_ms: f32) {
        let pushback = self.vitals.pushback_force();
        self.physics.add_to_external_force(pushback);
        self.physics.update(delta_ms);
    }

    /// Horizontal drive from input, weaker in the air. Also turns the hero.
    pub fn steer(&mut self, delta_ms: f32) {
        let axis = self.input.axis;
        if axis == 0.0 {
            return;
        }
        self.shared.facing = axis.signum();
        let control = if self.physics.standing() { 1.0 } else { AIR_CONTROL };
        self.physics.add_to_external_force(Vec3::new(
            axis * WALK_ACCELERATION * control * delta_ms,
            0.0,
            0.0,
        ));
    }

    pub fn grounded(&self) -> bool {
        self.physics.standing() || self.shared.air_time_ms <= COYOTE_TIME_MS
    }

    pub fn wants_jump(&self) -> bool {
        self.input.jump_pressed && self.grounded()
    }

    pub fn can_stomp(&self) -> bool {
        self.input.stomp_pressed
            && !self.physics.standing()
            && self.shared.time_since_stomp_ms >= STOMP_COOLDOWN_MS
    }

    pub fn can_dash(&self) -> bool {
        self.input.dash_pressed
            && self.shared.dash_available
            && self.shared.time_since_dash_ms >= DASH_COOLDOWN_MS
    }
}
