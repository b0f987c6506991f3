//! Enemies domain: the record shared by every dragon state, inner ones included.

use std::fmt;

use bevy::prelude::*;

use crate::combat::Vitals;
use crate::core::{Effects, RandomSource};
use crate::physics::PhysicsComponent;

#[derive(Debug, Clone, PartialEq)]
pub struct BossShared {
    /// -1 facing left, +1 facing right.
    pub facing: f32,
    pub time_since_last_attack_ms: f32,
    pub time_since_last_fireball_ms: f32,
    /// A strike is live; contact hurts more.
    pub attacking: bool,
}

impl Default for BossShared {
    fn default() -> Self {
        Self {
            facing: -1.0,
            time_since_last_attack_ms: 0.0,
            time_since_last_fireball_ms: 0.0,
            attacking: false,
        }
    }
}

pub struct BossContext {
    pub physics: PhysicsComponent,
    pub shared: BossShared,
    pub vitals: Vitals,
    /// Center of the hero, refreshed before every tick.
    pub target: Vec2,
    pub rng: Box<dyn RandomSource>,
    pub effects: Effects,
    pub transition_timeout_ms: f32,
}

impl fmt::Debug for BossContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BossContext")
            .field("physics", &self.physics)
            .field("shared", &self.shared)
            .field("vitals", &self.vitals)
            .field("target", &self.target)
            .finish_non_exhaustive()
    }
}

impl BossContext {
    pub fn center(&self) -> Vec2 {
        self.physics.bounds().center()
    }

    /// Signed horizontal distance from the boss to its target.
    pub fn dx_to_target(&self) -> f32 {
        self.target.x - self.center().x
    }

    pub fn distance_to_target(&self) -> f32 {
        self.center().distance(self.target)
    }

    /// Direction towards the target, keeping the current facing when aligned.
    pub fn direction_to_target(&self) -> f32 {
        let dx = self.dx_to_target();
        if dx == 0.0 { self.shared.facing } else { dx.signum() }
    }

    pub fn face_target(&mut self) {
        self.shared.facing = self.direction_to_target();
    }

    pub fn push_x(&mut self, direction: f32, acceleration: f32, delta_ms: f32) {
        self.physics
            .add_to_external_force(Vec3::new(direction * acceleration * delta_ms, 0.0, 0.0));
    }

    pub fn push_y(&mut self, direction: f32, acceleration: f32, delta_ms: f32) {
        self.physics
            .add_to_external_force(Vec3::new(0.0, direction * acceleration * delta_ms, 0.0));
    }

    /// Pushback and then physics; every leaf dragon state ends with this.
    pub fn integrate(&mut self, delta_ms: f32) {
        let pushback = self.vitals.pushback_force();
        self.physics.add_to_external_force(pushback);
        self.physics.update(delta_ms);
    }
}
