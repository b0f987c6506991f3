//! Physics domain: per-entity integration and axis-separated collision resolution.

use std::fmt;
use std::sync::Arc;

use bevy::prelude::*;

use crate::physics::{Aabb, TileCollider};

/// Gravity in world units per millisecond squared. Positive Y is down.
pub const GRAVITY: Vec3 = Vec3::new(0.0, 0.00004, 0.0);
/// Velocity multiplier applied each tick while grounded.
pub const GROUND_DAMPING: f32 = 0.75;
/// Velocity multiplier applied each tick while airborne or flying.
pub const AIR_DAMPING: f32 = 0.9;
/// Velocity components smaller than this snap to exactly zero.
pub const VELOCITY_EPSILON: f32 = 0.0001;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Motion state of one mobile entity.
///
/// The component owns the entity's authoritative position; everything else
/// reads it through [`PhysicsComponent::position`]. Velocity only changes
/// through integration, [`PhysicsComponent::add_to_external_force`] and the
/// `reset_*` hooks.
#[derive(Clone)]
pub struct PhysicsComponent {
    position: Vec3,
    last_position: Vec3,
    velocity: Vec3,
    external_force: Vec3,
    on_ground: bool,
    colliding: bool,
    /// Last tick's X move was refused.
    blocked_x: bool,
    /// Last tick's Y collision happened while moving up.
    hit_ceiling: bool,
    flying: bool,
    gravity_enabled: bool,
    bounds_offset: Vec2,
    bounds_size: Vec2,
    collide_with_out_of_bounds: bool,
    collider: Arc<dyn TileCollider>,
}

impl fmt::Debug for PhysicsComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhysicsComponent")
            .field("position", &self.position)
            .field("velocity", &self.velocity)
            .field("external_force", &self.external_force)
            .field("on_ground", &self.on_ground)
            .field("colliding", &self.colliding)
            .field("blocked_x", &self.blocked_x)
            .field("hit_ceiling", &self.hit_ceiling)
            .field("flying", &self.flying)
            .field("gravity_enabled", &self.gravity_enabled)
            .finish_non_exhaustive()
    }
}

impl PhysicsComponent {
    pub fn new(
        position: Vec3,
        bounds_offset: Vec2,
        bounds_size: Vec2,
        collider: Arc<dyn TileCollider>,
    ) -> Self {
        Self {
            position,
            last_position: position,
            velocity: Vec3::ZERO,
            external_force: Vec3::ZERO,
            on_ground: false,
            colliding: false,
            blocked_x: false,
            hit_ceiling: false,
            flying: false,
            gravity_enabled: true,
            bounds_offset,
            bounds_size,
            collide_with_out_of_bounds: false,
            collider,
        }
    }

    pub fn with_flying(mut self, flying: bool) -> Self {
        self.flying = flying;
        self
    }

    /// Treat the level edge as solid for this body's queries.
    pub fn with_level_clipping(mut self, clip: bool) -> Self {
        self.collide_with_out_of_bounds = clip;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn last_position(&self) -> Vec3 {
        self.last_position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn on_ground(&self) -> bool {
        self.on_ground
    }

    pub fn colliding(&self) -> bool {
        self.colliding
    }

    /// The last X move ran into something. Unlike [`Self::will_collide_along`]
    /// this still holds after the resolver zeroed the horizontal velocity.
    pub fn blocked_x(&self) -> bool {
        self.blocked_x
    }

    /// `on_ground` was set by bumping into something overhead.
    pub fn hit_ceiling(&self) -> bool {
        self.hit_ceiling
    }

    /// Grounded by a floor rather than a ceiling.
    pub fn standing(&self) -> bool {
        self.on_ground && !self.hit_ceiling
    }

    pub fn flying(&self) -> bool {
        self.flying
    }

    pub fn gravity_enabled(&self) -> bool {
        self.gravity_enabled
    }

    pub fn set_flying(&mut self, flying: bool) {
        self.flying = flying;
    }

    /// Bounding box at the current position.
    pub fn bounds(&self) -> Aabb {
        self.bounds_at(self.position)
    }

    pub fn bounds_at(&self, position: Vec3) -> Aabb {
        Aabb::new(position + self.bounds_offset.extend(0.0), self.bounds_size)
    }

    /// The body has moved entirely off the level. Only bodies without level
    /// clipping can get there.
    pub fn outside_level(&self) -> bool {
        !self.collider.touches_level(&self.bounds())
    }

    /// Accumulates until the next [`PhysicsComponent::update`], then clears.
    pub fn add_to_external_force(&mut self, force: Vec3) {
        self.external_force += force;
    }

    pub fn reset_velocity(&mut self) {
        self.velocity = Vec3::ZERO;
    }

    pub fn reset_vertical_velocity(&mut self) {
        self.velocity.y = 0.0;
    }

    pub fn enable_gravity(&mut self) {
        self.gravity_enabled = true;
    }

    pub fn disable_gravity(&mut self) {
        self.gravity_enabled = false;
    }

    /// Move the body without integrating, clearing all motion state.
    pub fn teleport(&mut self, position: Vec3) {
        self.position = position;
        self.last_position = position;
        self.velocity = Vec3::ZERO;
        self.external_force = Vec3::ZERO;
        self.on_ground = false;
        self.colliding = false;
        self.blocked_x = false;
        self.hit_ceiling = false;
    }

    /// Integrate one tick and resolve the move X first, then Y.
    pub fn update(&mut self, delta_ms: f32) {
        if !self.flying && self.gravity_enabled {
            self.velocity += GRAVITY * delta_ms;
        }

        // Grounded is still last tick's outcome here.
        let damping = if self.on_ground && !self.flying {
            GROUND_DAMPING
        } else {
            AIR_DAMPING
        };
        self.velocity = snap_to_zero(self.velocity * damping);

        self.velocity += self.external_force;
        self.external_force = Vec3::ZERO;

        self.on_ground = false;
        let mut resolved = self.position;

        let x_candidate = resolved + Vec3::new(self.velocity.x * delta_ms, 0.0, 0.0);
        let collided_x = self.collides_at(x_candidate);
        if collided_x {
            self.velocity.x = 0.0;
        } else {
            resolved = x_candidate;
        }

        let y_candidate = resolved + Vec3::new(0.0, self.velocity.y * delta_ms, 0.0);
        let collided_y = self.collides_at(y_candidate);
        self.hit_ceiling = collided_y && self.velocity.y < 0.0;
        if collided_y {
            self.velocity.y = 0.0;
            self.on_ground = true;
        } else {
            resolved = y_candidate;
        }

        self.blocked_x = collided_x;
        self.colliding = collided_x || collided_y;
        self.last_position = self.position;
        self.position = resolved;
    }

    /// Look-ahead with the current velocity on either axis. Never mutates.
    pub fn will_collide(&self, delta_ms: f32) -> bool {
        self.will_collide_along(Axis::X, delta_ms) || self.will_collide_along(Axis::Y, delta_ms)
    }

    /// Single-axis look-ahead used for wall bounces.
    pub fn will_collide_along(&self, axis: Axis, delta_ms: f32) -> bool {
        let step = match axis {
            Axis::X => Vec3::new(self.velocity.x * delta_ms, 0.0, 0.0),
            Axis::Y => Vec3::new(0.0, self.velocity.y * delta_ms, 0.0),
        };
        self.collides_at(self.position + step)
    }

    fn collides_at(&self, position: Vec3) -> bool {
        self.collider
            .is_colliding_with(&self.bounds_at(position), self.collide_with_out_of_bounds)
    }
}

fn snap_to_zero(velocity: Vec3) -> Vec3 {
    let snap = |v: f32| if v.abs() < VELOCITY_EPSILON { 0.0 } else { v };
    Vec3::new(snap(velocity.x), snap(velocity.y), snap(velocity.z))
}
