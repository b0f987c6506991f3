//! Hero domain: movement and combat thresholds.
//!
//! Accelerations are per millisecond and get multiplied by the tick delta
//! before they are added as external force.

use bevy::prelude::*;

pub const HERO_SIZE: Vec2 = Vec2::new(0.8, 1.6);
pub const HERO_MAX_HEALTH: f32 = 5.0;
pub const HERO_INVINCIBILITY_MS: f32 = 700.0;

pub const WALK_ACCELERATION: f32 = 0.00008;
/// Fraction of walk acceleration available while airborne.
pub const AIR_CONTROL: f32 = 0.4;

pub const JUMP_TIME_MS: f32 = 150.0;
pub const JUMP_ACCELERATION: f32 = 0.00016;
/// Grace period after walking off a ledge during which a jump still counts.
pub const COYOTE_TIME_MS: f32 = 60.0;
pub const BOUNCE_TIME_MS: f32 = 100.0;

pub const STOMP_ACCELERATION: f32 = 0.0004;
pub const STOMP_COOLDOWN_MS: f32 = 500.0;
pub const STOMP_DAMAGE: f32 = 1.0;
pub const AFTER_STOMP_RECOVERY_MS: f32 = 200.0;

pub const DASH_TIME_MS: f32 = 180.0;
pub const DASH_ACCELERATION: f32 = 0.0002;
pub const DASH_COOLDOWN_MS: f32 = 400.0;

pub const RESPAWN_DELAY_MS: f32 = 2000.0;
