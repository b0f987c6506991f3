//! Enemies domain: boss, walker and projectile thresholds.
//!
//! Accelerations are per millisecond; states multiply them by the tick delta.

use bevy::prelude::*;

// Dragon boss
pub const BOSS_SIZE: Vec2 = Vec2::new(3.0, 2.5);
pub const BOSS_MAX_HEALTH: f32 = 12.0;
pub const BOSS_INVINCIBILITY_MS: f32 = 300.0;
pub const BOSS_CONTACT_DAMAGE: f32 = 1.0;
pub const BOSS_ATTACK_DAMAGE: f32 = 2.0;
pub const ATTACK_COOLDOWN_MS: f32 = 1500.0;
/// Idle rolls below this pick FlyAttack.
pub const FLY_ATTACK_BAND: f32 = 0.35;
/// Idle rolls below this (and above the fly band) pick Rush; the rest GroundAttack.
pub const RUSH_BAND: f32 = 0.7;
pub const ENTRY_DESCENT_ACCELERATION: f32 = 0.00006;
pub const DEFEATED_LINGER_MS: f32 = 500.0;

// Rush
pub const RUSH_WINDUP_MS: f32 = 300.0;
pub const BACKING_ACCELERATION: f32 = 0.00005;
pub const BACKING_CLOSE_DISTANCE: f32 = 15.0;
pub const BACKING_CLOSE_TIME_MS: f32 = 1000.0;
pub const BACKING_MAX_TIME_MS: f32 = 3000.0;
pub const CHARGE_ACCELERATION: f32 = 0.00012;
pub const CHARGE_STRIKE_DISTANCE: f32 = 3.0;
pub const RUSH_PRE_ATTACK_MS: f32 = 400.0;
pub const LUNGE_ACCELERATION: f32 = 0.0003;
pub const LUNGE_TIME_MS: f32 = 300.0;

// FlyAttack
/// Top edge the boss climbs to before sweeping.
pub const FLY_ALTITUDE_Y: f32 = 2.0;
pub const CLIMB_ACCELERATION: f32 = 0.0001;
pub const CLIMB_MAX_TIME_MS: f32 = 2500.0;
pub const SWEEP_ACCELERATION: f32 = 0.00008;
pub const SWEEP_MIN_TIME_MS: f32 = 3000.0;
pub const SWEEP_MAX_TIME_MS: f32 = 6000.0;
pub const DIVE_ALIGN_DISTANCE: f32 = 2.0;
pub const FIREBALL_INTERVAL_MS: f32 = 900.0;
pub const FIREBALL_SPEED: f32 = 0.012;
pub const HOVER_MS: f32 = 500.0;
pub const DIVE_ACCELERATION: f32 = 0.0005;
pub const DIVE_MAX_TIME_MS: f32 = 2000.0;

// GroundAttack
pub const GROUND_SWEEP_ACCELERATION: f32 = 0.00006;
pub const GROUND_SWEEP_MAX_TIME_MS: f32 = 2000.0;
pub const GROUND_STRIKE_DISTANCE: f32 = 6.0;
pub const SLAM_RECOVERY_MS: f32 = 600.0;

// Walker
pub const WALKER_SIZE: Vec2 = Vec2::new(1.0, 1.0);
pub const WALKER_MAX_HEALTH: f32 = 1.0;
pub const WALKER_INVINCIBILITY_MS: f32 = 150.0;
pub const WALKER_CONTACT_DAMAGE: f32 = 1.0;
pub const PATROL_ACCELERATION: f32 = 0.00003;

// Projectiles
pub const FIREBALL_SIZE: Vec2 = Vec2::new(0.5, 0.5);
pub const SHOCKWAVE_SIZE: Vec2 = Vec2::new(0.8, 0.6);
pub const SHOCKWAVE_SPEED: f32 = 0.01;
pub const PROJECTILE_DAMAGE: f32 = 1.0;
pub const PROJECTILE_LIFETIME_MS: f32 = 4000.0;

