//! Combat domain: health, invincibility windows and pushback.

use bevy::prelude::*;

/// Share of the recorded pushback force re-applied on every tick while the
/// pushback is running.
pub const PUSHBACK_FRACTION: f32 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    pub fn heal(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.max - self.current);
        self.current += actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub amount: f32,
    pub pushback: Vec3,
    pub pushback_duration_ms: f32,
}

impl Hit {
    pub fn new(amount: f32) -> Self {
        Self {
            amount,
            pushback: Vec3::ZERO,
            pushback_duration_ms: 0.0,
        }
    }

    pub fn with_pushback(mut self, pushback: Vec3, duration_ms: f32) -> Self {
        self.pushback = pushback;
        self.pushback_duration_ms = duration_ms;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    Ignored,
    Applied,
    /// The hit took the last point of health.
    Killed,
}

#[derive(Debug, Clone)]
pub struct Vitals {
    health: Health,
    invincibility_window_ms: f32,
    invincible_ms: f32,
    pushback: Vec3,
    pushback_ms: f32,
    terminal: bool,
}

impl Vitals {
    pub fn new(max_health: f32, invincibility_window_ms: f32) -> Self {
        Self {
            health: Health::new(max_health),
            invincibility_window_ms,
            invincible_ms: 0.0,
            pushback: Vec3::ZERO,
            pushback_ms: 0.0,
            terminal: false,
        }
    }

    pub fn health(&self) -> &Health {
        &self.health
    }

    pub fn is_dead(&self) -> bool {
        self.health.is_dead()
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_ms > 0.0
    }

    /// Set once the entity's death state has taken over.
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    pub fn mark_terminal(&mut self) {
        self.terminal = true;
    }

    /// Apply `hit` regardless of the invincibility window.
    pub fn damage(&mut self, hit: Hit) -> DamageOutcome {
        if self.terminal || self.health.is_dead() {
            return DamageOutcome::Ignored;
        }

        self.invincible_ms = self.invincibility_window_ms;
        self.health.take_damage(hit.amount);
        self.pushback = hit.pushback;
        self.pushback_ms = hit.pushback_duration_ms;

        if self.health.is_dead() {
            DamageOutcome::Killed
        } else {
            DamageOutcome::Applied
        }
    }

    /// Apply `hit` unless the entity was hit within its invincibility window.
    pub fn damage_with_invincibility_considered(&mut self, hit: Hit) -> DamageOutcome {
        if self.is_invincible() {
            return DamageOutcome::Ignored;
        }
        self.damage(hit)
    }

    pub fn tick(&mut self, delta_ms: f32) {
        self.invincible_ms = (self.invincible_ms - delta_ms).max(0.0);
        self.pushback_ms = (self.pushback_ms - delta_ms).max(0.0);
    }

    /// Force the active state re-adds this tick.
    pub fn pushback_force(&self) -> Vec3 {
        if self.pushback_ms > 0.0 {
            self.pushback * PUSHBACK_FRACTION
        } else {
            Vec3::ZERO
        }
    }

    /// Back to full health with no timers running.
    pub fn restore(&mut self) {
        self.health.heal(self.health.max);
        self.invincible_ms = 0.0;
        self.pushback = Vec3::ZERO;
        self.pushback_ms = 0.0;
        self.terminal = false;
    }
}
