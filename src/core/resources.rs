//! Core domain: frame timing, effect buffering, randomness and render poses.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::core::effects::{Effect, Effects};

/// This frame's simulation step in milliseconds, already clamped.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct FrameDelta {
    pub ms: f32,
}

impl Default for FrameDelta {
    fn default() -> Self {
        Self { ms: 16.0 }
    }
}

impl FrameDelta {
    pub fn clamped(raw_ms: f32, max_ms: f32) -> Self {
        Self {
            ms: raw_ms.clamp(0.0, max_ms),
        }
    }
}

/// Seed every entity's random source derives from.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSeed(pub u64);

/// Effects drained from entity queues this frame, in tick order.
#[derive(Resource, Debug, Default)]
pub struct PendingEffects {
    entries: Vec<(Entity, Effect)>,
}

impl PendingEffects {
    pub fn collect(&mut self, source: Entity, effects: &mut Effects) {
        self.entries
            .extend(effects.drain().map(|effect| (source, effect)));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, (Entity, Effect)> {
        self.entries.drain(..)
    }
}

/// Uniform rolls in `[0, 1)` for decision making.
pub trait RandomSource: Send + Sync {
    fn roll(&mut self) -> f32;
}

#[derive(Debug, Clone)]
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    /// `salt` keeps entities sharing a run seed from rolling in lockstep.
    pub fn new(seed: u64, salt: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed ^ salt.wrapping_mul(0x9E37_79B9_7F4A_7C15)),
        }
    }
}

impl RandomSource for SeededRandom {
    fn roll(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// What the render step reads: top-left corner and size in world units
/// (Y grows downward).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub size: Vec2,
    /// Draw order; tiles sit at 0.
    pub layer: f32,
}

impl Pose {
    /// Bevy translation for this pose. World Y points down, screen Y up.
    pub fn translation(&self, pixels_per_unit: f32) -> Vec3 {
        let center = self.position.truncate() + self.size * 0.5;
        Vec3::new(
            center.x * pixels_per_unit,
            -center.y * pixels_per_unit,
            self.layer,
        )
    }
}
