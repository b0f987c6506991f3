//! Enemies domain: the dragon boss, walkers and the projectiles the boss releases.

pub mod dragon;
mod projectile;
mod systems;
mod tuning;
mod walker;

#[cfg(test)]
mod tests;

pub use dragon::DragonBehavior;
pub use projectile::{Expired, Flying, ProjectileBehavior, ProjectileContext, ProjectileKind};
pub use tuning::*;
pub use walker::{Patrol, WalkerBehavior, WalkerContext, WalkerDead};

use bevy::prelude::*;

use crate::core::SimulationSet;
use crate::enemies::systems::{
    spawn_boss, spawn_projectiles, spawn_walkers, tick_boss, tick_projectiles, tick_walkers,
};

pub struct EnemiesPlugin;

impl Plugin for EnemiesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (spawn_boss, spawn_walkers))
            .add_systems(Update, tick_boss.in_set(SimulationSet::Boss))
            .add_systems(Update, tick_walkers.in_set(SimulationSet::Walkers))
            .add_systems(Update, tick_projectiles.in_set(SimulationSet::Projectiles))
            .add_systems(Update, spawn_projectiles.in_set(SimulationSet::Cleanup));
    }
}
