//! Core domain: configuration, frame timing, effect plumbing and render sync.

mod config;
mod effects;
mod events;
mod resources;
mod systems;


pub use config::{CONFIG_PATH, ConfigError, SimulationConfig};
pub use effects::{Effect, Effects, SoundCue, SpawnRequest};
pub use events::{
    DespawnRequested, EntityFaulted, RespawnRequested, SoundRequested, SoundStopped,
    SpawnRequested,
};
pub use resources::{FrameDelta, PendingEffects, Pose, RandomSource, RunSeed, SeededRandom};

use bevy::prelude::*;

use crate::core::systems::{
    despawn_entities, dispatch_effects, load_config, sync_poses, update_frame_delta,
};

/// Per-frame ordering: entities tick hero first, then enemies, then
/// projectiles; combat reads the resolved positions afterwards.
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum SimulationSet {
    Frame,
    Hero,
    Boss,
    Walkers,
    Projectiles,
    Combat,
    Effects,
    Cleanup,
    Render,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimulationConfig>()
            .insert_resource(RunSeed(0))
            .init_resource::<FrameDelta>()
            .init_resource::<PendingEffects>()
            .add_message::<SoundRequested>()
            .add_message::<SoundStopped>()
            .add_message::<SpawnRequested>()
            .add_message::<DespawnRequested>()
            .add_message::<RespawnRequested>()
            .add_message::<EntityFaulted>()
            .configure_sets(
                Update,
                (
                    SimulationSet::Frame,
                    SimulationSet::Hero,
                    SimulationSet::Boss,
                    SimulationSet::Walkers,
                    SimulationSet::Projectiles,
                    SimulationSet::Combat,
                    SimulationSet::Effects,
                    SimulationSet::Cleanup,
                    SimulationSet::Render,
                )
                    .chain(),
            )
            .add_systems(PreStartup, load_config)
            .add_systems(Update, update_frame_delta.in_set(SimulationSet::Frame))
            .add_systems(Update, dispatch_effects.in_set(SimulationSet::Effects))
            .add_systems(Update, despawn_entities.in_set(SimulationSet::Cleanup))
            .add_systems(Update, sync_poses.in_set(SimulationSet::Render));
    }
}
