//! Core domain: frame timing, effect dispatch, despawning and pose sync.

use std::collections::HashSet;
use std::path::Path;

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::core::config::{CONFIG_PATH, SimulationConfig};
use crate::core::effects::Effect;
use crate::core::events::{
    DespawnRequested, EntityFaulted, RespawnRequested, SoundRequested, SoundStopped,
    SpawnRequested,
};
use crate::core::resources::{FrameDelta, PendingEffects, Pose, RunSeed};

pub(crate) fn load_config(mut commands: Commands) {
    let config = SimulationConfig::load_or_default(Path::new(CONFIG_PATH));
    let seed = config.resolve_seed();
    info!("Simulation seed: {}", seed);
    commands.insert_resource(RunSeed(seed));
    commands.insert_resource(config);
}

pub(crate) fn update_frame_delta(
    time: Res<Time>,
    config: Res<SimulationConfig>,
    mut delta: ResMut<FrameDelta>,
) {
    *delta = FrameDelta::clamped(time.delta_secs() * 1000.0, config.max_frame_delta_ms);
}

/// Turn this frame's queued effects into messages for the collaborators.
pub(crate) fn dispatch_effects(
    mut pending: ResMut<PendingEffects>,
    mut sounds: MessageWriter<SoundRequested>,
    mut stops: MessageWriter<SoundStopped>,
    mut spawns: MessageWriter<SpawnRequested>,
    mut despawns: MessageWriter<DespawnRequested>,
    mut respawns: MessageWriter<RespawnRequested>,
) {
    for (source, effect) in pending.drain() {
        match effect {
            Effect::PlaySound { cue, completion } => {
                sounds.write(SoundRequested {
                    source,
                    cue,
                    completion,
                });
            }
            Effect::StopSound => {
                stops.write(SoundStopped { source });
            }
            Effect::Spawn(request) => {
                spawns.write(SpawnRequested { source, request });
            }
            Effect::DespawnSelf => {
                despawns.write(DespawnRequested { entity: source });
            }
            Effect::RequestRespawn => {
                respawns.write(RespawnRequested);
            }
        }
    }
}

pub(crate) fn despawn_entities(
    mut commands: Commands,
    mut requests: MessageReader<DespawnRequested>,
    mut faults: MessageReader<EntityFaulted>,
    alive: Query<Entity>,
) {
    let mut doomed = HashSet::new();

    for fault in faults.read() {
        error!("Entity {:?} faulted: {}", fault.entity, fault.error);
        doomed.insert(fault.entity);
    }
    for request in requests.read() {
        doomed.insert(request.entity);
    }

    for entity in doomed {
        if alive.contains(entity) {
            info!("Despawning {:?}", entity);
            commands.entity(entity).despawn();
        }
    }
}

pub(crate) fn sync_poses(config: Res<SimulationConfig>, mut query: Query<(&Pose, &mut Transform)>) {
    for (pose, mut transform) in &mut query {
        transform.translation = pose.translation(config.pixels_per_unit);
    }
}
