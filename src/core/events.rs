//! Core domain: messages carrying effects out of entity ticks.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::core::effects::{SoundCue, SpawnRequest};
use crate::fsm::{Completion, StateError};

/// A sound should start playing for `source`.
#[derive(Debug, Clone)]
pub struct SoundRequested {
    pub source: Entity,
    pub cue: SoundCue,
    pub completion: Option<Completion>,
}

impl Message for SoundRequested {}

/// Every sound `source` is playing should stop.
#[derive(Debug, Clone)]
pub struct SoundStopped {
    pub source: Entity,
}

impl Message for SoundStopped {}

#[derive(Debug, Clone)]
pub struct SpawnRequested {
    pub source: Entity,
    pub request: SpawnRequest,
}

impl Message for SpawnRequested {}

#[derive(Debug, Clone)]
pub struct DespawnRequested {
    pub entity: Entity,
}

impl Message for DespawnRequested {}

/// The hero should be rebuilt at the level's spawn point.
#[derive(Debug, Clone)]
pub struct RespawnRequested;

impl Message for RespawnRequested {}

/// An entity's state machine failed; the entity is despawned.
#[derive(Debug, Clone)]
pub struct EntityFaulted {
    pub entity: Entity,
    pub error: StateError,
}

impl Message for EntityFaulted {}
