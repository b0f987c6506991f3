//! Core domain: fire-and-forget effects that states queue for the outside world.
//!
//! States never touch the ECS. They push effects onto their entity's
//! [`Effects`] queue and the owning system forwards them as messages after
//! the tick.

use bevy::prelude::*;

use crate::fsm::Completion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    Jump,
    Land,
    Stomp,
    StompImpact,
    Dash,
    Hurt,
    Death,
    Roar,
    ChargeUp,
    Slash,
    Slam,
    Fireball,
    Defeated,
}

impl SoundCue {
    /// Playback length used by the sound stand-in.
    pub fn duration_ms(self) -> f32 {
        match self {
            Self::Jump | Self::Dash | Self::Land => 150.0,
            Self::Stomp | Self::Hurt | Self::Fireball => 250.0,
            Self::StompImpact | Self::Slash => 350.0,
            Self::ChargeUp | Self::Slam => 500.0,
            Self::Death => 900.0,
            Self::Roar => 1200.0,
            Self::Defeated => 1500.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpawnRequest {
    Fireball { position: Vec3, velocity: Vec3 },
    /// Ground wave travelling along the floor; `direction` is -1 or +1.
    Shockwave { position: Vec3, direction: f32 },
}

#[derive(Debug, Clone)]
pub enum Effect {
    PlaySound {
        cue: SoundCue,
        completion: Option<Completion>,
    },
    StopSound,
    Spawn(SpawnRequest),
    DespawnSelf,
    RequestRespawn,
}

#[derive(Debug, Default)]
pub struct Effects {
    queue: Vec<Effect>,
}

impl Effects {
    pub fn play_sound(&mut self, cue: SoundCue) {
        self.queue.push(Effect::PlaySound {
            cue,
            completion: None,
        });
    }

    /// Play `cue` and get a handle that fires when playback ends. Hooks
    /// return it as [`crate::fsm::Hook::Await`] to hold a transition.
    pub fn play_sound_awaited(&mut self, cue: SoundCue) -> Completion {
        let completion = Completion::new();
        self.queue.push(Effect::PlaySound {
            cue,
            completion: Some(completion.clone()),
        });
        completion
    }

    /// Stop everything this entity is playing.
    pub fn stop_sound(&mut self) {
        self.queue.push(Effect::StopSound);
    }

    pub fn spawn(&mut self, request: SpawnRequest) {
        self.queue.push(Effect::Spawn(request));
    }

    pub fn despawn_self(&mut self) {
        self.queue.push(Effect::DespawnSelf);
    }

    pub fn request_respawn(&mut self) {
        self.queue.push(Effect::RequestRespawn);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Effect> {
        self.queue.iter()
    }

    pub fn drain(&mut self) -> std::vec::Drain<'_, Effect> {
        self.queue.drain(..)
    }
}
