//! Sound domain: the set of cues currently playing.

use bevy::prelude::*;

use crate::core::SoundCue;
use crate::fsm::Completion;

#[derive(Debug, Clone)]
pub struct Playing {
    pub source: Entity,
    pub cue: SoundCue,
    pub remaining_ms: f32,
    pub completion: Option<Completion>,
}

impl Playing {
    /// Resolve the waiter, if any. Safe to call more than once.
    fn finish(&self) {
        if let Some(completion) = &self.completion {
            completion.complete();
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct SoundPlayback {
    playing: Vec<Playing>,
}

impl SoundPlayback {
    pub fn start(&mut self, source: Entity, cue: SoundCue, completion: Option<Completion>) {
        self.playing.push(Playing {
            source,
            cue,
            remaining_ms: cue.duration_ms(),
            completion,
        });
    }

    /// Stop every cue `source` is playing. Stopped cues still resolve their
    /// completions so nothing waits on a sound that will never end.
    pub fn stop(&mut self, source: Entity) -> usize {
        let before = self.playing.len();
        self.playing.retain(|sound| {
            if sound.source == source {
                sound.finish();
                false
            } else {
                true
            }
        });
        before - self.playing.len()
    }

    /// Run playback forward; returns the cues that finished this step.
    pub fn advance(&mut self, delta_ms: f32) -> Vec<Playing> {
        let mut finished = Vec::new();
        self.playing.retain_mut(|sound| {
            sound.remaining_ms -= delta_ms;
            if sound.remaining_ms <= 0.0 {
                sound.finish();
                finished.push(sound.clone());
                false
            } else {
                true
            }
        });
        finished
    }

    pub fn is_playing(&self, source: Entity, cue: SoundCue) -> bool {
        self.playing
            .iter()
            .any(|sound| sound.source == source && sound.cue == cue)
    }

    pub fn len(&self) -> usize {
        self.playing.len()
    }

    pub fn is_empty(&self) -> bool {
        self.playing.is_empty()
    }
}
