//! Sound domain: timer-driven playback stand-in that resolves completion handles.
//!
//! No audio is produced. Each requested cue runs for its nominal length and
//! then fires its completion, which is all the state machines observe.

mod playback;
mod systems;


pub use playback::{Playing, SoundPlayback};

use bevy::prelude::*;

use crate::core::SimulationSet;
use crate::sound::systems::{advance_sounds, start_sounds, stop_sounds};

pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SoundPlayback>().add_systems(
            Update,
            (stop_sounds, start_sounds, advance_sounds)
                .chain()
                .in_set(SimulationSet::Cleanup),
        );
    }
}
