//! Debug domain: developer hotkeys, compiled in with the `dev-tools` feature.
//!
//! Hotkeys:
//! - F1: log every entity's active state path and physics flags
//! - F2: log the playing sounds

mod systems;

use bevy::prelude::*;

use crate::debug::systems::{dump_playback, dump_states};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, (dump_states, dump_playback));
    }
}
