//! Level domain: the ASCII arena standing in for level loading, plus tile rendering.

mod layout;
mod systems;


pub use layout::{ARENA_ROWS, Level, LevelError, TILE_SIZE};

use bevy::prelude::*;

use crate::level::systems::{spawn_camera, spawn_tiles};

pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        let level = Level::from_rows(ARENA_ROWS, TILE_SIZE).unwrap_or_else(|error| {
            error!("Arena layout rejected: {error}; using an empty room");
            Level::empty_room(40, 22, TILE_SIZE)
        });

        app.insert_resource(level)
            .add_systems(Startup, (spawn_camera, spawn_tiles));
    }
}
