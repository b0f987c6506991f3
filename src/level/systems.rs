//! Level domain: camera framing and tile sprites.

use bevy::prelude::*;

use crate::core::{Pose, SimulationConfig};
use crate::level::Level;

const TILE_COLOR: Color = Color::srgb(0.32, 0.30, 0.38);

pub(crate) fn spawn_camera(mut commands: Commands, level: Res<Level>, config: Res<SimulationConfig>) {
    let center = level.center() * config.pixels_per_unit;
    commands.spawn((Camera2d, Transform::from_xyz(center.x, -center.y, 100.0)));
}

pub(crate) fn spawn_tiles(mut commands: Commands, level: Res<Level>, config: Res<SimulationConfig>) {
    let grid = level.grid();
    let size = Vec2::splat(grid.tile_size());
    for (x, y) in grid.solid_tiles() {
        let pose = Pose {
            position: grid.tile_bounds(x, y).position,
            size,
            layer: 0.0,
        };
        commands.spawn((
            pose,
            Sprite {
                color: TILE_COLOR,
                custom_size: Some(size * config.pixels_per_unit),
                ..default()
            },
            Transform::from_translation(pose.translation(config.pixels_per_unit)),
        ));
    }
    info!(
        "Arena ready: {}x{} tiles, {} walkers",
        grid.width(),
        grid.height(),
        level.walker_anchors().len()
    );
}
