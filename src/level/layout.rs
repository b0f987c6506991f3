//! Level domain: marker parsing for the arena layout.

use std::sync::Arc;

use bevy::prelude::*;
use thiserror::Error;

use crate::physics::TileGrid;

pub const TILE_SIZE: f32 = 1.0;

/// Gap left under freshly placed bodies so float error never starts them
/// overlapping the floor.
pub const SPAWN_CLEARANCE: f32 = 0.01;

/// `#` solid, `H` hero, `B` boss landing spot, `W` walker. The open top row
/// lets the boss fly in from above.
pub const ARENA_ROWS: &[&str] = &[
    "#......................................#",
    "#......................................#",
    "#......................................#",
    "#......................................#",
    "#......................................#",
    "#......................................#",
    "#......................................#",
    "#....######.....................######.#",
    "#......................................#",
    "#......................................#",
    "#......................................#",
    "#..........#######.....................#",
    "#......................................#",
    "#......................................#",
    "#......................................#",
    "#.######......................#######..#",
    "#......................................#",
    "#......................................#",
    "#......................................#",
    "#..H..........W........B..........W....#",
    "########################################",
    "########################################",
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LevelError {
    #[error("layout has no `{0}` marker")]
    MissingMarker(char),
    #[error("layout is empty")]
    Empty,
}

/// Tile geometry plus spawn anchors. Anchors are the bottom-left corner of
/// their marker tile, so an entity standing there has its feet on the floor.
#[derive(Resource, Debug, Clone)]
pub struct Level {
    grid: Arc<TileGrid>,
    hero_anchor: Vec3,
    boss_anchor: Option<Vec3>,
    walker_anchors: Vec<Vec3>,
}

impl Level {
    pub fn from_rows(rows: &[&str], tile_size: f32) -> Result<Self, LevelError> {
        if rows.is_empty() {
            return Err(LevelError::Empty);
        }

        let mut hero_anchor = None;
        let mut boss_anchor = None;
        let mut walker_anchors = Vec::new();

        for (y, row) in rows.iter().enumerate() {
            for (x, tile) in row.chars().enumerate() {
                let anchor = Vec3::new(x as f32 * tile_size, (y + 1) as f32 * tile_size, 0.0);
                match tile {
                    'H' => hero_anchor = Some(anchor),
                    'B' => boss_anchor = Some(anchor),
                    'W' => walker_anchors.push(anchor),
                    _ => {}
                }
            }
        }

        Ok(Self {
            grid: Arc::new(TileGrid::from_rows(rows, tile_size)),
            hero_anchor: hero_anchor.ok_or(LevelError::MissingMarker('H'))?,
            boss_anchor,
            walker_anchors,
        })
    }

    /// A walled box with only a hero anchor.
    pub fn empty_room(width: usize, height: usize, tile_size: f32) -> Self {
        let mut grid = TileGrid::new(width, height, tile_size);
        for x in 0..width {
            grid.set_solid(x, height.saturating_sub(1), true);
        }
        for y in 0..height {
            grid.set_solid(0, y, true);
            grid.set_solid(width.saturating_sub(1), y, true);
        }
        Self {
            grid: Arc::new(grid),
            hero_anchor: Vec3::new(2.0 * tile_size, (height.saturating_sub(1)) as f32 * tile_size, 0.0),
            boss_anchor: None,
            walker_anchors: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Arc<TileGrid> {
        &self.grid
    }

    pub fn hero_anchor(&self) -> Vec3 {
        self.hero_anchor
    }

    pub fn boss_anchor(&self) -> Option<Vec3> {
        self.boss_anchor
    }

    pub fn walker_anchors(&self) -> &[Vec3] {
        &self.walker_anchors
    }

    /// Top-left position that puts a body of `size` just above `anchor`.
    pub fn stand_on(anchor: Vec3, size: Vec2) -> Vec3 {
        Vec3::new(anchor.x, anchor.y - size.y - SPAWN_CLEARANCE, 0.0)
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.grid.world_width(), self.grid.world_height()) * 0.5
    }
}
