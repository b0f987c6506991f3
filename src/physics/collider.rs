//! Physics domain: tile grid geometry and the collision capability bodies query.

use bevy::prelude::*;

use crate::physics::Aabb;

/// Boolean collision capability consumed by [`crate::physics::PhysicsComponent`].
///
/// `collide_with_out_of_bounds` is chosen by the caller on every query: the
/// hero is clipped to the level edge while projectiles and enemies may leave
/// the playable area and be despawned later.
pub trait TileCollider: Send + Sync {
    fn is_colliding_with(&self, bounds: &Aabb, collide_with_out_of_bounds: bool) -> bool;

    /// False once `bounds` has left the level entirely.
    fn touches_level(&self, bounds: &Aabb) -> bool;
}

/// Row-major grid of solid/empty tiles. Row 0 is the top of the level.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tile_size: f32,
    solid: Vec<bool>,
}

impl TileGrid {
    pub fn new(width: usize, height: usize, tile_size: f32) -> Self {
        Self {
            width,
            height,
            tile_size,
            solid: vec![false; width * height],
        }
    }

    /// Build a grid from ASCII rows where `#` marks a solid tile.
    /// Short rows are padded with empty tiles.
    pub fn from_rows(rows: &[&str], tile_size: f32) -> Self {
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut grid = Self::new(width, rows.len(), tile_size);
        for (y, row) in rows.iter().enumerate() {
            for (x, tile) in row.chars().enumerate() {
                grid.set_solid(x, y, tile == '#');
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tile_size(&self) -> f32 {
        self.tile_size
    }

    /// Horizontal extent of the grid in world units.
    pub fn world_width(&self) -> f32 {
        self.width as f32 * self.tile_size
    }

    /// Vertical extent of the grid in world units.
    pub fn world_height(&self) -> f32 {
        self.height as f32 * self.tile_size
    }

    /// Out-of-range coordinates are ignored.
    pub fn set_solid(&mut self, x: usize, y: usize, solid: bool) {
        if x < self.width && y < self.height {
            self.solid[y * self.width + x] = solid;
        }
    }

    pub fn is_solid(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height && self.solid[y * self.width + x]
    }

    pub fn tile_bounds(&self, x: usize, y: usize) -> Aabb {
        Aabb::new(
            Vec3::new(x as f32 * self.tile_size, y as f32 * self.tile_size, 0.0),
            Vec2::splat(self.tile_size),
        )
    }

    pub fn solid_tiles(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.height)
            .flat_map(move |y| (0..self.width).map(move |x| (x, y)))
            .filter(|&(x, y)| self.is_solid(x, y))
    }

    /// True when any part of `bounds` lies outside the grid's extent.
    pub fn is_outside(&self, bounds: &Aabb) -> bool {
        bounds.min_x() < 0.0
            || bounds.min_y() < 0.0
            || bounds.max_x() > self.world_width()
            || bounds.max_y() > self.world_height()
    }

    /// Inclusive tile index ranges that `bounds` could touch, or `None` when
    /// the box lies entirely off the grid.
    fn tile_span(&self, bounds: &Aabb) -> Option<((usize, usize), (usize, usize))> {
        if self.width == 0
            || self.height == 0
            || bounds.max_x() <= 0.0
            || bounds.max_y() <= 0.0
            || bounds.min_x() >= self.world_width()
            || bounds.min_y() >= self.world_height()
        {
            return None;
        }

        let to_index = |value: f32, limit: usize| {
            ((value / self.tile_size).floor().max(0.0) as usize).min(limit - 1)
        };

        Some((
            (
                to_index(bounds.min_x(), self.width),
                to_index(bounds.max_x(), self.width),
            ),
            (
                to_index(bounds.min_y(), self.height),
                to_index(bounds.max_y(), self.height),
            ),
        ))
    }
}

impl TileCollider for TileGrid {
    fn is_colliding_with(&self, bounds: &Aabb, collide_with_out_of_bounds: bool) -> bool {
        if collide_with_out_of_bounds && self.is_outside(bounds) {
            return true;
        }

        let Some(((x0, x1), (y0, y1))) = self.tile_span(bounds) else {
            return false;
        };

        (y0..=y1).any(|y| {
            (x0..=x1).any(|x| self.is_solid(x, y) && self.tile_bounds(x, y).overlaps(bounds))
        })
    }

    fn touches_level(&self, bounds: &Aabb) -> bool {
        self.tile_span(bounds).is_some()
    }
}
