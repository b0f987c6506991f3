//! Physics domain: axis-aligned bounding boxes used by every collision query.

use bevy::prelude::*;

/// Rectangle anchored at its top-left corner (positive Y points down).
///
/// Boxes are throwaway values: they are rebuilt from an entity's live
/// position every time a query needs one. The `z` component of `position`
/// is carried along but never takes part in overlap tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub position: Vec3,
    pub size: Vec2,
}

impl Aabb {
    /// Build a box; negative extents are clamped to zero.
    pub fn new(position: Vec3, size: Vec2) -> Self {
        Self {
            position,
            size: size.max(Vec2::ZERO),
        }
    }

    pub fn min_x(&self) -> f32 {
        self.position.x
    }

    pub fn max_x(&self) -> f32 {
        self.position.x + self.size.x
    }

    pub fn min_y(&self) -> f32 {
        self.position.y
    }

    pub fn max_y(&self) -> f32 {
        self.position.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.position.truncate() + self.size * 0.5
    }

    /// Strict overlap on both axes. Boxes that only share an edge do not
    /// overlap, so a body resting exactly on a surface is not colliding.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min_x() < other.max_x()
            && self.max_x() > other.min_x()
            && self.min_y() < other.max_y()
            && self.max_y() > other.min_y()
    }
}
