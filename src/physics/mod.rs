//! Physics domain: bounding boxes, tile collision and per-entity motion.

mod aabb;
mod body;
mod collider;


pub use aabb::Aabb;
pub use body::{AIR_DAMPING, Axis, GRAVITY, GROUND_DAMPING, PhysicsComponent, VELOCITY_EPSILON};
pub use collider::{TileCollider, TileGrid};
