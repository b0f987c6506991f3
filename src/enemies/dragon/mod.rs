//! Enemies domain: the dragon boss and its nested attack machines.

mod behavior;
mod composite;
mod context;
mod fly_attack;
mod ground_attack;
mod rush;
mod states;

pub use behavior::DragonBehavior;
pub use context::{BossContext, BossShared};
pub use fly_attack::{Dive, FlyAttack, FlyPreAttack, ReachAltitude, Sweeping};
pub use ground_attack::{GroundAttack, GroundSweeping, Slam};
pub use rush::{Rush, RushAttack, RushBacking, RushCharge, RushPreAttack, RushStart};
pub use states::{Defeated, EnterArena, Idle, attack_for_roll};
