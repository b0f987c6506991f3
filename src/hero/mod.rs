//! Hero domain: the player character's states, controls and lifecycle.

mod behavior;
mod context;
mod states;
mod systems;
mod tuning;

#[cfg(test)]
mod tests;

pub use behavior::HeroBehavior;
pub use context::{HeroContext, HeroInput, HeroShared};
pub use states::{AfterStomp, Dash, Dead, Idle, Jump, Stomp, Walk};
pub use tuning::*;

use bevy::prelude::*;

use crate::core::SimulationSet;
use crate::hero::systems::{read_input, respawn_hero, spawn_hero, tick_hero};

pub struct HeroPlugin;

impl Plugin for HeroPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HeroInput>()
            .add_systems(Startup, spawn_hero)
            .add_systems(
                Update,
                (read_input, respawn_hero, tick_hero)
                    .chain()
                    .in_set(SimulationSet::Hero),
            );
    }
}
