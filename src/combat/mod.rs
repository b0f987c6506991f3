//! Combat domain: vitals, damage gating and contact resolution.

mod systems;
mod vitals;


pub use systems::{CONTACT_PUSHBACK, CONTACT_PUSHBACK_MS, contact_hit, is_stomp_from_above};
pub use vitals::{DamageOutcome, Health, Hit, PUSHBACK_FRACTION, Vitals};

use bevy::prelude::*;

use crate::combat::systems::resolve_contacts;
use crate::core::SimulationSet;

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, resolve_contacts.in_set(SimulationSet::Combat));
    }
}
