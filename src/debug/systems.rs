//! Debug domain: state and physics dumps.

use bevy::prelude::*;

use crate::enemies::{DragonBehavior, ProjectileBehavior, WalkerBehavior};
use crate::hero::HeroBehavior;
use crate::physics::PhysicsComponent;
use crate::sound::SoundPlayback;

fn flags(physics: &PhysicsComponent) -> String {
    let position = physics.position();
    let velocity = physics.velocity();
    format!(
        "pos=({:.2}, {:.2}) vel=({:.4}, {:.4}) on_ground={} colliding={} gravity={} flying={}",
        position.x,
        position.y,
        velocity.x,
        velocity.y,
        physics.on_ground(),
        physics.colliding(),
        physics.gravity_enabled(),
        physics.flying(),
    )
}

pub(crate) fn dump_states(
    keyboard: Res<ButtonInput<KeyCode>>,
    heroes: Query<(Entity, &HeroBehavior)>,
    bosses: Query<(Entity, &DragonBehavior)>,
    walkers: Query<(Entity, &WalkerBehavior)>,
    projectiles: Query<(Entity, &ProjectileBehavior)>,
) {
    if !keyboard.just_pressed(KeyCode::F1) {
        return;
    }

    for (entity, hero) in &heroes {
        info!(
            "[DEBUG] hero {:?} `{}` hp={} {}",
            entity,
            hero.describe(),
            hero.vitals().health().current,
            flags(hero.physics())
        );
    }
    for (entity, boss) in &bosses {
        info!(
            "[DEBUG] dragon {:?} `{}` hp={} {}",
            entity,
            boss.describe(),
            boss.vitals().health().current,
            flags(boss.physics())
        );
    }
    for (entity, walker) in &walkers {
        info!(
            "[DEBUG] walker {:?} `{}` {}",
            entity,
            walker.describe(),
            flags(walker.physics())
        );
    }
    for (entity, projectile) in &projectiles {
        info!(
            "[DEBUG] {:?} {:?} `{}` {}",
            projectile.kind(),
            entity,
            projectile.describe(),
            flags(projectile.physics())
        );
    }
}

pub(crate) fn dump_playback(keyboard: Res<ButtonInput<KeyCode>>, playback: Res<SoundPlayback>) {
    if keyboard.just_pressed(KeyCode::F2) {
        info!("[DEBUG] {} sound(s) playing", playback.len());
    }
}
