//! Hero domain: input sampling, spawning, ticking and respawning.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::core::{
    EntityFaulted, FrameDelta, PendingEffects, Pose, RespawnRequested, SimulationConfig,
};
use crate::hero::behavior::HeroBehavior;
use crate::hero::context::HeroInput;
use crate::hero::tuning::HERO_SIZE;
use crate::level::Level;

const HERO_COLOR: Color = Color::srgb(0.35, 0.75, 0.95);
const HERO_LAYER: f32 = 3.0;

pub(crate) fn read_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<HeroInput>,
    mut respawns: MessageWriter<RespawnRequested>,
) {
    let mut axis = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        axis -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        axis += 1.0;
    }

    input.axis = axis;
    input.jump_pressed =
        keyboard.just_pressed(KeyCode::Space) || keyboard.just_pressed(KeyCode::KeyK);
    input.jump_held = keyboard.pressed(KeyCode::Space) || keyboard.pressed(KeyCode::KeyK);
    input.stomp_pressed =
        keyboard.just_pressed(KeyCode::KeyS) || keyboard.just_pressed(KeyCode::ArrowDown);
    input.dash_pressed =
        keyboard.just_pressed(KeyCode::ShiftLeft) || keyboard.just_pressed(KeyCode::KeyJ);

    if keyboard.just_pressed(KeyCode::KeyR) {
        respawns.write(RespawnRequested);
    }
}

pub(crate) fn spawn_hero(mut commands: Commands, level: Res<Level>, config: Res<SimulationConfig>) {
    let position = Level::stand_on(level.hero_anchor(), HERO_SIZE);
    let behavior = match HeroBehavior::new(
        position,
        level.grid().clone(),
        config.transition_timeout_ms,
    ) {
        Ok(behavior) => behavior,
        Err(error) => {
            error!("Hero failed to start: {error}");
            return;
        }
    };

    let pose = Pose {
        position,
        size: HERO_SIZE,
        layer: HERO_LAYER,
    };
    commands.spawn((
        behavior,
        pose,
        Sprite {
            color: HERO_COLOR,
            custom_size: Some(HERO_SIZE * config.pixels_per_unit),
            ..default()
        },
        Transform::from_translation(pose.translation(config.pixels_per_unit)),
    ));
    info!("Hero spawned at {:?}", position);
}

pub(crate) fn tick_hero(
    delta: Res<FrameDelta>,
    input: Res<HeroInput>,
    mut pending: ResMut<PendingEffects>,
    mut faults: MessageWriter<EntityFaulted>,
    mut heroes: Query<(Entity, &mut HeroBehavior, &mut Pose)>,
) {
    for (entity, mut hero, mut pose) in &mut heroes {
        if hero.is_faulted() {
            continue;
        }
        if let Err(error) = hero.tick(*input, delta.ms) {
            faults.write(EntityFaulted { entity, error });
        }
        pending.collect(entity, hero.effects_mut());
        pose.position = hero.physics().position();
    }
}

pub(crate) fn respawn_hero(
    level: Res<Level>,
    mut requests: MessageReader<RespawnRequested>,
    mut faults: MessageWriter<EntityFaulted>,
    mut heroes: Query<(Entity, &mut HeroBehavior)>,
) {
    if requests.read().count() == 0 {
        return;
    }

    let position = Level::stand_on(level.hero_anchor(), HERO_SIZE);
    for (entity, mut hero) in &mut heroes {
        if let Err(error) = hero.respawn(position) {
            faults.write(EntityFaulted { entity, error });
        }
    }
}
