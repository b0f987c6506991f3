//! Enemies domain: spawning and per-frame ticking of the boss, walkers and projectiles.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::core::{
    EntityFaulted, FrameDelta, PendingEffects, Pose, RunSeed, SeededRandom, SimulationConfig,
    SpawnRequested,
};
use crate::enemies::dragon::DragonBehavior;
use crate::enemies::projectile::{ProjectileBehavior, ProjectileKind};
use crate::enemies::tuning::{BOSS_SIZE, WALKER_SIZE};
use crate::enemies::walker::WalkerBehavior;
use crate::hero::HeroBehavior;
use crate::level::Level;

const BOSS_COLOR: Color = Color::srgb(0.85, 0.25, 0.2);
const WALKER_COLOR: Color = Color::srgb(0.55, 0.8, 0.3);
const FIREBALL_COLOR: Color = Color::srgb(1.0, 0.6, 0.1);
const SHOCKWAVE_COLOR: Color = Color::srgb(0.9, 0.85, 0.6);
const ENEMY_LAYER: f32 = 2.0;
const PROJECTILE_LAYER: f32 = 4.0;
/// Salt for the boss's random source.
const BOSS_RNG_SALT: u64 = 1;

fn body_sprite(pose: Pose, color: Color, pixels_per_unit: f32) -> (Pose, Sprite, Transform) {
    (
        pose,
        Sprite {
            color,
            custom_size: Some(pose.size * pixels_per_unit),
            ..default()
        },
        Transform::from_translation(pose.translation(pixels_per_unit)),
    )
}

pub(crate) fn spawn_boss(
    mut commands: Commands,
    level: Res<Level>,
    config: Res<SimulationConfig>,
    seed: Res<RunSeed>,
) {
    let Some(anchor) = level.boss_anchor() else {
        return;
    };
    // Starts above the arena and flies in.
    let position = Vec3::new(anchor.x, -BOSS_SIZE.y - 1.0, 0.0);
    let rng = Box::new(SeededRandom::new(seed.0, BOSS_RNG_SALT));

    match DragonBehavior::new(
        position,
        level.grid().clone(),
        rng,
        config.transition_timeout_ms,
    ) {
        Ok(dragon) => {
            let pose = Pose {
                position,
                size: BOSS_SIZE,
                layer: ENEMY_LAYER,
            };
            commands.spawn((dragon, body_sprite(pose, BOSS_COLOR, config.pixels_per_unit)));
            info!("Dragon spawned, landing at {:?}", anchor);
        }
        Err(error) => error!("Dragon failed to start: {error}"),
    }
}

pub(crate) fn spawn_walkers(mut commands: Commands, level: Res<Level>, config: Res<SimulationConfig>) {
    for (index, anchor) in level.walker_anchors().iter().enumerate() {
        let position = Level::stand_on(*anchor, WALKER_SIZE);
        let facing = if index % 2 == 0 { 1.0 } else { -1.0 };
        match WalkerBehavior::new(
            position,
            facing,
            level.grid().clone(),
            config.transition_timeout_ms,
        ) {
            Ok(walker) => {
                let pose = Pose {
                    position,
                    size: WALKER_SIZE,
                    layer: ENEMY_LAYER,
                };
                commands.spawn((walker, body_sprite(pose, WALKER_COLOR, config.pixels_per_unit)));
            }
            Err(error) => error!("Walker failed to start: {error}"),
        }
    }
}

pub(crate) fn spawn_projectiles(
    mut commands: Commands,
    mut requests: MessageReader<SpawnRequested>,
    level: Res<Level>,
    config: Res<SimulationConfig>,
) {
    for request in requests.read() {
        match ProjectileBehavior::new(
            request.request,
            level.grid().clone(),
            config.transition_timeout_ms,
        ) {
            Ok(projectile) => {
                let color = match projectile.kind() {
                    ProjectileKind::Fireball => FIREBALL_COLOR,
                    ProjectileKind::Shockwave => SHOCKWAVE_COLOR,
                };
                let pose = Pose {
                    position: projectile.physics().position(),
                    size: ProjectileBehavior::size_of(projectile.kind()),
                    layer: PROJECTILE_LAYER,
                };
                debug!("{:?} spawned by {:?}", projectile.kind(), request.source);
                commands.spawn((projectile, body_sprite(pose, color, config.pixels_per_unit)));
            }
            Err(error) => error!("Projectile failed to start: {error}"),
        }
    }
}

pub(crate) fn tick_boss(
    delta: Res<FrameDelta>,
    mut pending: ResMut<PendingEffects>,
    mut faults: MessageWriter<EntityFaulted>,
    heroes: Query<&HeroBehavior>,
    mut bosses: Query<(Entity, &mut DragonBehavior, &mut Pose)>,
) {
    let target = heroes.iter().next().map(|hero| hero.bounds().center());
    for (entity, mut boss, mut pose) in &mut bosses {
        if boss.is_faulted() {
            continue;
        }
        let target = target.unwrap_or_else(|| boss.bounds().center());
        if let Err(error) = boss.tick(target, delta.ms) {
            faults.write(EntityFaulted { entity, error });
        }
        pending.collect(entity, boss.effects_mut());
        pose.position = boss.physics().position();
    }
}

pub(crate) fn tick_walkers(
    delta: Res<FrameDelta>,
    mut pending: ResMut<PendingEffects>,
    mut faults: MessageWriter<EntityFaulted>,
    mut walkers: Query<(Entity, &mut WalkerBehavior, &mut Pose)>,
) {
    for (entity, mut walker, mut pose) in &mut walkers {
        if walker.is_faulted() {
            continue;
        }
        if let Err(error) = walker.tick(delta.ms) {
            faults.write(EntityFaulted { entity, error });
        }
        pending.collect(entity, walker.effects_mut());
        pose.position = walker.physics().position();
    }
}

pub(crate) fn tick_projectiles(
    delta: Res<FrameDelta>,
    mut pending: ResMut<PendingEffects>,
    mut faults: MessageWriter<EntityFaulted>,
    mut projectiles: Query<(Entity, &mut ProjectileBehavior, &mut Pose)>,
) {
    for (entity, mut projectile, mut pose) in &mut projectiles {
        if projectile.is_faulted() {
            continue;
        }
        if let Err(error) = projectile.tick(delta.ms) {
            faults.write(EntityFaulted { entity, error });
        }
        pending.collect(entity, projectile.effects_mut());
        pose.position = projectile.physics().position();
    }
}
