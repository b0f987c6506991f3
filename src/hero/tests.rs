//! Hero domain: tests for locomotion transitions, death and respawn.

use approx::assert_relative_eq;
use bevy::prelude::*;
use rstest::{fixture, rstest};

use super::{
    COYOTE_TIME_MS, DASH_TIME_MS, HERO_INVINCIBILITY_MS, HERO_SIZE, HeroBehavior, HeroContext,
    HeroInput, HeroShared, RESPAWN_DELAY_MS,
};
use crate::combat::{DamageOutcome, Hit, Vitals};
use crate::core::{Effect, Effects, SoundCue};
use crate::fsm::{Completion, MachineStatus};
use crate::level::Level;
use crate::physics::PhysicsComponent;

const TICK_MS: f32 = 16.0;

/// 12x12 room with a floor on row 11 and the hero standing on it.
#[fixture]
fn room() -> Level {
    let mut rows = vec!["#..........#"; 10];
    rows.push("#...H......#");
    rows.push("############");
    Level::from_rows(&rows, 1.0).unwrap()
}

fn hero_in(level: &Level) -> HeroBehavior {
    let position = Level::stand_on(level.hero_anchor(), HERO_SIZE);
    HeroBehavior::new(position, level.grid().clone(), 3000.0).unwrap()
}

fn run(hero: &mut HeroBehavior, input: HeroInput, ticks: usize) {
    for _ in 0..ticks {
        hero.tick(input, TICK_MS).unwrap();
    }
}

/// Ticks until `name` is active, up to `limit`. Returns the ticks spent.
fn run_until(hero: &mut HeroBehavior, input: HeroInput, name: &str, limit: usize) -> Option<usize> {
    for tick in 1..=limit {
        hero.tick(input, TICK_MS).unwrap();
        if hero.state_name() == name {
            return Some(tick);
        }
    }
    None
}

fn held(axis: f32) -> HeroInput {
    HeroInput {
        axis,
        ..default()
    }
}

fn jump_press() -> HeroInput {
    HeroInput {
        jump_pressed: true,
        jump_held: true,
        ..default()
    }
}

fn jump_hold() -> HeroInput {
    HeroInput {
        jump_held: true,
        ..default()
    }
}

fn awaited_sound(effects: &mut Effects, wanted: SoundCue) -> Option<Completion> {
    effects.drain().find_map(|effect| match effect {
        Effect::PlaySound {
            cue,
            completion: Some(completion),
        } if cue == wanted => Some(completion),
        _ => None,
    })
}

// -----------------------------------------------------------------------------
// Ground states
// -----------------------------------------------------------------------------

#[rstest]
fn test_hero_settles_idle_on_the_floor(room: Level) {
    let mut hero = hero_in(&room);
    run(&mut hero, HeroInput::default(), 5);

    assert_eq!(hero.state_name(), "Idle");
    assert!(hero.physics().on_ground());
    assert_relative_eq!(hero.physics().velocity().y, 0.0);
}

#[rstest]
fn test_walk_moves_and_stops(room: Level) {
    let mut hero = hero_in(&room);
    run(&mut hero, HeroInput::default(), 2);
    let start_x = hero.physics().position().x;

    run(&mut hero, held(1.0), 1);
    assert_eq!(hero.state_name(), "Walk");
    run(&mut hero, held(1.0), 20);
    assert!(hero.physics().position().x > start_x + 0.5);
    assert_relative_eq!(hero.shared().facing, 1.0);

    run(&mut hero, HeroInput::default(), 1);
    assert_eq!(hero.state_name(), "Idle");
}

#[rstest]
fn test_jump_lifts_then_returns_to_idle_after_landing(room: Level) {
    let mut hero = hero_in(&room);
    run(&mut hero, HeroInput::default(), 3);
    let floor_y = hero.physics().position().y;

    run(&mut hero, jump_press(), 1);
    assert_eq!(hero.state_name(), "Jump");

    // Lift lasts 150ms while held.
    for _ in 0..10 {
        hero.tick(jump_hold(), TICK_MS).unwrap();
        assert!(hero.physics().velocity().y < 0.0);
    }
    assert!(hero.physics().position().y < floor_y - 0.5);
    assert!(!hero.physics().on_ground());

    let landed = run_until(&mut hero, HeroInput::default(), "Idle", 200);
    assert!(landed.is_some());
    assert!(hero.physics().on_ground());
    assert_relative_eq!(hero.physics().position().y, floor_y, epsilon = 0.1);
}

#[rstest]
fn test_releasing_jump_early_cuts_the_lift(room: Level) {
    let apex = |hold_ticks: usize| {
        let mut hero = hero_in(&room);
        run(&mut hero, HeroInput::default(), 3);
        run(&mut hero, jump_press(), 1);
        run(&mut hero, jump_hold(), hold_ticks);
        let mut highest = hero.physics().position().y;
        for _ in 0..80 {
            hero.tick(HeroInput::default(), TICK_MS).unwrap();
            highest = highest.min(hero.physics().position().y);
        }
        highest
    };

    assert!(apex(10) < apex(1));
}

#[test]
fn test_walking_off_a_ledge_falls_after_coyote_window() {
    let level = Level::from_rows(
        &[
            "#..........#",
            "#..........#",
            "#.H........#",
            "####.......#",
            "#..........#",
            "#..........#",
            "#..........#",
            "############",
        ],
        1.0,
    )
    .unwrap();
    let mut hero = hero_in(&level);
    run(&mut hero, HeroInput::default(), 3);

    let fell = run_until(&mut hero, held(1.0), "Jump", 200);
    assert!(fell.is_some());
    assert!(hero.shared().air_time_ms > COYOTE_TIME_MS);
    assert!(!hero.physics().on_ground());
}

#[test]
fn test_grounded_honours_coyote_window() {
    let grid = std::sync::Arc::new(crate::physics::TileGrid::new(4, 4, 1.0));
    let mut ctx = HeroContext {
        physics: PhysicsComponent::new(Vec3::ZERO, Vec2::ZERO, HERO_SIZE, grid),
        shared: HeroShared::default(),
        vitals: Vitals::new(1.0, 0.0),
        input: jump_press(),
        effects: Effects::default(),
    };

    ctx.shared.air_time_ms = COYOTE_TIME_MS - 1.0;
    assert!(ctx.wants_jump());
    ctx.shared.air_time_ms = COYOTE_TIME_MS + 1.0;
    assert!(!ctx.wants_jump());
}

#[test]
fn test_ceiling_bump_keeps_the_jump_airborne() {
    let mut rows = vec!["#..........#"; 8];
    rows.push("############");
    rows.push("#..........#");
    rows.push("#...H......#");
    rows.push("############");
    let low = Level::from_rows(&rows, 1.0).unwrap();
    let mut hero = hero_in(&low);
    run(&mut hero, HeroInput::default(), 3);
    let floor_y = hero.physics().position().y;

    run(&mut hero, jump_press(), 1);
    assert_eq!(hero.state_name(), "Jump");
    let bumped = (0..20).any(|_| {
        hero.tick(jump_hold(), TICK_MS).unwrap();
        hero.physics().hit_ceiling()
    });
    assert!(bumped, "never reached the ceiling");
    assert!(hero.physics().on_ground());
    assert!(!hero.physics().standing());

    hero.tick(jump_hold(), TICK_MS).unwrap();
    assert_eq!(hero.state_name(), "Jump");
    assert!(hero.shared().air_time_ms > 0.0);

    let landed = run_until(&mut hero, HeroInput::default(), "Idle", 200);
    assert!(landed.is_some());
    assert_relative_eq!(hero.physics().position().y, floor_y, epsilon = 0.1);
}

// -----------------------------------------------------------------------------
// Dash / stomp
// -----------------------------------------------------------------------------

#[rstest]
fn test_dash_suspends_gravity_and_is_consumed(room: Level) {
    let mut hero = hero_in(&room);
    run(&mut hero, HeroInput::default(), 3);
    let start_x = hero.physics().position().x;

    let dash = HeroInput {
        axis: 1.0,
        dash_pressed: true,
        ..default()
    };
    run(&mut hero, dash, 1);
    assert_eq!(hero.state_name(), "Dash");
    assert!(!hero.physics().gravity_enabled());
    assert!(!hero.shared().dash_available);

    let ticks = (DASH_TIME_MS / TICK_MS).ceil() as usize + 1;
    run(&mut hero, HeroInput::default(), ticks);
    assert_ne!(hero.state_name(), "Dash");
    assert!(hero.physics().gravity_enabled());
    assert!(hero.physics().position().x > start_x + 1.0);
}

#[rstest]
fn test_dash_respects_cooldown(room: Level) {
    let mut hero = hero_in(&room);
    run(&mut hero, HeroInput::default(), 3);
    let dash = HeroInput {
        dash_pressed: true,
        ..default()
    };

    run(&mut hero, dash, 1);
    run_until(&mut hero, HeroInput::default(), "Idle", 50).unwrap();
    run(&mut hero, dash, 1);
    assert_eq!(hero.state_name(), "Idle");
}

#[rstest]
fn test_stomp_lands_into_recovery_then_idle(room: Level) {
    let mut hero = hero_in(&room);
    run(&mut hero, HeroInput::default(), 3);
    run(&mut hero, jump_press(), 1);
    run(&mut hero, jump_hold(), 8);

    let stomp = HeroInput {
        stomp_pressed: true,
        ..default()
    };
    run(&mut hero, stomp, 1);
    assert_eq!(hero.state_name(), "Stomp");
    assert!(hero.is_stomping());

    assert!(run_until(&mut hero, HeroInput::default(), "AfterStomp", 100).is_some());
    assert!(run_until(&mut hero, HeroInput::default(), "Idle", 30).is_some());
}

#[rstest]
fn test_stomp_hit_counts_once_and_bounces(room: Level) {
    let mut hero = hero_in(&room);
    run(&mut hero, HeroInput::default(), 3);
    run(&mut hero, jump_press(), 1);
    run(&mut hero, jump_hold(), 8);
    run(
        &mut hero,
        HeroInput {
            stomp_pressed: true,
            ..default()
        },
        1,
    );

    assert!(hero.land_stomp());
    assert!(!hero.land_stomp());

    run(&mut hero, HeroInput::default(), 1);
    assert_eq!(hero.state_name(), "Jump");
    run(&mut hero, HeroInput::default(), 1);
    assert!(hero.physics().velocity().y < 0.0);
}

// -----------------------------------------------------------------------------
// Damage, death and respawn
// -----------------------------------------------------------------------------

#[rstest]
fn test_contact_damage_respects_invincibility(room: Level) {
    let mut hero = hero_in(&room);

    assert_eq!(hero.take_hit(Hit::new(1.0)), DamageOutcome::Applied);
    assert_eq!(hero.take_hit(Hit::new(1.0)), DamageOutcome::Ignored);

    let window_ticks = (HERO_INVINCIBILITY_MS / TICK_MS).ceil() as usize;
    run(&mut hero, HeroInput::default(), window_ticks);
    assert_eq!(hero.take_hit(Hit::new(1.0)), DamageOutcome::Applied);
    assert_relative_eq!(hero.vitals().health().current, 3.0);
}

#[rstest]
fn test_pushback_moves_the_hero(room: Level) {
    let mut hero = hero_in(&room);
    run(&mut hero, HeroInput::default(), 3);
    let start_x = hero.physics().position().x;

    hero.take_hit(Hit::new(1.0).with_pushback(Vec3::new(0.02, 0.0, 0.0), 200.0));
    run(&mut hero, HeroInput::default(), 10);

    assert!(hero.physics().position().x > start_x + 0.2);
}

#[rstest]
fn test_zero_health_enters_dead_and_requests_respawn(room: Level) {
    let mut hero = hero_in(&room);
    run(&mut hero, HeroInput::default(), 3);
    hero.effects_mut().drain();

    assert_eq!(hero.take_hit(Hit::new(10.0)), DamageOutcome::Killed);
    let status = hero.tick(held(1.0), TICK_MS).unwrap();
    assert_eq!(hero.state_name(), "Dead");
    assert_eq!(status, MachineStatus::Transitioning);
    assert_eq!(hero.take_hit(Hit::new(1.0)), DamageOutcome::Ignored);

    let death = awaited_sound(hero.effects_mut(), SoundCue::Death).unwrap();
    death.complete();

    let ticks = (RESPAWN_DELAY_MS / TICK_MS).ceil() as usize + 2;
    run(&mut hero, held(1.0), ticks);
    assert_eq!(hero.state_name(), "Dead");
    assert!(hero
        .effects_mut()
        .iter()
        .any(|effect| matches!(effect, Effect::RequestRespawn)));
}

#[rstest]
fn test_respawn_rebuilds_the_hero(room: Level) {
    let mut hero = hero_in(&room);
    hero.take_hit(Hit::new(10.0));
    run(&mut hero, HeroInput::default(), 2);
    assert_eq!(hero.state_name(), "Dead");

    let spawn = Level::stand_on(room.hero_anchor(), HERO_SIZE);
    hero.respawn(spawn).unwrap();

    assert_eq!(hero.state_name(), "Idle");
    assert!(!hero.vitals().is_terminal());
    assert_relative_eq!(hero.vitals().health().current, hero.vitals().health().max);
    assert_eq!(hero.physics().position(), spawn);
    assert_eq!(hero.shared(), &HeroShared::default());
}

#[rstest]
fn test_respawn_mid_dash_restores_gravity(room: Level) {
    let mut hero = hero_in(&room);
    run(&mut hero, HeroInput::default(), 3);
    let dash = HeroInput {
        axis: 1.0,
        dash_pressed: true,
        ..default()
    };
    run(&mut hero, dash, 1);
    assert_eq!(hero.state_name(), "Dash");
    assert!(!hero.physics().gravity_enabled());

    let spawn = Level::stand_on(room.hero_anchor(), HERO_SIZE);
    hero.respawn(spawn).unwrap();

    assert_eq!(hero.state_name(), "Idle");
    assert!(hero.physics().gravity_enabled());
    assert_eq!(hero.physics().position(), spawn);
    run(&mut hero, HeroInput::default(), 3);
    assert_eq!(hero.state_name(), "Idle");
}
