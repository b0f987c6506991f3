//! Enemies domain: tests for the dragon's attack selection and nested attacks,
//! walkers and projectiles.

use std::sync::Arc;

use approx::assert_relative_eq;
use bevy::prelude::*;
use rstest::{fixture, rstest};

use super::dragon::{
    BossContext, BossShared, DragonBehavior, GroundAttack, Rush, RushBacking, RushCharge, Sweeping,
    attack_for_roll,
};
use super::systems::spawn_projectiles;
use super::{
    BACKING_CLOSE_TIME_MS, BACKING_MAX_TIME_MS, BOSS_MAX_HEALTH, BOSS_SIZE, ProjectileBehavior,
    ProjectileKind, WalkerBehavior,
};
use crate::combat::{Hit, Vitals};
use crate::core::{
    Effect, Effects, RandomSource, SimulationConfig, SoundCue, SpawnRequest, SpawnRequested,
};
use crate::fsm::{State, Step};
use crate::level::Level;
use crate::physics::{PhysicsComponent, TileGrid};

const TICK_MS: f32 = 16.0;

/// Rolls a fixed script, repeating the last value.
struct ScriptedRandom {
    rolls: Vec<f32>,
    next: usize,
}

impl ScriptedRandom {
    fn new(rolls: &[f32]) -> Box<Self> {
        Box::new(Self {
            rolls: rolls.to_vec(),
            next: 0,
        })
    }
}

impl RandomSource for ScriptedRandom {
    fn roll(&mut self) -> f32 {
        let roll = self.rolls[self.next.min(self.rolls.len() - 1)];
        self.next += 1;
        roll
    }
}

/// 40x22 arena with walls, an open top and a floor at y = 20.
#[fixture]
fn arena() -> Arc<TileGrid> {
    let open = format!("#{}#", ".".repeat(38));
    let floor = "#".repeat(40);
    let mut rows: Vec<&str> = vec![open.as_str(); 20];
    rows.push(&floor);
    rows.push(&floor);
    Arc::new(TileGrid::from_rows(&rows, 1.0))
}

/// Boss just above the floor so EnterArena lands on the first ticks.
fn grounded_boss(grid: &Arc<TileGrid>, rolls: &[f32]) -> DragonBehavior {
    let position = Vec3::new(18.0, 20.0 - BOSS_SIZE.y - 0.05, 0.0);
    DragonBehavior::new(position, grid.clone(), ScriptedRandom::new(rolls), 3000.0).unwrap()
}

/// One tick with an instant sound player: awaited cues finish right away.
fn step(boss: &mut DragonBehavior, target: Vec2) -> Vec<Effect> {
    boss.tick(target, TICK_MS).unwrap();
    let effects: Vec<Effect> = boss.effects_mut().drain().collect();
    for effect in &effects {
        if let Effect::PlaySound {
            completion: Some(completion),
            ..
        } = effect
        {
            completion.complete();
        }
    }
    effects
}

/// Hero stand-in, five units right of a grounded boss.
const TARGET: Vec2 = Vec2::new(24.5, 18.7);

/// Distinct state paths visited, until `count` are seen or `limit` ticks pass.
fn visit(boss: &mut DragonBehavior, count: usize, limit: usize) -> (Vec<String>, Vec<Effect>) {
    let mut paths = vec![boss.describe()];
    let mut effects = Vec::new();
    for _ in 0..limit {
        effects.extend(step(boss, TARGET));
        let path = boss.describe();
        if paths.last() != Some(&path) {
            paths.push(path);
        }
        if paths.len() >= count {
            break;
        }
    }
    (paths, effects)
}

fn boss_context(grid: &Arc<TileGrid>, position: Vec3, target: Vec2) -> BossContext {
    BossContext {
        physics: PhysicsComponent::new(position, Vec2::ZERO, BOSS_SIZE, grid.clone()),
        shared: BossShared::default(),
        vitals: Vitals::new(BOSS_MAX_HEALTH, 0.0),
        target,
        rng: ScriptedRandom::new(&[0.0]),
        effects: Effects::default(),
        transition_timeout_ms: 3000.0,
    }
}

fn changed_to(step: Step<BossContext>) -> Option<&'static str> {
    match step {
        Step::Change(next) => Some(next.name()),
        _ => None,
    }
}

// -----------------------------------------------------------------------------
// Attack selection
// -----------------------------------------------------------------------------

#[rstest]
#[case(0.0, "FlyAttack")]
#[case(0.349, "FlyAttack")]
#[case(0.35, "Rush")]
#[case(0.699, "Rush")]
#[case(0.7, "GroundAttack")]
#[case(0.999, "GroundAttack")]
fn test_roll_bands_pick_attacks(#[case] roll: f32, #[case] expected: &str) {
    assert_eq!(changed_to(attack_for_roll(roll)), Some(expected));
}

#[rstest]
fn test_boss_lands_roars_then_idles(arena: Arc<TileGrid>) {
    let mut boss = grounded_boss(&arena, &[0.5]);
    assert_eq!(boss.state_name(), "EnterArena");
    assert!(boss.physics().flying());

    let mut roared = false;
    for _ in 0..20 {
        let effects = step(&mut boss, Vec2::new(30.0, 18.0));
        roared |= effects.iter().any(|effect| {
            matches!(
                effect,
                Effect::PlaySound {
                    cue: SoundCue::Roar,
                    ..
                }
            )
        });
        if boss.state_name() == "Idle" {
            break;
        }
    }

    assert!(roared);
    assert_eq!(boss.state_name(), "Idle");
    assert!(!boss.physics().flying());
}

// -----------------------------------------------------------------------------
// Rush thresholds
// -----------------------------------------------------------------------------

#[rstest]
fn test_backing_charges_after_staying_close(arena: Arc<TileGrid>) {
    let position = Vec3::new(18.0, 17.45, 0.0);
    let mut ctx = boss_context(&arena, position, Vec2::new(24.0, 18.7));
    ctx.face_target();
    let mut backing = RushBacking::default();

    let close_ticks = (BACKING_CLOSE_TIME_MS / TICK_MS) as usize;
    for _ in 0..close_ticks {
        let step = backing.update(&mut ctx, TICK_MS).unwrap();
        assert!(matches!(step, Step::Stay));
        assert!(ctx.distance_to_target() < 15.0);
    }
    let step = backing.update(&mut ctx, TICK_MS).unwrap();
    assert_eq!(changed_to(step), Some("Charge"));
}

#[rstest]
fn test_backing_charges_after_max_time_when_far(arena: Arc<TileGrid>) {
    let position = Vec3::new(30.0, 17.45, 0.0);
    let mut ctx = boss_context(&arena, position, Vec2::new(2.0, 18.7));
    ctx.face_target();
    let mut backing = RushBacking::default();

    let max_ticks = (BACKING_MAX_TIME_MS / TICK_MS) as usize;
    for _ in 0..max_ticks {
        let step = backing.update(&mut ctx, TICK_MS).unwrap();
        assert!(matches!(step, Step::Stay));
    }
    let step = backing.update(&mut ctx, TICK_MS).unwrap();
    assert_eq!(changed_to(step), Some("Charge"));
}

#[rstest]
#[case(3.0, None)]
#[case(2.9, Some("PreAttack"))]
#[case(-2.9, Some("PreAttack"))]
#[case(-10.0, None)]
fn test_charge_strikes_only_within_range(
    arena: Arc<TileGrid>,
    #[case] dx: f32,
    #[case] expected: Option<&'static str>,
) {
    let position = Vec3::new(18.0, 17.45, 0.0);
    let center = Vec2::new(18.0 + BOSS_SIZE.x * 0.5, 17.45 + BOSS_SIZE.y * 0.5);
    let mut ctx = boss_context(&arena, position, center + Vec2::new(dx, -4.0));
    ctx.face_target();

    let step = RushCharge.update(&mut ctx, TICK_MS).unwrap();
    assert_eq!(changed_to(step), expected);
}

#[rstest]
fn test_rush_turns_to_the_hero_except_mid_lunge(arena: Arc<TileGrid>) {
    let position = Vec3::new(18.0, 17.45, 0.0);
    let mut ctx = boss_context(&arena, position, Vec2::new(30.0, 18.7));
    let mut rush = Rush::new();
    rush.enter(&mut ctx).unwrap();
    assert_relative_eq!(ctx.shared.facing, 1.0);

    ctx.target = Vec2::new(5.0, 18.7);
    rush.update(&mut ctx, TICK_MS).unwrap();
    assert_eq!(rush.describe(), "Rush/Start");
    assert_relative_eq!(ctx.shared.facing, -1.0);

    ctx.shared.attacking = true;
    ctx.target = Vec2::new(30.0, 18.7);
    rush.update(&mut ctx, TICK_MS).unwrap();
    assert_relative_eq!(ctx.shared.facing, -1.0);
}

#[rstest]
fn test_ground_attack_stalks_the_hero_across_sides(arena: Arc<TileGrid>) {
    let position = Vec3::new(18.0, 17.45, 0.0);
    let mut ctx = boss_context(&arena, position, Vec2::new(35.0, 18.7));
    let mut attack = GroundAttack::new();
    attack.enter(&mut ctx).unwrap();
    assert_relative_eq!(ctx.shared.facing, 1.0);

    ctx.target = Vec2::new(3.0, 18.7);
    attack.update(&mut ctx, TICK_MS).unwrap();
    assert_eq!(attack.describe(), "GroundAttack/Sweeping");
    assert_relative_eq!(ctx.shared.facing, -1.0);
    assert!(ctx.physics.velocity().x < 0.0);
}

#[rstest]
fn test_sweep_reverses_when_pinned_against_a_wall(arena: Arc<TileGrid>) {
    // 0.005 short of the right wall and still at rest.
    let position = Vec3::new(39.0 - BOSS_SIZE.x - 0.005, 5.0, 0.0);
    let mut ctx = boss_context(&arena, position, Vec2::new(5.0, 18.7));
    ctx.physics.set_flying(true);
    ctx.shared.facing = 1.0;
    let mut sweeping = Sweeping::default();

    for _ in 0..3 {
        sweeping.update(&mut ctx, TICK_MS).unwrap();
    }
    assert_relative_eq!(ctx.shared.facing, -1.0);
    assert!(ctx.physics.position().x < position.x);
}

// -----------------------------------------------------------------------------
// Nested attacks end to end
// -----------------------------------------------------------------------------

#[rstest]
fn test_rush_cycles_through_its_inner_states(arena: Arc<TileGrid>) {
    let mut boss = grounded_boss(&arena, &[0.5]);
    let (paths, _) = visit(&mut boss, 8, 2000);

    assert_eq!(
        paths,
        [
            "EnterArena",
            "Idle",
            "Rush/Start",
            "Rush/Backing",
            "Rush/Charge",
            "Rush/PreAttack",
            "Rush/Attack",
            "Idle",
        ]
    );
    assert!(!boss.shared().attacking);
    assert!(boss.shared().time_since_last_attack_ms < 100.0);
}

#[rstest]
fn test_fly_attack_climbs_fires_and_dives(arena: Arc<TileGrid>) {
    let mut boss = grounded_boss(&arena, &[0.1]);
    let (paths, effects) = visit(&mut boss, 7, 3000);

    assert_eq!(
        paths,
        [
            "EnterArena",
            "Idle",
            "FlyAttack/ReachAltitude",
            "FlyAttack/Sweeping",
            "FlyAttack/PreAttack",
            "FlyAttack/Attack",
            "Idle",
        ]
    );
    assert!(effects.iter().any(|effect| matches!(
        effect,
        Effect::Spawn(SpawnRequest::Fireball { .. })
    )));
    assert!(!boss.physics().flying());
}

#[rstest]
fn test_ground_attack_slams_out_two_shockwaves(arena: Arc<TileGrid>) {
    let mut boss = grounded_boss(&arena, &[0.9]);
    let (paths, effects) = visit(&mut boss, 5, 2000);

    assert_eq!(
        paths,
        [
            "EnterArena",
            "Idle",
            "GroundAttack/Sweeping",
            "GroundAttack/Attack",
            "Idle",
        ]
    );
    let shockwaves: Vec<f32> = effects
        .iter()
        .filter_map(|effect| match effect {
            Effect::Spawn(SpawnRequest::Shockwave { direction, .. }) => Some(*direction),
            _ => None,
        })
        .collect();
    assert_eq!(shockwaves, vec![-1.0, 1.0]);
}

#[rstest]
fn test_defeated_boss_despawns_itself(arena: Arc<TileGrid>) {
    let mut boss = grounded_boss(&arena, &[0.5]);
    visit(&mut boss, 3, 500);
    assert_eq!(boss.describe(), "Rush/Start");

    for _ in 0..(BOSS_MAX_HEALTH as usize) {
        boss.take_stomp(Hit::new(1.0));
    }
    assert!(boss.contact_damage().is_none());

    let mut despawned = false;
    for _ in 0..100 {
        let effects = step(&mut boss, Vec2::new(30.0, 18.0));
        assert_eq!(boss.state_name(), "Defeated");
        despawned |= effects
            .iter()
            .any(|effect| matches!(effect, Effect::DespawnSelf));
    }
    assert!(despawned);
}

// -----------------------------------------------------------------------------
// Walkers
// -----------------------------------------------------------------------------

fn run_walker_until(walker: &mut WalkerBehavior, name: &str, limit: usize) -> bool {
    for _ in 0..limit {
        walker.tick(TICK_MS).unwrap();
        if walker.state_name() == name {
            return true;
        }
    }
    false
}

#[rstest]
fn test_walker_turns_around_at_walls(arena: Arc<TileGrid>) {
    let mut walker = WalkerBehavior::new(Vec3::new(36.0, 18.99, 0.0), 1.0, arena, 3000.0).unwrap();

    let mut turned = false;
    for _ in 0..400 {
        walker.tick(TICK_MS).unwrap();
        if walker.facing() < 0.0 {
            turned = true;
            break;
        }
    }
    assert!(turned);
    assert!(walker.physics().position().x < 38.0);
}

#[rstest]
fn test_walker_at_rest_against_a_wall_turns_around(arena: Arc<TileGrid>) {
    let mut walker =
        WalkerBehavior::new(Vec3::new(37.995, 18.99, 0.0), 1.0, arena, 3000.0).unwrap();

    for _ in 0..3 {
        walker.tick(TICK_MS).unwrap();
    }
    assert_relative_eq!(walker.facing(), -1.0);

    for _ in 0..30 {
        walker.tick(TICK_MS).unwrap();
    }
    assert!(walker.physics().position().x < 37.9);
}

#[test]
fn test_walker_falling_off_the_level_is_removed() {
    let pit = Arc::new(TileGrid::from_rows(&["#........#"; 6], 1.0));
    let mut walker = WalkerBehavior::new(Vec3::new(4.0, 1.0, 0.0), 1.0, pit, 3000.0).unwrap();

    assert!(run_walker_until(&mut walker, "Dead", 600));
    assert!(walker.physics().position().y > 6.0);
}

#[rstest]
fn test_stomped_walker_dies_then_despawns(arena: Arc<TileGrid>) {
    let mut walker = WalkerBehavior::new(Vec3::new(10.0, 18.99, 0.0), 1.0, arena, 3000.0).unwrap();
    walker.take_stomp(Hit::new(1.0));
    walker.tick(TICK_MS).unwrap();
    assert_eq!(walker.state_name(), "Dead");
    assert!(walker.contact_damage().is_none());

    for effect in walker.effects_mut().drain() {
        if let Effect::PlaySound {
            completion: Some(completion),
            ..
        } = effect
        {
            completion.complete();
        }
    }
    walker.tick(TICK_MS).unwrap();
    walker.tick(TICK_MS).unwrap();
    assert!(walker
        .effects_mut()
        .iter()
        .any(|effect| matches!(effect, Effect::DespawnSelf)));
}

// -----------------------------------------------------------------------------
// Projectiles
// -----------------------------------------------------------------------------

#[rstest]
fn test_fireball_cruises_then_expires_on_a_wall(arena: Arc<TileGrid>) {
    let velocity = Vec3::new(0.012, 0.0, 0.0);
    let mut fireball = ProjectileBehavior::new(
        SpawnRequest::Fireball {
            position: Vec3::new(30.0, 10.0, 0.0),
            velocity,
        },
        arena,
        3000.0,
    )
    .unwrap();

    fireball.tick(TICK_MS).unwrap();
    fireball.tick(TICK_MS).unwrap();
    assert_relative_eq!(fireball.physics().velocity().x, velocity.x, epsilon = 1e-6);
    assert_relative_eq!(fireball.physics().velocity().y, 0.0);

    for _ in 0..100 {
        fireball.tick(TICK_MS).unwrap();
        if fireball.state_name() == "Expired" {
            break;
        }
    }
    assert_eq!(fireball.state_name(), "Expired");
    assert!(fireball.contact_damage().is_none());
    assert!(fireball
        .effects_mut()
        .iter()
        .any(|effect| matches!(effect, Effect::DespawnSelf)));
}

#[rstest]
fn test_fireball_leaving_the_level_expires_beyond_the_edge(arena: Arc<TileGrid>) {
    let mut fireball = ProjectileBehavior::new(
        SpawnRequest::Fireball {
            position: Vec3::new(20.0, 2.0, 0.0),
            velocity: Vec3::new(0.0, -0.012, 0.0),
        },
        arena,
        3000.0,
    )
    .unwrap();

    for _ in 0..60 {
        fireball.tick(TICK_MS).unwrap();
        if fireball.state_name() == "Expired" {
            break;
        }
    }
    assert_eq!(fireball.state_name(), "Expired");
    assert!(fireball.physics().bounds().max_y() <= 0.0);
}

#[rstest]
fn test_shockwave_slides_along_the_floor(arena: Arc<TileGrid>) {
    let mut shockwave = ProjectileBehavior::new(
        SpawnRequest::Shockwave {
            position: Vec3::new(20.0, 19.39, 0.0),
            direction: -1.0,
        },
        arena,
        3000.0,
    )
    .unwrap();
    assert_eq!(shockwave.kind(), ProjectileKind::Shockwave);

    for _ in 0..30 {
        shockwave.tick(TICK_MS).unwrap();
    }
    assert_eq!(shockwave.state_name(), "Flying");
    assert!(shockwave.physics().position().x < 17.0);
    assert!(shockwave.physics().position().y <= 19.4);

    for _ in 0..300 {
        shockwave.tick(TICK_MS).unwrap();
    }
    assert_eq!(shockwave.state_name(), "Expired");
}

#[test]
fn test_spawn_requests_become_projectile_entities() {
    let mut app = App::new();
    app.insert_resource(Level::empty_room(8, 6, 1.0))
        .insert_resource(SimulationConfig::default())
        .add_message::<SpawnRequested>()
        .add_systems(Update, spawn_projectiles);

    let source = app.world_mut().spawn_empty().id();
    app.world_mut().write_message(SpawnRequested {
        source,
        request: SpawnRequest::Fireball {
            position: Vec3::new(2.0, 2.0, 0.0),
            velocity: Vec3::X * 0.01,
        },
    });
    app.update();

    let mut query = app.world_mut().query::<&ProjectileBehavior>();
    let projectiles: Vec<_> = query.iter(app.world()).collect();
    assert_eq!(projectiles.len(), 1);
    assert_eq!(projectiles[0].kind(), ProjectileKind::Fireball);
}
