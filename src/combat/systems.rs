//! Combat domain: contact resolution between the hero, enemies and projectiles.

use bevy::prelude::*;

use crate::combat::vitals::{DamageOutcome, Hit};
use crate::core::{PendingEffects, SoundCue};
use crate::enemies::{DragonBehavior, ProjectileBehavior, WalkerBehavior};
use crate::hero::{HeroBehavior, STOMP_DAMAGE};
use crate::physics::Aabb;

pub const CONTACT_PUSHBACK: f32 = 0.02;
pub const CONTACT_PUSHBACK_MS: f32 = 250.0;

/// Hit the hero takes from touching `source`, pushing it away and slightly up.
pub fn contact_hit(amount: f32, hero: &Aabb, source: &Aabb) -> Hit {
    let away = hero.center().x - source.center().x;
    let direction = if away < 0.0 { -1.0 } else { 1.0 };
    Hit::new(amount).with_pushback(
        Vec3::new(direction * CONTACT_PUSHBACK, -CONTACT_PUSHBACK * 0.5, 0.0),
        CONTACT_PUSHBACK_MS,
    )
}

/// A stomp only counts when it comes from above.
pub fn is_stomp_from_above(hero: &Aabb, enemy: &Aabb) -> bool {
    hero.center().y < enemy.center().y
}

enum Contact {
    Stomp,
    Hurt(f32),
}

fn classify(stomping: bool, hero: &Aabb, enemy: &Aabb, contact_damage: Option<f32>) -> Option<Contact> {
    let damage = contact_damage?;
    if !hero.overlaps(enemy) {
        return None;
    }
    if stomping && is_stomp_from_above(hero, enemy) {
        Some(Contact::Stomp)
    } else {
        Some(Contact::Hurt(damage))
    }
}

pub(crate) fn resolve_contacts(
    mut pending: ResMut<PendingEffects>,
    mut heroes: Query<(Entity, &mut HeroBehavior)>,
    mut bosses: Query<(Entity, &mut DragonBehavior)>,
    mut walkers: Query<(Entity, &mut WalkerBehavior)>,
    mut projectiles: Query<(Entity, &mut ProjectileBehavior)>,
) {
    let Some((hero_entity, mut hero)) = heroes.iter_mut().next() else {
        return;
    };
    if hero.vitals().is_terminal() {
        return;
    }
    let hero_box = hero.bounds();
    let stomping = hero.is_stomping();

    for (entity, mut boss) in &mut bosses {
        let boss_box = boss.bounds();
        match classify(stomping, &hero_box, &boss_box, boss.contact_damage()) {
            Some(Contact::Stomp) => {
                if hero.land_stomp()
                    && boss.take_stomp(Hit::new(STOMP_DAMAGE)) == DamageOutcome::Applied
                {
                    boss.effects_mut().play_sound(SoundCue::Hurt);
                }
            }
            Some(Contact::Hurt(amount)) => {
                hero.take_hit(contact_hit(amount, &hero_box, &boss_box));
            }
            None => {}
        }
        pending.collect(entity, boss.effects_mut());
    }

    for (entity, mut walker) in &mut walkers {
        let walker_box = walker.bounds();
        match classify(stomping, &hero_box, &walker_box, walker.contact_damage()) {
            Some(Contact::Stomp) => {
                if hero.land_stomp() {
                    walker.take_stomp(Hit::new(STOMP_DAMAGE));
                }
            }
            Some(Contact::Hurt(amount)) => {
                hero.take_hit(contact_hit(amount, &hero_box, &walker_box));
            }
            None => {}
        }
        pending.collect(entity, walker.effects_mut());
    }

    for (_, mut projectile) in &mut projectiles {
        let Some(amount) = projectile.contact_damage() else {
            continue;
        };
        let projectile_box = projectile.bounds();
        if hero_box.overlaps(&projectile_box) {
            hero.take_hit(contact_hit(amount, &hero_box, &projectile_box));
            projectile.mark_spent();
        }
    }

    pending.collect(hero_entity, hero.effects_mut());
}
