//! Разрешение пересечений: Overlap → урон / подбор
//!
//! Таблица контактов:
//! - герой ↔ враг/босс: контактный урон герою (с учётом i-frames и щита)
//! - снаряд героя ↔ враг/босс: урон цели, снаряд удаляется
//! - снаряд врага ↔ герой: урон герою, снаряд удаляется
//! - герой ↔ power-up: подбор
//!
//! Всё остальное (враг↔враг, снаряд↔снаряд, ...) игнорируется.

use bevy::prelude::*;
use std::collections::HashSet;

use super::events::{DamageDealt, PowerUpCollected, VisualCue};
use super::projectile::{Projectile, Side};
use crate::ai::{Boss, Enemy};
use crate::components::{Combatant, DamageOutcome, Dead};
use crate::physics::Overlap;
use crate::player::{Buffs, GiftPower, Hero, PowerUp};

/// Роль entity в контакте
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Hero,
    Foe,
    Shot(Side),
    PowerUp,
}

/// Осмысленный контакт двух entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Тело врага/босса касается героя
    Body { hero: Entity, foe: Entity },
    /// Снаряд героя попал во врага/босса
    PlayerShot { projectile: Entity, foe: Entity },
    /// Снаряд врага попал в героя
    EnemyShot { projectile: Entity, hero: Entity },
    Pickup { hero: Entity, power_up: Entity },
}

/// Классификация пары (порядок a/b не важен)
pub fn classify(a: (Entity, Role), b: (Entity, Role)) -> Option<Contact> {
    match (a.1, b.1) {
        (Role::Hero, Role::Foe) => Some(Contact::Body { hero: a.0, foe: b.0 }),
        (Role::Shot(Side::Player), Role::Foe) => Some(Contact::PlayerShot { projectile: a.0, foe: b.0 }),
        (Role::Shot(Side::Enemy), Role::Hero) => Some(Contact::EnemyShot { projectile: a.0, hero: b.0 }),
        (Role::Hero, Role::PowerUp) => Some(Contact::Pickup { hero: a.0, power_up: b.0 }),
        (Role::Foe, Role::Hero)
        | (Role::Foe, Role::Shot(Side::Player))
        | (Role::Hero, Role::Shot(Side::Enemy))
        | (Role::PowerUp, Role::Hero) => classify(b, a),
        _ => None,
    }
}

type RoleQuery<'w, 's> =
    Query<'w, 's, (Has<Hero>, Has<Enemy>, Has<Boss>, Option<&'static Projectile>, Option<&'static PowerUp>), Without<Dead>>;

fn role_of(roles: &RoleQuery, entity: Entity) -> Option<Role> {
    let (is_hero, is_enemy, is_boss, projectile, power_up) = roles.get(entity).ok()?;

    if is_hero {
        Some(Role::Hero)
    } else if is_enemy || is_boss {
        Some(Role::Foe)
    } else if let Some(projectile) = projectile {
        Some(Role::Shot(projectile.side))
    } else {
        power_up.map(|_| Role::PowerUp)
    }
}

/// System: разрешение всех Overlap текущего тика
///
/// Снаряд/power-up потребляется максимум один раз за тик,
/// даже если пересекается с несколькими целями.
pub fn resolve_overlaps(
    mut commands: Commands,
    mut overlaps: EventReader<Overlap>,
    roles: RoleQuery,
    projectiles: Query<&Projectile>,
    power_ups: Query<&PowerUp>,
    mut combatants: Query<&mut Combatant>,
    mut heroes: Query<(&mut Hero, &Buffs, &GiftPower)>,
    mut damage_dealt: EventWriter<DamageDealt>,
    mut collected: EventWriter<PowerUpCollected>,
    mut cues: EventWriter<VisualCue>,
) {
    let mut consumed: HashSet<Entity> = HashSet::new();

    for overlap in overlaps.read() {
        let (Some(role_a), Some(role_b)) = (role_of(&roles, overlap.a), role_of(&roles, overlap.b)) else {
            continue;
        };
        let Some(contact) = classify((overlap.a, role_a), (overlap.b, role_b)) else {
            continue;
        };

        let (source, target, outcome, amount) = match contact {
            Contact::Body { hero, foe } => {
                let Ok(foe_combatant) = combatants.get(foe) else {
                    continue;
                };
                if foe_combatant.is_dead {
                    continue;
                }
                let amount = foe_combatant.damage;

                let Ok((mut hero_state, buffs, gift)) = heroes.get_mut(hero) else {
                    continue;
                };
                let Ok(mut hero_combatant) = combatants.get_mut(hero) else {
                    continue;
                };
                let outcome = hero_state.receive_damage(buffs, gift, &mut hero_combatant, amount);
                (foe, hero, outcome, amount)
            }
            Contact::PlayerShot { projectile, foe } => {
                if !consumed.insert(projectile) {
                    continue;
                }
                let Ok(shot) = projectiles.get(projectile) else {
                    continue;
                };
                let amount = shot.damage;
                commands.entity(projectile).despawn();

                let Ok(mut foe_combatant) = combatants.get_mut(foe) else {
                    continue;
                };
                (projectile, foe, foe_combatant.take_damage(amount), amount)
            }
            Contact::EnemyShot { projectile, hero } => {
                if !consumed.insert(projectile) {
                    continue;
                }
                let Ok(shot) = projectiles.get(projectile) else {
                    continue;
                };
                let amount = shot.damage;
                commands.entity(projectile).despawn();

                let Ok((mut hero_state, buffs, gift)) = heroes.get_mut(hero) else {
                    continue;
                };
                let Ok(mut hero_combatant) = combatants.get_mut(hero) else {
                    continue;
                };
                (projectile, hero, hero_state.receive_damage(buffs, gift, &mut hero_combatant, amount), amount)
            }
            Contact::Pickup { hero, power_up } => {
                // Герой мог умереть раньше в этом же тике (Dead ещё в Commands)
                if !combatants.get(hero).is_ok_and(|c| c.is_alive()) {
                    continue;
                }
                if !consumed.insert(power_up) {
                    continue;
                }
                let Ok(pickup) = power_ups.get(power_up) else {
                    continue;
                };
                collected.write(PowerUpCollected { hero, kind: pickup.kind });
                commands.entity(power_up).despawn();
                continue;
            }
        };

        if outcome == DamageOutcome::Ignored {
            continue;
        }

        if outcome.landed() {
            cues.write(VisualCue::HitFlash { target });
        }

        damage_dealt.write(DamageDealt {
            source,
            target,
            amount,
            outcome,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn e(index: u32) -> Entity {
        Entity::from_raw(index)
    }

    #[test]
    fn test_classify_is_order_independent() {
        let hero = (e(1), Role::Hero);
        let foe = (e(2), Role::Foe);

        let expected = Some(Contact::Body { hero: e(1), foe: e(2) });
        assert_eq!(classify(hero, foe), expected);
        assert_eq!(classify(foe, hero), expected);
    }

    #[test]
    fn test_classify_projectiles_by_side() {
        let hero = (e(1), Role::Hero);
        let foe = (e(2), Role::Foe);
        let player_shot = (e(3), Role::Shot(Side::Player));
        let enemy_shot = (e(4), Role::Shot(Side::Enemy));

        assert_eq!(
            classify(foe, player_shot),
            Some(Contact::PlayerShot { projectile: e(3), foe: e(2) })
        );
        assert_eq!(
            classify(hero, enemy_shot),
            Some(Contact::EnemyShot { projectile: e(4), hero: e(1) })
        );

        // Friendly fire нет
        assert_eq!(classify(hero, player_shot), None);
        assert_eq!(classify(foe, enemy_shot), None);
    }

    #[test]
    fn test_classify_ignores_irrelevant_pairs() {
        assert_eq!(classify((e(1), Role::Foe), (e(2), Role::Foe)), None);
        assert_eq!(classify((e(1), Role::Foe), (e(2), Role::PowerUp)), None);
        assert_eq!(
            classify((e(1), Role::PowerUp), (e(2), Role::Hero)),
            Some(Contact::Pickup { hero: e(2), power_up: e(1) })
        );
    }
}
