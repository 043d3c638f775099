//! Power-ups: выпадение из врагов, подбор, эффект

use bevy::prelude::*;
use rand::Rng;

use super::player::{Buffs, BUFF_DURATION_MS};
use crate::combat::{CollectibleDropped, PowerUpCollected};
use crate::components::Combatant;
use crate::physics::Body;
use crate::session::LevelEntity;
use crate::DeterministicRng;

pub const HEALTH_PICKUP: u32 = 25;
pub const POWER_UP_RADIUS: f32 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum PowerUpKind {
    Health,
    Shield,
    SpeedBoost,
    DoubleDamage,
    MultiShot,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Health,
        PowerUpKind::Shield,
        PowerUpKind::SpeedBoost,
        PowerUpKind::DoubleDamage,
        PowerUpKind::MultiShot,
    ];

    pub fn random(rng: &mut impl Rng) -> PowerUpKind {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Подбираемый power-up на уровне
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(Body)]
pub struct PowerUp {
    pub kind: PowerUpKind,
}

/// Эффект подбора. Health лечит, остальное: бафф на BUFF_DURATION_MS (refresh).
pub fn apply_power_up(kind: PowerUpKind, combatant: &mut Combatant, buffs: &mut Buffs) {
    match kind {
        PowerUpKind::Health => {
            combatant.heal(HEALTH_PICKUP);
        }
        PowerUpKind::Shield => buffs.shield_ms = BUFF_DURATION_MS,
        PowerUpKind::SpeedBoost => buffs.speed_boost_ms = BUFF_DURATION_MS,
        PowerUpKind::DoubleDamage => buffs.double_damage_ms = BUFF_DURATION_MS,
        PowerUpKind::MultiShot => buffs.multi_shot_ms = BUFF_DURATION_MS,
    }
}

pub fn spawn_power_up(commands: &mut Commands, position: Vec2, kind: PowerUpKind) -> Entity {
    commands
        .spawn((
            Transform::from_translation(position.extend(0.0)),
            Body { radius: POWER_UP_RADIUS },
            PowerUp { kind },
            LevelEntity,
        ))
        .id()
}

/// System: коллектибл выпал → power-up случайного типа
pub fn spawn_dropped_power_ups(
    mut commands: Commands,
    mut dropped: EventReader<CollectibleDropped>,
    mut rng: ResMut<DeterministicRng>,
) {
    for event in dropped.read() {
        let kind = PowerUpKind::random(&mut rng.rng);
        spawn_power_up(&mut commands, event.position, kind);
        crate::log(&format!("🎁 Power-up {:?} dropped at {:?}", kind, event.position));
    }
}

/// System: применение подобранных power-up'ов
pub fn apply_collected_power_ups(
    mut collected: EventReader<PowerUpCollected>,
    mut heroes: Query<(&mut Combatant, &mut Buffs)>,
) {
    for event in collected.read() {
        let Ok((mut combatant, mut buffs)) = heroes.get_mut(event.hero) else {
            continue;
        };
        apply_power_up(event.kind, &mut combatant, &mut buffs);
        crate::log(&format!("✨ Hero picked up {:?}", event.kind));
    }
}
