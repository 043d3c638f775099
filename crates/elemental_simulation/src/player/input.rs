//! Управление героем из `InputState`
//!
//! Хост (клавиатура, скрипт, тест) заполняет `InputState` перед тиком,
//! симуляция читает его один раз за тик.

use bevy::prelude::*;

use super::player::{Buffs, GiftKind, GiftPower, Hero, POWER_COOLDOWN_MS};
use crate::combat::{rotate_aim, spawn_projectile, Side};
use crate::components::{Combatant, Dead};
use crate::physics::{Kinematic, Velocity};

pub const HERO_BOLT_SPEED: f32 = 480.0;
/// Тройной выстрел: ±15° вокруг направления взгляда
pub const MULTI_SHOT_ANGLES_DEG: [f32; 3] = [-15.0, 0.0, 15.0];
pub const INFERNO_BOLTS: u32 = 8;

/// Состояние ввода на текущий тик
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq, Reflect)]
#[reflect(Resource)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    /// Базовая атака
    pub power: bool,
    /// Активация gift power
    pub gift: bool,
}

/// Скорости снарядов базовой атаки
pub fn basic_attack_volley(facing_left: bool, multi_shot: bool) -> Vec<Vec2> {
    let aim = if facing_left { Vec2::NEG_X } else { Vec2::X };

    if multi_shot {
        MULTI_SHOT_ANGLES_DEG
            .iter()
            .map(|angle| rotate_aim(aim, *angle) * HERO_BOLT_SPEED)
            .collect()
    } else {
        vec![aim * HERO_BOLT_SPEED]
    }
}

/// Урон снаряда героя с учётом double damage
pub fn bolt_damage(base: u32, buffs: &Buffs) -> u32 {
    if buffs.has_double_damage() {
        base * 2
    } else {
        base
    }
}

/// System: таймеры героя (кулдаун, i-frames, баффы, гифт)
pub fn tick_hero_timers(mut heroes: Query<(&mut Hero, &mut Buffs, &mut GiftPower)>, time: Res<Time<Fixed>>) {
    let delta_ms = time.delta_secs() * 1000.0;

    for (mut hero, mut buffs, mut gift) in heroes.iter_mut() {
        hero.tick(delta_ms);
        buffs.tick(delta_ms);
        if let Some(expired) = gift.tick(delta_ms) {
            crate::log(&format!("🌀 Gift {:?} expired", expired));
        }
    }
}

/// System: движение и прыжок
pub fn hero_movement(
    input: Res<InputState>,
    mut heroes: Query<(&mut Hero, &Buffs, &GiftPower, &Kinematic, &mut Velocity), Without<Dead>>,
) {
    for (mut hero, buffs, gift, kinematic, mut velocity) in heroes.iter_mut() {
        let axis = (input.right as i32 - input.left as i32) as f32;
        velocity.0.x = axis * hero.move_speed(buffs, gift);

        if axis != 0.0 {
            hero.facing_left = axis < 0.0;
        }

        if input.jump && kinematic.grounded {
            velocity.0.y = hero.jump_velocity;
        }
    }
}

/// System: базовая атака и активация гифта
pub fn hero_actions(
    mut commands: Commands,
    input: Res<InputState>,
    mut heroes: Query<(&mut Hero, &Combatant, &Buffs, &mut GiftPower, &Transform), Without<Dead>>,
) {
    for (mut hero, combatant, buffs, mut gift, transform) in heroes.iter_mut() {
        let origin = transform.translation.truncate();
        let damage = bolt_damage(combatant.damage, buffs);

        if input.gift {
            let kind = GiftKind::for_element(hero.element);
            if gift.try_activate(kind) {
                crate::log_info(&format!("🌟 Gift {:?} activated", kind));

                if kind == GiftKind::Inferno {
                    for i in 0..INFERNO_BOLTS {
                        let angle = (i as f32 * 360.0 / INFERNO_BOLTS as f32).to_radians();
                        let velocity = Vec2::from_angle(angle) * HERO_BOLT_SPEED;
                        spawn_projectile(&mut commands, origin, velocity, damage * 2, Side::Player);
                    }
                }
            }
        }

        if input.power && hero.power_cooldown_ms <= 0.0 {
            let barrage = gift.is_active(GiftKind::Barrage);
            let multi_shot = buffs.has_multi_shot() || barrage;

            for velocity in basic_attack_volley(hero.facing_left, multi_shot) {
                spawn_projectile(&mut commands, origin, velocity, damage, Side::Player);
            }

            hero.power_cooldown_ms = if barrage {
                POWER_COOLDOWN_MS / 2.0
            } else {
                POWER_COOLDOWN_MS
            };
        }
    }
}
