//! Death handling: Killed → события, fade-out, death sequence босса
//!
//! Смерть фиксируется в `Combatant::take_damage` (ровно один Killed на entity),
//! здесь только маршрутизация по типу бойца.

use bevy::prelude::*;
use rand::Rng;

use super::events::{BossDefeated, CollectibleDropped, DamageDealt, EnemyKilled, PlayerDied, VisualCue};
use crate::ai::{Boss, Enemy};
use crate::components::{Combatant, DamageOutcome, Dead};
use crate::physics::Velocity;
use crate::player::Hero;
use crate::timers::{Scheduler, TimedAction, TimerFired};
use crate::DeterministicRng;

/// Шанс выпадения коллектибла из врага
pub const DROP_CHANCE: f64 = 0.3;
/// Длительность fade-out врага перед удалением
pub const ENEMY_FADE_MS: f32 = 300.0;

/// Death sequence босса
pub const BOSS_EXPLOSION_COUNT: u32 = 8;
pub const BOSS_EXPLOSION_INTERVAL_MS: f64 = 100.0;
pub const BOSS_EXPLOSION_SPREAD: f32 = 60.0;
pub const BOSS_DEATH_ANIMATION_DELAY_MS: f64 = 800.0;
pub const BOSS_DEATH_ANIMATION_MS: f32 = 1000.0;

/// Запланировать death sequence босса (взрывы → анимация → bossDefeated)
///
/// Все задачи принадлежат боссу: teardown сцены отменяет их через `cancel_owner`.
pub fn schedule_boss_death(scheduler: &mut Scheduler, rng: &mut impl Rng, boss: Entity) {
    // Всё, что было запланировано раньше (phase flash, атака в полёте), отменяем
    scheduler.cancel_owner(boss);

    for i in 0..BOSS_EXPLOSION_COUNT {
        let offset = Vec2::new(
            rng.gen_range(-BOSS_EXPLOSION_SPREAD..BOSS_EXPLOSION_SPREAD),
            rng.gen_range(-BOSS_EXPLOSION_SPREAD..BOSS_EXPLOSION_SPREAD),
        );
        scheduler.schedule(
            i as f64 * BOSS_EXPLOSION_INTERVAL_MS,
            Some(boss),
            TimedAction::BossExplosion { boss, offset },
        );
    }

    scheduler.schedule(BOSS_DEATH_ANIMATION_DELAY_MS, Some(boss), TimedAction::BossDeathAnimation { boss });
    scheduler.schedule(
        BOSS_DEATH_ANIMATION_DELAY_MS + BOSS_DEATH_ANIMATION_MS as f64,
        Some(boss),
        TimedAction::FinishBossDeath { boss },
    );
}

/// System: маршрутизация Killed по типу бойца
pub fn handle_deaths(
    mut commands: Commands,
    mut damage_dealt: EventReader<DamageDealt>,
    mut enemies: Query<(&Enemy, &Transform, &mut Velocity), Without<Boss>>,
    mut bosses: Query<(&mut Boss, &mut Combatant, &Transform, &mut Velocity), Without<Enemy>>,
    heroes: Query<&Transform, With<Hero>>,
    mut scheduler: ResMut<Scheduler>,
    mut rng: ResMut<DeterministicRng>,
    mut cues: EventWriter<VisualCue>,
    mut killed: EventWriter<EnemyKilled>,
    mut dropped: EventWriter<CollectibleDropped>,
    mut player_died: EventWriter<PlayerDied>,
) {
    for event in damage_dealt.read() {
        if event.outcome != DamageOutcome::Killed {
            continue;
        }
        let target = event.target;

        if let Ok((enemy, transform, mut velocity)) = enemies.get_mut(target) {
            let position = transform.translation.truncate();
            velocity.0 = Vec2::ZERO;
            commands.entity(target).insert(Dead);

            if rng.rng.gen_bool(DROP_CHANCE) {
                dropped.write(CollectibleDropped { position });
            }

            cues.write(VisualCue::EnemyFadeOut {
                enemy: target,
                duration_ms: ENEMY_FADE_MS,
            });
            scheduler.schedule(ENEMY_FADE_MS as f64, Some(target), TimedAction::RemoveEnemy { enemy: target });

            killed.write(EnemyKilled {
                entity: target,
                key: enemy.kind.key,
                position,
            });
            crate::log(&format!("💀 Enemy {} ({:?}) killed", enemy.kind.key, target));
        } else if let Ok((mut boss, mut combatant, _transform, mut velocity)) = bosses.get_mut(target) {
            // Терминальное состояние: неуязвим, не атакует, не двигается
            boss.dying = true;
            boss.is_attacking = false;
            combatant.is_invulnerable = true;
            velocity.0 = Vec2::ZERO;
            commands.entity(target).insert(Dead);

            cues.write(VisualCue::ScreenShake {
                intensity: 0.02,
                duration_ms: 500.0,
            });
            schedule_boss_death(&mut scheduler, &mut rng.rng, target);

            crate::log_info(&format!("💥 Boss {} ({:?}) death sequence started", boss.kind.key, target));
        } else if let Ok(transform) = heroes.get(target) {
            commands.entity(target).insert(Dead);
            player_died.write(PlayerDied {
                entity: target,
                position: transform.translation.truncate(),
            });
            crate::log_info(&format!("☠️ Hero {:?} died", target));
        }
    }
}

/// System: отложенные шаги смерти (взрывы, анимация, удаление)
pub fn run_death_timers(
    mut commands: Commands,
    mut fired: EventReader<TimerFired>,
    bosses: Query<(&Boss, &Transform)>,
    enemies: Query<(), With<Enemy>>,
    mut cues: EventWriter<VisualCue>,
    mut defeated: EventWriter<BossDefeated>,
) {
    for TimerFired { action } in fired.read() {
        match action {
            TimedAction::BossExplosion { boss, offset } => {
                if let Ok((_, transform)) = bosses.get(*boss) {
                    cues.write(VisualCue::Explosion {
                        position: transform.translation.truncate() + *offset,
                    });
                }
            }
            TimedAction::BossDeathAnimation { boss } => {
                if bosses.contains(*boss) {
                    cues.write(VisualCue::BossDeathAnimation {
                        boss: *boss,
                        duration_ms: BOSS_DEATH_ANIMATION_MS,
                    });
                }
            }
            TimedAction::FinishBossDeath { boss } => {
                let Ok((state, transform)) = bosses.get(*boss) else {
                    continue;
                };
                defeated.write(BossDefeated {
                    entity: *boss,
                    key: state.kind.key,
                    is_final: state.kind.is_final(),
                    position: transform.translation.truncate(),
                });
                commands.entity(*boss).despawn();
                crate::log_info(&format!("🏆 Boss {} defeated", state.kind.key));
            }
            TimedAction::RemoveEnemy { enemy } => {
                if enemies.contains(*enemy) {
                    commands.entity(*enemy).despawn();
                }
            }
            _ => {}
        }
    }
}
