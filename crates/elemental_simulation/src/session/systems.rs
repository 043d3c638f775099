//! Level Session systems: часы, очки, победа/смерть, выход из уровня

use bevy::prelude::*;

use super::spawn::hero_bundle;
use super::state::{LevelCompleted, LevelEntity, LevelSession, SceneRequest, SceneTarget, SessionControl, SessionPhase};
use crate::ai::{Boss, Enemy};
use crate::catalog::LevelKind;
use crate::combat::{BossDefeated, EnemyKilled, PlayerDied, PowerUpCollected};
use crate::components::Combatant;
use crate::config::SessionConfig;
use crate::player::Hero;
use crate::progression::ProgressStore;
use crate::timers::{Scheduler, TimedAction, TimerFired};

/// Очки
pub const ENEMY_KILL_SCORE: u32 = 100;
pub const MID_BOSS_SCORE: u32 = 1000;
pub const FINAL_BOSS_SCORE: u32 = 2500;
pub const POWER_UP_SCORE: u32 = 25;

/// Очки за победу над боссом (final/ultimate tier дороже)
pub fn boss_score(is_final: bool) -> u32 {
    if is_final {
        FINAL_BOSS_SCORE
    } else {
        MID_BOSS_SCORE
    }
}

/// Куда уходить после победы: последний уровень главы → выбор главы
pub fn exit_scene_after_win(session: &LevelSession) -> SceneTarget {
    if session.level_number >= session.chapter.level_count {
        SceneTarget::ChapterSelect
    } else {
        SceneTarget::LevelSelect
    }
}

/// Despawn всех entity уровня + отмена таймеров (через Commands)
fn despawn_level(commands: &mut Commands, scheduler: &mut Scheduler, level_entities: &Query<Entity, With<LevelEntity>>) {
    scheduler.clear();
    for entity in level_entities.iter() {
        commands.entity(entity).despawn();
    }
    commands.remove_resource::<LevelSession>();
}

/// System: часы уровня (только пока идёт игра)
pub fn advance_session_clock(mut session: ResMut<LevelSession>, time: Res<Time<Fixed>>) {
    if session.is_playing() {
        session.elapsed_ms += time.delta_secs_f64() * 1000.0;
    }
}

/// System: начисление очков
pub fn apply_score_events(
    mut session: ResMut<LevelSession>,
    mut killed: EventReader<EnemyKilled>,
    mut defeated: EventReader<BossDefeated>,
    mut collected: EventReader<PowerUpCollected>,
) {
    let mut gained = 0;
    gained += killed.read().count() as u32 * ENEMY_KILL_SCORE;
    gained += defeated.read().map(|event| boss_score(event.is_final)).sum::<u32>();
    gained += collected.read().count() as u32 * POWER_UP_SCORE;

    if gained > 0 && session.accepts_score() {
        session.score += gained;
    }
}

/// System: проверка победы
///
/// Босс-уровень: босса больше нет (death sequence доиграл).
/// Обычный уровень: все враги мертвы.
pub fn check_level_completion(
    mut session: ResMut<LevelSession>,
    bosses: Query<(), With<Boss>>,
    enemies: Query<&Combatant, With<Enemy>>,
    config: Res<SessionConfig>,
    mut progress: ResMut<ProgressStore>,
    mut scheduler: ResMut<Scheduler>,
    mut completed: EventWriter<LevelCompleted>,
) {
    if !session.is_playing() {
        return;
    }

    let won = match session.kind {
        LevelKind::Boss(_) => bosses.is_empty(),
        LevelKind::Standard => enemies.iter().all(|combatant| combatant.is_dead),
    };
    if !won {
        return;
    }

    session.phase = SessionPhase::Completed;
    let final_score = config.final_score(session.score, session.elapsed_ms);
    let result = progress.complete_level(session.chapter.key, session.level_number, final_score);

    completed.write(LevelCompleted {
        chapter_key: session.chapter.key,
        level_number: session.level_number,
        final_score,
        first_completion: result.first_completion,
        new_high_score: result.new_high_score,
        chapter_completed: result.chapter_completed,
    });

    let request = session.scene_request(exit_scene_after_win(&session));
    scheduler.schedule(config.completion_delay_ms, None, TimedAction::LeaveLevel { request });

    crate::log_info(&format!(
        "🏁 Level {}-{} complete: score {} (final {}, {:.1}s)",
        session.chapter.key,
        session.level_number,
        session.score,
        final_score,
        session.elapsed_ms / 1000.0
    ));
}

/// System: смерть героя → респавн или game over
pub fn handle_player_death(
    mut session: ResMut<LevelSession>,
    mut died: EventReader<PlayerDied>,
    config: Res<SessionConfig>,
    mut scheduler: ResMut<Scheduler>,
) {
    for event in died.read() {
        if !session.is_playing() {
            continue;
        }

        session.lives = session.lives.saturating_sub(1);
        scheduler.cancel_owner(event.entity);

        if session.lives > 0 {
            session.phase = SessionPhase::Respawning;
            scheduler.schedule(config.respawn_delay_ms, None, TimedAction::RespawnPlayer);
            crate::log_info(&format!("💔 Hero down, {} lives left", session.lives));
        } else {
            session.phase = SessionPhase::GameOver;
            let request = session.scene_request(SceneTarget::LevelSelect);
            scheduler.schedule(config.game_over_delay_ms, None, TimedAction::LeaveLevel { request });
            crate::log_info("☠️ Game over");
        }
    }
}

/// System: отложенные действия сессии (респавн, выход из уровня)
pub fn run_session_timers(
    mut commands: Commands,
    mut fired: EventReader<TimerFired>,
    mut session: ResMut<LevelSession>,
    mut scheduler: ResMut<Scheduler>,
    heroes: Query<Entity, With<Hero>>,
    level_entities: Query<Entity, With<LevelEntity>>,
    mut scenes: EventWriter<SceneRequest>,
) {
    let mut left_level = false;

    for TimerFired { action } in fired.read() {
        // Остальные действия этого тика относятся к уже снятому уровню
        if left_level {
            continue;
        }

        match action {
            TimedAction::RespawnPlayer => {
                // Могли уйти из уровня раньше (quit), тогда фаза другая
                if session.phase != SessionPhase::Respawning {
                    continue;
                }
                for hero in heroes.iter() {
                    commands.entity(hero).despawn();
                }
                commands.spawn(hero_bundle(session.element, session.hero_spawn));
                session.phase = SessionPhase::Playing;
                crate::log_info(&format!("🔄 Hero respawned at {:?}", session.hero_spawn));
            }
            TimedAction::LeaveLevel { request } => {
                scenes.write(request.clone());
                despawn_level(&mut commands, &mut scheduler, &level_entities);
                crate::log_info(&format!("🚪 Leaving level → {:?}", request.scene));
                left_level = true;
            }
            _ => {}
        }
    }
}

/// System (Control set, работает и на паузе): pause / resume / quit
pub fn apply_session_control(
    mut commands: Commands,
    mut control: EventReader<SessionControl>,
    session: Option<ResMut<LevelSession>>,
    mut scheduler: ResMut<Scheduler>,
    level_entities: Query<Entity, With<LevelEntity>>,
    mut scenes: EventWriter<SceneRequest>,
) {
    let Some(mut session) = session else {
        // Нет уровня: управлять нечем
        control.clear();
        return;
    };

    let mut quit = false;

    for command in control.read() {
        if quit {
            continue;
        }

        match command {
            SessionControl::Pause => {
                session.paused = true;
                crate::log("⏸️ Paused");
            }
            SessionControl::Resume => {
                session.paused = false;
                crate::log("▶️ Resumed");
            }
            SessionControl::Quit => {
                scenes.write(session.scene_request(SceneTarget::Menu));
                despawn_level(&mut commands, &mut scheduler, &level_entities);
                crate::log_info("🚪 Quit to menu");
                quit = true;
            }
        }
    }
}
