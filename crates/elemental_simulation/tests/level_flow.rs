//! Level flow integration test
//!
//! Полный App (SimulationPlugin) headless, уровень запускается через `LevelRequest`,
//! исход читаем из событий для хоста (`SceneRequest`, `LevelCompleted`).
//!
//! Проверяем:
//! - Победа на обычном уровне → прогресс сохранён, выход в выбор уровня
//! - Death sequence босса → BossDefeated только после взрывов
//! - Смерть героя → респавн → game over
//! - Пауза замораживает тик, quit выходит в меню
//! - Очки за убийства во время респавна не теряются
//! - Босс: telegraph → залп, phase flash → быстрее атаки
//! - Выпадение power-up → подбор → бафф и очки

use bevy::prelude::*;
use elemental_simulation::ai::{Boss, Enemy};
use elemental_simulation::catalog::Element;
use elemental_simulation::combat::{spawn_projectile, BossDefeated, CollectibleDropped, Projectile, Side, VisualCue};
use elemental_simulation::physics::Overlap;
use elemental_simulation::player::{spawn_power_up, Buffs, Hero, PowerUp, PowerUpKind};
use elemental_simulation::session::{
    LevelEntity, SessionPhase, ENEMY_KILL_SCORE, MID_BOSS_SCORE, POWER_UP_SCORE,
};
use elemental_simulation::timers::Scheduler;
use elemental_simulation::*;

/// Урон, который гарантированно убивает кого угодно
const LETHAL: u32 = 1_000_000;

/// Helper: App со всеми plugins, часы уже запущены
fn create_level_app(config: SessionConfig) -> App {
    let mut app = create_headless_app(42);
    app.insert_resource(config).add_plugins(SimulationPlugin);

    // Первый update: delta = 0, FixedUpdate не идёт
    app.update();
    app
}

/// Быстрые задержки, чтобы тесты не крутили сотни тиков
fn fast_config() -> SessionConfig {
    SessionConfig {
        respawn_delay_ms: 100.0,
        game_over_delay_ms: 100.0,
        completion_delay_ms: 100.0,
        ..Default::default()
    }
}

fn start_level(app: &mut App, chapter: &str, level: u32) {
    app.world_mut().send_event(LevelRequest::new(chapter, level, Element::Earth));
    app.update();
    assert!(app.world().contains_resource::<LevelSession>(), "уровень не запустился");
}

/// Всё, что симуляция отдала хосту за прогон
#[derive(Default)]
struct HostLog {
    scenes: Vec<SceneRequest>,
    completed: Vec<LevelCompleted>,
    defeated: Vec<BossDefeated>,
    cues: Vec<VisualCue>,
}

fn run_ticks(app: &mut App, ticks: u32, log: &mut HostLog) {
    for _ in 0..ticks {
        app.update();
        let world = app.world_mut();
        log.scenes.extend(world.resource_mut::<Events<SceneRequest>>().drain());
        log.completed.extend(world.resource_mut::<Events<LevelCompleted>>().drain());
        log.defeated.extend(world.resource_mut::<Events<BossDefeated>>().drain());
        log.cues.extend(world.resource_mut::<Events<VisualCue>>().drain());
    }
}

fn entities_with<T: Component>(app: &mut App) -> Vec<(Entity, Vec2)> {
    let world = app.world_mut();
    let mut query = world.query_filtered::<(Entity, &Transform), With<T>>();
    query
        .iter(world)
        .map(|(entity, transform)| (entity, transform.translation.truncate()))
        .collect()
}

/// Выстрел в упор (снаряд появится на следующем тике прямо в цели)
fn shoot_at(app: &mut App, position: Vec2, side: Side) {
    shoot_with(app, position, LETHAL, side);
}

fn shoot_with(app: &mut App, position: Vec2, damage: u32, side: Side) -> Entity {
    let projectile = spawn_projectile(&mut app.world_mut().commands(), position, Vec2::ZERO, damage, side);
    app.world_mut().flush();
    projectile
}

fn phase(app: &App) -> SessionPhase {
    app.world().resource::<LevelSession>().phase
}

#[test]
fn test_clearing_standard_level_saves_progress() {
    let mut app = create_level_app(fast_config());
    let mut log = HostLog::default();
    start_level(&mut app, "earth", 1);

    let enemies = entities_with::<Enemy>(&mut app);
    assert!(!enemies.is_empty());
    for (_, position) in &enemies {
        shoot_at(&mut app, *position, Side::Player);
    }

    run_ticks(&mut app, 3, &mut log);
    assert_eq!(log.completed.len(), 1, "уровень должен завершиться ровно один раз");

    let completed = &log.completed[0];
    assert_eq!(completed.chapter_key, "earth");
    assert_eq!(completed.level_number, 1);
    assert!(completed.first_completion);
    // Меньше секунды игры → полный бонус за время
    assert_eq!(completed.final_score, enemies.len() as u32 * ENEMY_KILL_SCORE + 3000);

    let progress = app.world().resource::<ProgressStore>();
    assert!(progress.is_level_completed("earth", 1));
    assert!(progress.is_level_unlocked("earth", 2));
    assert_eq!(progress.high_score("earth", 1), completed.final_score);

    // Выход после задержки
    run_ticks(&mut app, 10, &mut log);
    assert_eq!(log.scenes.len(), 1);
    assert_eq!(log.scenes[0].scene, SceneTarget::LevelSelect);
    assert_eq!(log.scenes[0].chapter_key, "earth");
    assert!(!app.world().contains_resource::<LevelSession>());
    assert!(entities_with::<LevelEntity>(&mut app).is_empty());
}

#[test]
fn test_boss_death_sequence_then_completion() {
    let mut app = create_level_app(fast_config());
    let mut log = HostLog::default();
    start_level(&mut app, "earth", 3);

    let bosses = entities_with::<Boss>(&mut app);
    assert_eq!(bosses.len(), 1);
    let (boss, position) = bosses[0];
    shoot_at(&mut app, position, Side::Player);

    // Взрывы идут, но босс ещё на месте и уровень не пройден
    run_ticks(&mut app, 30, &mut log);
    assert!(app.world().get::<Dead>(boss).is_some());
    assert!(log.defeated.is_empty());
    assert!(log.completed.is_empty());
    assert_eq!(app.world().resource::<LevelSession>().phase, SessionPhase::Playing);

    // 800 ms до анимации + 1000 ms анимации
    run_ticks(&mut app, 90, &mut log);
    assert_eq!(log.defeated.len(), 1);
    assert!(!log.defeated[0].is_final);
    assert!(app.world().get_entity(boss).is_err());

    let explosions = log.cues.iter().filter(|cue| matches!(cue, VisualCue::Explosion { .. })).count();
    assert_eq!(explosions, 8);
    assert!(log
        .cues
        .iter()
        .any(|cue| matches!(cue, VisualCue::BossDeathAnimation { boss: b, .. } if *b == boss)));

    assert_eq!(log.completed.len(), 1);
    assert!(log.completed[0].final_score > MID_BOSS_SCORE);

    run_ticks(&mut app, 10, &mut log);
    assert_eq!(log.scenes.last().map(|scene| scene.scene), Some(SceneTarget::LevelSelect));
}

#[test]
fn test_player_death_respawn_then_game_over() {
    let mut app = create_level_app(SessionConfig {
        starting_lives: 2,
        ..fast_config()
    });
    let mut log = HostLog::default();
    start_level(&mut app, "earth", 1);

    let (first_hero, position) = entities_with::<Hero>(&mut app)[0];
    shoot_at(&mut app, position, Side::Enemy);
    run_ticks(&mut app, 2, &mut log);

    {
        let session = app.world().resource::<LevelSession>();
        assert_eq!(session.lives, 1);
        assert_eq!(session.phase, SessionPhase::Respawning);
    }

    // Респавн: новый герой с полным здоровьем
    run_ticks(&mut app, 10, &mut log);
    let heroes = entities_with::<Hero>(&mut app);
    assert_eq!(heroes.len(), 1);
    let (second_hero, position) = heroes[0];
    assert_ne!(second_hero, first_hero);
    assert_eq!(app.world().resource::<LevelSession>().phase, SessionPhase::Playing);
    let combatant = app.world().get::<Combatant>(second_hero).copied();
    assert!(combatant.is_some_and(|c| c.is_alive() && c.health == c.max_health));

    shoot_at(&mut app, position, Side::Enemy);
    run_ticks(&mut app, 2, &mut log);
    assert_eq!(app.world().resource::<LevelSession>().phase, SessionPhase::GameOver);
    assert!(log.scenes.is_empty());

    run_ticks(&mut app, 10, &mut log);
    assert_eq!(log.scenes.len(), 1);
    assert_eq!(log.scenes[0].scene, SceneTarget::LevelSelect);
    assert!(log.completed.is_empty());
    assert!(!app.world().contains_resource::<LevelSession>());
    assert!(!app.world().resource::<ProgressStore>().is_level_completed("earth", 1));
}

#[test]
fn test_pause_freezes_simulation() {
    let mut app = create_level_app(fast_config());
    let mut log = HostLog::default();
    start_level(&mut app, "earth", 1);
    run_ticks(&mut app, 5, &mut log);

    let elapsed = app.world().resource::<LevelSession>().elapsed_ms;
    let clock = app.world().resource::<Scheduler>().now_ms();
    let enemies_before = entities_with::<Enemy>(&mut app);

    app.world_mut().send_event(SessionControl::Pause);
    run_ticks(&mut app, 30, &mut log);

    assert!(app.world().resource::<LevelSession>().paused);
    assert_eq!(app.world().resource::<LevelSession>().elapsed_ms, elapsed);
    assert_eq!(app.world().resource::<Scheduler>().now_ms(), clock);
    assert_eq!(entities_with::<Enemy>(&mut app), enemies_before);

    app.world_mut().send_event(SessionControl::Resume);
    run_ticks(&mut app, 1, &mut log);
    assert!(app.world().resource::<LevelSession>().elapsed_ms > elapsed);
}

#[test]
fn test_quit_returns_to_menu() {
    let mut app = create_level_app(fast_config());
    let mut log = HostLog::default();
    start_level(&mut app, "fire", 2);
    run_ticks(&mut app, 3, &mut log);

    app.world_mut().send_event(SessionControl::Quit);
    run_ticks(&mut app, 1, &mut log);

    assert_eq!(log.scenes.len(), 1);
    assert_eq!(log.scenes[0].scene, SceneTarget::Menu);
    assert_eq!(log.scenes[0].chapter_key, "fire");
    assert_eq!(log.scenes[0].level_number, 2);
    assert!(!app.world().contains_resource::<LevelSession>());
    assert!(entities_with::<LevelEntity>(&mut app).is_empty());
    assert_eq!(app.world().resource::<Scheduler>().pending(), 0);
}

#[test]
fn test_host_driven_overlaps() {
    let mut app = create_level_app(SessionConfig {
        builtin_broadphase: false,
        ..fast_config()
    });
    let mut log = HostLog::default();
    start_level(&mut app, "earth", 1);

    let (enemy, position) = entities_with::<Enemy>(&mut app)[0];
    let projectile = spawn_projectile(&mut app.world_mut().commands(), position, Vec2::ZERO, LETHAL, Side::Player);
    app.world_mut().flush();

    // Встроенный broad-phase выключен: снаряд в упор ничего не делает
    run_ticks(&mut app, 2, &mut log);
    assert!(app.world().get::<Combatant>(enemy).is_some_and(|c| c.is_alive()));

    // Хост сообщает контакт сам
    app.world_mut().send_event(Overlap { a: projectile, b: enemy });
    run_ticks(&mut app, 1, &mut log);
    assert!(app.world().get::<Combatant>(enemy).is_some_and(|c| c.is_dead));
    assert_eq!(app.world().resource::<LevelSession>().score, ENEMY_KILL_SCORE);
}

#[test]
fn test_kills_during_respawn_still_score() {
    let mut app = create_level_app(SessionConfig {
        respawn_delay_ms: 500.0,
        ..fast_config()
    });
    let mut log = HostLog::default();
    start_level(&mut app, "earth", 1);

    let (_, hero_position) = entities_with::<Hero>(&mut app)[0];
    shoot_at(&mut app, hero_position, Side::Enemy);
    run_ticks(&mut app, 2, &mut log);
    assert_eq!(phase(&app), SessionPhase::Respawning);

    // Снаряды героя ещё долетают, пока он ждёт респавн
    let enemies = entities_with::<Enemy>(&mut app);
    for (_, position) in &enemies {
        shoot_at(&mut app, *position, Side::Player);
    }
    run_ticks(&mut app, 2, &mut log);

    let kill_points = enemies.len() as u32 * ENEMY_KILL_SCORE;
    assert_eq!(phase(&app), SessionPhase::Respawning);
    assert_eq!(app.world().resource::<LevelSession>().score, kill_points);
    assert!(log.completed.is_empty(), "победа засчитывается только после респавна");

    run_ticks(&mut app, 40, &mut log);
    assert_eq!(log.completed.len(), 1);
    assert_eq!(log.completed[0].final_score, kill_points + 3000);
    assert_eq!(
        app.world().resource::<ProgressStore>().high_score("earth", 1),
        kill_points + 3000
    );
}

#[test]
fn test_dead_hero_does_not_pick_up_power_up() {
    let mut app = create_level_app(SessionConfig {
        builtin_broadphase: false,
        ..fast_config()
    });
    let mut log = HostLog::default();
    start_level(&mut app, "earth", 1);

    let (hero, position) = entities_with::<Hero>(&mut app)[0];
    let bolt = shoot_with(&mut app, position, LETHAL, Side::Enemy);
    let power_up = spawn_power_up(&mut app.world_mut().commands(), position, PowerUpKind::Shield);
    app.world_mut().flush();

    // Смерть и подбор в одном тике: сначала снаряд, потом power-up
    app.world_mut().send_event(Overlap { a: bolt, b: hero });
    app.world_mut().send_event(Overlap { a: hero, b: power_up });
    run_ticks(&mut app, 1, &mut log);

    assert!(app.world().get::<Combatant>(hero).is_some_and(|c| c.is_dead));
    assert!(app.world().get::<PowerUp>(power_up).is_some(), "power-up должен остаться на уровне");
    assert_eq!(phase(&app), SessionPhase::Respawning);
    assert_eq!(app.world().resource::<LevelSession>().score, 0);
}

#[test]
fn test_dropped_power_up_is_picked_up() {
    let mut app = create_level_app(fast_config());
    let mut log = HostLog::default();
    start_level(&mut app, "earth", 1);

    let (hero, position) = entities_with::<Hero>(&mut app)[0];
    // Раненый герой: эффект Health тоже виден
    if let Some(mut combatant) = app.world_mut().get_mut::<Combatant>(hero) {
        combatant.health = 50;
    }

    app.world_mut().send_event(CollectibleDropped { position });
    run_ticks(&mut app, 1, &mut log);

    let drops = entities_with::<PowerUp>(&mut app);
    assert_eq!(drops.len(), 1);
    let (power_up, _) = drops[0];
    let kind = app.world().get::<PowerUp>(power_up).map(|p| p.kind).unwrap();

    run_ticks(&mut app, 2, &mut log);
    assert!(app.world().get_entity(power_up).is_err(), "power-up подобран");
    assert_eq!(app.world().resource::<LevelSession>().score, POWER_UP_SCORE);

    let combatant = *app.world().get::<Combatant>(hero).unwrap();
    let buffs = app.world().get::<Buffs>(hero).unwrap();
    match kind {
        PowerUpKind::Health => assert_eq!(combatant.health, 75),
        PowerUpKind::Shield => assert!(buffs.has_shield()),
        PowerUpKind::SpeedBoost => assert!(buffs.speed_boost_ms > 0.0),
        PowerUpKind::DoubleDamage => assert!(buffs.double_damage_ms > 0.0),
        PowerUpKind::MultiShot => assert!(buffs.multi_shot_ms > 0.0),
    }
}

#[test]
fn test_boss_first_volley_follows_telegraph() {
    let mut app = create_level_app(fast_config());
    start_level(&mut app, "earth", 5);
    let (boss, _) = entities_with::<Boss>(&mut app)[0];

    // Тик 1 = запуск уровня
    let mut telegraph_tick = None;
    let mut volley_tick = None;
    for tick in 2..=240u32 {
        app.update();
        let world = app.world_mut();

        let telegraphed = world
            .resource_mut::<Events<VisualCue>>()
            .drain()
            .any(|cue| matches!(cue, VisualCue::BossTelegraph { .. }));
        if telegraphed && telegraph_tick.is_none() {
            telegraph_tick = Some(tick);
        }

        let mut projectiles = world.query::<&Projectile>();
        if projectiles.iter(world).any(|p| p.side == Side::Enemy) {
            volley_tick = Some(tick);
            break;
        }
    }

    let telegraph_tick = telegraph_tick.expect("telegraph не показан");
    let volley_tick = volley_tick.expect("залпа не было");

    // Кулдаун 2000 ms, затем 600 ms telegraph
    assert!((119..=122).contains(&telegraph_tick), "telegraph на тике {}", telegraph_tick);
    assert!((35..=37).contains(&(volley_tick - telegraph_tick)), "залп на тике {}", volley_tick);
    let volley_ms = volley_tick as f32 * 1000.0 / TICK_HZ as f32;
    assert!((2550.0..2700.0).contains(&volley_ms), "залп в {} ms", volley_ms);

    // Залп закончил атаку: таймер пошёл заново (один тик после сброса)
    let state = app.world().get::<Boss>(boss).cloned().unwrap();
    assert!(!state.is_attacking);
    assert!(state.attack_timer_ms < 20.0, "таймер {}", state.attack_timer_ms);
}

#[test]
fn test_boss_phase_flash_blocks_damage_then_shortens_cooldown() {
    let mut app = create_level_app(fast_config());
    let mut log = HostLog::default();
    start_level(&mut app, "earth", 5);

    let (boss, position) = entities_with::<Boss>(&mut app)[0];
    let max_health = app.world().get::<Combatant>(boss).map(|c| c.max_health).unwrap();

    // Чуть больше половины здоровья → фаза 2
    shoot_with(&mut app, position, max_health / 2 + 1, Side::Player);
    run_ticks(&mut app, 2, &mut log);

    let state = app.world().get::<Boss>(boss).cloned().unwrap();
    let combatant = *app.world().get::<Combatant>(boss).unwrap();
    assert_eq!(state.phase, 2);
    assert!(state.phase_transition);
    assert!(combatant.is_invulnerable);
    assert!(log
        .cues
        .iter()
        .any(|cue| matches!(cue, VisualCue::BossPhaseFlash { phase: 2, .. })));

    // Во время flash урон не проходит
    let (_, position) = entities_with::<Boss>(&mut app)[0];
    shoot_with(&mut app, position, 100, Side::Player);
    run_ticks(&mut app, 2, &mut log);
    assert_eq!(app.world().get::<Combatant>(boss).map(|c| c.health), Some(combatant.health));

    // 800 ms flash закончился
    run_ticks(&mut app, 50, &mut log);
    let state = app.world().get::<Boss>(boss).cloned().unwrap();
    assert!(!state.phase_transition);
    assert!(app.world().get::<Combatant>(boss).is_some_and(|c| !c.is_invulnerable));
    assert_eq!(state.attack_cooldown_ms, 1500.0);
}
