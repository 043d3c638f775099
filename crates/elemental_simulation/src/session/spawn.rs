//! Запуск и teardown уровня (прямой доступ к World)

use bevy::prelude::*;

use super::layout::{plan_level, BossSpawn, EnemySpawn, BOSS_RADIUS, ENEMY_RADIUS};
use super::state::{LevelEntity, LevelRequest, LevelSession, SessionPhase};
use crate::ai::{Boss, Enemy, EnemyAi};
use crate::catalog::chapter_or_first;
use crate::catalog::Element;
use crate::components::Combatant;
use crate::config::SessionConfig;
use crate::physics::{Body, Kinematic};
use crate::player::{Hero, HERO_DAMAGE, HERO_HEALTH, HERO_RADIUS};
use crate::timers::Scheduler;
use crate::DeterministicRng;

/// Компоненты свежего героя (Kinematic, Buffs, GiftPower, Velocity: через require)
pub fn hero_bundle(element: Element, position: Vec2) -> impl Bundle {
    (
        Hero::new(element),
        Combatant::new(HERO_HEALTH, HERO_DAMAGE),
        Body { radius: HERO_RADIUS },
        Transform::from_translation(position.extend(0.0)),
        LevelEntity,
    )
}

pub fn enemy_bundle(spawn: &EnemySpawn) -> impl Bundle {
    (
        Enemy { kind: spawn.kind },
        EnemyAi::new(spawn.kind.behavior, spawn.patrol_start, spawn.patrol_end),
        Combatant::new(spawn.kind.health, spawn.kind.damage),
        Body { radius: ENEMY_RADIUS },
        Transform::from_translation(spawn.position.extend(0.0)),
        LevelEntity,
    )
}

pub fn boss_bundle(spawn: &BossSpawn) -> impl Bundle {
    (
        Boss::new(spawn.kind, spawn.anchor),
        Combatant::new(spawn.kind.health, spawn.kind.damage),
        Body { radius: BOSS_RADIUS },
        Transform::from_translation(spawn.anchor.extend(0.0)),
        LevelEntity,
    )
}

/// Teardown: все entity уровня, отложенные действия и сама сессия
pub fn teardown_level(world: &mut World) {
    world.resource_mut::<Scheduler>().clear();

    let mut level_entities = world.query_filtered::<Entity, With<LevelEntity>>();
    let entities: Vec<Entity> = level_entities.iter(world).collect();
    for entity in entities {
        world.despawn(entity);
    }

    world.remove_resource::<LevelSession>();
}

/// Запуск уровня. Неизвестная глава → первая глава.
pub fn start_level(world: &mut World, request: &LevelRequest) {
    teardown_level(world);

    let chapter = chapter_or_first(&request.chapter_key);
    let level_number = request.level_number.clamp(1, chapter.level_count);
    let kind = chapter.level_kind(level_number);

    let plan = {
        let mut rng = world.resource_mut::<DeterministicRng>();
        plan_level(chapter, level_number, &mut rng.rng)
    };
    let lives = world.resource::<SessionConfig>().starting_lives;

    world.insert_resource(plan.bounds);
    world.spawn(hero_bundle(request.element, plan.hero_spawn));

    for spawn in &plan.enemies {
        let mut enemy = world.spawn(enemy_bundle(spawn));
        if !spawn.kind.behavior.flies() {
            enemy.insert(Kinematic::default());
        }
    }

    if let Some(boss) = &plan.boss {
        world.spawn(boss_bundle(boss));
    }

    world.insert_resource(LevelSession {
        chapter,
        level_number,
        element: request.element,
        kind,
        phase: SessionPhase::Playing,
        score: 0,
        elapsed_ms: 0.0,
        lives,
        paused: false,
        hero_spawn: plan.hero_spawn,
    });

    crate::log_info(&format!(
        "🎮 Level {}-{} started ({:?}, hero {}, {} enemies{})",
        chapter.key,
        level_number,
        kind,
        request.element,
        plan.enemies.len(),
        plan.boss.as_ref().map(|b| format!(", boss {}", b.kind.key)).unwrap_or_default(),
    ));
}

/// Exclusive system: запросы запуска уровня от хоста
pub fn process_level_requests(world: &mut World) {
    let requests: Vec<LevelRequest> = world.resource_mut::<Events<LevelRequest>>().drain().collect();

    // Несколько запросов за тик → побеждает последний
    if let Some(request) = requests.last() {
        start_level(world, request);
    }
}
