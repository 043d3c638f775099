//! Процедурная раскладка уровня
//!
//! Чистая функция от (глава, номер уровня, RNG): один seed → одна раскладка.
//! Обычный уровень: длинная полоса с врагами стихии главы.
//! Босс-уровень: короткая арена с одним боссом.

use bevy::prelude::*;
use rand::Rng;

use crate::catalog::{boss_for, enemies_for, BossType, ChapterDef, EnemyType, LevelKind};
use crate::physics::LevelBounds;

pub const BASE_LEVEL_WIDTH: f32 = 2400.0;
pub const WIDTH_PER_LEVEL: f32 = 400.0;
pub const ARENA_WIDTH: f32 = 1600.0;
pub const SPAWN_CLEARANCE: f32 = 500.0;
pub const PATROL_HALF_SPAN: f32 = 120.0;
pub const FLYER_ALTITUDE: f32 = 220.0;
pub const BOSS_ALTITUDE: f32 = 280.0;
pub const MAX_ENEMIES: u32 = 12;

pub const ENEMY_RADIUS: f32 = 16.0;
pub const BOSS_RADIUS: f32 = 48.0;

#[derive(Debug, Clone, PartialEq)]
pub struct EnemySpawn {
    pub kind: &'static EnemyType,
    pub position: Vec2,
    pub patrol_start: f32,
    pub patrol_end: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BossSpawn {
    pub kind: &'static BossType,
    pub anchor: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LevelPlan {
    pub bounds: LevelBounds,
    pub hero_spawn: Vec2,
    pub enemies: Vec<EnemySpawn>,
    pub boss: Option<BossSpawn>,
}

/// Число врагов: растёт с номером уровня и "сложностью" стихии
pub fn enemy_count(chapter: &ChapterDef, level_number: u32) -> u32 {
    (3 + level_number + chapter.element.tier() / 4).min(MAX_ENEMIES)
}

pub fn plan_level(chapter: &ChapterDef, level_number: u32, rng: &mut impl Rng) -> LevelPlan {
    let floor_y = 0.0;
    let hero_spawn = Vec2::new(120.0, floor_y + crate::player::HERO_RADIUS);

    if let LevelKind::Boss(tier) = chapter.level_kind(level_number) {
        let kind = boss_for(chapter.element, tier);
        return LevelPlan {
            bounds: LevelBounds {
                min_x: 0.0,
                max_x: ARENA_WIDTH,
                floor_y,
            },
            hero_spawn,
            enemies: Vec::new(),
            boss: Some(BossSpawn {
                kind,
                anchor: Vec2::new(ARENA_WIDTH * 0.65, floor_y + BOSS_ALTITUDE),
            }),
        };
    }

    let width = BASE_LEVEL_WIDTH + level_number as f32 * WIDTH_PER_LEVEL;
    let roster: Vec<&'static EnemyType> = enemies_for(chapter.element).collect();
    let count = enemy_count(chapter, level_number);
    let segment = (width - SPAWN_CLEARANCE - ENEMY_RADIUS * 2.0) / count as f32;

    let mut enemies = Vec::with_capacity(count as usize);
    for i in 0..count {
        let Some(kind) = roster.get(rng.gen_range(0..roster.len().max(1))).copied() else {
            break;
        };

        let x = SPAWN_CLEARANCE + i as f32 * segment + rng.gen_range(0.0..segment * 0.5);
        let y = if kind.behavior.flies() {
            floor_y + FLYER_ALTITUDE
        } else {
            floor_y + ENEMY_RADIUS
        };

        enemies.push(EnemySpawn {
            kind,
            position: Vec2::new(x, y),
            patrol_start: (x - PATROL_HALF_SPAN).max(ENEMY_RADIUS),
            patrol_end: (x + PATROL_HALF_SPAN).min(width - ENEMY_RADIUS),
        });
    }

    LevelPlan {
        bounds: LevelBounds {
            min_x: 0.0,
            max_x: width,
            floor_y,
        },
        hero_spawn,
        enemies,
        boss: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{chapter_or_first, BossTier};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_same_seed_same_layout() {
        let chapter = chapter_or_first("fire");
        let a = plan_level(chapter, 2, &mut ChaCha8Rng::seed_from_u64(7));
        let b = plan_level(chapter, 2, &mut ChaCha8Rng::seed_from_u64(7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_standard_level_uses_chapter_roster() {
        let chapter = chapter_or_first("water");
        let plan = plan_level(chapter, 1, &mut ChaCha8Rng::seed_from_u64(1));

        assert!(plan.boss.is_none());
        assert_eq!(plan.enemies.len() as u32, enemy_count(chapter, 1));
        for spawn in &plan.enemies {
            assert_eq!(spawn.kind.element, chapter.element);
            assert!(spawn.position.x > plan.hero_spawn.x);
            assert!(spawn.position.x < plan.bounds.max_x);
            assert!(spawn.patrol_start < spawn.patrol_end);
        }
    }

    #[test]
    fn test_boss_levels_spawn_single_boss() {
        let chapter = chapter_or_first("earth");
        let mid = plan_level(chapter, 3, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(mid.boss.as_ref().map(|b| b.kind.tier), Some(BossTier::Mid));
        assert!(mid.enemies.is_empty());

        let fin = plan_level(chapter, 5, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(fin.boss.as_ref().map(|b| b.kind.tier), Some(BossTier::Final));

        let nexus = plan_level(chapter_or_first("nexus"), 1, &mut ChaCha8Rng::seed_from_u64(1));
        assert_eq!(nexus.boss.as_ref().map(|b| b.kind.tier), Some(BossTier::Ultimate));
    }

    #[test]
    fn test_enemy_count_is_capped() {
        let chapter = chapter_or_first("void");
        assert!(enemy_count(chapter, 50) <= MAX_ENEMIES);
        assert_eq!(enemy_count(chapter_or_first("earth"), 1), 4);
    }
}
