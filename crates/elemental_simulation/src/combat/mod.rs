//! Combat module: снаряды, контакты, урон, смерть
//!
//! ECS ответственность:
//! - Контакты: `Overlap` (broad-phase или хост) → урон / подбор
//! - Смерть: Killed → EnemyKilled / BossDefeated / PlayerDied
//! - Визуал: только `VisualCue` события для рендер-слоя
//!
//! Порядок внутри тика: AI стреляет → physics двигает → здесь разрешаем.

use bevy::prelude::*;

use crate::SimulationSet;

pub mod contact;
pub mod damage;
pub mod events;
pub mod projectile;

// Re-export основных типов
pub use contact::{classify, resolve_overlaps, Contact, Role};
pub use damage::{handle_deaths, run_death_timers, schedule_boss_death, DROP_CHANCE};
pub use events::{BossDefeated, CollectibleDropped, DamageDealt, EnemyKilled, PlayerDied, PowerUpCollected, VisualCue};
pub use projectile::{aim_direction, rotate_aim, spawn_projectile, Projectile, Side, PROJECTILE_RADIUS};

/// Combat Plugin
///
/// Порядок выполнения:
/// 1. expire_projectiles: TTL снарядов
/// 2. resolve_overlaps: контакты → DamageDealt / PowerUpCollected
/// 3. handle_deaths: Killed → события смерти, death sequence
/// 4. run_death_timers: взрывы, анимация, удаление
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<DamageDealt>()
            .add_event::<EnemyKilled>()
            .add_event::<BossDefeated>()
            .add_event::<PlayerDied>()
            .add_event::<CollectibleDropped>()
            .add_event::<PowerUpCollected>()
            .add_event::<VisualCue>();

        app.add_systems(
            FixedUpdate,
            (
                projectile::expire_projectiles,
                contact::resolve_overlaps,
                damage::handle_deaths,
                damage::run_death_timers,
            )
                .chain() // Последовательное выполнение для детерминизма
                .in_set(SimulationSet::Combat),
        );
    }
}
