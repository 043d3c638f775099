//! AI module: враги и боссы
//!
//! Логика шага: чистые методы на компонентах (`EnemyAi::step`, `Boss::check_phase`, ...),
//! системы только собирают данные из ECS и применяют результат.

use bevy::prelude::*;

use crate::SimulationSet;

pub mod boss;
pub mod boss_attacks;
pub mod enemy;


// Re-export основных типов
pub use boss::{cooldown_for_phase, phase_for, Boss};
pub use boss_attacks::volley;
pub use enemy::{Enemy, EnemyAi, EnemyIntent, PlayerSnapshot};

/// AI Plugin
///
/// Порядок выполнения:
/// 1. run_boss_timers: конец phase flash, отложенные залпы
/// 2. update_boss_phases: пересчёт фаз по здоровью
/// 3. enemy_ai: движение/стрельба врагов
/// 4. boss_movement: hover/orbit
/// 5. boss_attack_cycle: таймер атак → telegraph
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            FixedUpdate,
            (
                boss::run_boss_timers,
                boss::update_boss_phases,
                enemy::enemy_ai,
                boss::boss_movement,
                boss::boss_attack_cycle,
            )
                .chain() // Последовательное выполнение для детерминизма
                .in_set(SimulationSet::Ai),
        );
    }
}
