//! Конфигурация уровня (Resource)
//!
//! Все задержки в миллисекундах. Значения по умолчанию = боевые,
//! тесты подкручивают через `SessionConfig { .., ..Default::default() }`.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone, Reflect)]
#[reflect(Resource)]
pub struct SessionConfig {
    /// Жизней на старте уровня
    pub starting_lives: u32,
    /// Задержка перед респавном героя
    pub respawn_delay_ms: f64,
    /// Задержка перед выходом в выбор уровня после game over
    pub game_over_delay_ms: f64,
    /// Задержка перед выходом после победы
    pub completion_delay_ms: f64,
    /// Бонус за время: max(0, par - elapsed_s) * per_second
    pub time_bonus_par_secs: u32,
    pub time_bonus_per_second: u32,
    /// Встроенный broad-phase (выключить, если overlap'ы шлёт хост-движок)
    pub builtin_broadphase: bool,
    /// Debug: все главы открыты
    pub unlock_all: bool,
    /// Seed для DeterministicRng (дропы, раскладка, взрывы)
    pub seed: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            respawn_delay_ms: 1500.0,
            game_over_delay_ms: 2500.0,
            completion_delay_ms: 2000.0,
            time_bonus_par_secs: 300,
            time_bonus_per_second: 10,
            builtin_broadphase: true,
            unlock_all: false,
            seed: 42,
        }
    }
}

impl SessionConfig {
    /// finalScore = score + max(0, par - elapsed) * per_second
    pub fn final_score(&self, score: u32, elapsed_ms: f64) -> u32 {
        let elapsed_secs = (elapsed_ms / 1000.0).floor() as u32;
        let bonus = self.time_bonus_par_secs.saturating_sub(elapsed_secs) * self.time_bonus_per_second;
        score + bonus
    }
}
