//! ECS Components, общие для всех бойцов
//!
//! - combatant: здоровье, урон, смерть (герой, враги, боссы)

pub mod combatant;

// Re-exports для удобного импорта
pub use combatant::*;
