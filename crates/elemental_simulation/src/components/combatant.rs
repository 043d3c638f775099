//! Общий контракт здоровья/урона/смерти для героя, врагов и боссов

use bevy::prelude::*;

/// Результат попытки нанести урон
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum DamageOutcome {
    /// Цель мертва или неуязвима: урон проигнорирован
    Ignored,
    /// Урон поглощён (щит героя)
    Absorbed,
    /// Урон прошёл, цель жива
    Wounded { remaining: u32 },
    /// Урон убил цель (ровно один раз за жизнь entity)
    Killed,
}

impl DamageOutcome {
    pub fn landed(&self) -> bool {
        matches!(self, DamageOutcome::Wounded { .. } | DamageOutcome::Killed)
    }
}

/// Боец: здоровье + контактный урон + флаги
///
/// Инварианты:
/// - 0 ≤ health ≤ max_health
/// - is_dead == (health == 0) после смерти, переход односторонний (без воскрешения)
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Combatant {
    pub health: u32,
    pub max_health: u32,
    /// Контактный урон (и базовый урон выстрела)
    pub damage: u32,
    pub is_dead: bool,
    pub is_invulnerable: bool,
}

impl Default for Combatant {
    fn default() -> Self {
        Self::new(100, 10)
    }
}

impl Combatant {
    pub fn new(max_health: u32, damage: u32) -> Self {
        Self {
            health: max_health,
            max_health,
            damage,
            is_dead: false,
            is_invulnerable: false,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.is_dead
    }

    /// Урон. No-op если мёртв или неуязвим.
    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        if self.is_dead || self.is_invulnerable {
            return DamageOutcome::Ignored;
        }

        self.health = self.health.saturating_sub(amount);

        if self.health == 0 {
            self.is_dead = true;
            DamageOutcome::Killed
        } else {
            DamageOutcome::Wounded { remaining: self.health }
        }
    }

    /// Лечение до max_health. Мёртвых не лечим.
    pub fn heal(&mut self, amount: u32) -> bool {
        if self.is_dead {
            return false;
        }

        self.health = self.health.saturating_add(amount).min(self.max_health);
        true
    }

    pub fn health_ratio(&self) -> f32 {
        if self.max_health == 0 {
            return 0.0;
        }
        self.health as f32 / self.max_health as f32
    }
}

/// Маркер: entity мертва, ждёт fade-out / death sequence
///
/// Не участвует в коллизиях и AI. Удаление: через `Scheduler`.
#[derive(Component, Debug, Default)]
pub struct Dead;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_damage_kills_exactly_once() {
        let mut combatant = Combatant::new(30, 5);

        assert_eq!(combatant.take_damage(40), DamageOutcome::Killed);
        assert_eq!(combatant.health, 0);
        assert!(combatant.is_dead);

        // Повторный урон после смерти: ничего не меняет
        assert_eq!(combatant.take_damage(10), DamageOutcome::Ignored);
        assert_eq!(combatant.health, 0);
    }

    #[test]
    fn test_take_damage_wounds() {
        let mut combatant = Combatant::new(100, 5);
        assert_eq!(combatant.take_damage(30), DamageOutcome::Wounded { remaining: 70 });
        assert!(combatant.is_alive());
    }

    #[test]
    fn test_invulnerable_ignores_damage() {
        let mut combatant = Combatant::new(100, 5);
        combatant.is_invulnerable = true;

        assert_eq!(combatant.take_damage(50), DamageOutcome::Ignored);
        assert_eq!(combatant.health, 100);
    }

    #[test]
    fn test_heal_clamps_and_requires_life() {
        let mut combatant = Combatant::new(100, 5);
        combatant.take_damage(50);

        assert!(combatant.heal(80));
        assert_eq!(combatant.health, 100);

        combatant.take_damage(200);
        assert!(!combatant.heal(50));
        assert_eq!(combatant.health, 0);
        assert!(combatant.is_dead);
    }

    #[test]
    fn test_health_ratio() {
        let mut combatant = Combatant::new(200, 5);
        combatant.take_damage(100);
        assert!((combatant.health_ratio() - 0.5).abs() < f32::EPSILON);
    }
}
