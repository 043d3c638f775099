//! Combat события (combat → session / renderer)

use bevy::prelude::*;

use crate::components::DamageOutcome;
use crate::player::PowerUpKind;

/// Event: урон применён к бойцу (Ignored не публикуется)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct DamageDealt {
    /// Снаряд или тело, нанёсшее урон
    pub source: Entity,
    pub target: Entity,
    pub amount: u32,
    pub outcome: DamageOutcome,
}

/// Event: враг убит (ровно один раз на врага)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct EnemyKilled {
    pub entity: Entity,
    pub key: &'static str,
    pub position: Vec2,
}

/// Event: death sequence босса завершена, entity удаляется
#[derive(Event, Debug, Clone, PartialEq)]
pub struct BossDefeated {
    pub entity: Entity,
    pub key: &'static str,
    pub is_final: bool,
    pub position: Vec2,
}

/// Event: герой погиб
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PlayerDied {
    pub entity: Entity,
    pub position: Vec2,
}

/// Event: из врага выпал коллектибл (30%)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct CollectibleDropped {
    pub position: Vec2,
}

/// Event: герой подобрал power-up
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PowerUpCollected {
    pub hero: Entity,
    pub kind: PowerUpKind,
}

/// Визуальные cue для рендер-слоя (симуляция их только публикует)
#[derive(Event, Debug, Clone, PartialEq)]
pub enum VisualCue {
    HitFlash { target: Entity },
    ScreenShake { intensity: f32, duration_ms: f32 },
    Explosion { position: Vec2 },
    /// Мигание неуязвимости: `flashes` × `interval_ms`
    BossPhaseFlash { boss: Entity, phase: u8, flashes: u32, interval_ms: f32 },
    /// Scale-up + yoyo перед атакой
    BossTelegraph { boss: Entity, duration_ms: f32 },
    BossDeathAnimation { boss: Entity, duration_ms: f32 },
    EnemyFadeOut { enemy: Entity, duration_ms: f32 },
}
