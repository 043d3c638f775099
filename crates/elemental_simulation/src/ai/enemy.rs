//! Enemy AI: движение по примитиву поведения + стрельба
//!
//! Примитивы:
//! - Patrol: между patrol_start и patrol_end, vx = speed * 0.5 * direction
//! - Chase: ближе 300 → к игроку на полной скорости, иначе patrol
//! - Hover: висим над игроком с горизонтальным разносом ≥ 150, P-контроллер
//! - Stationary: vx = 0, смотрим на игрока
//!
//! `*_shoot` поведения стреляют раз в 2000 ms, если игрок ближе 450.

use bevy::prelude::*;

use crate::catalog::{EnemyBehavior, EnemyType, MovementPrimitive};
use crate::combat::{aim_direction, spawn_projectile, Side};
use crate::components::{Combatant, Dead};
use crate::physics::{Body, Velocity};
use crate::player::Hero;

pub const CHASE_RANGE: f32 = 300.0;
pub const PATROL_SPEED_FACTOR: f32 = 0.5;
pub const HOVER_HEIGHT: f32 = 150.0;
pub const HOVER_SEPARATION: f32 = 150.0;
pub const HOVER_GAIN: f32 = 2.0;
pub const HOVER_SPEED_FACTOR: f32 = 0.3;
pub const ENEMY_FIRE_INTERVAL_MS: f32 = 2000.0;
pub const ENEMY_FIRE_RANGE: f32 = 450.0;
pub const ENEMY_BOLT_SPEED: f32 = 260.0;

/// Враг: ссылка на неизменяемый тип из каталога
#[derive(Component, Debug, Clone)]
#[require(Combatant, Velocity, Body)]
pub struct Enemy {
    pub kind: &'static EnemyType,
}

/// Что AI знает об игроке на этом тике
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayerSnapshot {
    pub position: Vec2,
    pub alive: bool,
}

/// Результат шага AI
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyIntent {
    pub velocity: Vec2,
    /// Точка прицела, если враг стреляет на этом тике
    pub fire_at: Option<Vec2>,
}

/// Состояние AI врага
#[derive(Component, Debug, Clone, PartialEq)]
pub struct EnemyAi {
    pub behavior: EnemyBehavior,
    pub patrol_start: f32,
    pub patrol_end: f32,
    /// +1 вправо, -1 влево
    pub direction: f32,
    pub facing_left: bool,
    pub fire_timer_ms: f32,
}

impl EnemyAi {
    pub fn new(behavior: EnemyBehavior, patrol_start: f32, patrol_end: f32) -> Self {
        Self {
            behavior,
            patrol_start: patrol_start.min(patrol_end),
            patrol_end: patrol_start.max(patrol_end),
            direction: 1.0,
            facing_left: false,
            fire_timer_ms: 0.0,
        }
    }

    /// Один шаг AI. None = no-op (игрока нет или он мёртв).
    pub fn step(
        &mut self,
        delta_ms: f32,
        position: Vec2,
        velocity: Vec2,
        speed: f32,
        player: Option<PlayerSnapshot>,
    ) -> Option<EnemyIntent> {
        let player = player.filter(|p| p.alive)?;

        let velocity = match self.behavior.movement() {
            MovementPrimitive::Patrol => self.patrol(position, velocity, speed),
            MovementPrimitive::Chase => {
                if position.distance(player.position) < CHASE_RANGE {
                    let dx = player.position.x - position.x;
                    let dir = if dx < 0.0 { -1.0 } else { 1.0 };
                    self.facing_left = dir < 0.0;
                    Vec2::new(speed * dir, velocity.y)
                } else {
                    self.patrol(position, velocity, speed)
                }
            }
            MovementPrimitive::Hover => {
                self.face(position, player.position);
                hover_velocity(position, player.position, speed)
            }
            MovementPrimitive::Stationary => {
                self.face(position, player.position);
                Vec2::new(0.0, velocity.y)
            }
        };

        let fire_at = if self.behavior.shoots() {
            self.fire_timer_ms = (self.fire_timer_ms + delta_ms).min(ENEMY_FIRE_INTERVAL_MS);
            let in_range = position.distance(player.position) <= ENEMY_FIRE_RANGE;
            if in_range && self.fire_timer_ms >= ENEMY_FIRE_INTERVAL_MS {
                self.fire_timer_ms = 0.0;
                Some(player.position)
            } else {
                None
            }
        } else {
            None
        };

        Some(EnemyIntent { velocity, fire_at })
    }

    fn patrol(&mut self, position: Vec2, velocity: Vec2, speed: f32) -> Vec2 {
        if position.x <= self.patrol_start {
            self.direction = 1.0;
        } else if position.x >= self.patrol_end {
            self.direction = -1.0;
        }
        self.facing_left = self.direction < 0.0;

        Vec2::new(speed * PATROL_SPEED_FACTOR * self.direction, velocity.y)
    }

    fn face(&mut self, position: Vec2, target: Vec2) {
        self.facing_left = target.x < position.x;
    }
}

/// P-контроллер к точке над игроком; каждая компонента ограничена speed * 0.3
pub fn hover_velocity(position: Vec2, player: Vec2, speed: f32) -> Vec2 {
    let side = if position.x < player.x { -1.0 } else { 1.0 };
    let target = Vec2::new(player.x + side * HOVER_SEPARATION, player.y + HOVER_HEIGHT);
    let cap = speed * HOVER_SPEED_FACTOR;

    let raw = (target - position) * HOVER_GAIN;
    Vec2::new(raw.x.clamp(-cap, cap), raw.y.clamp(-cap, cap))
}

/// System: шаг AI всех живых врагов
pub fn enemy_ai(
    mut commands: Commands,
    mut enemies: Query<(&Enemy, &mut EnemyAi, &Combatant, &Transform, &mut Velocity), Without<Dead>>,
    heroes: Query<(&Transform, &Combatant), (With<Hero>, Without<Enemy>)>,
    time: Res<Time<Fixed>>,
) {
    let delta_ms = time.delta_secs() * 1000.0;
    let player = heroes.iter().next().map(|(transform, combatant)| PlayerSnapshot {
        position: transform.translation.truncate(),
        alive: combatant.is_alive(),
    });

    for (enemy, mut ai, combatant, transform, mut velocity) in enemies.iter_mut() {
        if combatant.is_dead {
            continue;
        }

        let position = transform.translation.truncate();
        let Some(intent) = ai.step(delta_ms, position, velocity.0, enemy.kind.speed, player) else {
            continue;
        };

        velocity.0 = intent.velocity;

        if let Some(target) = intent.fire_at {
            let aim = aim_direction(position, target);
            spawn_projectile(&mut commands, position, aim * ENEMY_BOLT_SPEED, enemy.kind.damage, Side::Enemy);
        }
    }
}
