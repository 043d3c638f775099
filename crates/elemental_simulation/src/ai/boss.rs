//! Boss AI: фазы, цикл атак, движение
//!
//! Фаза = f(health / max_health): >0.66 → 1, >0.33 → 2, иначе 3 (только final-tier).
//! Фаза монотонна: понижение номера невозможно.
//!
//! Смена фазы: 800 ms неуязвимости (4 × 200 ms мигания), затем
//! attack_cooldown = max(1000, 2000 - (phase-1) * 500).
//!
//! Атака: telegraph 300 ms scale-up + yoyo (итого 600 ms) → залп → таймер в 0.

use bevy::prelude::*;

use super::boss_attacks::volley;
use super::enemy::PlayerSnapshot;
use crate::catalog::{BossAttack, BossType, MovePattern};
use crate::combat::{spawn_projectile, Side, VisualCue};
use crate::components::{Combatant, Dead};
use crate::physics::{Body, Velocity};
use crate::player::Hero;
use crate::timers::{Scheduler, TimedAction, TimerFired};

pub const BASE_ATTACK_COOLDOWN_MS: f32 = 2000.0;
pub const MIN_ATTACK_COOLDOWN_MS: f32 = 1000.0;
pub const COOLDOWN_STEP_PER_PHASE_MS: f32 = 500.0;

pub const PHASE_FLASH_COUNT: u32 = 4;
pub const PHASE_FLASH_INTERVAL_MS: f32 = 200.0;
pub const PHASE_FLASH_MS: f64 = PHASE_FLASH_COUNT as f64 * PHASE_FLASH_INTERVAL_MS as f64;

/// Scale-up длится 300 ms, yoyo возвращает обратно
pub const TELEGRAPH_HALF_MS: f32 = 300.0;
pub const TELEGRAPH_MS: f32 = TELEGRAPH_HALF_MS * 2.0;

pub const HOVER_DRIFT_X: f32 = 80.0;
pub const HOVER_DRIFT_Y: f32 = 40.0;
pub const HOVER_GAIN: f32 = 2.0;
pub const ORBIT_RADIUS: f32 = 150.0;
pub const ORBIT_GAIN: f32 = 3.0;

/// Фаза по доле здоровья (non-final боссы не идут дальше 2)
pub fn phase_for(health_ratio: f32, is_final: bool) -> u8 {
    let phase = if health_ratio > 0.66 {
        1
    } else if health_ratio > 0.33 {
        2
    } else {
        3
    };

    if is_final {
        phase
    } else {
        phase.min(2)
    }
}

pub fn cooldown_for_phase(phase: u8) -> f32 {
    let step = phase.saturating_sub(1) as f32 * COOLDOWN_STEP_PER_PHASE_MS;
    (BASE_ATTACK_COOLDOWN_MS - step).max(MIN_ATTACK_COOLDOWN_MS)
}

/// Босс: фазовая state machine
#[derive(Component, Debug, Clone)]
#[require(Combatant, Velocity, Body)]
pub struct Boss {
    pub kind: &'static BossType,
    pub phase: u8,
    pub attack_timer_ms: f32,
    pub attack_cooldown_ms: f32,
    pub is_attacking: bool,
    /// Идёт invulnerability flash после смены фазы
    pub phase_transition: bool,
    pub move_pattern: MovePattern,
    /// Точка hover'а / центр орбиты
    pub anchor: Vec2,
    pub move_clock_ms: f32,
    pub facing_left: bool,
    /// Death sequence в процессе (терминально)
    pub dying: bool,
}

impl Boss {
    pub fn new(kind: &'static BossType, anchor: Vec2) -> Self {
        Self {
            kind,
            phase: 1,
            attack_timer_ms: 0.0,
            attack_cooldown_ms: BASE_ATTACK_COOLDOWN_MS,
            is_attacking: false,
            phase_transition: false,
            move_pattern: kind.move_pattern,
            anchor,
            move_clock_ms: 0.0,
            facing_left: false,
            dying: false,
        }
    }

    /// Пересчёт фазы. Some(new_phase) если фаза выросла (и включилась неуязвимость).
    pub fn check_phase(&mut self, combatant: &mut Combatant) -> Option<u8> {
        if self.dying || combatant.is_dead || self.phase_transition {
            return None;
        }

        let target = phase_for(combatant.health_ratio(), self.kind.is_final());
        if target <= self.phase {
            return None;
        }

        self.phase = target;
        self.phase_transition = true;
        combatant.is_invulnerable = true;
        Some(target)
    }

    /// Конец invulnerability flash
    pub fn end_phase_flash(&mut self, combatant: &mut Combatant) {
        if self.dying {
            return;
        }

        self.phase_transition = false;
        combatant.is_invulnerable = false;
        self.attack_cooldown_ms = cooldown_for_phase(self.phase);
    }

    /// Атака текущей фазы: `attacks[min(phase-1, len-1)]`
    pub fn select_attack(&self) -> Option<BossAttack> {
        let attacks = self.kind.attacks;
        if attacks.is_empty() {
            return None;
        }

        let index = (self.phase.saturating_sub(1) as usize).min(attacks.len() - 1);
        attacks.get(index).copied()
    }

    pub fn tick_attack_timer(&mut self, delta_ms: f32) {
        if !self.is_attacking {
            self.attack_timer_ms += delta_ms;
        }
    }

    pub fn ready_to_attack(&self, player_alive: bool) -> bool {
        !self.dying && !self.is_attacking && player_alive && self.attack_timer_ms >= self.attack_cooldown_ms
    }

    /// Начать атаку (если в списке есть что выбрать)
    pub fn begin_attack(&mut self) -> Option<BossAttack> {
        let attack = self.select_attack()?;
        self.is_attacking = true;
        Some(attack)
    }

    pub fn finish_attack(&mut self) {
        self.is_attacking = false;
        self.attack_timer_ms = 0.0;
    }

    /// Скорость движения к цели паттерна + разворот к игроку
    pub fn steer(&mut self, delta_ms: f32, position: Vec2, player: Vec2) -> Vec2 {
        self.move_clock_ms += delta_ms;
        self.facing_left = player.x < position.x;

        let t = self.move_clock_ms / 1000.0;
        let speed = self.kind.speed;

        let (target, gain, cap) = match self.move_pattern {
            MovePattern::Hover => {
                let drift = Vec2::new((t * 0.8).cos() * HOVER_DRIFT_X, (t * 2.0).sin() * HOVER_DRIFT_Y);
                (self.anchor + drift, HOVER_GAIN, speed)
            }
            MovePattern::Circle => {
                // угловая скорость = линейная / радиус
                let angle = t * speed / ORBIT_RADIUS;
                (self.anchor + Vec2::from_angle(angle) * ORBIT_RADIUS, ORBIT_GAIN, speed * 1.5)
            }
        };

        ((target - position) * gain).clamp_length_max(cap)
    }
}

fn player_snapshot(heroes: &Query<(&Transform, &Combatant), (With<Hero>, Without<Boss>)>) -> Option<PlayerSnapshot> {
    heroes.iter().next().map(|(transform, combatant)| PlayerSnapshot {
        position: transform.translation.truncate(),
        alive: combatant.is_alive(),
    })
}

/// System: пересчёт фаз (каждый тик)
pub fn update_boss_phases(
    mut bosses: Query<(Entity, &mut Boss, &mut Combatant), Without<Dead>>,
    mut scheduler: ResMut<Scheduler>,
    mut cues: EventWriter<VisualCue>,
) {
    for (entity, mut boss, mut combatant) in bosses.iter_mut() {
        let Some(phase) = boss.check_phase(&mut combatant) else {
            continue;
        };

        cues.write(VisualCue::BossPhaseFlash {
            boss: entity,
            phase,
            flashes: PHASE_FLASH_COUNT,
            interval_ms: PHASE_FLASH_INTERVAL_MS,
        });
        scheduler.schedule(PHASE_FLASH_MS, Some(entity), TimedAction::EndPhaseFlash { boss: entity });

        crate::log_info(&format!("⚡ Boss {} → phase {}", boss.kind.key, phase));
    }
}

/// System: движение боссов
pub fn boss_movement(
    mut bosses: Query<(&mut Boss, &Combatant, &Transform, &mut Velocity), Without<Dead>>,
    heroes: Query<(&Transform, &Combatant), (With<Hero>, Without<Boss>)>,
    time: Res<Time<Fixed>>,
) {
    let delta_ms = time.delta_secs() * 1000.0;
    let Some(player) = player_snapshot(&heroes).filter(|p| p.alive) else {
        return;
    };

    for (mut boss, combatant, transform, mut velocity) in bosses.iter_mut() {
        if combatant.is_dead || boss.dying {
            continue;
        }
        velocity.0 = boss.steer(delta_ms, transform.translation.truncate(), player.position);
    }
}

/// System: цикл атак (таймер → telegraph → отложенный залп)
pub fn boss_attack_cycle(
    mut bosses: Query<(Entity, &mut Boss, &Combatant), Without<Dead>>,
    heroes: Query<(&Transform, &Combatant), (With<Hero>, Without<Boss>)>,
    mut scheduler: ResMut<Scheduler>,
    mut cues: EventWriter<VisualCue>,
    time: Res<Time<Fixed>>,
) {
    let delta_ms = time.delta_secs() * 1000.0;
    let player_alive = player_snapshot(&heroes).is_some_and(|p| p.alive);

    for (entity, mut boss, combatant) in bosses.iter_mut() {
        if combatant.is_dead || boss.dying {
            continue;
        }

        boss.tick_attack_timer(delta_ms);
        if !boss.ready_to_attack(player_alive) {
            continue;
        }

        // Пустой список атак → босс никогда не атакует
        let Some(attack) = boss.begin_attack() else {
            continue;
        };

        cues.write(VisualCue::BossTelegraph {
            boss: entity,
            duration_ms: TELEGRAPH_MS,
        });
        scheduler.schedule(
            TELEGRAPH_MS as f64,
            Some(entity),
            TimedAction::ExecuteBossAttack { boss: entity, attack },
        );
    }
}

/// System: отложенные действия боссов (конец flash, выполнение атаки)
pub fn run_boss_timers(
    mut commands: Commands,
    mut fired: EventReader<TimerFired>,
    mut bosses: Query<(&mut Boss, &mut Combatant, &Transform), Without<Hero>>,
    heroes: Query<(&Transform, &Combatant), (With<Hero>, Without<Boss>)>,
) {
    for TimerFired { action } in fired.read() {
        match action {
            TimedAction::EndPhaseFlash { boss } => {
                let Ok((mut state, mut combatant, _)) = bosses.get_mut(*boss) else {
                    continue;
                };
                state.end_phase_flash(&mut combatant);
            }
            TimedAction::ExecuteBossAttack { boss, attack } => {
                let Ok((mut state, combatant, transform)) = bosses.get_mut(*boss) else {
                    continue;
                };
                if state.dying || combatant.is_dead {
                    continue;
                }

                // Игрок умер во время telegraph → залпа нет, цикл продолжается
                if let Some(player) = player_snapshot(&heroes).filter(|p| p.alive) {
                    let origin = transform.translation.truncate();
                    for velocity in volley(attack.pattern, origin, player.position, attack.projectile_speed) {
                        spawn_projectile(&mut commands, origin, velocity, state.kind.damage, Side::Enemy);
                    }
                    crate::log(&format!("🔥 Boss {} fires {}", state.kind.key, attack.key));
                }

                state.finish_attack();
            }
            _ => {}
        }
    }
}
