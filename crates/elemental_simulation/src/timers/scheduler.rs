//! Scheduler: отложенные действия на монотонных часах симуляции
//!
//! Часы двигает только тик (`tick_scheduler`), пауза = часы стоят.
//! Задачи с одинаковым due срабатывают в порядке постановки (seq).

use bevy::prelude::*;

use crate::catalog::BossAttack;
use crate::session::SceneRequest;

/// Отложенное действие. Обработчик обязан перепроверить живость цели.
#[derive(Debug, Clone, PartialEq)]
pub enum TimedAction {
    /// Конец invulnerability flash после смены фазы
    EndPhaseFlash { boss: Entity },
    /// Конец telegraph → выпуск снарядов
    ExecuteBossAttack { boss: Entity, attack: BossAttack },
    /// Один взрыв из death sequence босса
    BossExplosion { boss: Entity, offset: Vec2 },
    /// Финальная анимация смерти (scale/fade/rotate)
    BossDeathAnimation { boss: Entity },
    /// Конец death sequence: bossDefeated + удаление
    FinishBossDeath { boss: Entity },
    /// Конец fade-out врага
    RemoveEnemy { enemy: Entity },
    /// Респавн героя (session в фазе Respawning)
    RespawnPlayer,
    /// Выход из уровня (победа / game over)
    LeaveLevel { request: SceneRequest },
}

#[derive(Debug, Clone)]
struct ScheduledTask {
    due_ms: f64,
    seq: u64,
    owner: Option<Entity>,
    action: TimedAction,
}

/// Монотонный планировщик (Resource)
#[derive(Resource, Debug, Default)]
pub struct Scheduler {
    now_ms: f64,
    next_seq: u64,
    tasks: Vec<ScheduledTask>,
}

impl Scheduler {
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn pending(&self) -> usize {
        self.tasks.len()
    }

    /// Поставить действие через `delay_ms`. `owner`: для массовой отмены.
    pub fn schedule(&mut self, delay_ms: f64, owner: Option<Entity>, action: TimedAction) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.push(ScheduledTask {
            due_ms: self.now_ms + delay_ms.max(0.0),
            seq,
            owner,
            action,
        });
    }

    /// Отменить все задачи владельца. Возвращает число отменённых.
    pub fn cancel_owner(&mut self, owner: Entity) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.owner != Some(owner));
        before - self.tasks.len()
    }

    /// Teardown сцены: всё отменяется
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    #[cfg(test)]
    pub fn has_pending_for(&self, owner: Entity) -> bool {
        self.tasks.iter().any(|task| task.owner == Some(owner))
    }

    /// Сдвинуть часы, вернуть созревшие действия в порядке (due, seq)
    pub fn advance(&mut self, delta_ms: f64) -> Vec<TimedAction> {
        self.now_ms += delta_ms.max(0.0);
        let now = self.now_ms;

        let (mut due, pending): (Vec<ScheduledTask>, Vec<ScheduledTask>) =
            self.tasks.drain(..).partition(|task| task.due_ms <= now);
        self.tasks = pending;

        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.seq.cmp(&b.seq)));
        due.into_iter().map(|task| task.action).collect()
    }
}
