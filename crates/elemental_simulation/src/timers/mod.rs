//! Timed effects module
//!
//! Отложенные действия (phase flash, telegraph → выстрел, death sequence,
//! fade-out, респавн, выход из уровня) планируются в `Scheduler` и
//! срабатывают как `TimerFired` события в начале тика.
//!
//! Каждый обработчик сам фильтрует свои варианты и перепроверяет
//! живость цели (entity может уже не быть).

use bevy::prelude::*;

use crate::SimulationSet;

pub mod scheduler;

pub use scheduler::{Scheduler, TimedAction};

/// Созревшее отложенное действие
#[derive(Event, Debug, Clone, PartialEq)]
pub struct TimerFired {
    pub action: TimedAction,
}

/// System: сдвинуть часы на fixed delta и выпустить созревшие действия
pub fn tick_scheduler(
    mut scheduler: ResMut<Scheduler>,
    time: Res<Time<Fixed>>,
    mut fired: EventWriter<TimerFired>,
) {
    let delta_ms = time.delta_secs_f64() * 1000.0;

    for action in scheduler.advance(delta_ms) {
        fired.write(TimerFired { action });
    }
}

pub struct TimersPlugin;

impl Plugin for TimersPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Scheduler>().add_event::<TimerFired>();

        app.add_systems(FixedUpdate, tick_scheduler.in_set(SimulationSet::Timers));
    }
}
