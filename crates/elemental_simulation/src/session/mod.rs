//! Level Session module
//!
//! Жизненный цикл уровня: запуск по `LevelRequest`, очки, победа,
//! смерть/респавн/game over, пауза и выход. Наружу (хосту) уходят
//! `SceneRequest` и `LevelCompleted`.

use bevy::prelude::*;

use crate::SimulationSet;

pub mod layout;
pub mod spawn;
pub mod state;
pub mod systems;


// Re-export основных типов
pub use layout::{enemy_count, plan_level, BossSpawn, EnemySpawn, LevelPlan};
pub use spawn::{process_level_requests, start_level, teardown_level};
pub use state::{
    session_running, LevelCompleted, LevelEntity, LevelRequest, LevelSession, SceneRequest, SceneTarget,
    SessionControl, SessionPhase,
};
pub use systems::{boss_score, exit_scene_after_win, ENEMY_KILL_SCORE, FINAL_BOSS_SCORE, MID_BOSS_SCORE, POWER_UP_SCORE};

/// Session Plugin
///
/// Control set (без паузы): запуск уровня → pause/resume/quit.
/// Session set: часы → очки → победа → смерть героя → отложенные действия.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LevelRequest>()
            .add_event::<SceneRequest>()
            .add_event::<SessionControl>()
            .add_event::<LevelCompleted>();

        app.add_systems(
            FixedUpdate,
            (spawn::process_level_requests, systems::apply_session_control)
                .chain()
                .in_set(SimulationSet::Control),
        );

        app.add_systems(
            FixedUpdate,
            (
                systems::advance_session_clock,
                systems::apply_score_events,
                systems::check_level_completion,
                systems::handle_player_death,
                systems::run_session_timers,
            )
                .chain()
                .in_set(SimulationSet::Session),
        );
    }
}
