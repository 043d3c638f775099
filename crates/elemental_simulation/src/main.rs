//! Headless прогон уровня
//!
//! Запускает Bevy App без рендера: скриптованный герой бежит вправо и стреляет,
//! пока уровень не закончится (победа / game over) или не кончится лимит тиков.
//!
//! Использование: `elemental_simulation [chapter] [level] [element] [save_dir]`

use bevy::prelude::*;
use elemental_simulation::catalog::Element;
use elemental_simulation::progression::{FileKeyValueStore, ProgressStore};
use elemental_simulation::session::LevelSession;
use elemental_simulation::{
    create_headless_app, log_info, log_warning, InputState, LevelCompleted, LevelRequest, SceneRequest,
    SimulationPlugin, TICK_HZ,
};

/// 5 минут игрового времени
const MAX_TICKS: u32 = 60 * 300;
/// Прыжок каждые полсекунды
const JUMP_PERIOD_TICKS: u32 = 30;

fn main() {
    let mut args = std::env::args().skip(1);
    let chapter = args.next().unwrap_or_else(|| "earth".to_string());
    let level: u32 = args.next().and_then(|raw| raw.parse().ok()).unwrap_or(1);
    let element = args
        .next()
        .and_then(|raw| Element::from_key(&raw))
        .unwrap_or_default();
    let save_dir = args.next().unwrap_or_else(|| "saves".to_string());

    let seed = 42;
    log_info(&format!(
        "Starting headless level {}-{} as {} (seed: {}, saves: {})",
        chapter, level, element, seed, save_dir
    ));

    let mut app = create_headless_app(seed);
    app.insert_resource(ProgressStore::load(Box::new(FileKeyValueStore::new(&save_dir))))
        .add_plugins(SimulationPlugin);

    // Первый update запускает часы
    app.update();
    app.world_mut().send_event(LevelRequest::new(chapter, level, element));

    for tick in 0..MAX_TICKS {
        *app.world_mut().resource_mut::<InputState>() = InputState {
            right: true,
            jump: tick % JUMP_PERIOD_TICKS == 0,
            power: true,
            gift: tick % (JUMP_PERIOD_TICKS * 20) == 0,
            ..default()
        };

        app.update();

        for completed in app.world_mut().resource_mut::<Events<LevelCompleted>>().drain() {
            log_info(&format!(
                "Level complete: final score {} (first: {}, record: {}, chapter done: {})",
                completed.final_score, completed.first_completion, completed.new_high_score, completed.chapter_completed
            ));
        }

        let scenes: Vec<SceneRequest> = app.world_mut().resource_mut::<Events<SceneRequest>>().drain().collect();
        if let Some(scene) = scenes.last() {
            log_info(&format!(
                "Tick {} ({:.1}s): host asked for {:?}",
                tick,
                tick as f64 / TICK_HZ,
                scene.scene
            ));
            return;
        }

        if tick % 600 == 0 {
            if let Some(session) = app.world().get_resource::<LevelSession>() {
                log_info(&format!(
                    "Tick {}: phase {:?}, score {}, lives {}, {} entities",
                    tick,
                    session.phase,
                    session.score,
                    session.lives,
                    app.world().entities().len()
                ));
            }
        }
    }

    log_warning("Tick limit reached, level still running");
}
