//! Elemental Platformer Simulation Core
//!
//! ECS-симуляция на Bevy 0.16, без рендера.
//!
//! Разделение ответственности:
//! - ECS = правила игры (AI, бой, прогресс, жизненный цикл уровня)
//! - Хост = рендер, анимации, ввод с клавиатуры, смена сцен
//!
//! Хост общается с симуляцией только через ресурсы (`InputState`,
//! `ProgressStore`) и события (`LevelRequest`, `SessionControl` → внутрь;
//! `SceneRequest`, `LevelCompleted`, `VisualCue` → наружу).

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

// Публичные модули
pub mod ai;
pub mod catalog;
pub mod combat;
pub mod components;
pub mod config;
pub mod logger;
pub mod physics;
pub mod player;
pub mod progression;
pub mod session;
pub mod timers;

pub use logger::*;

// Re-export основных типов для хоста
pub use ai::AIPlugin;
pub use combat::{CombatPlugin, VisualCue};
pub use components::{Combatant, Dead};
pub use config::SessionConfig;
pub use physics::PhysicsPlugin;
pub use player::{InputState, PlayerPlugin};
pub use progression::ProgressStore;
pub use session::{LevelCompleted, LevelRequest, LevelSession, SceneRequest, SceneTarget, SessionControl, SessionPlugin};
pub use timers::TimersPlugin;

/// Fixed timestep симуляции
pub const TICK_HZ: f64 = 60.0;

/// Порядок фаз внутри одного FixedUpdate тика
///
/// Control работает всегда (иначе с паузы не выйти), остальное только
/// пока уровень запущен и не на паузе.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    /// Запуск уровня, pause/resume/quit
    Control,
    /// Отложенные действия
    Timers,
    /// Герой: ввод → velocity, атаки
    Input,
    /// Враги и боссы
    Ai,
    /// Интеграция, границы, broad-phase
    Physics,
    /// Контакты, урон, смерть
    Combat,
    /// Очки, победа, респавн, выход
    Session,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SessionConfig>().register_type::<SessionConfig>();

        let config = app.world().resource::<SessionConfig>().clone();

        // RNG и хранилище хост может подставить заранее
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(config.seed));
        }
        if !app.world().contains_resource::<ProgressStore>() {
            app.insert_resource(ProgressStore::in_memory());
        }
        app.world_mut().resource_mut::<ProgressStore>().unlock_all = config.unlock_all;

        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(TICK_HZ))
            .configure_sets(
                FixedUpdate,
                (
                    SimulationSet::Control,
                    SimulationSet::Timers.run_if(session::session_running),
                    SimulationSet::Input.run_if(session::session_running),
                    SimulationSet::Ai.run_if(session::session_running),
                    SimulationSet::Physics.run_if(session::session_running),
                    SimulationSet::Combat.run_if(session::session_running),
                    SimulationSet::Session.run_if(session::session_running),
                )
                    .chain(),
            )
            // Подсистемы
            .add_plugins((TimersPlugin, PlayerPlugin, AIPlugin, PhysicsPlugin, CombatPlugin, SessionPlugin));

        log_info(&format!("🧩 SimulationPlugin ready (seed {})", config.seed));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Каждый `app.update()` двигает время ровно на один fixed тик.
/// Первый update только запускает часы (delta = 0), FixedUpdate в нём не идёт.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(1.0 / TICK_HZ)))
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(Time::<Fixed>::from_hz(TICK_HZ));

    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    // Сериализуем в байты через Debug (простейший способ)
    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
