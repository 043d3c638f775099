//! Physics stand-in module
//!
//! Kinematic контроллер, гравитация, границы уровня, broad-phase.
//! Всё заменяемо физикой хост-движка: системы лежат в `SimulationSet::Physics`.

use bevy::prelude::*;

use crate::config::SessionConfig;
use crate::SimulationSet;

pub mod broadphase;
pub mod movement;

// Re-export основных типов
pub use broadphase::{circles_overlap, detect_overlaps, Overlap};
pub use movement::{Body, Kinematic, LevelBounds, Unconfined, Velocity, GRAVITY};

/// Physics Plugin
///
/// Порядок выполнения:
/// 1. apply_gravity: гравитация для `Kinematic`
/// 2. integrate_velocity: velocity → Transform
/// 3. confine_to_level: пол + границы
/// 4. detect_overlaps: broad-phase (если включён в конфиге)
pub struct PhysicsPlugin;

impl Plugin for PhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<Overlap>()
            .init_resource::<LevelBounds>()
            .register_type::<Velocity>()
            .register_type::<Body>()
            .register_type::<Kinematic>();

        app.add_systems(
            FixedUpdate,
            (
                movement::apply_gravity,
                movement::integrate_velocity,
                movement::confine_to_level,
                broadphase::detect_overlaps.run_if(builtin_broadphase_enabled),
            )
                .chain()
                .in_set(SimulationSet::Physics),
        );
    }
}

fn builtin_broadphase_enabled(config: Res<SessionConfig>) -> bool {
    config.builtin_broadphase
}
