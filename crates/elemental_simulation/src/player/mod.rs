//! Player module: герой, ввод, баффы, gift power, power-ups

use bevy::prelude::*;

use crate::combat::{handle_deaths, resolve_overlaps};
use crate::SimulationSet;

pub mod input;
pub mod player;
pub mod power_ups;


// Re-export основных типов
pub use input::{basic_attack_volley, bolt_damage, InputState};
pub use player::{ActiveGift, Buffs, GiftKind, GiftPower, Hero, HERO_DAMAGE, HERO_HEALTH, HERO_RADIUS};
pub use power_ups::{apply_power_up, spawn_power_up, PowerUp, PowerUpKind};

/// Player Plugin
///
/// Input set: таймеры → движение → атаки.
/// Combat set (после разрешения контактов): подбор и выпадение power-up'ов.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<InputState>()
            .register_type::<InputState>()
            .register_type::<Hero>()
            .register_type::<Buffs>()
            .register_type::<GiftPower>();

        app.add_systems(
            FixedUpdate,
            (input::tick_hero_timers, input::hero_movement, input::hero_actions)
                .chain()
                .in_set(SimulationSet::Input),
        );

        app.add_systems(
            FixedUpdate,
            (power_ups::apply_collected_power_ups, power_ups::spawn_dropped_power_ups)
                .chain()
                .after(resolve_overlaps)
                .after(handle_deaths)
                .in_set(SimulationSet::Combat),
        );
    }
}
