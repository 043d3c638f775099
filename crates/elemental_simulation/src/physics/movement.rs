//! Kinematic stand-in для headless режима
//!
//! Архитектура:
//! - Velocity integration: position += velocity * dt
//! - Gravity только для "ходячих" (компонент `Kinematic`), летуны и снаряды без гравитации
//! - Пол + горизонтальные границы уровня (`LevelBounds`)
//!
//! Координаты Bevy: y вверх. Хост-движок может заменить эти системы своей физикой.

use bevy::prelude::*;

/// Скорость entity (units/sec)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Velocity(pub Vec2);

/// Круглое тело для broad-phase
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Body {
    pub radius: f32,
}

impl Default for Body {
    fn default() -> Self {
        Self { radius: 16.0 }
    }
}

/// Kinematic контроллер: gravity + ground check
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
#[require(Velocity, Body)]
pub struct Kinematic {
    /// Сила гравитации (units/sec²)
    pub gravity: f32,
    /// На полу (для прыжка)
    pub grounded: bool,
}

impl Default for Kinematic {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            grounded: false,
        }
    }
}

/// Границы уровня (Resource)
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct LevelBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub floor_y: f32,
}

impl Default for LevelBounds {
    fn default() -> Self {
        Self {
            min_x: 0.0,
            max_x: 3200.0,
            floor_y: 0.0,
        }
    }
}

pub const GRAVITY: f32 = 980.0;

/// Entity не удерживается границами (снаряды улетают и умирают по TTL)
#[derive(Component, Debug, Default)]
pub struct Unconfined;

/// Гравитация к velocity за один тик
pub fn gravity_step(kinematic: &Kinematic, velocity: &mut Velocity, delta: f32) {
    if !kinematic.grounded {
        velocity.0.y -= kinematic.gravity * delta;
    }
}

/// Приземление + клэмп по горизонтали. Возвращает grounded.
pub fn confine(translation: &mut Vec3, velocity: &mut Velocity, radius: f32, bounds: &LevelBounds, walks: bool) -> bool {
    let min_x = bounds.min_x + radius;
    let max_x = bounds.max_x - radius;
    if translation.x < min_x {
        translation.x = min_x;
        velocity.0.x = velocity.0.x.max(0.0);
    } else if translation.x > max_x {
        translation.x = max_x;
        velocity.0.x = velocity.0.x.min(0.0);
    }

    let floor = bounds.floor_y + radius;
    if translation.y <= floor {
        translation.y = floor;
        velocity.0.y = velocity.0.y.max(0.0);
        // Летуны не "стоят" на полу, но и не проваливаются
        return walks;
    }

    false
}

/// Система применения gravity к velocity
pub fn apply_gravity(mut query: Query<(&Kinematic, &mut Velocity)>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for (kinematic, mut velocity) in query.iter_mut() {
        gravity_step(kinematic, &mut velocity, delta);
    }
}

/// Система интеграции velocity → Transform
pub fn integrate_velocity(mut query: Query<(&Velocity, &mut Transform)>, time: Res<Time<Fixed>>) {
    let delta = time.delta_secs();

    for (velocity, mut transform) in query.iter_mut() {
        transform.translation += velocity.0.extend(0.0) * delta;
    }
}

/// Система: пол + границы уровня, обновляет `grounded`
pub fn confine_to_level(
    mut query: Query<(&mut Transform, &mut Velocity, &Body, Option<&mut Kinematic>), Without<Unconfined>>,
    bounds: Res<LevelBounds>,
) {
    for (mut transform, mut velocity, body, kinematic) in query.iter_mut() {
        let walks = kinematic.is_some();
        let grounded = confine(&mut transform.translation, &mut velocity, body.radius, &bounds, walks);

        if let Some(mut kinematic) = kinematic {
            kinematic.grounded = grounded;
        }
    }
}
