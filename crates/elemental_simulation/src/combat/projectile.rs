//! Снаряды: живут в ECS целиком (spawn, полёт, TTL, удаление)

use bevy::prelude::*;

use crate::physics::{Body, Unconfined, Velocity};
use crate::session::LevelEntity;

/// Чей снаряд (определяет, в кого он попадает)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Reflect)]
pub enum Side {
    Player,
    Enemy,
}

#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Projectile {
    pub damage: u32,
    pub side: Side,
    /// Оставшееся время жизни
    pub ttl_ms: f32,
}

pub const PROJECTILE_RADIUS: f32 = 6.0;
pub const PROJECTILE_TTL_MS: f32 = 3000.0;

impl Projectile {
    /// Уменьшить TTL. true = снаряд истёк.
    pub fn age(&mut self, delta_ms: f32) -> bool {
        self.ttl_ms -= delta_ms;
        self.ttl_ms <= 0.0
    }
}

/// Spawn helper: снаряд из точки `origin` со скоростью `velocity`
pub fn spawn_projectile(commands: &mut Commands, origin: Vec2, velocity: Vec2, damage: u32, side: Side) -> Entity {
    commands
        .spawn((
            Transform::from_translation(origin.extend(0.0)),
            Velocity(velocity),
            Body { radius: PROJECTILE_RADIUS },
            Projectile {
                damage,
                side,
                ttl_ms: PROJECTILE_TTL_MS,
            },
            Unconfined,
            LevelEntity,
        ))
        .id()
}

/// Направление `angle_deg` от линии `aim` (против часовой)
pub fn rotate_aim(aim: Vec2, angle_deg: f32) -> Vec2 {
    Vec2::from_angle(angle_deg.to_radians()).rotate(aim)
}

/// Нормализованный вектор прицела; совпадающие точки → вправо
pub fn aim_direction(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).try_normalize().unwrap_or(Vec2::X)
}

/// System: TTL снарядов
pub fn expire_projectiles(
    mut commands: Commands,
    mut projectiles: Query<(Entity, &mut Projectile)>,
    time: Res<Time<Fixed>>,
) {
    let delta_ms = time.delta_secs() * 1000.0;

    for (entity, mut projectile) in projectiles.iter_mut() {
        if projectile.age(delta_ms) {
            commands.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projectile_ttl() {
        let mut projectile = Projectile {
            damage: 10,
            side: Side::Player,
            ttl_ms: 50.0,
        };
        assert!(!projectile.age(30.0));
        assert!(projectile.age(30.0));
    }

    #[test]
    fn test_rotate_aim_quarter_turn() {
        let rotated = rotate_aim(Vec2::X, 90.0);
        assert!((rotated - Vec2::Y).length() < 1e-5, "rotated = {:?}", rotated);
    }

    #[test]
    fn test_aim_direction_degenerate() {
        assert_eq!(aim_direction(Vec2::ONE, Vec2::ONE), Vec2::X);
        let dir = aim_direction(Vec2::ZERO, Vec2::new(0.0, 10.0));
        assert!((dir - Vec2::Y).length() < 1e-6);
    }
}
