//! Залпы боссов: паттерн → набор скоростей снарядов

use bevy::prelude::*;

use crate::catalog::AttackPattern;
use crate::combat::{aim_direction, rotate_aim};

/// Веер вокруг линии прицела: -60°..+60° с шагом 30°
pub const SPREAD_ANGLES_DEG: [f32; 5] = [-60.0, -30.0, 0.0, 30.0, 60.0];
/// Кольцо: 8 снарядов по 360°
pub const CIRCLE_BOLTS: u32 = 8;

/// Скорости снарядов залпа из `origin` в сторону `target`
pub fn volley(pattern: AttackPattern, origin: Vec2, target: Vec2, speed: f32) -> Vec<Vec2> {
    let aim = aim_direction(origin, target);

    match pattern {
        AttackPattern::Aimed => vec![aim * speed],
        AttackPattern::Spread => SPREAD_ANGLES_DEG
            .iter()
            .map(|angle| rotate_aim(aim, *angle) * speed)
            .collect(),
        AttackPattern::Circle => (0..CIRCLE_BOLTS)
            .map(|i| {
                let angle = i as f32 * 360.0 / CIRCLE_BOLTS as f32;
                Vec2::from_angle(angle.to_radians()) * speed
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aimed_single_bolt_at_target() {
        let shots = volley(AttackPattern::Aimed, Vec2::ZERO, Vec2::new(0.0, -50.0), 100.0);
        assert_eq!(shots.len(), 1);
        assert!((shots[0] - Vec2::new(0.0, -100.0)).length() < 1e-3);
    }

    #[test]
    fn test_spread_is_symmetric_around_aim() {
        let shots = volley(AttackPattern::Spread, Vec2::ZERO, Vec2::new(10.0, 0.0), 100.0);
        assert_eq!(shots.len(), 5);

        // Центральный снаряд: по линии прицела
        assert!((shots[2] - Vec2::new(100.0, 0.0)).length() < 1e-3);
        // Крайние: зеркальны относительно оси X
        assert!((shots[0].y + shots[4].y).abs() < 1e-3);
        assert!((shots[0].x - shots[4].x).abs() < 1e-3);

        let edge = shots[4].angle_to(Vec2::X).abs().to_degrees();
        assert!((edge - 60.0).abs() < 0.01, "edge angle = {}", edge);
    }

    #[test]
    fn test_circle_covers_full_turn() {
        let shots = volley(AttackPattern::Circle, Vec2::ZERO, Vec2::X, 50.0);
        assert_eq!(shots.len(), 8);

        let sum: Vec2 = shots.iter().copied().sum();
        assert!(sum.length() < 1e-3, "ring should cancel out, sum = {:?}", sum);
        for shot in shots {
            assert!((shot.length() - 50.0).abs() < 1e-3);
        }
    }
}
