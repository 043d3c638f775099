//! Встроенный broad-phase: круг vs круг, O(n²)
//!
//! Выдаёт `Overlap` события для всех пересекающихся пар живых тел.
//! Хост с настоящей физикой выключает его (`SessionConfig::builtin_broadphase`)
//! и шлёт `Overlap` сам.

use bevy::prelude::*;

use super::Body;
use crate::components::Dead;

/// Пара пересекающихся entity (порядок не важен)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlap {
    pub a: Entity,
    pub b: Entity,
}

pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    let reach = ra + rb;
    a.distance_squared(b) < reach * reach
}

/// Система: поиск пересечений
pub fn detect_overlaps(
    bodies: Query<(Entity, &Transform, &Body), Without<Dead>>,
    mut overlaps: EventWriter<Overlap>,
) {
    let mut candidates: Vec<(Entity, Vec2, f32)> = bodies
        .iter()
        .map(|(entity, transform, body)| (entity, transform.translation.truncate(), body.radius))
        .collect();

    // Порядок пар детерминирован порядком entity
    candidates.sort_by_key(|(entity, _, _)| *entity);

    for (i, &(a, pa, ra)) in candidates.iter().enumerate() {
        for &(b, pb, rb) in &candidates[i + 1..] {
            if circles_overlap(pa, ra, pb, rb) {
                overlaps.write(Overlap { a, b });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 10.0, Vec2::new(15.0, 0.0), 10.0));
        assert!(!circles_overlap(Vec2::ZERO, 10.0, Vec2::new(25.0, 0.0), 10.0));
        // касание: не пересечение
        assert!(!circles_overlap(Vec2::ZERO, 10.0, Vec2::new(20.0, 0.0), 10.0));
    }
}
