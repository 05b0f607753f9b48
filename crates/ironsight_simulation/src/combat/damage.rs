//! Area damage: линейный falloff взрыва
//!
//! damage = rangelerp(distance, [radius → 0], [0 → 100]), clamp.
//! Тела дальше radius исключаются, урон только damageable.

use bevy::prelude::*;

use crate::components::Health;
use crate::world::WorldQuery;

/// Радиус взрыва бочки (метры)
pub const EXPLOSION_RADIUS: f32 = 20.0;

/// Урон в эпицентре
pub const EXPLOSION_MAX_DAMAGE: f32 = 100.0;

/// Урон одной цели от детонации
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageHit {
    pub target: Entity,
    pub damage: f32,
}

/// Урон на расстоянии `distance` от центра
///
/// None: цель вне радиуса (или радиус вырожден).
pub fn explosion_falloff(distance: f32, radius: f32) -> Option<f32> {
    if radius <= 0.0 || distance > radius {
        return None;
    }

    let t = (radius - distance) / radius;
    Some((t * EXPLOSION_MAX_DAMAGE).clamp(0.0, EXPLOSION_MAX_DAMAGE))
}

/// Sphere query + falloff → урон каждой damageable цели
///
/// Вызывается ровно один раз на детонацию.
pub fn resolve_detonation(center: Vec3, radius: f32, world: &dyn WorldQuery) -> Vec<DamageHit> {
    world
        .query_sphere(center, radius)
        .into_iter()
        .filter(|hit| hit.damageable)
        .filter_map(|hit| {
            explosion_falloff(hit.distance, radius).map(|damage| DamageHit {
                target: hit.entity,
                damage,
            })
        })
        .collect()
}

/// Урон взрыва в Health (округление до целого)
pub fn explosion_damage_points(damage: f32) -> u32 {
    damage.round().max(0.0) as u32
}

/// Применить урон взрыва к Health
///
/// Возвращает фактически снятые HP.
pub fn apply_explosion_damage(health: &mut Health, damage: f32) -> u32 {
    let points = explosion_damage_points(damage).min(health.current);
    health.take_damage(points);
    points
}
