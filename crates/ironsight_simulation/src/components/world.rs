//! Объекты уровня и capabilities: Hittable, Damageable, Ladder

use bevy::prelude::*;

/// Capability: entity реагирует на попадания (hitscan, projectile)
///
/// World adapter проставляет `RayHit::hittable` по наличию компонента.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Hittable;

/// Capability: entity получает урон от взрывов
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Damageable;

/// Trigger volume лестницы
///
/// Rotation `Transform` задаёт оси: `back` (+Z): наружная нормаль.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Ladder;
