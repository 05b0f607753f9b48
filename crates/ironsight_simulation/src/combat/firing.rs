//! Firing strategies: что именно происходит при выстреле
//!
//! Стратегия не владеет миром: ray queries идут через `WorldQuery`,
//! результат: список `CombatEffect`, который ECS слой превращает в события/entities.

use bevy::prelude::*;
use rand::Rng;

use crate::world::{WorldQuery, COLLISION_LAYER_PROJECTILES, COLLISION_MASK_SHOTS};

/// Дальность hitscan луча (метры)
pub const HITSCAN_RAY_DISTANCE: f32 = 600.0;

/// Дробинок на выстрел
pub const SHOTGUN_PELLETS: u32 = 9;

/// Максимальный разброс по каждой оси направления
pub const SHOTGUN_SPREAD: f32 = 0.1;

/// Стратегия стрельбы (закрытый набор)
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum FiringStrategy {
    /// Мгновенный луч
    Hitscan,
    /// Kinetic снаряд, летит по прямой
    Projectile { speed: f32 },
    /// Пачка hitscan лучей с разбросом
    Shotgun {
        pellets: u32,
        spread: f32,
        /// Дополнительно стрелять центральным лучом без разброса
        include_base_ray: bool,
    },
}

impl FiringStrategy {
    pub fn shotgun() -> Self {
        FiringStrategy::Shotgun {
            pellets: SHOTGUN_PELLETS,
            spread: SHOTGUN_SPREAD,
            include_base_ray: false,
        }
    }

    /// Выполнить выстрел, дописав эффекты в `effects`
    pub fn fire(
        &self,
        origin: Vec3,
        dir: Vec3,
        world: &dyn WorldQuery,
        rng: &mut impl Rng,
        effects: &mut Vec<CombatEffect>,
    ) {
        match *self {
            FiringStrategy::Hitscan => fire_hitscan(origin, dir, world, effects),
            FiringStrategy::Projectile { speed } => effects.push(CombatEffect::SpawnProjectile {
                origin,
                velocity: dir * speed,
                layer: COLLISION_LAYER_PROJECTILES,
                mask: COLLISION_MASK_SHOTS,
            }),
            FiringStrategy::Shotgun {
                pellets,
                spread,
                include_base_ray,
            } => {
                for pellet in shotgun_directions(dir, pellets, spread, include_base_ray, rng) {
                    fire_hitscan(origin, pellet, world, effects);
                }
            }
        }
    }
}

/// Результат выстрела для ECS слоя
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CombatEffect {
    /// Bullet hole на поверхности (basis: z = нормаль)
    Decal {
        target: Entity,
        position: Vec3,
        basis: Mat3,
    },
    /// Луч попал в hittable entity
    HitscanHit {
        target: Entity,
        point: Vec3,
        normal: Vec3,
    },
    /// Заспавнить kinetic снаряд
    SpawnProjectile {
        origin: Vec3,
        velocity: Vec3,
        layer: u32,
        mask: u32,
    },
}

/// Один hitscan луч: decal + hit notification
///
/// `dir` не нормализуется: луч идёт до `origin + dir * HITSCAN_RAY_DISTANCE`.
pub fn fire_hitscan(origin: Vec3, dir: Vec3, world: &dyn WorldQuery, effects: &mut Vec<CombatEffect>) {
    let Some(hit) = world.cast_ray(origin, dir, HITSCAN_RAY_DISTANCE, COLLISION_MASK_SHOTS) else {
        return;
    };

    effects.push(CombatEffect::Decal {
        target: hit.entity,
        position: hit.point,
        basis: decal_basis(hit.normal, dir),
    });

    if hit.hittable {
        effects.push(CombatEffect::HitscanHit {
            target: hit.entity,
            point: hit.point,
            normal: hit.normal,
        });
    }
}

/// Basis decal'а: z = нормаль, y = normalize(z × dir), x = normalize(y × z)
///
/// Луч вдоль нормали (z × dir = 0) → любой ортогональный y.
pub fn decal_basis(normal: Vec3, dir: Vec3) -> Mat3 {
    let z = normal;
    let y = z
        .cross(dir)
        .try_normalize()
        .unwrap_or_else(|| z.any_orthonormal_vector());
    let x = y.cross(z).normalize_or_zero();

    Mat3::from_cols(x, y, z)
}

/// Направления дробинок: каждая ось base direction ± U(-spread, spread)
pub fn shotgun_directions(
    dir: Vec3,
    pellets: u32,
    spread: f32,
    include_base_ray: bool,
    rng: &mut impl Rng,
) -> Vec<Vec3> {
    let mut directions = Vec::with_capacity(pellets as usize + 1);

    if include_base_ray {
        directions.push(dir);
    }

    for _ in 0..pellets {
        let jitter = Vec3::new(
            rng.gen_range(-spread..=spread),
            rng.gen_range(-spread..=spread),
            rng.gen_range(-spread..=spread),
        );
        directions.push(dir + jitter);
    }

    directions
}
