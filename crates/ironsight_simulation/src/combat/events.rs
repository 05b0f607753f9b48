//! Combat events
//!
//! Input (host → ECS): ShootIntent, ReloadIntent, SwitchWeaponIntent, ProjectileCollided.
//! Output (ECS → host): WeaponFired, WeaponModelChanged, ReloadFinished, DecalPlaced, ExplosionSpawned.
//! Internal: HitscanHit, ProjectileHit, Detonation, ExplosionDamage.

use bevy::prelude::*;

/// Event: игрок нажал fire
///
/// origin: позиция камеры, direction: camera forward (-Z basis).
#[derive(Event, Debug, Clone)]
pub struct ShootIntent {
    pub shooter: Entity,
    pub origin: Vec3,
    pub direction: Vec3,
}

/// Event: игрок нажал reload
#[derive(Event, Debug, Clone)]
pub struct ReloadIntent {
    pub shooter: Entity,
}

/// Event: выбор слота оружия
#[derive(Event, Debug, Clone)]
pub struct SwitchWeaponIntent {
    pub shooter: Entity,
    pub slot: usize,
}

/// Event: выстрел состоялся (host играет fire анимацию)
#[derive(Event, Debug, Clone)]
pub struct WeaponFired {
    pub shooter: Entity,
    pub slot: usize,
}

/// Event: активное оружие сменилось (host меняет модель в weapon pivot)
#[derive(Event, Debug, Clone)]
pub struct WeaponModelChanged {
    pub shooter: Entity,
    pub slot: usize,
    pub model_path: &'static str,
}

/// Event: перезарядка завершилась
#[derive(Event, Debug, Clone)]
pub struct ReloadFinished {
    pub shooter: Entity,
    pub slot: usize,
    pub reserve_remaining: bool,
}

/// Event: bullet hole decal (host создаёт sprite как child `target`)
#[derive(Event, Debug, Clone)]
pub struct DecalPlaced {
    pub target: Entity,
    pub position: Vec3,
    /// Columns: x, y, z (z = нормаль поверхности)
    pub basis: Mat3,
}

/// Event: hitscan луч попал в hittable entity
#[derive(Event, Debug, Clone)]
pub struct HitscanHit {
    pub shooter: Entity,
    pub target: Entity,
    pub point: Vec3,
    pub normal: Vec3,
}

/// Event: снаряд коснулся тела (host collision → ECS)
#[derive(Event, Debug, Clone)]
pub struct ProjectileCollided {
    pub projectile: Entity,
    pub target: Entity,
}

/// Event: снаряд попал в hittable entity
#[derive(Event, Debug, Clone)]
pub struct ProjectileHit {
    /// Кто выстрелил
    pub shooter: Entity,
    /// В кого попали
    pub target: Entity,
    pub point: Vec3,
}

/// Event: взрыв (обрабатывается DamageResolver ровно один раз)
#[derive(Event, Debug, Clone)]
pub struct Detonation {
    /// Что взорвалось
    pub source: Entity,
    pub center: Vec3,
    pub radius: f32,
}

/// Event: взрыв для host'а (sprite взрыва в `center`, растёт и гаснет)
#[derive(Event, Debug, Clone)]
pub struct ExplosionSpawned {
    pub center: Vec3,
    pub radius: f32,
}

/// Event: урон взрыва damageable цели
#[derive(Event, Debug, Clone)]
pub struct ExplosionDamage {
    pub source: Entity,
    pub target: Entity,
    pub damage: f32,
}
