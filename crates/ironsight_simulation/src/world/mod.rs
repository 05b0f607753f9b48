//! Внешние сервисы мира (collision engine, host)
//!
//! Симуляция НЕ владеет геометрией уровня. Она потребляет:
//! - `EnvironmentProbe`: классификация контактов + resolve движения (move-and-slide)
//! - `WorldQuery`: ray cast и sphere overlap (hitscan, взрывы)
//! - `ClearanceProbe`: проверка "можно ли встать" при выходе из приседа
//!
//! Capabilities (hittable/damageable) резолвятся на границе:
//! реализация `WorldQuery` проставляет флаги в `RayHit`/`ShapeHit`,
//! firing/damage логика только читает флаг.

use bevy::prelude::*;

pub mod arena;
pub mod headless;
pub mod layers;

pub use arena::{HeadlessArena, HeadlessBody};
pub use headless::HeadlessHostPlugin;
pub use layers::*;

/// Контакты тела с миром на текущий тик
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactInfo {
    pub on_floor: bool,
    pub on_ceiling: bool,
    pub on_wall: bool,
    pub floor_normal: Vec3,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            on_floor: false,
            on_ceiling: false,
            on_wall: false,
            floor_normal: Vec3::Y,
        }
    }
}

/// Один контакт после resolve (нормаль поверхности)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub normal: Vec3,
}

/// Результат resolve движения
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveResult {
    /// Реально достигнутая скорость (после slide по геометрии)
    pub velocity: Vec3,
    pub contacts: Vec<Contact>,
}

/// Collision engine для kinematic тела актора
pub trait EnvironmentProbe {
    fn classify_contacts(&self) -> ContactInfo;

    /// Move-and-slide с floor snap. `dt`: длительность тика.
    fn resolve_move(&mut self, velocity: Vec3, snap: Vec3, dt: f32) -> MoveResult;
}

/// Результат ray cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub point: Vec3,
    pub normal: Vec3,
    pub entity: Entity,
    /// Entity реагирует на попадания (barrels, actors)
    pub hittable: bool,
}

/// Результат sphere overlap
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeHit {
    pub entity: Entity,
    /// Расстояние от центра сферы до origin тела
    pub distance: f32,
    /// Entity принимает area damage
    pub damageable: bool,
}

/// Spatial queries против collision world
pub trait WorldQuery {
    fn cast_ray(&self, origin: Vec3, dir: Vec3, max_distance: f32, mask: u32) -> Option<RayHit>;

    fn query_sphere(&self, center: Vec3, radius: f32) -> Vec<ShapeHit>;
}

/// Проверка свободного пространства (test move)
pub trait ClearanceProbe {
    /// true если сдвиг тела из `origin` на `delta` упирается в геометрию
    fn is_obstructed(&self, origin: Vec3, delta: Vec3) -> bool;
}

/// Пустой мир: лучи никуда не попадают, overlap пустой
///
/// Используется когда collision backend ещё не поднят (headless без Rapier).
pub struct EmptyWorld;

impl WorldQuery for EmptyWorld {
    fn cast_ray(&self, _origin: Vec3, _dir: Vec3, _max_distance: f32, _mask: u32) -> Option<RayHit> {
        None
    }

    fn query_sphere(&self, _center: Vec3, _radius: f32) -> Vec<ShapeHit> {
        Vec::new()
    }
}
