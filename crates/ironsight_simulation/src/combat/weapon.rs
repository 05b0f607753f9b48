//! Weapon: ammo/magazine bookkeeping + firing strategy
//!
//! Инварианты:
//! - 0 ≤ magazine ≤ capacity
//! - reload сохраняет сумму reserve + magazine
//! - shoot на пустом магазине не меняет состояние

use bevy::prelude::*;
use rand::Rng;

use super::firing::{CombatEffect, FiringStrategy};
use crate::world::WorldQuery;

/// Ёмкость магазина всех пресетов
pub const MAGAZINE_CAPACITY: u32 = 5;

/// Скорость снаряда projectile pistol (m/s)
pub const PROJECTILE_PISTOL_SPEED: f32 = 50.0;

/// Тип оружия (для визуала и логов)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum WeaponKind {
    HitscanPistol,
    ProjectilePistol,
    Shotgun,
}

impl WeaponKind {
    /// Prefab модели для weapon pivot host'а
    pub fn model_path(&self) -> &'static str {
        match self {
            WeaponKind::HitscanPistol | WeaponKind::ProjectilePistol => "models/gun.glb",
            WeaponKind::Shotgun => "models/shotgun.glb",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WeaponKind::HitscanPistol => "hitscan pistol",
            WeaponKind::ProjectilePistol => "projectile pistol",
            WeaponKind::Shotgun => "shotgun",
        }
    }
}

/// Оружие: reserve + magazine + стратегия
#[derive(Debug, Clone, PartialEq, Reflect)]
pub struct Weapon {
    kind: WeaponKind,
    /// Reserve (вне магазина)
    ammo: u32,
    magazine: u32,
    capacity: u32,
    strategy: FiringStrategy,
}

impl Weapon {
    /// Магазин полный на старте
    pub fn new(kind: WeaponKind, start_ammo: u32, capacity: u32, strategy: FiringStrategy) -> Self {
        Self {
            kind,
            ammo: start_ammo,
            magazine: capacity,
            capacity,
            strategy,
        }
    }

    pub fn hitscan_pistol() -> Self {
        Self::new(WeaponKind::HitscanPistol, 30, MAGAZINE_CAPACITY, FiringStrategy::Hitscan)
    }

    pub fn projectile_pistol() -> Self {
        Self::new(
            WeaponKind::ProjectilePistol,
            30,
            MAGAZINE_CAPACITY,
            FiringStrategy::Projectile {
                speed: PROJECTILE_PISTOL_SPEED,
            },
        )
    }

    pub fn shotgun() -> Self {
        Self::new(WeaponKind::Shotgun, 10, MAGAZINE_CAPACITY, FiringStrategy::shotgun())
    }

    pub fn kind(&self) -> WeaponKind {
        self.kind
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn magazine(&self) -> u32 {
        self.magazine
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn strategy(&self) -> &FiringStrategy {
        &self.strategy
    }

    /// Подменить стратегию (например, shotgun с центральным лучом)
    pub fn with_strategy(mut self, strategy: FiringStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn model_path(&self) -> &'static str {
        self.kind.model_path()
    }

    /// Reload имеет смысл: магазин не полный и есть reserve
    pub fn can_reload(&self) -> bool {
        self.magazine < self.capacity && self.ammo > 0
    }

    /// Перенести min(reserve, capacity - magazine) патронов в магазин
    ///
    /// Возвращает true если в reserve что-то осталось.
    pub fn reload(&mut self) -> bool {
        let moved = self.ammo.min(self.capacity - self.magazine);
        self.ammo -= moved;
        self.magazine += moved;

        self.ammo != 0
    }

    /// Выстрел: стратегия + -1 патрон в магазине
    ///
    /// Пустой магазин → false, ничего не происходит.
    pub fn shoot(
        &mut self,
        origin: Vec3,
        dir: Vec3,
        world: &dyn WorldQuery,
        rng: &mut impl Rng,
        effects: &mut Vec<CombatEffect>,
    ) -> bool {
        if self.magazine == 0 {
            return false;
        }

        self.strategy.fire(origin, dir, world, rng, effects);
        self.magazine -= 1;

        true
    }
}
