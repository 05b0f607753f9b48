//! WeaponManager: инвентарь оружия актора
//!
//! Ordered weapons + активный слот + reload countdown.
//! Reload timer общий: смена оружия его останавливает.

use bevy::prelude::*;
use rand::Rng;

use super::firing::CombatEffect;
use super::reload::ReloadTimer;
use super::weapon::Weapon;
use crate::world::WorldQuery;

/// Перезарядка завершилась (магазин активного оружия заполнен)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadCompleted {
    pub slot: usize,
    /// В reserve остались патроны
    pub reserve_remaining: bool,
}

/// Инвентарь оружия (Component)
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct WeaponManager {
    weapons: Vec<Weapon>,
    active: usize,
    reload: ReloadTimer,
}

impl Default for WeaponManager {
    fn default() -> Self {
        Self::player_loadout()
    }
}

impl WeaponManager {
    /// Активен слот 0
    pub fn new(weapons: Vec<Weapon>) -> Self {
        Self {
            weapons,
            active: 0,
            reload: ReloadTimer::Idle,
        }
    }

    /// Стартовый набор игрока: hitscan pistol + shotgun
    pub fn player_loadout() -> Self {
        Self::new(vec![Weapon::hitscan_pistol(), Weapon::shotgun()])
    }

    pub fn weapons(&self) -> &[Weapon] {
        &self.weapons
    }

    pub fn active_slot(&self) -> usize {
        self.active
    }

    pub fn active_weapon(&self) -> Option<&Weapon> {
        self.weapons.get(self.active)
    }

    pub fn reload_timer(&self) -> &ReloadTimer {
        &self.reload
    }

    pub fn time_left_to_reload(&self) -> f32 {
        self.reload.time_left()
    }

    /// Активировать слот (останавливает перезарядку)
    ///
    /// false если слота нет.
    pub fn switch_to(&mut self, slot: usize) -> bool {
        if slot >= self.weapons.len() {
            return false;
        }

        self.active = slot;
        self.reload.stop();
        true
    }

    /// Выстрел активным оружием
    pub fn try_shoot(
        &mut self,
        origin: Vec3,
        dir: Vec3,
        world: &dyn WorldQuery,
        rng: &mut impl Rng,
        effects: &mut Vec<CombatEffect>,
    ) -> bool {
        let Some(weapon) = self.weapons.get_mut(self.active) else {
            return false;
        };

        weapon.shoot(origin, dir, world, rng, effects)
    }

    /// Запустить countdown перезарядки
    ///
    /// false если уже идёт или активному оружию перезарядка не нужна.
    pub fn try_reload(&mut self) -> bool {
        let can_reload = self.active_weapon().is_some_and(Weapon::can_reload);
        if !self.reload.is_idle() || !can_reload {
            return false;
        }

        self.reload.start();
        true
    }

    /// Продвинуть countdown. На истечении: reload активного оружия в этом же вызове.
    pub fn tick(&mut self, dt: f32) -> Option<ReloadCompleted> {
        if !self.reload.tick(dt) {
            return None;
        }

        let slot = self.active;
        let weapon = self.weapons.get_mut(slot)?;
        let reserve_remaining = weapon.reload();

        Some(ReloadCompleted {
            slot,
            reserve_remaining,
        })
    }
}
