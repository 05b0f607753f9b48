//! HUD text: ammo counter и reload countdown
//!
//! Симуляция только форматирует строки, рисует их host.

use bevy::prelude::*;

use crate::combat::WeaponManager;

/// Тексты HUD актора
#[derive(Component, Debug, Clone, Default, PartialEq, Eq)]
pub struct HudText {
    /// "{magazine}/{reserve}"
    pub ammo: String,
    /// Оставшееся время перезарядки ("0" вне перезарядки)
    pub reload: String,
}

impl HudText {
    pub fn from_manager(manager: &WeaponManager) -> Self {
        let ammo = match manager.active_weapon() {
            Some(weapon) => format!("{}/{}", weapon.magazine(), weapon.ammo()),
            None => String::new(),
        };

        Self {
            ammo,
            reload: format!("{}", manager.time_left_to_reload()),
        }
    }
}

/// System: обновить HUD после combat тика
pub fn update_hud_text(mut actors: Query<(&WeaponManager, &mut HudText)>) {
    for (manager, mut hud) in actors.iter_mut() {
        let text = HudText::from_manager(manager);
        if *hud != text {
            *hud = text;
        }
    }
}
