//! Combat module: оружие, стрельба, взрывы
//!
//! ECS ответственность:
//! - Weapon state: ammo/magazine, reload countdown (WeaponManager)
//! - Firing rules: hitscan / projectile / shotgun spread
//! - Area damage: falloff взрыва → Health
//!
//! Host ответственность:
//! - Модель оружия, fire анимация (WeaponFired, WeaponModelChanged)
//! - Decal sprites (DecalPlaced)
//! - Collision снарядов (ProjectileCollided)
//! - Sprite взрыва (ExplosionSpawned)

use bevy::prelude::*;

pub mod barrel;
pub mod damage;
pub mod events;
pub mod firing;
pub mod manager;
pub mod projectile;
pub mod reload;
pub mod systems;
pub mod weapon;

#[cfg(test)]
mod weapon_tests;

// Re-export основных типов
pub use barrel::{ExplosiveBarrel, BARREL_HITS};
pub use damage::{
    apply_explosion_damage, explosion_falloff, resolve_detonation, DamageHit, EXPLOSION_MAX_DAMAGE,
    EXPLOSION_RADIUS,
};
pub use events::*;
pub use firing::{
    decal_basis, shotgun_directions, CombatEffect, FiringStrategy, HITSCAN_RAY_DISTANCE,
    SHOTGUN_PELLETS, SHOTGUN_SPREAD,
};
pub use manager::{ReloadCompleted, WeaponManager};
pub use projectile::{projectile_bundle, projectile_groups, Projectile, PROJECTILE_RADIUS};
pub use reload::{ReloadTimer, RELOAD_WAIT_TIME};
pub use weapon::{Weapon, WeaponKind, MAGAZINE_CAPACITY, PROJECTILE_PISTOL_SPEED};

/// Фазы combat тика
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatSet {
    /// Reload countdown, switch/reload intents
    Input,
    /// Выстрелы + полёт снарядов
    Fire,
    /// Попадания (снаряды, бочки)
    Impacts,
    /// Детонации → урон
    Damage,
}

/// Combat Plugin
///
/// Регистрирует combat системы в FixedUpdate (60Hz).
///
/// Порядок выполнения:
/// 1. tick_reload_timers: countdown, reload на истечении
/// 2. process_switch_intents / process_reload_intents
/// 3. process_shoot_intents: стратегия активного оружия
/// 4. move_projectiles: полёт по прямой
/// 5. process_projectile_collisions → ProjectileHit
/// 6. damage_barrels → Detonation
/// 7. resolve_detonations → ExplosionDamage → Health
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        // Регистрация событий
        app.add_event::<ShootIntent>()
            .add_event::<ReloadIntent>()
            .add_event::<SwitchWeaponIntent>()
            .add_event::<WeaponFired>()
            .add_event::<WeaponModelChanged>()
            .add_event::<ReloadFinished>()
            .add_event::<DecalPlaced>()
            .add_event::<HitscanHit>()
            .add_event::<ProjectileCollided>()
            .add_event::<ProjectileHit>()
            .add_event::<Detonation>()
            .add_event::<ExplosionSpawned>()
            .add_event::<ExplosionDamage>();

        app.configure_sets(
            FixedUpdate,
            (
                CombatSet::Input,
                CombatSet::Fire,
                CombatSet::Impacts,
                CombatSet::Damage,
            )
                .chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                (
                    systems::tick_reload_timers,
                    systems::process_switch_intents,
                    systems::process_reload_intents,
                )
                    .chain()
                    .in_set(CombatSet::Input),
                (systems::process_shoot_intents, projectile::move_projectiles)
                    .chain()
                    .in_set(CombatSet::Fire),
                (systems::process_projectile_collisions, systems::damage_barrels)
                    .chain()
                    .in_set(CombatSet::Impacts),
                (systems::resolve_detonations, systems::apply_explosion_damage_events)
                    .chain()
                    .in_set(CombatSet::Damage),
            ),
        );
    }
}
