//! Combat systems (FixedUpdate)

use std::collections::HashSet;

use bevy::prelude::*;

use super::barrel::ExplosiveBarrel;
use super::damage::{apply_explosion_damage, resolve_detonation, EXPLOSION_RADIUS};
use super::events::*;
use super::firing::CombatEffect;
use super::manager::WeaponManager;
use super::projectile::{projectile_bundle, Projectile};
use crate::components::{Health, Hittable};
use crate::physics::SceneQuery;
use crate::world::get_layer_name;
use crate::DeterministicRng;

/// System: reload countdown всех менеджеров
///
/// Истечение заполняет магазин в этом же тике.
pub fn tick_reload_timers(
    time: Res<Time<Fixed>>,
    mut managers: Query<(Entity, &mut WeaponManager)>,
    mut finished: EventWriter<ReloadFinished>,
) {
    let delta = time.delta_secs();

    for (entity, mut manager) in managers.iter_mut() {
        let Some(completed) = manager.tick(delta) else {
            continue;
        };

        crate::log(&format!(
            "🔄 {:?} reloaded slot {} (reserve left: {})",
            entity, completed.slot, completed.reserve_remaining
        ));
        finished.write(ReloadFinished {
            shooter: entity,
            slot: completed.slot,
            reserve_remaining: completed.reserve_remaining,
        });
    }
}

/// System: SwitchWeaponIntent → смена слота + WeaponModelChanged
pub fn process_switch_intents(
    mut intents: EventReader<SwitchWeaponIntent>,
    mut managers: Query<&mut WeaponManager>,
    mut model_changed: EventWriter<WeaponModelChanged>,
) {
    for intent in intents.read() {
        let Ok(mut manager) = managers.get_mut(intent.shooter) else {
            crate::log_warning(&format!("SwitchWeaponIntent: {:?} has no WeaponManager", intent.shooter));
            continue;
        };

        if !manager.switch_to(intent.slot) {
            continue;
        }

        let Some(weapon) = manager.active_weapon() else {
            continue;
        };

        model_changed.write(WeaponModelChanged {
            shooter: intent.shooter,
            slot: intent.slot,
            model_path: weapon.model_path(),
        });
    }
}

/// System: ReloadIntent → старт countdown
pub fn process_reload_intents(
    mut intents: EventReader<ReloadIntent>,
    mut managers: Query<&mut WeaponManager>,
) {
    for intent in intents.read() {
        let Ok(mut manager) = managers.get_mut(intent.shooter) else {
            continue;
        };

        let started = manager.try_reload();
        crate::log(&format!("{:?} try reload: {}", intent.shooter, started));
    }
}

/// System: ShootIntent → выстрел активным оружием
///
/// Эффекты стратегии → DecalPlaced / HitscanHit / spawn Projectile.
pub fn process_shoot_intents(
    mut commands: Commands,
    mut intents: EventReader<ShootIntent>,
    mut managers: Query<&mut WeaponManager>,
    scene: SceneQuery,
    mut rng: ResMut<DeterministicRng>,
    mut fired: EventWriter<WeaponFired>,
    mut decals: EventWriter<DecalPlaced>,
    mut hits: EventWriter<HitscanHit>,
) {
    let mut effects = Vec::new();

    for intent in intents.read() {
        let Ok(mut manager) = managers.get_mut(intent.shooter) else {
            crate::log_warning(&format!("ShootIntent: {:?} has no WeaponManager", intent.shooter));
            continue;
        };

        effects.clear();
        let shot = manager.try_shoot(intent.origin, intent.direction, &scene, &mut rng.rng, &mut effects);
        if !shot {
            continue;
        }

        fired.write(WeaponFired {
            shooter: intent.shooter,
            slot: manager.active_slot(),
        });

        for effect in effects.drain(..) {
            match effect {
                CombatEffect::Decal {
                    target,
                    position,
                    basis,
                } => {
                    decals.write(DecalPlaced {
                        target,
                        position,
                        basis,
                    });
                }
                CombatEffect::HitscanHit { target, point, normal } => {
                    hits.write(HitscanHit {
                        shooter: intent.shooter,
                        target,
                        point,
                        normal,
                    });
                }
                CombatEffect::SpawnProjectile {
                    origin,
                    velocity,
                    layer,
                    mask,
                } => {
                    commands.spawn(projectile_bundle(intent.shooter, origin, velocity, layer, mask));
                    crate::log(&format!(
                        "🔫 {:?} spawned projectile on layer {}",
                        intent.shooter,
                        get_layer_name(layer)
                    ));
                }
            }
        }
    }
}

/// System: ProjectileCollided → despawn снаряда + ProjectileHit для hittable
pub fn process_projectile_collisions(
    mut commands: Commands,
    mut collisions: EventReader<ProjectileCollided>,
    projectiles: Query<(&Projectile, &Transform)>,
    hittable: Query<(), With<Hittable>>,
    mut hits: EventWriter<ProjectileHit>,
) {
    // despawn отложен до sync point: повторный контакт в этом тике отсекаем сами
    let mut consumed = HashSet::new();

    for collision in collisions.read() {
        if !consumed.insert(collision.projectile) {
            continue;
        }
        let Ok((projectile, transform)) = projectiles.get(collision.projectile) else {
            continue;
        };

        if hittable.contains(collision.target) {
            hits.write(ProjectileHit {
                shooter: projectile.shooter,
                target: collision.target,
                point: transform.translation,
            });
        }

        commands.entity(collision.projectile).despawn();
    }
}

/// System: попадания по бочкам → Detonation на последнем
pub fn damage_barrels(
    mut commands: Commands,
    mut hitscan_hits: EventReader<HitscanHit>,
    mut projectile_hits: EventReader<ProjectileHit>,
    mut barrels: Query<(&mut ExplosiveBarrel, &Transform)>,
    mut detonations: EventWriter<Detonation>,
    mut explosions: EventWriter<ExplosionSpawned>,
) {
    let targets = hitscan_hits
        .read()
        .map(|hit| hit.target)
        .chain(projectile_hits.read().map(|hit| hit.target));

    for target in targets {
        let Ok((mut barrel, transform)) = barrels.get_mut(target) else {
            continue;
        };

        if !barrel.register_hit() {
            continue;
        }

        crate::log_info(&format!("💥 Barrel {:?} explodes at {:?}", target, transform.translation));
        detonations.write(Detonation {
            source: target,
            center: transform.translation,
            radius: EXPLOSION_RADIUS,
        });
        explosions.write(ExplosionSpawned {
            center: transform.translation,
            radius: EXPLOSION_RADIUS,
        });
        commands.entity(target).despawn();
    }
}

/// System: Detonation → sphere query + falloff → ExplosionDamage
pub fn resolve_detonations(
    mut detonations: EventReader<Detonation>,
    scene: SceneQuery,
    mut damage: EventWriter<ExplosionDamage>,
) {
    for detonation in detonations.read() {
        for hit in resolve_detonation(detonation.center, detonation.radius, &scene) {
            if hit.target == detonation.source {
                continue;
            }

            damage.write(ExplosionDamage {
                source: detonation.source,
                target: hit.target,
                damage: hit.damage,
            });
        }
    }
}

/// System: ExplosionDamage → Health
pub fn apply_explosion_damage_events(
    mut events: EventReader<ExplosionDamage>,
    mut targets: Query<&mut Health>,
) {
    for event in events.read() {
        let Ok(mut health) = targets.get_mut(event.target) else {
            continue;
        };

        let dealt = apply_explosion_damage(&mut health, event.damage);
        crate::log(&format!(
            "Explosion dmg {:.1} → {:?} (HP: {} → {})",
            event.damage,
            event.target,
            health.current + dealt,
            health.current
        ));
    }
}
