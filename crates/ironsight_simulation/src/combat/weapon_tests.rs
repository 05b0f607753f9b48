//! Tests for weapons, firing strategies and WeaponManager.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::cell::RefCell;

    use crate::combat::{
        decal_basis, shotgun_directions, CombatEffect, FiringStrategy, Weapon, WeaponKind,
        WeaponManager, HITSCAN_RAY_DISTANCE, MAGAZINE_CAPACITY, RELOAD_WAIT_TIME, SHOTGUN_SPREAD,
    };
    use crate::world::{
        EmptyWorld, RayHit, ShapeHit, WorldQuery, COLLISION_LAYER_PROJECTILES,
        COLLISION_MASK_SHOTS,
    };

    /// Стена z = -10 (нормаль +Z), запоминает каждый луч
    struct RecordingWall {
        target: Entity,
        hittable: bool,
        rays: RefCell<Vec<(Vec3, f32, u32)>>,
    }

    impl RecordingWall {
        fn new(hittable: bool) -> Self {
            Self {
                target: Entity::from_raw(7),
                hittable,
                rays: RefCell::new(Vec::new()),
            }
        }
    }

    impl WorldQuery for RecordingWall {
        fn cast_ray(&self, origin: Vec3, dir: Vec3, max_distance: f32, mask: u32) -> Option<RayHit> {
            self.rays.borrow_mut().push((dir, max_distance, mask));

            if dir.z >= 0.0 {
                return None;
            }
            let t = (-10.0 - origin.z) / dir.z;
            Some(RayHit {
                point: origin + dir * t,
                normal: Vec3::Z,
                entity: self.target,
                hittable: self.hittable,
            })
        }

        fn query_sphere(&self, _center: Vec3, _radius: f32) -> Vec<ShapeHit> {
            Vec::new()
        }
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    // === Weapon bookkeeping ===

    #[test]
    fn test_presets() {
        let pistol = Weapon::hitscan_pistol();
        assert_eq!((pistol.ammo(), pistol.magazine(), pistol.capacity()), (30, 5, 5));
        assert_eq!(*pistol.strategy(), FiringStrategy::Hitscan);

        let projectile = Weapon::projectile_pistol();
        assert_eq!(projectile.ammo(), 30);
        assert_eq!(*projectile.strategy(), FiringStrategy::Projectile { speed: 50.0 });

        let shotgun = Weapon::shotgun();
        assert_eq!((shotgun.ammo(), shotgun.magazine()), (10, MAGAZINE_CAPACITY));
        assert_eq!(shotgun.kind(), WeaponKind::Shotgun);
        assert_ne!(shotgun.model_path(), pistol.model_path());
    }

    #[test]
    fn test_shoot_empty_magazine_is_noop() {
        let mut weapon = Weapon::new(WeaponKind::HitscanPistol, 3, 5, FiringStrategy::Hitscan);
        let world = RecordingWall::new(true);
        let mut effects = Vec::new();
        let mut rng = rng();

        for _ in 0..5 {
            assert!(weapon.shoot(Vec3::ZERO, Vec3::NEG_Z, &world, &mut rng, &mut effects));
        }
        assert_eq!(weapon.magazine(), 0);

        let before = weapon.clone();
        let rays_before = world.rays.borrow().len();
        effects.clear();

        assert!(!weapon.shoot(Vec3::ZERO, Vec3::NEG_Z, &world, &mut rng, &mut effects));
        assert_eq!(weapon, before);
        assert!(effects.is_empty());
        assert_eq!(world.rays.borrow().len(), rays_before, "пустой магазин не стреляет лучом");
    }

    #[test]
    fn test_reload_conserves_total_ammo() {
        for (reserve, magazine_after_shots) in [(30, 0), (30, 3), (2, 0), (0, 1), (4, 4)] {
            let mut weapon = Weapon::new(WeaponKind::HitscanPistol, reserve, 5, FiringStrategy::Hitscan);
            let mut effects = Vec::new();
            let mut rng = rng();
            while weapon.magazine() > magazine_after_shots {
                weapon.shoot(Vec3::ZERO, Vec3::NEG_Z, &EmptyWorld, &mut rng, &mut effects);
            }

            let total = weapon.ammo() + weapon.magazine();
            let reserve_left = weapon.reload();

            assert_eq!(weapon.ammo() + weapon.magazine(), total);
            assert!(weapon.magazine() <= weapon.capacity());
            assert_eq!(reserve_left, weapon.ammo() != 0);
        }
    }

    #[test]
    fn test_reload_partial_reserve() {
        let mut weapon = Weapon::new(WeaponKind::HitscanPistol, 2, 5, FiringStrategy::Hitscan);
        let mut effects = Vec::new();
        let mut rng = rng();
        for _ in 0..5 {
            weapon.shoot(Vec3::ZERO, Vec3::NEG_Z, &EmptyWorld, &mut rng, &mut effects);
        }

        assert!(!weapon.reload());
        assert_eq!((weapon.magazine(), weapon.ammo()), (2, 0));
        assert!(!weapon.can_reload());
    }

    #[test]
    fn test_can_reload() {
        let mut weapon = Weapon::hitscan_pistol();
        assert!(!weapon.can_reload(), "полный магазин");

        let mut effects = Vec::new();
        weapon.shoot(Vec3::ZERO, Vec3::NEG_Z, &EmptyWorld, &mut rng(), &mut effects);
        assert!(weapon.can_reload());

        let mut dry = Weapon::new(WeaponKind::HitscanPistol, 0, 5, FiringStrategy::Hitscan);
        dry.shoot(Vec3::ZERO, Vec3::NEG_Z, &EmptyWorld, &mut rng(), &mut effects);
        assert!(!dry.can_reload(), "reserve пуст");
    }

    // === Firing strategies ===

    #[test]
    fn test_hitscan_places_decal_and_notifies_hittable() {
        let mut weapon = Weapon::hitscan_pistol();
        let world = RecordingWall::new(true);
        let mut effects = Vec::new();

        assert!(weapon.shoot(Vec3::ZERO, Vec3::NEG_Z, &world, &mut rng(), &mut effects));

        assert_eq!(effects.len(), 2);
        assert!(matches!(
            effects[0],
            CombatEffect::Decal { target, position, .. } if target == world.target && position == Vec3::new(0.0, 0.0, -10.0)
        ));
        assert!(matches!(effects[1], CombatEffect::HitscanHit { target, .. } if target == world.target));

        let rays = world.rays.borrow();
        assert_eq!(rays.len(), 1);
        assert_eq!(rays[0].1, HITSCAN_RAY_DISTANCE);
        assert_eq!(rays[0].2, COLLISION_MASK_SHOTS);
    }

    #[test]
    fn test_hitscan_static_surface_gets_decal_only() {
        let mut weapon = Weapon::hitscan_pistol();
        let world = RecordingWall::new(false);
        let mut effects = Vec::new();

        weapon.shoot(Vec3::ZERO, Vec3::NEG_Z, &world, &mut rng(), &mut effects);

        assert_eq!(effects.len(), 1);
        assert!(matches!(effects[0], CombatEffect::Decal { .. }));
    }

    #[test]
    fn test_hitscan_miss_has_no_effects() {
        let mut weapon = Weapon::hitscan_pistol();
        let mut effects = Vec::new();

        assert!(weapon.shoot(Vec3::ZERO, Vec3::NEG_Z, &EmptyWorld, &mut rng(), &mut effects));
        assert!(effects.is_empty());
        assert_eq!(weapon.magazine(), 4, "промах тоже тратит патрон");
    }

    #[test]
    fn test_projectile_spawn_effect() {
        let mut weapon = Weapon::projectile_pistol();
        let world = RecordingWall::new(true);
        let mut effects = Vec::new();
        let origin = Vec3::new(1.0, 1.5, 0.0);

        weapon.shoot(origin, Vec3::X, &world, &mut rng(), &mut effects);

        assert_eq!(
            effects,
            vec![CombatEffect::SpawnProjectile {
                origin,
                velocity: Vec3::X * 50.0,
                layer: COLLISION_LAYER_PROJECTILES,
                mask: COLLISION_MASK_SHOTS,
            }]
        );
        assert!(world.rays.borrow().is_empty());
    }

    #[test]
    fn test_shotgun_casts_nine_jittered_rays() {
        let mut weapon = Weapon::shotgun();
        let world = RecordingWall::new(false);
        let mut effects = Vec::new();
        let base = Vec3::NEG_Z;

        weapon.shoot(Vec3::ZERO, base, &world, &mut rng(), &mut effects);

        let rays = world.rays.borrow();
        assert_eq!(rays.len(), 9);
        for (dir, _, _) in rays.iter() {
            let offset = *dir - base;
            assert!(offset.abs().max_element() <= SHOTGUN_SPREAD + 1e-6, "offset {:?}", offset);
        }
        assert_eq!(weapon.magazine(), 4, "один патрон на выстрел");
    }

    #[test]
    fn test_shotgun_with_base_ray() {
        let strategy = FiringStrategy::Shotgun {
            pellets: 9,
            spread: SHOTGUN_SPREAD,
            include_base_ray: true,
        };
        let mut weapon = Weapon::shotgun().with_strategy(strategy);
        let world = RecordingWall::new(false);
        let mut effects = Vec::new();

        weapon.shoot(Vec3::ZERO, Vec3::NEG_Z, &world, &mut rng(), &mut effects);

        let rays = world.rays.borrow();
        assert_eq!(rays.len(), 10);
        assert_eq!(rays[0].0, Vec3::NEG_Z);
    }

    #[test]
    fn test_shotgun_spread_is_seed_deterministic() {
        let a = shotgun_directions(Vec3::NEG_Z, 9, SHOTGUN_SPREAD, false, &mut rng());
        let b = shotgun_directions(Vec3::NEG_Z, 9, SHOTGUN_SPREAD, false, &mut rng());
        let c = shotgun_directions(Vec3::NEG_Z, 9, SHOTGUN_SPREAD, false, &mut ChaCha8Rng::seed_from_u64(43));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_decal_basis_is_orthonormal() {
        let normal = Vec3::Z;
        let dir = Vec3::new(0.3, -0.2, -1.0).normalize();

        let basis = decal_basis(normal, dir);

        assert_eq!(basis.z_axis, normal);
        assert!((basis.y_axis - normal.cross(dir).normalize()).length() < 1e-5);
        assert!(basis.x_axis.dot(basis.y_axis).abs() < 1e-5);
        assert!(basis.x_axis.dot(basis.z_axis).abs() < 1e-5);
        assert!((basis.x_axis.length() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_decal_basis_head_on_shot() {
        // Луч строго вдоль нормали: cross = 0, basis всё равно валиден
        let basis = decal_basis(Vec3::Z, Vec3::NEG_Z);

        assert!((basis.y_axis.length() - 1.0).abs() < 1e-5);
        assert!(basis.y_axis.dot(Vec3::Z).abs() < 1e-5);
        assert!((basis.x_axis.length() - 1.0).abs() < 1e-5);
    }

    // === WeaponManager ===

    #[test]
    fn test_switch_out_of_range() {
        let mut manager = WeaponManager::player_loadout();

        assert!(!manager.switch_to(2));
        assert_eq!(manager.active_slot(), 0);

        assert!(manager.switch_to(1));
        assert_eq!(manager.active_weapon().map(Weapon::kind), Some(WeaponKind::Shotgun));
    }

    #[test]
    fn test_reload_requires_idle_timer_and_need() {
        let mut manager = WeaponManager::player_loadout();
        assert!(!manager.try_reload(), "полный магазин");

        let mut effects = Vec::new();
        manager.try_shoot(Vec3::ZERO, Vec3::NEG_Z, &EmptyWorld, &mut rng(), &mut effects);

        assert!(manager.try_reload());
        assert!(!manager.try_reload(), "countdown уже идёт");
        assert_eq!(manager.time_left_to_reload(), RELOAD_WAIT_TIME);
    }

    #[test]
    fn test_reload_completes_on_expiry_tick() {
        let mut manager = WeaponManager::player_loadout();
        let mut effects = Vec::new();
        for _ in 0..3 {
            manager.try_shoot(Vec3::ZERO, Vec3::NEG_Z, &EmptyWorld, &mut rng(), &mut effects);
        }
        manager.try_reload();

        let dt = 1.0 / 60.0;
        let mut completed = None;
        let mut ticks = 0;
        while completed.is_none() && ticks < 120 {
            completed = manager.tick(dt);
            ticks += 1;
        }

        let completed = completed.expect("reload должен завершиться");
        assert!((59..=61).contains(&ticks), "ticks = {}", ticks);
        assert_eq!(completed.slot, 0);
        assert!(completed.reserve_remaining);

        let weapon = manager.active_weapon().expect("active weapon");
        assert_eq!((weapon.magazine(), weapon.ammo()), (5, 27));
        assert!(manager.reload_timer().is_idle());
    }

    #[test]
    fn test_switch_cancels_reload() {
        let mut manager = WeaponManager::player_loadout();
        let mut effects = Vec::new();
        manager.try_shoot(Vec3::ZERO, Vec3::NEG_Z, &EmptyWorld, &mut rng(), &mut effects);
        manager.try_reload();
        manager.tick(0.5);

        assert!(manager.switch_to(1));
        assert!(manager.reload_timer().is_idle());
        assert_eq!(manager.tick(RELOAD_WAIT_TIME), None);

        manager.switch_to(0);
        assert_eq!(manager.active_weapon().map(Weapon::magazine), Some(4), "reload отменён");
    }

    #[test]
    fn test_empty_manager_cannot_shoot() {
        let mut manager = WeaponManager::new(Vec::new());
        let mut effects = Vec::new();

        assert!(!manager.try_shoot(Vec3::ZERO, Vec3::NEG_Z, &EmptyWorld, &mut rng(), &mut effects));
        assert!(!manager.try_reload());
        assert!(!manager.switch_to(0));
    }
}
