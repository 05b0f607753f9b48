//! Kinetic projectiles
//!
//! Снаряд летит по прямой без гравитации, удаляется на первом контакте.
//! Контакт сообщает host (`ProjectileCollided`), в Rapier-сцене: `physics::forward_projectile_collisions`.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

/// Радиус sensor коллайдера снаряда (метры)
pub const PROJECTILE_RADIUS: f32 = 0.1;

/// Снаряд в полёте
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Projectile {
    /// Кто выстрелил
    pub shooter: Entity,
    pub velocity: Vec3,
}

/// Bundle снаряда: позиция + kinematic sensor на слое снарядов
///
/// Kinematic body двигается через Transform (`move_projectiles`).
/// Kinematic-fixed пары Rapier по умолчанию не проверяет, их включает KINEMATIC_STATIC.
pub fn projectile_bundle(shooter: Entity, origin: Vec3, velocity: Vec3, layer: u32, mask: u32) -> impl Bundle {
    (
        Projectile { shooter, velocity },
        Transform::from_translation(origin),
        RigidBody::KinematicPositionBased,
        Collider::ball(PROJECTILE_RADIUS),
        Sensor,
        ActiveEvents::COLLISION_EVENTS,
        ActiveCollisionTypes::default() | ActiveCollisionTypes::KINEMATIC_STATIC,
        projectile_groups(layer, mask),
    )
}

/// Collision groups снаряда (membership = layer, filter = mask)
pub fn projectile_groups(layer: u32, mask: u32) -> CollisionGroups {
    CollisionGroups::new(Group::from_bits_truncate(layer), Group::from_bits_truncate(mask))
}

/// System: прямолинейное движение снарядов
pub fn move_projectiles(time: Res<Time<Fixed>>, mut projectiles: Query<(&Projectile, &mut Transform)>) {
    let dt = time.delta_secs();

    for (projectile, mut transform) in projectiles.iter_mut() {
        transform.translation += projectile.velocity * dt;
    }
}
