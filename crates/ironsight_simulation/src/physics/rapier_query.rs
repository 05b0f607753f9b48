//! SceneQuery: `WorldQuery` поверх Rapier контекста
//!
//! Capabilities (Hittable/Damageable) резолвятся здесь, по компонентам entity.
//! Нет Rapier контекста (headless):
//! - ray cast никуда не попадает
//! - sphere overlap = тела с Transform как точки

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::combat::{Projectile, ProjectileCollided};
use crate::components::{Damageable, Hittable};
use crate::world::{
    RayHit, ShapeHit, WorldQuery, COLLISION_LAYER_WORLD, COLLISION_MASK_WORLD_BODIES,
};

/// Spatial queries сцены (SystemParam)
#[derive(SystemParam)]
pub struct SceneQuery<'w, 's> {
    rapier: ReadRapierContext<'w, 's>,
    hittable: Query<'w, 's, (), With<Hittable>>,
    bodies: Query<'w, 's, (Entity, &'static Transform, Has<Damageable>)>,
}

impl WorldQuery for SceneQuery<'_, '_> {
    fn cast_ray(&self, origin: Vec3, dir: Vec3, max_distance: f32, mask: u32) -> Option<RayHit> {
        let context = self.rapier.single().ok()?;
        let filter = QueryFilter::new().groups(CollisionGroups::new(
            Group::ALL,
            Group::from_bits_truncate(mask),
        ));

        let (entity, intersection) =
            context.cast_ray_and_get_normal(origin, dir, max_distance, true, filter)?;

        Some(RayHit {
            point: intersection.point,
            normal: intersection.normal,
            entity,
            hittable: self.hittable.contains(entity),
        })
    }

    fn query_sphere(&self, center: Vec3, radius: f32) -> Vec<ShapeHit> {
        let mut hits = Vec::new();

        if let Ok(context) = self.rapier.single() {
            let ball = Collider::ball(radius);
            context.intersect_shape(center, Quat::IDENTITY, ball.raw.as_ref(), QueryFilter::new(), |entity| {
                if let Ok((_, transform, damageable)) = self.bodies.get(entity) {
                    hits.push(ShapeHit {
                        entity,
                        distance: center.distance(transform.translation),
                        damageable,
                    });
                }
                true
            });
        } else {
            for (entity, transform, damageable) in self.bodies.iter() {
                let distance = center.distance(transform.translation);
                if distance <= radius {
                    hits.push(ShapeHit {
                        entity,
                        distance,
                        damageable,
                    });
                }
            }
        }

        // Порядок обхода broad phase не стабилен между прогонами
        hits.sort_by_key(|hit| hit.entity);
        hits
    }
}

/// Collision groups статики и акторов (в них попадают лучи и снаряды)
///
/// Rapier проверяет пару в обе стороны: filter тела обязан включать слой снарядов.
pub fn world_body_groups() -> CollisionGroups {
    CollisionGroups::new(
        Group::from_bits_truncate(COLLISION_LAYER_WORLD),
        Group::from_bits_truncate(COLLISION_MASK_WORLD_BODIES),
    )
}

/// System: Rapier CollisionEvent → ProjectileCollided
pub fn forward_projectile_collisions(
    mut collisions: EventReader<CollisionEvent>,
    projectiles: Query<(), With<Projectile>>,
    mut collided: EventWriter<ProjectileCollided>,
) {
    for event in collisions.read() {
        let CollisionEvent::Started(a, b, _) = event else {
            continue;
        };

        let pair = if projectiles.contains(*a) {
            Some((*a, *b))
        } else if projectiles.contains(*b) {
            Some((*b, *a))
        } else {
            None
        };

        if let Some((projectile, target)) = pair {
            collided.write(ProjectileCollided { projectile, target });
        }
    }
}

/// Physics Bridge Plugin
///
/// Добавляется host'ом вместе с `RapierPhysicsPlugin`.
pub struct PhysicsBridgePlugin;

impl Plugin for PhysicsBridgePlugin {
    fn build(&self, app: &mut App) {
        // Без RapierPhysicsPlugin событие не зарегистрировано
        app.add_event::<CollisionEvent>();

        app.add_systems(
            FixedUpdate,
            forward_projectile_collisions.before(crate::combat::CombatSet::Impacts),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::projectile_groups;
    use crate::world::{COLLISION_LAYER_PROJECTILES, COLLISION_MASK_SHOTS};

    /// Rapier: пара активна только если каждая сторона видит другую
    fn interacts(a: CollisionGroups, b: CollisionGroups) -> bool {
        a.memberships.intersects(b.filters) && b.memberships.intersects(a.filters)
    }

    #[test]
    fn test_world_body_groups() {
        let groups = world_body_groups();
        assert_eq!(groups.memberships.bits(), COLLISION_LAYER_WORLD);
        assert_eq!(groups.filters.bits(), COLLISION_MASK_WORLD_BODIES);
    }

    #[test]
    fn test_projectile_pairs_with_world_bodies_only() {
        let projectile = projectile_groups(COLLISION_LAYER_PROJECTILES, COLLISION_MASK_SHOTS);

        assert!(interacts(projectile, world_body_groups()));
        assert!(interacts(world_body_groups(), world_body_groups()));
        // Снаряды друг друга не видят
        assert!(!interacts(projectile, projectile));
    }

    #[test]
    fn test_shot_ray_sees_world_bodies_not_projectiles() {
        let ray = CollisionGroups::new(Group::ALL, Group::from_bits_truncate(COLLISION_MASK_SHOTS));
        let projectile = projectile_groups(COLLISION_LAYER_PROJECTILES, COLLISION_MASK_SHOTS);

        assert!(interacts(ray, world_body_groups()));
        assert!(!interacts(ray, projectile));
    }
}
