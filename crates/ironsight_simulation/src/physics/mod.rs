//! Physics bridge: Rapier как backend для world queries
//!
//! Симуляция не шагает физику сама: host добавляет `RapierPhysicsPlugin`,
//! мы только читаем контекст (ray cast, sphere overlap, collision events).
//! Без Rapier контекста запросы деградируют в headless fallback.

pub mod rapier_query;

// Re-export основных типов
pub use rapier_query::{
    forward_projectile_collisions, world_body_groups, PhysicsBridgePlugin, SceneQuery,
};
