//! Collision Layers Constants
//!
//! Битовые маски слоёв: общие для hitscan, projectiles и Rapier groups.
//!
//! - Layer 1 (0b1 = 1): World bodies (статика, бочки, акторы)
//! - Layer 4 (0b1000 = 8): Projectiles

/// Layer 1: всё, во что можно попасть
pub const COLLISION_LAYER_WORLD: u32 = 0b1; // 1

/// Layer 4: Projectiles (kinetic bullets)
pub const COLLISION_LAYER_PROJECTILES: u32 = 0b1000; // 8

/// Mask: hitscan лучи и снаряды видят только world bodies
pub const COLLISION_MASK_SHOTS: u32 = COLLISION_LAYER_WORLD;

/// Mask: world bodies пересекаются со статикой и снарядами
pub const COLLISION_MASK_WORLD_BODIES: u32 = COLLISION_LAYER_WORLD | COLLISION_LAYER_PROJECTILES;

/// Получить название слоя для debug логов
pub fn get_layer_name(layer_bits: u32) -> &'static str {
    match layer_bits {
        COLLISION_LAYER_WORLD => "World",
        COLLISION_LAYER_PROJECTILES => "Projectiles",
        _ => "Unknown",
    }
}
