//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: живые существа (Actor, Health, Player, SpawnPoint)
//! - world: объекты уровня и capabilities (Hittable, Damageable, Ladder)
//!
//! Movement/combat state живёт в своих доменах (`movement`, `combat`).

pub mod actor;
pub mod world;

// Re-exports для удобного импорта
pub use actor::*;
pub use world::*;
