//! Базовые компоненты акторов: Actor, Health, Player, SpawnPoint

use bevy::prelude::*;

use super::world::{Damageable, Hittable};
use crate::movement::MovementController;

/// Актор (игрок, враг): базовый компонент для живых существ
///
/// Актор всегда hittable (реакция на попадание пустая) и получает
/// урон от взрывов. Автоматически добавляет Health + capabilities.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Health, Hittable, Damageable, Transform)]
pub struct Actor;

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100) // Default 100 HP
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }
}

/// Player marker (first-person актор под управлением input)
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Actor, MovementController)]
pub struct Player;

/// Точка respawn (позиция на момент spawn)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct SpawnPoint(pub Vec3);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage() {
        let mut health = Health::new(100);
        assert_eq!(health.current, 100);

        health.take_damage(30);
        assert_eq!(health.current, 70);
        assert!(health.is_alive());

        health.take_damage(100); // Saturating sub
        assert_eq!(health.current, 0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_player_requires_actor_capabilities() {
        let mut world = World::new();
        let player = world.spawn(Player).id();

        let entity = world.entity(player);
        assert!(entity.contains::<Actor>());
        assert!(entity.contains::<Health>());
        assert!(entity.contains::<Hittable>());
        assert!(entity.contains::<Damageable>());
        assert!(entity.contains::<MovementController>());
    }
}
