//! Explosive barrel: hittable, взрывается на последнем попадании

use bevy::prelude::*;

use crate::components::Hittable;

/// Попаданий до взрыва
pub const BARREL_HITS: u32 = 2;

/// Взрывающаяся бочка
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
#[require(Hittable, Transform)]
pub struct ExplosiveBarrel {
    pub hits_left: u32,
}

impl Default for ExplosiveBarrel {
    fn default() -> Self {
        Self {
            hits_left: BARREL_HITS,
        }
    }
}

impl ExplosiveBarrel {
    /// Засчитать попадание. true: именно это попадание взрывает бочку.
    ///
    /// Попадания после взрыва (та же пачка дроби) игнорируются.
    pub fn register_hit(&mut self) -> bool {
        if self.hits_left == 0 {
            return false;
        }

        self.hits_left -= 1;
        self.hits_left == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_hit_detonates() {
        let mut barrel = ExplosiveBarrel::default();

        assert!(!barrel.register_hit());
        assert!(barrel.register_hit());
        assert!(!barrel.register_hit(), "взорванная бочка не взрывается повторно");
        assert_eq!(barrel.hits_left, 0);
    }
}
