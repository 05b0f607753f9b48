//! Look & walk input
//!
//! Mouse → yaw/pitch (pitch clamp), WASD → направление движения относительно yaw.

use bevy::prelude::*;

/// Ориентация взгляда актора (радианы)
///
/// yaw: поворот тела вокруг Y, pitch: наклон камеры.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct LookAngles {
    pub yaw: f32,
    pub pitch: f32,
}

impl LookAngles {
    /// Применить relative mouse motion (пиксели)
    pub fn apply_mouse(&mut self, relative: Vec2, sensitivity: f32, max_pitch: f32) {
        self.yaw -= relative.x * sensitivity;
        self.pitch = (self.pitch - relative.y * sensitivity).clamp(-max_pitch, max_pitch);
    }

    /// Rotation камеры (yaw, затем pitch)
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Направление взгляда (ray direction для оружия)
    pub fn forward(&self) -> Vec3 {
        self.rotation() * Vec3::NEG_Z
    }
}

/// Зажатые клавиши движения
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkKeys {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
}

/// Направление ходьбы в world space (normalized или ZERO)
pub fn walking_direction(yaw: f32, keys: WalkKeys) -> Vec3 {
    let forward = Vec3::new(-yaw.sin(), 0.0, -yaw.cos());
    let right = Vec3::new(yaw.cos(), 0.0, -yaw.sin());

    let mut direction = Vec3::ZERO;
    if keys.forward {
        direction += forward;
    }
    if keys.backward {
        direction -= forward;
    }
    if keys.left {
        direction -= right;
    }
    if keys.right {
        direction += right;
    }

    direction.normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_pitch_is_clamped() {
        let mut look = LookAngles::default();
        look.apply_mouse(Vec2::new(0.0, -10_000.0), 0.0017, FRAC_PI_2);
        assert_eq!(look.pitch, FRAC_PI_2);

        look.apply_mouse(Vec2::new(0.0, 10_000.0), 0.0017, FRAC_PI_2);
        assert_eq!(look.pitch, -FRAC_PI_2);
    }

    #[test]
    fn test_mouse_right_turns_right() {
        let mut look = LookAngles::default();
        look.apply_mouse(Vec2::new(100.0, 0.0), 0.0017, FRAC_PI_2);
        assert!((look.yaw + 0.17).abs() < 1e-5);
        assert!(look.forward().x > 0.0);
    }

    #[test]
    fn test_walking_matches_look_forward() {
        let look = LookAngles { yaw: 0.7, pitch: 0.0 };
        let keys = WalkKeys {
            forward: true,
            ..default()
        };

        let direction = walking_direction(look.yaw, keys);
        assert!((direction - look.forward()).length() < 1e-5);
    }

    #[test]
    fn test_diagonal_is_normalized() {
        let keys = WalkKeys {
            forward: true,
            right: true,
            ..default()
        };
        let direction = walking_direction(0.0, keys);

        assert!((direction.length() - 1.0).abs() < 1e-5);
        assert!(direction.x > 0.0 && direction.z < 0.0);
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let keys = WalkKeys {
            forward: true,
            backward: true,
            ..default()
        };
        assert_eq!(walking_direction(1.2, keys), Vec3::ZERO);
    }
}
