//! MovementConfig: runtime-tunable knobs локомоции
//!
//! Все значения в метрах/секундах. Дефолты откалиброваны под 60Hz tick.
//! Knobs меняются на лету (settings panel хоста) через `set_knob`,
//! структурно на алгоритмы не влияют.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Процент, на который подняты базовые ускорения
pub const ACC_PERCENT_RAISE: f32 = 130.0;

/// Tick-rate константа friction decay (`velocity *= friction ^ (TICK_RATE * dt)`)
pub const FRICTION_TICK_RATE: f32 = 60.0;

/// Ускорение с учётом ACC_PERCENT_RAISE
const fn raised(base: f32) -> f32 {
    base + base / 100.0 * ACC_PERCENT_RAISE
}

/// Параметры движения актора
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct MovementConfig {
    // === Vertical ===
    /// Гравитация (m/s²): скорость, с которой fall приближается к terminal
    pub gravity: f32,
    /// Terminal fall speed (m/s)
    pub max_falling_speed: f32,
    /// Jump impulse (m/s)
    pub jump_force: f32,

    // === Friction ===
    pub air_friction: f32,
    pub floor_friction: f32,

    // === Speed caps ===
    pub full_max_speed: f32,
    pub crouch_max_speed: f32,

    // === Acceleration (m/s²) ===
    pub full_floor_acc: f32,
    pub full_air_acc: f32,
    pub crouch_floor_acc: f32,
    pub crouch_air_acc: f32,

    /// Максимальный угол пола (радианы)
    pub floor_max_angle: f32,

    // === Ladder ===
    /// Скорость подъёма по лестнице (m/s)
    pub ladder_climb_speed: f32,
    /// Impulse при прыжке с лестницы (m/s, вдоль back axis лестницы)
    pub ladder_jump_impulse: f32,

    // === Look ===
    /// Mouse sensitivity (радиан на пиксель)
    pub look_sensitivity: f32,
    /// Pitch clamp (радианы, симметрично)
    pub max_pitch: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            gravity: 70.0,
            max_falling_speed: 100.0,
            jump_force: 22.0,

            air_friction: 0.99,
            floor_friction: 0.85,

            full_max_speed: 25.0,
            crouch_max_speed: 10.0,

            full_floor_acc: raised(130.0),  // 299
            full_air_acc: raised(40.0),     // 92
            crouch_floor_acc: raised(30.0), // 69
            crouch_air_acc: raised(20.0),   // 46

            floor_max_angle: 45f32.to_radians(),

            ladder_climb_speed: 8.0,
            ladder_jump_impulse: 12.0,

            look_sensitivity: 0.0017,
            max_pitch: 90f32.to_radians(),
        }
    }
}

impl MovementConfig {
    /// Имена knobs для settings panel (порядок отображения)
    pub const KNOBS: [&'static str; 14] = [
        "gravity",
        "max_falling_speed",
        "jump_force",
        "air_friction",
        "floor_friction",
        "sens",
        "full_max_speed",
        "crouch_max_speed",
        "full_air_acc",
        "full_floor_acc",
        "crouch_air_acc",
        "crouch_floor_acc",
        "ladder_climb_speed",
        "ladder_jump_impulse",
    ];

    /// Acceleration + max speed для stance/контакта
    pub fn profile(&self, on_floor: bool, crouched: bool) -> (f32, f32) {
        let acc = match (on_floor, crouched) {
            (true, false) => self.full_floor_acc,
            (true, true) => self.crouch_floor_acc,
            (false, false) => self.full_air_acc,
            (false, true) => self.crouch_air_acc,
        };
        let max_speed = if crouched {
            self.crouch_max_speed
        } else {
            self.full_max_speed
        };

        (acc, max_speed)
    }

    pub fn friction(&self, on_floor: bool) -> f32 {
        if on_floor {
            self.floor_friction
        } else {
            self.air_friction
        }
    }

    /// Изменить knob по имени из settings panel
    ///
    /// Возвращает false для неизвестного имени (значение не меняется).
    pub fn set_knob(&mut self, name: &str, value: f32) -> bool {
        match self.knob_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Текущее значение knob (для отображения в settings panel)
    pub fn knob(&self, name: &str) -> Option<f32> {
        self.clone().knob_mut(name).map(|slot| *slot)
    }

    fn knob_mut(&mut self, name: &str) -> Option<&mut f32> {
        let slot = match name {
            "gravity" => &mut self.gravity,
            "max_falling_speed" => &mut self.max_falling_speed,
            "jump_force" => &mut self.jump_force,
            "air_friction" => &mut self.air_friction,
            "floor_friction" => &mut self.floor_friction,
            "sens" => &mut self.look_sensitivity,
            "full_max_speed" => &mut self.full_max_speed,
            "crouch_max_speed" => &mut self.crouch_max_speed,
            "full_air_acc" => &mut self.full_air_acc,
            "full_floor_acc" => &mut self.full_floor_acc,
            "crouch_air_acc" => &mut self.crouch_air_acc,
            "crouch_floor_acc" => &mut self.crouch_floor_acc,
            "ladder_climb_speed" => &mut self.ladder_climb_speed,
            "ladder_jump_impulse" => &mut self.ladder_jump_impulse,
            _ => return None,
        };

        Some(slot)
    }
}
