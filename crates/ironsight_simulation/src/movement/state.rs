//! Movement state: режимы локомоции, snapshot окружения, intent, telemetry

use bevy::prelude::*;

use crate::world::{ContactInfo, MoveResult};

/// Snapshot окружения на тик (immutable)
///
/// Собирается хостом ДО `compute_velocity` и не меняется до конца `post_process`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentSnapshot {
    pub on_floor: bool,
    pub on_ceiling: bool,
    pub on_wall: bool,
    pub floor_normal: Vec3,
    /// Максимальный угол пола (радианы)
    pub floor_max_angle: f32,
}

impl EnvironmentSnapshot {
    pub fn from_contacts(contacts: ContactInfo, floor_max_angle: f32) -> Self {
        Self {
            on_floor: contacts.on_floor,
            on_ceiling: contacts.on_ceiling,
            on_wall: contacts.on_wall,
            floor_normal: contacts.floor_normal,
            floor_max_angle,
        }
    }

    /// Стоим на ровном полу (тесты, spawn)
    pub fn grounded() -> Self {
        Self {
            on_floor: true,
            on_ceiling: false,
            on_wall: false,
            floor_normal: Vec3::Y,
            floor_max_angle: 45f32.to_radians(),
        }
    }

    /// В воздухе без контактов
    pub fn airborne() -> Self {
        Self {
            on_floor: false,
            ..Self::grounded()
        }
    }
}

impl Default for EnvironmentSnapshot {
    fn default() -> Self {
        Self::airborne()
    }
}

/// Намерение движения на тик (заполняется из input)
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MovementIntent {
    /// Направление движения (normalized или ZERO)
    pub direction: Vec3,
    /// Jump pressed на этом тике (one-shot)
    pub jump: bool,
}

/// Локальные оси лестницы
///
/// `back`: наружная нормаль climbable плоскости (от лестницы к актору).
/// Climb axis (`forward`) = `-back`: толкаем input в лестницу → лезем вверх.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct LadderAttachment {
    pub right: Vec3,
    pub up: Vec3,
    pub back: Vec3,
}

impl LadderAttachment {
    /// Из rotation volume лестницы (Bevy: forward = -Z, back = +Z)
    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            right: rotation * Vec3::X,
            up: rotation * Vec3::Y,
            back: rotation * Vec3::Z,
        }
    }

    pub fn forward(&self) -> Vec3 {
        -self.back
    }
}

/// Режим локомоции (взаимоисключающие, явные переходы)
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub enum LocomotionMode {
    /// Пол + воздух (gravity, friction, snap)
    #[default]
    Ground,
    /// На лестнице: attachment живёт ТОЛЬКО внутри варианта
    Ladder(LadderAttachment),
    /// Плавание: не реализовано (fatal при тике)
    Water,
}

impl LocomotionMode {
    pub fn is_ladder(&self) -> bool {
        matches!(self, LocomotionMode::Ladder(_))
    }

    pub fn ladder(&self) -> Option<&LadderAttachment> {
        match self {
            LocomotionMode::Ladder(attachment) => Some(attachment),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LocomotionMode::Ground => "ground",
            LocomotionMode::Ladder(_) => "ladder",
            LocomotionMode::Water => "water",
        }
    }
}

/// Диагностика тика (fixed-shape, для debug overlay хоста)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MovementTelemetry {
    pub mode: &'static str,
    /// Выбранный speed cap
    pub max_speed: f32,
    /// Выбранное ускорение (m/s²)
    pub acc: f32,
    /// Реально добавленная скорость на этом тике
    pub add_acc: f32,
    /// Горизонтальная скорость после интеграции
    pub current_speed: f32,
    pub fall: f32,
    /// Нормаль стены, найденная в post_process (коррекции нет)
    pub wall_normal: Option<Vec3>,
}

/// Результат `compute_velocity`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MovementStep {
    /// Желаемая скорость (x/z: горизонталь, y: fall)
    pub velocity: Vec3,
    /// Floor-snap вектор для resolve
    pub snap: Vec3,
    pub telemetry: MovementTelemetry,
}

/// Данные тика между фазами pipeline (Sense → Compute → Resolve → PostProcess)
///
/// `desired` пишет Compute, забирает host в Resolve.
/// `resolved` пишет host, забирает PostProcess.
#[derive(Component, Debug, Clone, Default)]
pub struct CharacterMotion {
    pub environment: EnvironmentSnapshot,
    pub desired: Option<MovementStep>,
    pub resolved: Option<MoveResult>,
    /// Telemetry последнего тика (с wall_normal из PostProcess)
    pub telemetry: MovementTelemetry,
}
