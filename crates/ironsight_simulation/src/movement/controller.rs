//! MovementController: per-tick velocity integrator актора
//!
//! Цикл тика (строго в этом порядке, без re-entry):
//! 1. host собирает `EnvironmentSnapshot`
//! 2. `compute_velocity` → желаемая скорость + floor snap
//! 3. host: `EnvironmentProbe::resolve_move`
//! 4. `post_process` → ceiling clamp, wall detection
//!
//! Детерминизм: никакой случайности, только dt + input + snapshot.

use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

use super::config::{MovementConfig, FRICTION_TICK_RATE};
use super::look::LookAngles;
use super::state::{
    CharacterMotion, EnvironmentSnapshot, LadderAttachment, LocomotionMode, MovementIntent,
    MovementStep, MovementTelemetry,
};
use crate::world::MoveResult;

/// Состояние локомоции актора (владелец: актор, мутирует только controller)
///
/// Автоматически добавляет config, intent, motion и look через Required Components.
#[derive(Component, Debug, Clone, Default, PartialEq, Reflect)]
#[reflect(Component)]
#[require(MovementConfig, MovementIntent, CharacterMotion, LookAngles)]
pub struct MovementController {
    /// Горизонтальная скорость (y всегда 0)
    pub(crate) velocity: Vec3,
    /// Вертикальная скорость (+ вверх)
    pub(crate) fall: f32,
    pub(crate) crouched: bool,
    /// Прыжок на этом тике → snap подавлен
    pub(crate) just_jumped: bool,
    pub(crate) mode: LocomotionMode,
}

impl MovementController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Сброс на смерти (spawn state)
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn fall(&self) -> f32 {
        self.fall
    }

    pub fn horizontal_speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn is_crouched(&self) -> bool {
        self.crouched
    }

    pub fn mode(&self) -> &LocomotionMode {
        &self.mode
    }

    pub fn is_on_ladder(&self) -> bool {
        self.mode.is_ladder()
    }

    /// Trigger enter: attach к лестнице (заменяет предыдущий attachment)
    pub fn enter_ladder(&mut self, ladder: LadderAttachment) {
        self.mode = LocomotionMode::Ladder(ladder);
    }

    /// Trigger exit: обратно на Ground без импульса
    pub fn exit_ladder(&mut self) {
        if self.mode.is_ladder() {
            self.mode = LocomotionMode::Ground;
        }
    }

    /// Переход в воду. Режим не реализован: следующий тик: panic.
    pub fn enter_water(&mut self) {
        self.mode = LocomotionMode::Water;
    }

    /// Прыжок с лестницы: импульс строго вдоль back axis + выход из Ladder
    ///
    /// None если актор не на лестнице.
    pub fn jump_off_ladder(&mut self, config: &MovementConfig) -> Option<Vec3> {
        let LocomotionMode::Ladder(ladder) = self.mode else {
            return None;
        };

        let impulse = ladder.back * config.ladder_jump_impulse;
        self.velocity = Vec3::new(impulse.x, 0.0, impulse.z);
        self.fall = impulse.y;
        self.just_jumped = false;
        self.mode = LocomotionMode::Ground;

        Some(impulse)
    }

    /// Желаемая скорость + snap на тик
    ///
    /// # Panics
    /// В режиме `Water`: режим не реализован, тикать его нельзя.
    pub fn compute_velocity(
        &mut self,
        dt: f32,
        intent: &MovementIntent,
        env: &EnvironmentSnapshot,
        config: &MovementConfig,
    ) -> MovementStep {
        match self.mode {
            LocomotionMode::Ground => self.ground_step(dt, intent, env, config),
            LocomotionMode::Ladder(ladder) => self.ladder_step(intent, &ladder, config),
            LocomotionMode::Water => unimplemented!("water locomotion is not implemented"),
        }
    }

    /// Коррекция после resolve
    ///
    /// Возвращает нормаль стены, если контакт классифицирован как стена.
    /// Скорость о стену НЕ корректируется (ни slide, ни clamp).
    pub fn post_process(&mut self, env: &EnvironmentSnapshot, result: &MoveResult) -> Option<Vec3> {
        if env.on_ceiling {
            // Иначе fall продолжает толкать в потолок и тело "прилипает"
            self.fall = result.velocity.y;
        }

        if !env.on_wall {
            return None;
        }

        let mut wall = None;
        for contact in &result.contacts {
            let y_angle = contact.normal.y * FRAC_PI_2;
            if y_angle < env.floor_max_angle {
                wall = Some(contact.normal);
            }
        }

        if let Some(normal) = wall {
            // TODO: остановка горизонтальной скорости о стену (политика slide/clamp не выбрана)
            crate::log(&format!("Wall contact: normal={:?} (velocity not corrected)", normal));
        }

        wall
    }

    fn ground_step(
        &mut self,
        dt: f32,
        intent: &MovementIntent,
        env: &EnvironmentSnapshot,
        config: &MovementConfig,
    ) -> MovementStep {
        if intent.jump && env.on_floor {
            self.fall = config.jump_force;
            self.just_jumped = true;
        }

        self.fall = move_toward(self.fall, -config.max_falling_speed, config.gravity * dt);

        // Floor/Air
        let snap = if env.on_floor {
            if self.just_jumped {
                // Snap съел бы импульс прыжка на этом же тике
                Vec3::ZERO
            } else {
                self.fall = 0.0;
                -env.floor_normal
            }
        } else {
            Vec3::NEG_Y
        };

        let friction = config.friction(env.on_floor);
        let (acc, max_speed) = config.profile(env.on_floor, self.crouched);

        let add_acc = self.integrate_horizontal(intent.direction, friction, acc, max_speed, dt);
        self.just_jumped = false;

        MovementStep {
            velocity: Vec3::new(self.velocity.x, self.fall, self.velocity.z),
            snap,
            telemetry: MovementTelemetry {
                mode: self.mode.name(),
                max_speed,
                acc,
                add_acc,
                current_speed: self.velocity.length(),
                fall: self.fall,
                wall_normal: None,
            },
        }
    }

    /// Friction decay + ускорение, которое только закрывает gap до cap
    ///
    /// Возвращает добавленную скорость (0 без input).
    fn integrate_horizontal(
        &mut self,
        direction: Vec3,
        friction: f32,
        acc: f32,
        max_speed: f32,
        dt: f32,
    ) -> f32 {
        // friction^(60·dt): на 60Hz ровно `friction` за тик, на любом dt: не больше 1
        self.velocity *= friction.powf(FRICTION_TICK_RATE * dt);

        let direction = Vec3::new(direction.x, 0.0, direction.z).clamp_length_max(1.0);
        if direction == Vec3::ZERO {
            return 0.0;
        }

        let current_speed = self.velocity.length();
        let add_acc = (max_speed - current_speed).clamp(0.0, acc * dt);
        self.velocity += direction * add_acc;

        add_acc
    }

    fn ladder_step(
        &mut self,
        intent: &MovementIntent,
        ladder: &LadderAttachment,
        config: &MovementConfig,
    ) -> MovementStep {
        if intent.jump {
            if let Some(impulse) = self.jump_off_ladder(config) {
                return MovementStep {
                    velocity: impulse,
                    snap: Vec3::ZERO,
                    telemetry: MovementTelemetry {
                        mode: LocomotionMode::Ground.name(),
                        max_speed: config.ladder_jump_impulse,
                        current_speed: self.velocity.length(),
                        fall: self.fall,
                        ..default()
                    },
                };
            }
        }

        self.fall = 0.0;

        // Intent в локальный frame лестницы, нормаль (back) обнулена
        let lateral = ladder.right * intent.direction.dot(ladder.right)
            + ladder.up * intent.direction.dot(ladder.up);
        self.velocity = Vec3::new(lateral.x, 0.0, lateral.z) * config.ladder_climb_speed;

        let climb = intent.direction.dot(ladder.forward()) * config.ladder_climb_speed;

        MovementStep {
            velocity: Vec3::new(self.velocity.x, climb, self.velocity.z),
            snap: Vec3::ZERO,
            telemetry: MovementTelemetry {
                mode: self.mode.name(),
                max_speed: config.ladder_climb_speed,
                current_speed: self.velocity.length(),
                fall: self.fall,
                ..default()
            },
        }
    }
}

/// Сдвиг `from` к `to` не больше чем на `delta`
pub fn move_toward(from: f32, to: f32, delta: f32) -> f32 {
    if (to - from).abs() <= delta {
        to
    } else {
        from + (to - from).signum() * delta
    }
}
