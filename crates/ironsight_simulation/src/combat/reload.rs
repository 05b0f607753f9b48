//! ReloadTimer: one-shot countdown перезарядки

use bevy::prelude::*;

/// Длительность перезарядки (секунды)
pub const RELOAD_WAIT_TIME: f32 = 1.0;

/// One-shot countdown
#[derive(Debug, Clone, Copy, PartialEq, Default, Reflect)]
pub enum ReloadTimer {
    #[default]
    Idle,
    Running { remaining: f32 },
}

impl ReloadTimer {
    pub fn is_idle(&self) -> bool {
        matches!(self, ReloadTimer::Idle)
    }

    pub fn start(&mut self) {
        *self = ReloadTimer::Running {
            remaining: RELOAD_WAIT_TIME,
        };
    }

    pub fn stop(&mut self) {
        *self = ReloadTimer::Idle;
    }

    /// Оставшееся время (0 если не запущен)
    pub fn time_left(&self) -> f32 {
        match self {
            ReloadTimer::Idle => 0.0,
            ReloadTimer::Running { remaining } => *remaining,
        }
    }

    /// Продвинуть на dt. true: истёк на этом тике (таймер снова Idle).
    pub fn tick(&mut self, dt: f32) -> bool {
        let ReloadTimer::Running { remaining } = self else {
            return false;
        };

        *remaining -= dt;
        if *remaining > 0.0 {
            return false;
        }

        *self = ReloadTimer::Idle;
        true
    }
}
