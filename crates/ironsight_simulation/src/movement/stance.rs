//! Stance: присед / вставание
//!
//! Смена stance меняет extents тела. Встать можно только если
//! `ClearanceProbe` не видит геометрию над головой.

use bevy::prelude::*;

use super::controller::MovementController;
use crate::world::ClearanceProbe;

/// Extents тела в приседе
pub const CROUCH_EXTENTS: Vec3 = Vec3::new(1.0, 1.5, 1.0);

/// Extents тела стоя
pub const FULL_EXTENTS: Vec3 = Vec3::new(1.0, 2.0, 1.0);

/// Extents для stance
pub fn stance_extents(crouched: bool) -> Vec3 {
    if crouched {
        CROUCH_EXTENTS
    } else {
        FULL_EXTENTS
    }
}

/// Результат запроса смены stance
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StanceTransition {
    /// Уже в этом stance
    Unchanged,
    /// Принято: host сдвигает тело + камеру на `translation`
    Applied { translation: Vec3 },
    /// Над головой геометрия, состояние не тронуто
    Blocked,
}

impl StanceTransition {
    pub fn accepted(&self) -> bool {
        !matches!(self, StanceTransition::Blocked)
    }
}

impl MovementController {
    pub fn body_extents(&self) -> Vec3 {
        stance_extents(self.crouched)
    }

    /// Запрос присесть (`crouch = true`) или встать
    ///
    /// Присед всегда принимается. Вставание проверяется test move'ом
    /// на разницу extents из `origin`.
    pub fn try_set_crouch(
        &mut self,
        crouch: bool,
        origin: Vec3,
        probe: &impl ClearanceProbe,
    ) -> StanceTransition {
        if self.crouched == crouch {
            return StanceTransition::Unchanged;
        }

        let translation = stance_extents(crouch) - self.body_extents();

        if !crouch && probe.is_obstructed(origin, translation) {
            return StanceTransition::Blocked;
        }

        self.crouched = crouch;
        StanceTransition::Applied { translation }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct LowCeiling;

    impl ClearanceProbe for LowCeiling {
        fn is_obstructed(&self, _origin: Vec3, delta: Vec3) -> bool {
            delta.y > 0.0
        }
    }

    struct OpenSky;

    impl ClearanceProbe for OpenSky {
        fn is_obstructed(&self, _origin: Vec3, _delta: Vec3) -> bool {
            false
        }
    }

    #[test]
    fn test_crouch_always_accepted() {
        let mut controller = MovementController::new();

        let transition = controller.try_set_crouch(true, Vec3::ZERO, &LowCeiling);

        assert_eq!(transition, StanceTransition::Applied { translation: Vec3::new(0.0, -0.5, 0.0) });
        assert!(controller.is_crouched());
        assert_eq!(controller.body_extents(), CROUCH_EXTENTS);
    }

    #[test]
    fn test_stand_up_blocked_leaves_state_untouched() {
        let mut controller = MovementController::new();
        controller.try_set_crouch(true, Vec3::ZERO, &OpenSky);
        let before = controller.clone();

        let transition = controller.try_set_crouch(false, Vec3::ZERO, &LowCeiling);

        assert_eq!(transition, StanceTransition::Blocked);
        assert!(!transition.accepted());
        assert_eq!(controller, before);
        assert_eq!(controller.body_extents(), CROUCH_EXTENTS);
    }

    #[test]
    fn test_stand_up_with_clearance() {
        let mut controller = MovementController::new();
        controller.try_set_crouch(true, Vec3::ZERO, &OpenSky);

        let transition = controller.try_set_crouch(false, Vec3::ZERO, &OpenSky);

        assert_eq!(transition, StanceTransition::Applied { translation: Vec3::new(0.0, 0.5, 0.0) });
        assert!(!controller.is_crouched());
    }

    #[test]
    fn test_same_stance_is_unchanged() {
        let mut controller = MovementController::new();
        assert_eq!(controller.try_set_crouch(false, Vec3::ZERO, &LowCeiling), StanceTransition::Unchanged);
        assert!(StanceTransition::Unchanged.accepted());
    }
}
