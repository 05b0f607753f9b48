//! Movement domain: first-person locomotion solver
//!
//! Содержит:
//! - MovementController (gravity, friction, acceleration, floor snap, ladder)
//! - MovementConfig (runtime knobs)
//! - Stance (присед с проверкой clearance)
//! - Look (mouse look + WASD направление)
//!
//! Pipeline тика (FixedUpdate, `MovementSet` по порядку):
//! 1. Sense: host пишет `CharacterMotion::environment`
//! 2. Compute: `compute_velocity` → `CharacterMotion::desired`
//! 3. Resolve: host двигает тело → `CharacterMotion::resolved`
//! 4. PostProcess: `post_process` + kill plane respawn

use bevy::prelude::*;

pub mod config;
pub mod controller;
pub mod events;
pub mod look;
pub mod stance;
pub mod state;
pub mod systems;


pub use config::{MovementConfig, ACC_PERCENT_RAISE, FRICTION_TICK_RATE};
pub use controller::{move_toward, MovementController};
pub use events::*;
pub use look::{walking_direction, LookAngles, WalkKeys};
pub use stance::{stance_extents, StanceTransition, CROUCH_EXTENTS, FULL_EXTENTS};
pub use state::{
    CharacterMotion, EnvironmentSnapshot, LadderAttachment, LocomotionMode, MovementIntent,
    MovementStep, MovementTelemetry,
};
pub use systems::KILL_PLANE_Y;

/// Фазы movement pipeline (host системы встраиваются в Sense/Resolve)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementSet {
    /// Input + snapshot окружения
    Sense,
    /// Желаемая скорость
    Compute,
    /// Move-and-slide (host)
    Resolve,
    /// Ceiling/wall коррекция, respawn
    PostProcess,
}

/// Movement Plugin
///
/// Регистрирует movement системы в FixedUpdate (60Hz).
/// Resolve фазу поставляет host (`HeadlessHostPlugin` или движок).
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LookInput>()
            .add_event::<CrouchIntent>()
            .add_event::<StanceChanged>()
            .add_event::<LadderEntered>()
            .add_event::<LadderExited>()
            .add_event::<CharacterRespawned>();

        app.configure_sets(
            FixedUpdate,
            (
                MovementSet::Sense,
                MovementSet::Compute,
                MovementSet::Resolve,
                MovementSet::PostProcess,
            )
                .chain(),
        );

        app.add_systems(
            FixedUpdate,
            (
                (systems::apply_look_input, systems::process_ladder_triggers)
                    .chain()
                    .in_set(MovementSet::Sense),
                systems::compute_character_velocity.in_set(MovementSet::Compute),
                (systems::post_process_characters, systems::respawn_fallen_characters)
                    .chain()
                    .in_set(MovementSet::PostProcess),
            ),
        );
    }
}
