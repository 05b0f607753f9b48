//! Headless host: HeadlessArena вместо collision engine
//!
//! Встраивается в `MovementSet::Sense` / `MovementSet::Resolve`.
//! Position тела = точка ног (`Transform::translation`).

use bevy::prelude::*;

use super::arena::{HeadlessArena, HeadlessBody};
use super::EnvironmentProbe;
use crate::movement::{
    CharacterMotion, CrouchIntent, EnvironmentSnapshot, MovementConfig, MovementController,
    MovementSet, StanceChanged, StanceTransition,
};

/// System: snapshot контактов тела (результат прошлого resolve)
///
/// Высота тела синхронизируется со stance controller'а (после respawn stance сброшен).
pub fn sense_arena_contacts(
    arena: Res<HeadlessArena>,
    mut bodies: Query<(
        &Transform,
        &mut HeadlessBody,
        &MovementController,
        &MovementConfig,
        &mut CharacterMotion,
    )>,
) {
    for (transform, mut body, controller, config, mut motion) in bodies.iter_mut() {
        body.height = controller.body_extents().y;

        let mut position = transform.translation;
        let probe = arena.probe(&mut position, &mut body);
        motion.environment =
            EnvironmentSnapshot::from_contacts(probe.classify_contacts(), config.floor_max_angle);
    }
}

/// System: CrouchIntent → смена stance (clearance проверяет арена)
pub fn process_crouch_intents(
    mut intents: EventReader<CrouchIntent>,
    arena: Res<HeadlessArena>,
    mut bodies: Query<(&Transform, &mut HeadlessBody, &mut MovementController)>,
    mut changed: EventWriter<StanceChanged>,
) {
    for intent in intents.read() {
        let Ok((transform, mut body, mut controller)) = bodies.get_mut(intent.entity) else {
            crate::log_warning(&format!("CrouchIntent: entity {:?} has no headless body", intent.entity));
            continue;
        };

        let origin = transform.translation;
        let mut position = origin;
        let transition = {
            let probe = arena.probe(&mut position, &mut body);
            controller.try_set_crouch(intent.crouch, origin, &probe)
        };

        match transition {
            StanceTransition::Applied { translation } => {
                // Ноги на месте, меняется только высота (translation: для камеры host'а)
                body.height = controller.body_extents().y;
                changed.write(StanceChanged {
                    entity: intent.entity,
                    crouched: controller.is_crouched(),
                    translation,
                });
            }
            StanceTransition::Blocked => {
                crate::log(&format!("{:?} can't stand up: ceiling above", intent.entity));
            }
            StanceTransition::Unchanged => {}
        }
    }
}

/// System: Resolve фаза: move-and-slide по арене
pub fn resolve_arena_moves(
    time: Res<Time<Fixed>>,
    arena: Res<HeadlessArena>,
    mut bodies: Query<(&mut Transform, &mut HeadlessBody, &mut CharacterMotion)>,
) {
    let dt = time.delta_secs();

    for (mut transform, mut body, mut motion) in bodies.iter_mut() {
        let Some(step) = motion.desired.take() else {
            continue;
        };

        let mut position = transform.translation;
        let result = arena
            .probe(&mut position, &mut body)
            .resolve_move(step.velocity, step.snap, dt);

        transform.translation = position;
        motion.resolved = Some(result);
    }
}

/// Headless Host Plugin: арена как collision engine
///
/// Требует `MovementPlugin` (события + порядок `MovementSet`).
pub struct HeadlessHostPlugin;

impl Plugin for HeadlessHostPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HeadlessArena>();

        app.add_systems(
            FixedUpdate,
            (
                (process_crouch_intents, sense_arena_contacts)
                    .chain()
                    .in_set(MovementSet::Sense),
                resolve_arena_moves.in_set(MovementSet::Resolve),
            ),
        );
    }
}
