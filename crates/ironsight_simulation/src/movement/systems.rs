//! Movement systems (host-agnostic часть pipeline)
//!
//! Resolve фаза (move-and-slide) принадлежит host'у:
//! headless: `world::headless`, движок: своя система в `MovementSet::Resolve`.

use bevy::prelude::*;

use super::events::{CharacterRespawned, LadderEntered, LadderExited, LookInput};
use super::{CharacterMotion, LadderAttachment, MovementConfig, MovementController, MovementIntent, LookAngles};
use crate::components::{Ladder, SpawnPoint};

/// Высота kill plane: ниже: смерть + respawn
pub const KILL_PLANE_Y: f32 = -100.0;

/// System: mouse look (yaw/pitch с clamp)
pub fn apply_look_input(
    mut events: EventReader<LookInput>,
    mut actors: Query<(&mut LookAngles, &MovementConfig)>,
) {
    for event in events.read() {
        let Ok((mut look, config)) = actors.get_mut(event.entity) else {
            crate::log_warning(&format!("LookInput: entity {:?} has no LookAngles", event.entity));
            continue;
        };

        look.apply_mouse(event.relative, config.look_sensitivity, config.max_pitch);
    }
}

/// System: trigger enter/exit лестниц → смена LocomotionMode
///
/// Exit обрабатывается после enter: переход между двумя лестницами
/// в одном тике оставляет актора на новой.
pub fn process_ladder_triggers(
    mut entered: EventReader<LadderEntered>,
    mut exited: EventReader<LadderExited>,
    ladders: Query<&Transform, With<Ladder>>,
    mut actors: Query<&mut MovementController>,
) {
    let mut attached = Vec::new();

    for event in entered.read() {
        let Ok(ladder_transform) = ladders.get(event.ladder) else {
            crate::log_warning(&format!("LadderEntered: {:?} is not a ladder", event.ladder));
            continue;
        };
        let Ok(mut controller) = actors.get_mut(event.entity) else {
            continue;
        };

        controller.enter_ladder(LadderAttachment::from_rotation(ladder_transform.rotation));
        attached.push((event.entity, event.ladder));
        crate::log(&format!("🪜 {:?} attached to ladder {:?}", event.entity, event.ladder));
    }

    for event in exited.read() {
        let switched = attached
            .iter()
            .any(|(entity, ladder)| *entity == event.entity && *ladder != event.ladder);
        if switched {
            continue;
        }
        let Ok(mut controller) = actors.get_mut(event.entity) else {
            continue;
        };

        if controller.is_on_ladder() {
            controller.exit_ladder();
            crate::log(&format!("🪜 {:?} left ladder {:?}", event.entity, event.ladder));
        }
    }
}

/// System: Compute фаза: желаемая скорость из intent + snapshot
///
/// Jump intent one-shot: сбрасывается после тика.
pub fn compute_character_velocity(
    time: Res<Time<Fixed>>,
    mut actors: Query<(
        &mut MovementController,
        &mut MovementIntent,
        &mut CharacterMotion,
        &MovementConfig,
    )>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    for (mut controller, mut intent, mut motion, config) in actors.iter_mut() {
        let step = controller.compute_velocity(dt, &intent, &motion.environment, config);

        motion.telemetry = step.telemetry;
        motion.desired = Some(step);
        motion.resolved = None;
        intent.jump = false;
    }
}

/// System: PostProcess фаза: ceiling clamp + wall detection
pub fn post_process_characters(mut actors: Query<(&mut MovementController, &mut CharacterMotion)>) {
    for (mut controller, mut motion) in actors.iter_mut() {
        let Some(result) = motion.resolved.take() else {
            continue;
        };

        let environment = motion.environment;
        motion.telemetry.wall_normal = controller.post_process(&environment, &result);
    }
}

/// System: смерть ниже kill plane → свежий controller + spawn point
pub fn respawn_fallen_characters(
    mut actors: Query<(
        Entity,
        &mut Transform,
        &mut MovementController,
        &mut CharacterMotion,
        &SpawnPoint,
    )>,
    mut respawned: EventWriter<CharacterRespawned>,
) {
    for (entity, mut transform, mut controller, mut motion, spawn) in actors.iter_mut() {
        if transform.translation.y > KILL_PLANE_Y {
            continue;
        }

        controller.reset();
        *motion = CharacterMotion::default();
        transform.translation = spawn.0;

        crate::log_info(&format!("💀 {:?} fell below kill plane, respawn at {:?}", entity, spawn.0));
        respawned.write(CharacterRespawned {
            entity,
            position: spawn.0,
        });
    }
}
