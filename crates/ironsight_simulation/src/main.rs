//! Headless симуляция IRONSIGHT
//!
//! Игрок в пустой арене: бег, прыжок, стрельба до пустого магазина, перезарядка.

use std::time::Duration;

use bevy::prelude::*;
use ironsight_simulation::combat::{ReloadIntent, ShootIntent};
use ironsight_simulation::movement::{CharacterMotion, LookAngles, MovementIntent};
use ironsight_simulation::{
    create_headless_app, log_info, player_bundle, HeadlessBody, HudText, MovementController,
};

const TICKS: u32 = 300;

fn main() {
    let seed = 42;
    let mut app = create_headless_app(seed);
    log_info(&format!("Starting IRONSIGHT headless simulation (seed: {})", seed));

    let player = app
        .world_mut()
        .spawn((player_bundle(Vec3::ZERO), HeadlessBody::default()))
        .id();

    for tick in 0..TICKS {
        drive_player(&mut app, player, tick);

        app.world_mut()
            .resource_mut::<Time<Fixed>>()
            .advance_by(Duration::from_secs_f64(1.0 / 60.0));
        app.world_mut().run_schedule(FixedUpdate);

        if tick % 30 == 0 {
            report(&app, player, tick);
        }
    }

    log_info("Simulation complete!");
}

/// Скриптованный ввод: бежим вперёд, прыгаем, стреляем, перезаряжаемся
fn drive_player(app: &mut App, player: Entity, tick: u32) {
    let world = app.world_mut();

    let Some(forward) = world.get::<LookAngles>(player).map(|look| look.forward()) else {
        return;
    };
    let origin = world
        .get::<Transform>(player)
        .map(|transform| transform.translation + Vec3::Y * 1.5)
        .unwrap_or_default();

    if let Some(mut intent) = world.get_mut::<MovementIntent>(player) {
        intent.direction = if tick < 120 { Vec3::NEG_Z } else { Vec3::ZERO };
        intent.jump = tick == 60;
    }

    if (150..180).contains(&tick) && tick % 5 == 0 {
        world.send_event(ShootIntent {
            shooter: player,
            origin,
            direction: forward,
        });
    }

    if tick == 200 {
        world.send_event(ReloadIntent { shooter: player });
    }
}

fn report(app: &App, player: Entity, tick: u32) {
    let world = app.world();
    let (Some(transform), Some(controller), Some(motion), Some(hud)) = (
        world.get::<Transform>(player),
        world.get::<MovementController>(player),
        world.get::<CharacterMotion>(player),
        world.get::<HudText>(player),
    ) else {
        return;
    };

    log_info(&format!(
        "Tick {}: pos {:.2?} speed {:.2} grounded {} ammo {} reload {}",
        tick,
        transform.translation,
        controller.horizontal_speed(),
        motion.environment.on_floor,
        hud.ammo,
        hud.reload
    ));
}
