//! IRONSIGHT Simulation Core
//!
//! ECS-симуляция на Bevy 0.16: first-person locomotion + weapon/combat model.
//!
//! HOST BOUNDARY:
//! - ECS = правила (velocity integration, ammo, firing, falloff damage)
//! - Host = геометрия, collision resolve, рендер, ввод (через `world` traits и события)
//!
//! Алгоритмическое ядро (`MovementController`, `Weapon`, `WeaponManager`,
//! `resolve_detonation`): обычные структуры, работают и без `App`.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// Публичные модули
pub mod combat;
pub mod components;
pub mod hud;
pub mod logger;
pub mod movement;
pub mod physics;
pub mod world;

// Re-export базовых типов для удобства
pub use combat::{CombatPlugin, CombatSet, Weapon, WeaponManager};
pub use components::*;
pub use hud::HudText;
pub use logger::*;
pub use movement::{MovementConfig, MovementController, MovementPlugin, MovementSet};
pub use world::{HeadlessArena, HeadlessBody, HeadlessHostPlugin};

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Resolve фазу движения не включает: host добавляет `HeadlessHostPlugin`
/// или свою систему в `MovementSet::Resolve`.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        // Seed мог выставить host до плагина
        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(42));
        }

        app
            // Fixed timestep 60Hz: friction откалибрована под этот tick
            .insert_resource(Time::<Fixed>::from_hz(60.0))
            .add_plugins((MovementPlugin, CombatPlugin));

        // Стреляем из позиции после движения
        app.configure_sets(FixedUpdate, CombatSet::Input.after(MovementSet::PostProcess));
        app.add_systems(FixedUpdate, hud::update_hud_text.after(CombatSet::Damage));
    }
}

/// Детерминистичный RNG resource (seeded)
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }
}

/// Bundle игрока: locomotion + стартовое оружие + HUD + точка respawn
pub fn player_bundle(spawn: Vec3) -> impl Bundle {
    (
        Player,
        SpawnPoint(spawn),
        Transform::from_translation(spawn),
        WeaponManager::player_loadout(),
        HudText::default(),
    )
}

/// Создаёт Bevy App для headless симуляции
///
/// MinimalPlugins + SimulationPlugin + арена вместо collision engine.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .add_plugins((SimulationPlugin, HeadlessHostPlugin))
        .insert_resource(Time::<Fixed>::from_hz(60.0)); // 60Hz FixedUpdate

    app
}

/// Snapshot мира для сравнения детерминизма
/// (Debug формат компонентов, отсортированных по Entity)
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
