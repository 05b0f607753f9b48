//! Movement events

use bevy::prelude::*;

/// Event: relative mouse motion (host input → ECS)
#[derive(Event, Debug, Clone)]
pub struct LookInput {
    pub entity: Entity,
    /// Смещение мыши в пикселях
    pub relative: Vec2,
}

/// Event: запрос присесть / встать
///
/// Обрабатывается host-системой, которая владеет `ClearanceProbe`.
#[derive(Event, Debug, Clone)]
pub struct CrouchIntent {
    pub entity: Entity,
    pub crouch: bool,
}

/// Event: stance сменился (ECS → host: сдвинуть камеру/тело)
#[derive(Event, Debug, Clone)]
pub struct StanceChanged {
    pub entity: Entity,
    pub crouched: bool,
    pub translation: Vec3,
}

/// Event: актор вошёл в trigger volume лестницы
///
/// Генерируется host'ом (trigger enter). Ladder entity должна иметь `Ladder` + `Transform`.
#[derive(Event, Debug, Clone)]
pub struct LadderEntered {
    pub entity: Entity,
    pub ladder: Entity,
}

/// Event: актор покинул trigger volume лестницы
#[derive(Event, Debug, Clone)]
pub struct LadderExited {
    pub entity: Entity,
    pub ladder: Entity,
}

/// Event: актор упал ниже kill plane и возвращён на spawn
#[derive(Event, Debug, Clone)]
pub struct CharacterRespawned {
    pub entity: Entity,
    pub position: Vec3,
}
