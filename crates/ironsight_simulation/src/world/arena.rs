//! HeadlessArena: минимальная геометрия для headless прогонов
//!
//! Плоский пол, опциональный потолок и одна стена (плоскость x = const).
//! Реализует `EnvironmentProbe` + `ClearanceProbe` вместо настоящего
//! collision engine: headless bin и интеграционные тесты.

use bevy::prelude::*;

use super::{ClearanceProbe, Contact, ContactInfo, EnvironmentProbe, MoveResult};

/// Полуширина тела (для стены)
const BODY_HALF_WIDTH: f32 = 0.5;

/// Геометрия арены (Resource)
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct HeadlessArena {
    /// Высота пола
    pub floor_y: f32,
    /// Высота потолка (None = открытое небо)
    pub ceiling_y: Option<f32>,
    /// Стена-плоскость x = wall_x (None = нет стены)
    pub wall_x: Option<f32>,
    /// Есть ли пол вообще (false = бездна, для kill plane)
    pub has_floor: bool,
}

impl Default for HeadlessArena {
    fn default() -> Self {
        Self {
            floor_y: 0.0,
            ceiling_y: None,
            wall_x: None,
            has_floor: true,
        }
    }
}

/// Состояние тела в арене (Component)
///
/// `contacts`: результат ПРЕДЫДУЩЕГО resolve (как is_on_floor() после move-and-slide).
#[derive(Component, Debug, Clone, Copy)]
pub struct HeadlessBody {
    /// Высота тела (y-extent stance)
    pub height: f32,
    pub contacts: ContactInfo,
}

impl Default for HeadlessBody {
    fn default() -> Self {
        Self {
            height: 2.0,
            contacts: ContactInfo::default(),
        }
    }
}

impl HeadlessArena {
    /// Probe для одного тела (position = точка ног)
    pub fn probe<'a>(&'a self, position: &'a mut Vec3, body: &'a mut HeadlessBody) -> ArenaProbe<'a> {
        ArenaProbe {
            arena: self,
            position,
            body,
        }
    }
}

/// `EnvironmentProbe` поверх арены для конкретного тела
pub struct ArenaProbe<'a> {
    arena: &'a HeadlessArena,
    position: &'a mut Vec3,
    body: &'a mut HeadlessBody,
}

impl EnvironmentProbe for ArenaProbe<'_> {
    fn classify_contacts(&self) -> ContactInfo {
        self.body.contacts
    }

    fn resolve_move(&mut self, velocity: Vec3, snap: Vec3, dt: f32) -> MoveResult {
        let mut next = *self.position + velocity * dt;
        let mut achieved = velocity;
        let mut contacts = Vec::new();
        let mut info = ContactInfo::default();

        if self.arena.has_floor {
            let above_floor = next.y - self.arena.floor_y;
            let snapped = snap != Vec3::ZERO && velocity.y <= 0.0 && above_floor <= snap.length();

            if above_floor <= 0.0 || snapped {
                next.y = self.arena.floor_y;
                achieved.y = achieved.y.max(0.0);
                info.on_floor = true;
                info.floor_normal = Vec3::Y;
                contacts.push(Contact { normal: Vec3::Y });
            }
        }

        if let Some(ceiling_y) = self.arena.ceiling_y {
            if next.y + self.body.height >= ceiling_y {
                next.y = ceiling_y - self.body.height;
                achieved.y = achieved.y.min(0.0);
                info.on_ceiling = true;
                contacts.push(Contact { normal: Vec3::NEG_Y });
            }
        }

        if let Some(wall_x) = self.arena.wall_x {
            if next.x + BODY_HALF_WIDTH >= wall_x {
                next.x = wall_x - BODY_HALF_WIDTH;
                achieved.x = achieved.x.min(0.0);
                info.on_wall = true;
                contacts.push(Contact { normal: Vec3::NEG_X });
            }
        }

        *self.position = next;
        self.body.contacts = info;

        MoveResult {
            velocity: achieved,
            contacts,
        }
    }
}

impl ClearanceProbe for ArenaProbe<'_> {
    fn is_obstructed(&self, origin: Vec3, delta: Vec3) -> bool {
        let Some(ceiling_y) = self.arena.ceiling_y else {
            return false;
        };

        origin.y + self.body.height + delta.y > ceiling_y
    }
}
