//! ECS components of a unit on the battlefield. `Combatant` and
//! `LegionaryKit` are components too.

use glam::Vec3;
use hecs::Entity;
use serde::{Deserialize, Serialize};

/// World-space position (cm).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec3);

/// Standing RTS orders. Ignored while the unit is possessed.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Orders {
    pub destination: Option<Vec3>,
    pub target: Option<Entity>,
}

/// Marks a dead unit awaiting removal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corpse {
    pub remaining: f32,
}
