//! Commands into a session and the snapshot it reports back.

use glam::{Vec2, Vec3};
use hecs::Entity;
use imperium_campaign::CampaignStatus;
use imperium_core::enums::{BuildingType, FactionId, GamePhase, UnitType, ZoomLevel};
use imperium_core::events::{
    BuildingEvent, CameraEvent, CampaignEvent, CombatEvent, PhaseEvent, TerritoryEvent,
};
use imperium_core::resources::Resources;
use serde::{Deserialize, Serialize};

/// Player input, applied at the next tick boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionCommand {
    SetTargetZoom(f32),
    SetZoom(f32),
    /// Pan for one tick in a local direction.
    Pan(Vec2),
    FocusOn(Vec3),
    FocusOnUnit(Entity),
    EndTurn,
    MoveUnit { unit: Entity, destination: Vec3 },
    AttackUnit { unit: Entity, target: Entity },
    HoldUnit(Entity),
    StopUnit(Entity),
    /// Take direct control of a unit, releasing any previous one.
    Possess(Entity),
    Release,
    /// Build for the player inside one of the player's territories.
    PlaceBuilding {
        building: BuildingType,
        position: Vec3,
    },
    /// Pay for and queue a unit at one of the player's buildings.
    TrainUnit { building: Entity, unit: UnitType },
    /// Drop the unit in training and refund its cost.
    CancelTraining(Entity),
}

/// Everything the session's subsystems emitted during one tick, in order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", content = "event")]
pub enum SessionEvent {
    Camera(CameraEvent),
    Phase(PhaseEvent),
    Combat(CombatEvent),
    Building(BuildingEvent),
    Territory(TerritoryEvent),
    Campaign(CampaignEvent),
}

/// Serializable view of a session after a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub tick: u64,
    pub zoom: f32,
    pub zoom_level: ZoomLevel,
    pub phase: GamePhase,
    pub turn: u32,
    pub status: CampaignStatus,
    pub player: FactionId,
    pub player_resources: Resources,
    pub player_territories: usize,
    /// Living units per faction, factions without units omitted.
    pub living_units: Vec<(FactionId, usize)>,
    /// Player buildings that are not destroyed.
    pub player_buildings: usize,
    pub contested: Vec<String>,
    pub events: Vec<SessionEvent>,
}
