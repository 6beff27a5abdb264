//! Events emitted by the simulation for UI, audio and persistence
//! collaborators. Emitters buffer them; the driver drains and forwards.

use serde::{Deserialize, Serialize};

use crate::buildings::BuildingId;
use crate::enums::*;
use crate::units::UnitId;

/// Camera events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CameraEvent {
    /// The discrete zoom level changed between two ticks.
    ZoomLevelChanged { old: ZoomLevel, new: ZoomLevel },
}

/// Game mode events.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PhaseEvent {
    PhaseChanged { old: GamePhase, new: GamePhase },
}

/// Combat events, consumed by spawning and cleanup collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CombatEvent {
    /// A unit took damage after mitigation.
    Damaged {
        unit: UnitId,
        amount: f32,
        source: Option<UnitId>,
    },
    /// A unit reached zero health. Emitted once per unit.
    Died { unit: UnitId },
    /// A dead unit was removed from the field.
    Despawned { unit: UnitId },
}

/// Construction, damage and training at buildings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BuildingEvent {
    ConstructionStarted {
        building: BuildingId,
        building_type: BuildingType,
        faction: FactionId,
    },
    ConstructionComplete { building: BuildingId },
    /// Damage after armor. Zero-damage hits are still reported.
    Damaged { building: BuildingId, amount: f32 },
    Destroyed { building: BuildingId },
    /// A unit entered the queue; it starts at once if the building is idle.
    TrainingQueued {
        building: BuildingId,
        unit_type: UnitType,
    },
    TrainingCancelled {
        building: BuildingId,
        unit_type: UnitType,
    },
    UnitTrained {
        building: BuildingId,
        unit: UnitId,
        unit_type: UnitType,
    },
}

/// Territory events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TerritoryEvent {
    OwnerChanged {
        territory: String,
        owner: Option<FactionId>,
    },
    SettlementFounded { territory: String, name: String },
}

/// Campaign events, consumed by save and UI collaborators.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CampaignEvent {
    Started { faction: FactionId },
    /// A turn finished processing; `turn` is the new current turn.
    TurnProcessed { turn: u32 },
    Victory {
        faction: FactionId,
        condition: VictoryCondition,
    },
    Defeat { faction: FactionId },
    /// The turn cap was exceeded with no decision.
    TurnLimitReached { turn: u32 },
}
