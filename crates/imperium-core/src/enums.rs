//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Discrete camera level derived from the continuous zoom scalar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZoomLevel {
    /// Continental view, zoom 0.0 - 0.2.
    World,
    /// Regional view, zoom 0.2 - 0.4.
    #[default]
    Territory,
    /// Settlement / RTS view, zoom 0.4 - 0.6.
    City,
    /// Third-person view, zoom 0.6 - 0.8.
    Ground,
    /// Eye-level view, zoom 0.8 - 1.0.
    FirstPerson,
}

impl ZoomLevel {
    pub const ALL: [ZoomLevel; 5] = [
        ZoomLevel::World,
        ZoomLevel::Territory,
        ZoomLevel::City,
        ZoomLevel::Ground,
        ZoomLevel::FirstPerson,
    ];

    /// Position of this level in the band table.
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Coarse gameplay mode, derived from the zoom scalar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GamePhase {
    /// Campaign map, managing factions. Turns can only end here.
    #[default]
    Strategic,
    /// RTS mode with buildings and units.
    Tactical,
    /// Battle in progress.
    Combat,
    /// Controlling a single soldier.
    FirstPerson,
}

/// Playable and AI factions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FactionId {
    Rome,
    Carthage,
    Gaul,
    Greece,
    Egypt,
    Britannia,
}

impl FactionId {
    pub const ALL: [FactionId; 6] = [
        FactionId::Rome,
        FactionId::Carthage,
        FactionId::Gaul,
        FactionId::Greece,
        FactionId::Egypt,
        FactionId::Britannia,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            FactionId::Rome => "Roman Republic",
            FactionId::Carthage => "Carthage",
            FactionId::Gaul => "Gallic Tribes",
            FactionId::Greece => "Greek States",
            FactionId::Egypt => "Ptolemaic Egypt",
            FactionId::Britannia => "Briton Tribes",
        }
    }
}

impl std::str::FromStr for FactionId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FactionId::ALL
            .into_iter()
            .find(|f| format!("{f:?}").eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown faction '{s}'"))
    }
}

/// Diplomatic relationship between two factions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiplomaticStatus {
    War,
    Hostile,
    #[default]
    Neutral,
    Friendly,
    Allied,
}

/// The six counters of a faction ledger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceType {
    #[default]
    Gold,
    Food,
    Iron,
    Wood,
    Stone,
    Population,
}

/// Ways a campaign can be won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VictoryCondition {
    /// Hold the configured number of territories.
    Conquest,
    /// Accumulate the configured amount of gold.
    Economic,
    /// Be allied with every other faction.
    Diplomatic,
}

/// How an ended campaign finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampaignOutcome {
    Victory(VictoryCondition),
    Defeat,
    /// Turn cap exceeded without a decision.
    Draw,
}

/// Terrain of a map territory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainType {
    #[default]
    Plains,
    Forest,
    Mountain,
    Desert,
    Coast,
}

/// Broad unit class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitCategory {
    #[default]
    Infantry,
    Cavalry,
    Ranged,
    Siege,
}

/// Specific unit types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    #[default]
    None,
    // Infantry
    Legionary,
    Centurion,
    Velites,
    Triarii,
    Praetorian,
    // Ranged
    Sagittarii,
    Javelinmen,
    Slingers,
    // Cavalry
    Equites,
    CavalryArcher,
    // Siege
    Onager,
    Ballista,
    Ram,
}

/// Standing orders of a unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitStance {
    /// Attack on sight.
    Aggressive,
    /// Hold position.
    #[default]
    Defensive,
    /// Do not move at all.
    StandGround,
    /// Hit and run.
    Skirmish,
}

/// Formation of a group of units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormationType {
    #[default]
    None,
    Line,
    Column,
    Wedge,
    Square,
    /// Shields up; raises defense, slows movement.
    Testudo,
    Circle,
}

/// Building group, for menus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingCategory {
    Military,
    Economic,
    #[default]
    Civil,
    Defense,
}

/// Placeable building types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildingType {
    // Military
    Barracks,
    ArcheryRange,
    Stable,
    Armory,
    // Economic
    Farm,
    Mine,
    Lumbercamp,
    Market,
    // Civil
    Forum,
    Temple,
    Aqueduct,
    Amphitheater,
    // Defense
    Wall,
    Tower,
    Gate,
    Fort,
}

impl BuildingType {
    pub fn category(self) -> BuildingCategory {
        use BuildingType::*;
        match self {
            Barracks | ArcheryRange | Stable | Armory => BuildingCategory::Military,
            Farm | Mine | Lumbercamp | Market => BuildingCategory::Economic,
            Forum | Temple | Aqueduct | Amphitheater => BuildingCategory::Civil,
            Wall | Tower | Gate | Fort => BuildingCategory::Defense,
        }
    }

    pub fn display_name(self) -> &'static str {
        use BuildingType::*;
        match self {
            Barracks => "Barracks",
            ArcheryRange => "Archery Range",
            Stable => "Stable",
            Armory => "Armory",
            Farm => "Farm",
            Mine => "Mine",
            Lumbercamp => "Lumber Camp",
            Market => "Market",
            Forum => "Forum",
            Temple => "Temple",
            Aqueduct => "Aqueduct",
            Amphitheater => "Amphitheater",
            Wall => "Wall",
            Tower => "Tower",
            Gate => "Gate",
            Fort => "Fort",
        }
    }
}

/// Lifecycle of a placed building. Destroyed is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingState {
    #[default]
    Placing,
    Constructing,
    Complete,
    /// Below half health; cannot train until repaired.
    Damaged,
    Destroyed,
}
