//! Ownable map regions.

use glam::Vec3;
use imperium_core::constants::*;
use imperium_core::enums::{FactionId, ResourceType, TerrainType};
use imperium_core::events::TerritoryEvent;
use imperium_core::resources::Resources;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub name: String,
    pub population: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Territory {
    pub id: String,
    pub name: String,
    pub description: String,
    pub terrain: TerrainType,
    /// Centre of the square bounds.
    pub location: Vec3,
    pub half_extent: f32,
    owner: Option<FactionId>,
    /// Per-turn yield added to the owner's ledger.
    pub production: Resources,
    pub bonus_resource: ResourceType,
    settlement: Option<Settlement>,
    pub max_building_slots: usize,
    buildings: Vec<String>,
}

impl Territory {
    pub fn new(id: &str, name: &str, terrain: TerrainType, location: Vec3) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            terrain,
            location,
            half_extent: TERRITORY_SIZE * 0.5,
            owner: None,
            production: Resources::gold_food(TERRITORY_BASE_GOLD, TERRITORY_BASE_FOOD),
            bonus_resource: ResourceType::Gold,
            settlement: None,
            max_building_slots: MAX_BUILDING_SLOTS,
            buildings: Vec::new(),
        }
    }

    pub fn owner(&self) -> Option<FactionId> {
        self.owner
    }

    /// Transfer ownership. Returns the change event, or `None` if the owner
    /// is unchanged.
    pub fn set_owner(&mut self, owner: Option<FactionId>) -> Option<TerritoryEvent> {
        if self.owner == owner {
            return None;
        }
        self.owner = owner;
        tracing::info!(territory = %self.id, ?owner, "territory owner changed");
        Some(TerritoryEvent::OwnerChanged {
            territory: self.id.clone(),
            owner,
        })
    }

    /// Whether a ground point lies inside the square bounds (edges included).
    pub fn contains(&self, point: Vec3) -> bool {
        (point.x - self.location.x).abs() <= self.half_extent
            && (point.y - self.location.y).abs() <= self.half_extent
    }

    /// True iff living units of two or more factions stand inside.
    pub fn is_contested(&self, presence: &[(Vec3, FactionId)]) -> bool {
        let mut first: Option<FactionId> = None;
        for (point, faction) in presence {
            if !self.contains(*point) {
                continue;
            }
            match first {
                None => first = Some(*faction),
                Some(seen) if seen != *faction => return true,
                Some(_) => {}
            }
        }
        false
    }

    pub fn settlement(&self) -> Option<&Settlement> {
        self.settlement.as_ref()
    }

    pub fn has_settlement(&self) -> bool {
        self.settlement.is_some()
    }

    pub fn population(&self) -> i32 {
        self.settlement.as_ref().map_or(0, |s| s.population)
    }

    /// Found a settlement, boosting production. Refused if one exists.
    pub fn found_settlement(&mut self, name: &str) -> Option<TerritoryEvent> {
        if self.settlement.is_some() {
            tracing::warn!(territory = %self.id, "territory already has a settlement");
            return None;
        }
        self.settlement = Some(Settlement {
            name: name.to_string(),
            population: SETTLEMENT_START_POPULATION,
        });
        self.production += Resources::gold_food(SETTLEMENT_GOLD_BONUS, SETTLEMENT_FOOD_BONUS);
        tracing::info!(territory = %self.id, settlement = name, "settlement founded");
        Some(TerritoryEvent::SettlementFounded {
            territory: self.id.clone(),
            name: name.to_string(),
        })
    }

    pub fn buildings(&self) -> &[String] {
        &self.buildings
    }

    /// Register a building by name. False if already present or out of slots.
    pub fn register_building(&mut self, building: &str) -> bool {
        if self.buildings.iter().any(|b| b == building) {
            return false;
        }
        if self.buildings.len() >= self.max_building_slots {
            tracing::warn!(territory = %self.id, "territory is at max building capacity");
            return false;
        }
        self.buildings.push(building.to_string());
        true
    }

    /// Free the slot of a building. False if it was not registered.
    pub fn remove_building(&mut self, building: &str) -> bool {
        let before = self.buildings.len();
        self.buildings.retain(|b| b != building);
        self.buildings.len() != before
    }
}
