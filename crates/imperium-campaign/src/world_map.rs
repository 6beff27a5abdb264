//! The campaign map: a set of territories laid out on a grid.

use glam::Vec3;
use imperium_core::constants::{TERRITORY_ADJACENCY_FACTOR, TERRITORY_SIZE};
use imperium_core::enums::{FactionId, TerrainType};
use imperium_core::events::TerritoryEvent;
use serde::{Deserialize, Serialize};

use crate::territory::Territory;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldMap {
    territory_size: f32,
    territories: Vec<Territory>,
    #[serde(skip)]
    events: Vec<TerritoryEvent>,
}

impl Default for WorldMap {
    fn default() -> Self {
        Self::mediterranean()
    }
}

impl WorldMap {
    /// An empty map with square territories of side `territory_size`.
    pub fn new(territory_size: f32) -> Self {
        Self {
            territory_size,
            territories: Vec::new(),
            events: Vec::new(),
        }
    }

    /// The 3x3 starting map:
    ///
    /// ```text
    /// Gaul      Alps   Greece
    /// Hispania  Rome   Macedonia
    /// Africa    Sicily Egypt
    /// ```
    ///
    /// Gaul, Rome and Africa start owned by Gaul, Rome and Carthage; Rome
    /// and Africa start with the settlements Roma and Carthago.
    pub fn mediterranean() -> Self {
        let s = TERRITORY_SIZE;
        let mut map = Self::new(s);
        let layout: [(&str, &str, TerrainType, f32, f32, Option<FactionId>); 9] = [
            ("Gaul", "Gallia", TerrainType::Forest, -s, s, Some(FactionId::Gaul)),
            ("Alps", "Alpine Passes", TerrainType::Mountain, 0.0, s, None),
            ("Greece", "Graecia", TerrainType::Coast, s, s, None),
            ("Hispania", "Hispania", TerrainType::Plains, -s, 0.0, None),
            ("Rome", "Italia", TerrainType::Plains, 0.0, 0.0, Some(FactionId::Rome)),
            ("Macedonia", "Macedonia", TerrainType::Mountain, s, 0.0, None),
            ("Africa", "Africa", TerrainType::Desert, -s, -s, Some(FactionId::Carthage)),
            ("Sicily", "Sicilia", TerrainType::Coast, 0.0, -s, None),
            ("Egypt", "Aegyptus", TerrainType::Desert, s, -s, None),
        ];
        for (id, name, terrain, x, y, owner) in layout {
            let mut territory = Territory::new(id, name, terrain, Vec3::new(x, y, 0.0));
            territory.set_owner(owner);
            map.add_territory(territory);
        }
        map.found_settlement("Rome", "Roma");
        map.found_settlement("Africa", "Carthago");
        // Setup is not news.
        map.events.clear();
        tracing::debug!(territories = map.territories.len(), "generated default map");
        map
    }

    pub fn territory_size(&self) -> f32 {
        self.territory_size
    }

    /// Add a territory. Rejected if the id is taken.
    pub fn add_territory(&mut self, territory: Territory) -> bool {
        if self.get(&territory.id).is_some() {
            tracing::warn!(territory = %territory.id, "duplicate territory id");
            return false;
        }
        self.territories.push(territory);
        true
    }

    pub fn territories(&self) -> &[Territory] {
        &self.territories
    }

    pub fn len(&self) -> usize {
        self.territories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.territories.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Territory> {
        self.territories.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut Territory> {
        self.territories.iter_mut().find(|t| t.id == id)
    }

    /// Territory whose bounds contain a ground point.
    pub fn territory_at(&self, location: Vec3) -> Option<&Territory> {
        self.territories.iter().find(|t| t.contains(location))
    }

    /// Centres within 1.5 territory sizes, so diagonals count.
    pub fn are_adjacent(&self, a: &str, b: &str) -> bool {
        if a == b {
            return false;
        }
        match (self.get(a), self.get(b)) {
            (Some(a), Some(b)) => {
                a.location.distance(b.location) <= self.territory_size * TERRITORY_ADJACENCY_FACTOR
            }
            _ => false,
        }
    }

    pub fn neighbours(&self, id: &str) -> Vec<&Territory> {
        self.territories
            .iter()
            .filter(|t| self.are_adjacent(id, &t.id))
            .collect()
    }

    /// Transfer ownership. False if the territory is unknown.
    pub fn set_owner(&mut self, id: &str, owner: Option<FactionId>) -> bool {
        let Some(territory) = self.get_mut(id) else {
            tracing::warn!(territory = id, "unknown territory");
            return false;
        };
        if let Some(event) = territory.set_owner(owner) {
            self.events.push(event);
        }
        true
    }

    /// Found a settlement. False if the territory is unknown or settled.
    pub fn found_settlement(&mut self, id: &str, name: &str) -> bool {
        let Some(territory) = self.get_mut(id) else {
            tracing::warn!(territory = id, "unknown territory");
            return false;
        };
        match territory.found_settlement(name) {
            Some(event) => {
                self.events.push(event);
                true
            }
            None => false,
        }
    }

    /// Take a building slot in territory `id`.
    pub fn register_building(&mut self, id: &str, building: &str) -> bool {
        self.get_mut(id).is_some_and(|t| t.register_building(building))
    }

    pub fn remove_building(&mut self, id: &str, building: &str) -> bool {
        self.get_mut(id).is_some_and(|t| t.remove_building(building))
    }

    pub fn owned_by(&self, faction: FactionId) -> impl Iterator<Item = &Territory> + '_ {
        self.territories
            .iter()
            .filter(move |t| t.owner() == Some(faction))
    }

    pub fn territory_count(&self, faction: FactionId) -> usize {
        self.owned_by(faction).count()
    }

    /// Ids of territories contested by the given unit presence.
    pub fn contested(&self, presence: &[(Vec3, FactionId)]) -> Vec<&str> {
        self.territories
            .iter()
            .filter(|t| t.is_contested(presence))
            .map(|t| t.id.as_str())
            .collect()
    }

    pub fn drain_events(&mut self) -> Vec<TerritoryEvent> {
        std::mem::take(&mut self.events)
    }
}
