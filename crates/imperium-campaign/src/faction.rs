//! Playable factions, their resource ledgers and the diplomacy table.

use imperium_core::enums::{DiplomaticStatus, FactionId};
use imperium_core::resources::Resources;
use serde::{Deserialize, Serialize};

/// Static description of a faction plus its ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactionInfo {
    pub id: FactionId,
    pub display_name: String,
    pub description: String,
    /// Linear RGBA banner colour.
    pub color: [f32; 4],
    pub infantry_bonus: f32,
    pub cavalry_bonus: f32,
    /// Multiplies starting gold.
    pub economy_bonus: f32,
    pub unique_units: Vec<String>,
    pub unique_buildings: Vec<String>,
    pub resources: Resources,
}

impl FactionInfo {
    #[allow(clippy::too_many_arguments)]
    fn new(
        id: FactionId,
        description: &str,
        color: [f32; 4],
        infantry_bonus: f32,
        cavalry_bonus: f32,
        economy_bonus: f32,
        unique_units: &[&str],
        unique_buildings: &[&str],
    ) -> Self {
        let mut resources = Resources::starting();
        resources.gold = (resources.gold as f32 * economy_bonus).round() as i32;
        Self {
            id,
            display_name: id.display_name().to_string(),
            description: description.to_string(),
            color,
            infantry_bonus,
            cavalry_bonus,
            economy_bonus,
            unique_units: unique_units.iter().map(|s| s.to_string()).collect(),
            unique_buildings: unique_buildings.iter().map(|s| s.to_string()).collect(),
            resources,
        }
    }
}

/// Relation between two distinct factions. Stored once per unordered pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiplomaticRelation {
    pub a: FactionId,
    pub b: FactionId,
    pub status: DiplomaticStatus,
    /// -100 (hatred) to 100 (brotherhood).
    pub score: i32,
}

impl DiplomaticRelation {
    fn involves(&self, x: FactionId, y: FactionId) -> bool {
        (self.a == x && self.b == y) || (self.a == y && self.b == x)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactionManager {
    factions: Vec<FactionInfo>,
    relations: Vec<DiplomaticRelation>,
}

impl Default for FactionManager {
    /// Rome, Carthage and Gaul at the start of the Punic Wars.
    fn default() -> Self {
        let factions = vec![
            FactionInfo::new(
                FactionId::Rome,
                "The mighty Roman Republic, known for disciplined legions.",
                [0.8, 0.1, 0.1, 1.0],
                1.2,
                1.0,
                1.1,
                &["Legionary", "Praetorian"],
                &["Colosseum"],
            ),
            FactionInfo::new(
                FactionId::Carthage,
                "The great trading empire of the Mediterranean.",
                [0.5, 0.0, 0.5, 1.0],
                0.9,
                1.1,
                1.3,
                &["WarElephant", "SacredBand"],
                &["TradePort"],
            ),
            FactionInfo::new(
                FactionId::Gaul,
                "Fierce Celtic warriors from the northern forests.",
                [0.1, 0.6, 0.1, 1.0],
                1.1,
                1.2,
                0.9,
                &["NakedFanatic", "NobleCavalry"],
                &["SacredGrove"],
            ),
        ];

        let mut manager = Self {
            factions,
            relations: Vec::new(),
        };
        manager.set_relation(FactionId::Rome, FactionId::Carthage, DiplomaticStatus::War, -80);
        manager.set_relation(FactionId::Rome, FactionId::Gaul, DiplomaticStatus::Hostile, -40);
        manager.set_relation(FactionId::Carthage, FactionId::Gaul, DiplomaticStatus::Neutral, 0);
        tracing::debug!(factions = manager.factions.len(), "factions initialized");
        manager
    }
}

impl FactionManager {
    pub fn factions(&self) -> &[FactionInfo] {
        &self.factions
    }

    pub fn ids(&self) -> impl Iterator<Item = FactionId> + '_ {
        self.factions.iter().map(|f| f.id)
    }

    pub fn contains(&self, id: FactionId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: FactionId) -> Option<&FactionInfo> {
        self.factions.iter().find(|f| f.id == id)
    }

    pub fn resources(&self, id: FactionId) -> Option<&Resources> {
        self.get(id).map(|f| &f.resources)
    }

    pub fn resources_mut(&mut self, id: FactionId) -> Option<&mut Resources> {
        self.factions
            .iter_mut()
            .find(|f| f.id == id)
            .map(|f| &mut f.resources)
    }

    /// Add `delta` to a faction's ledger. Unknown factions are skipped.
    pub fn modify_resources(&mut self, id: FactionId, delta: &Resources) {
        match self.resources_mut(id) {
            Some(ledger) => ledger.add(delta),
            None => tracing::warn!(?id, "resource change for unknown faction ignored"),
        }
    }

    pub fn can_afford(&self, id: FactionId, cost: &Resources) -> bool {
        self.resources(id).is_some_and(|r| r.can_afford(cost))
    }

    /// Spend `cost` if affordable. All or nothing.
    pub fn deduct(&mut self, id: FactionId, cost: &Resources) -> bool {
        self.resources_mut(id).is_some_and(|r| r.try_spend(cost))
    }

    /// Status between two factions. A faction is allied with itself; pairs
    /// never set are neutral.
    pub fn status(&self, x: FactionId, y: FactionId) -> DiplomaticStatus {
        if x == y {
            return DiplomaticStatus::Allied;
        }
        self.relation(x, y)
            .map(|r| r.status)
            .unwrap_or(DiplomaticStatus::Neutral)
    }

    pub fn relation(&self, x: FactionId, y: FactionId) -> Option<&DiplomaticRelation> {
        self.relations.iter().find(|r| r.involves(x, y))
    }

    /// Change the status between two factions, keeping the score.
    pub fn set_status(&mut self, x: FactionId, y: FactionId, status: DiplomaticStatus) {
        let score = self.relation(x, y).map(|r| r.score).unwrap_or(0);
        self.set_relation(x, y, status, score);
    }

    pub fn set_relation(&mut self, x: FactionId, y: FactionId, status: DiplomaticStatus, score: i32) {
        if x == y {
            tracing::warn!(?x, "a faction has no relation with itself");
            return;
        }
        let score = score.clamp(-100, 100);
        match self.relations.iter_mut().find(|r| r.involves(x, y)) {
            Some(rel) => {
                rel.status = status;
                rel.score = score;
            }
            None => self.relations.push(DiplomaticRelation {
                a: x,
                b: y,
                status,
                score,
            }),
        }
        tracing::info!(?x, ?y, ?status, score, "diplomatic status changed");
    }

    pub fn at_war(&self, x: FactionId, y: FactionId) -> bool {
        self.status(x, y) == DiplomaticStatus::War
    }

    pub fn allied(&self, x: FactionId, y: FactionId) -> bool {
        self.status(x, y) == DiplomaticStatus::Allied
    }
}
