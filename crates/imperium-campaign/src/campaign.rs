//! Turn-based campaign evaluator.
//!
//! `Campaign` owns the faction ledgers and the world map and advances them one
//! turn per `process_turn` call: production, then AI income, then the
//! victory check, then the turn counter. Nothing else mutates the turn.

use imperium_core::config::CampaignConfig;
use imperium_core::enums::{CampaignOutcome, DiplomaticStatus, FactionId, VictoryCondition};
use imperium_core::events::CampaignEvent;
use imperium_core::resources::Resources;
use serde::{Deserialize, Serialize};

use crate::faction::FactionManager;
use crate::world_map::WorldMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CampaignStatus {
    #[default]
    NotStarted,
    Active,
    Ended(CampaignOutcome),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    config: CampaignConfig,
    factions: FactionManager,
    map: WorldMap,
    player: FactionId,
    status: CampaignStatus,
    turn: u32,
    #[serde(skip)]
    events: Vec<CampaignEvent>,
}

impl Default for Campaign {
    fn default() -> Self {
        Self::new(CampaignConfig::default())
    }
}

impl Campaign {
    /// A campaign over the default factions and map.
    pub fn new(config: CampaignConfig) -> Self {
        Self::with_world(config, FactionManager::default(), WorldMap::default())
    }

    pub fn with_world(config: CampaignConfig, factions: FactionManager, map: WorldMap) -> Self {
        Self {
            config,
            factions,
            map,
            player: FactionId::Rome,
            status: CampaignStatus::NotStarted,
            turn: 1,
            events: Vec::new(),
        }
    }

    pub fn config(&self) -> &CampaignConfig {
        &self.config
    }

    pub fn status(&self) -> CampaignStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == CampaignStatus::Active
    }

    pub fn outcome(&self) -> Option<CampaignOutcome> {
        match self.status {
            CampaignStatus::Ended(outcome) => Some(outcome),
            _ => None,
        }
    }

    pub fn current_turn(&self) -> u32 {
        self.turn
    }

    pub fn player(&self) -> FactionId {
        self.player
    }

    pub fn factions(&self) -> &FactionManager {
        &self.factions
    }

    pub fn factions_mut(&mut self) -> &mut FactionManager {
        &mut self.factions
    }

    pub fn map(&self) -> &WorldMap {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut WorldMap {
        &mut self.map
    }

    /// Begin play as `player` from turn 1. Only a campaign that has not
    /// started yet can start; a new game needs a fresh `Campaign`.
    pub fn start(&mut self, player: FactionId) -> bool {
        if self.status != CampaignStatus::NotStarted {
            tracing::warn!(?player, status = ?self.status, "campaign already started");
            return false;
        }
        if !self.factions.contains(player) {
            tracing::warn!(?player, "cannot start campaign for unknown faction");
            return false;
        }
        self.player = player;
        self.turn = 1;
        self.status = CampaignStatus::Active;
        self.events.push(CampaignEvent::Started { faction: player });
        tracing::info!(?player, "new campaign started");
        true
    }

    /// Resolve one turn. No-op unless active; returns whether a turn ran.
    pub fn process_turn(&mut self) -> bool {
        if !self.is_active() {
            tracing::debug!(status = ?self.status, "turn ignored, campaign not active");
            return false;
        }
        tracing::debug!(turn = self.turn, "processing turn");

        self.produce_resources();
        self.run_ai_factions();

        if let Some(outcome) = self.evaluate() {
            self.end(outcome);
        }

        self.turn += 1;
        self.events.push(CampaignEvent::TurnProcessed { turn: self.turn });
        tracing::info!(turn = self.turn, "turn processed");

        if self.turn > self.config.max_turns && self.is_active() {
            tracing::info!(turn = self.turn, max = self.config.max_turns, "turn limit reached");
            self.events.push(CampaignEvent::TurnLimitReached { turn: self.turn });
            self.status = CampaignStatus::Ended(CampaignOutcome::Draw);
        }
        true
    }

    /// Every owned territory pays its yield to its owner.
    fn produce_resources(&mut self) {
        for territory in self.map.territories() {
            if let Some(owner) = territory.owner() {
                self.factions.modify_resources(owner, &territory.production);
            }
        }
    }

    /// Non-player factions collect income per territory held.
    fn run_ai_factions(&mut self) {
        let ai: Vec<FactionId> = self.factions.ids().filter(|id| *id != self.player).collect();
        for id in ai {
            let held = self.map.territory_count(id) as i32;
            let income = Resources::gold_food(
                self.config.ai_gold_per_territory * held,
                self.config.ai_food_per_territory * held,
            );
            self.factions.modify_resources(id, &income);
        }
    }

    /// Conquest, then economic victory, then defeat. First match wins.
    fn evaluate(&self) -> Option<CampaignOutcome> {
        let player = self.player;
        if self.check_victory_condition(player, VictoryCondition::Conquest) {
            Some(CampaignOutcome::Victory(VictoryCondition::Conquest))
        } else if self.check_victory_condition(player, VictoryCondition::Economic) {
            Some(CampaignOutcome::Victory(VictoryCondition::Economic))
        } else if self.map.territory_count(player) == 0 {
            Some(CampaignOutcome::Defeat)
        } else {
            None
        }
    }

    fn end(&mut self, outcome: CampaignOutcome) {
        let faction = self.player;
        match outcome {
            CampaignOutcome::Victory(condition) => {
                tracing::info!(?faction, ?condition, "victory");
                self.events.push(CampaignEvent::Victory { faction, condition });
            }
            CampaignOutcome::Defeat => {
                tracing::info!(?faction, "defeat");
                self.events.push(CampaignEvent::Defeat { faction });
            }
            CampaignOutcome::Draw => {}
        }
        self.status = CampaignStatus::Ended(outcome);
    }

    /// Whether `faction` currently meets `condition`. Pure query.
    pub fn check_victory_condition(&self, faction: FactionId, condition: VictoryCondition) -> bool {
        match condition {
            VictoryCondition::Conquest => {
                self.map.territory_count(faction) >= self.config.conquest_victory_territories
            }
            VictoryCondition::Economic => self
                .factions
                .resources(faction)
                .is_some_and(|r| r.gold >= self.config.economic_victory_gold),
            VictoryCondition::Diplomatic => {
                let mut others = self.factions.ids().filter(|id| *id != faction).peekable();
                others.peek().is_some()
                    && others.all(|id| self.factions.status(faction, id) == DiplomaticStatus::Allied)
            }
        }
    }

    pub fn has_player_won(&self) -> bool {
        matches!(self.status, CampaignStatus::Ended(CampaignOutcome::Victory(_)))
    }

    pub fn has_player_lost(&self) -> bool {
        self.status == CampaignStatus::Ended(CampaignOutcome::Defeat)
    }

    pub fn drain_events(&mut self) -> Vec<CampaignEvent> {
        std::mem::take(&mut self.events)
    }
}
