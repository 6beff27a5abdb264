//! Session driver: owns every subsystem and steps them in a fixed order.
//!
//! Commands queue up between ticks and are applied at the next tick
//! boundary. Each tick runs camera, game mode, battlefield and campaign
//! bookkeeping, then returns a `SessionSnapshot` carrying the events the
//! tick produced.

use std::collections::VecDeque;

use glam::Vec3;
use hecs::Entity;
use imperium_campaign::{Campaign, CampaignStatus};
use imperium_core::buildings::{BuildingData, BuildingId};
use imperium_core::config::GameConfig;
use imperium_core::constants::DT;
use imperium_core::enums::{BuildingType, FactionId, UnitType};
use imperium_core::error::{Error, Result};
use imperium_core::events::{BuildingEvent, CameraEvent};
use imperium_core::units::UnitData;
use imperium_sim::{Battlefield, SeamlessZoomCamera};

use crate::game_mode::GameMode;
use crate::state::{SessionCommand, SessionEvent, SessionSnapshot};

pub struct Session {
    config: GameConfig,
    camera: SeamlessZoomCamera,
    game_mode: GameMode,
    battlefield: Battlefield,
    campaign: Campaign,
    commands: VecDeque<SessionCommand>,
    possessed: Option<Entity>,
    tick: u64,
    events: Vec<SessionEvent>,
}

impl Session {
    /// Validate `config` and start a campaign as `player`.
    pub fn new(config: GameConfig, player: FactionId) -> Result<Self> {
        config.validate()?;
        let campaign = Campaign::new(config.campaign.clone());
        Self::with_campaign(config, campaign, player)
    }

    /// Resume from an existing campaign. A campaign that is not yet running
    /// is started as `player`.
    pub fn with_campaign(config: GameConfig, mut campaign: Campaign, player: FactionId) -> Result<Self> {
        if campaign.status() == CampaignStatus::NotStarted
            && !campaign.start(player)
        {
            return Err(Error::UnknownFaction(player));
        }

        let camera = SeamlessZoomCamera::new(&config.camera);
        let mut game_mode = GameMode::new();
        game_mode.on_zoom_level_changed(camera.zoom());
        // Initial phase is setup, not a transition.
        game_mode.drain_events();

        Ok(Self {
            battlefield: Battlefield::new(config.combat.clone()),
            config,
            camera,
            game_mode,
            campaign,
            commands: VecDeque::new(),
            possessed: None,
            tick: 0,
            events: Vec::new(),
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn camera(&self) -> &SeamlessZoomCamera {
        &self.camera
    }

    pub fn game_mode(&self) -> &GameMode {
        &self.game_mode
    }

    pub fn battlefield(&self) -> &Battlefield {
        &self.battlefield
    }

    pub fn battlefield_mut(&mut self) -> &mut Battlefield {
        &mut self.battlefield
    }

    pub fn campaign(&self) -> &Campaign {
        &self.campaign
    }

    pub fn campaign_mut(&mut self) -> &mut Campaign {
        &mut self.campaign
    }

    pub fn possessed(&self) -> Option<Entity> {
        self.possessed
    }

    pub fn queue_command(&mut self, command: SessionCommand) {
        self.commands.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SessionCommand>) {
        self.commands.extend(commands);
    }

    /// Advance one fixed step.
    pub fn step(&mut self) -> SessionSnapshot {
        self.tick(DT)
    }

    /// Advance by `dt` seconds and report the resulting state.
    pub fn tick(&mut self, dt: f32) -> SessionSnapshot {
        let dt = dt.max(0.0);
        while let Some(command) = self.commands.pop_front() {
            self.handle_command(command, dt);
        }

        // 1. Camera easing and focus follow
        let battlefield = &self.battlefield;
        self.camera.tick(dt, |unit| battlefield.position(unit));

        // 2. Zoom level changes drive the game phase
        for event in self.camera.drain_events() {
            if let CameraEvent::ZoomLevelChanged { .. } = event {
                self.game_mode.on_zoom_level_changed(self.camera.zoom());
            }
            self.events.push(SessionEvent::Camera(event));
        }
        self.events
            .extend(self.game_mode.drain_events().into_iter().map(SessionEvent::Phase));

        // 3. Battlefield orders, combat, buildings and cleanup
        self.battlefield.tick(dt);
        self.events
            .extend(self.battlefield.drain_events().into_iter().map(SessionEvent::Combat));
        self.collect_building_events();
        if self
            .possessed
            .is_some_and(|unit| !self.battlefield.combatant(unit).is_some_and(|u| u.is_alive()))
        {
            tracing::info!("possessed unit lost, releasing control");
            self.possessed = None;
        }

        // 4. Campaign and territory events
        self.collect_campaign_events();

        self.tick += 1;
        self.snapshot()
    }

    fn handle_command(&mut self, command: SessionCommand, dt: f32) {
        match command {
            SessionCommand::SetTargetZoom(zoom) => self.camera.set_target_zoom(zoom),
            SessionCommand::SetZoom(zoom) => self.camera.set_zoom(zoom),
            SessionCommand::Pan(direction) => self.camera.pan(direction, dt),
            SessionCommand::FocusOn(point) => self.camera.focus_on(point),
            SessionCommand::FocusOnUnit(unit) => self.camera.focus_on_unit(unit),
            SessionCommand::EndTurn => {
                self.game_mode.end_turn(&mut self.campaign);
            }
            SessionCommand::MoveUnit { unit, destination } => {
                self.battlefield.command_move_to(unit, destination)
            }
            SessionCommand::AttackUnit { unit, target } => {
                self.battlefield.command_attack(unit, target);
            }
            SessionCommand::HoldUnit(unit) => self.battlefield.command_hold(unit),
            SessionCommand::StopUnit(unit) => self.battlefield.command_stop(unit),
            SessionCommand::Possess(unit) => self.possess(unit),
            SessionCommand::Release => self.release(),
            SessionCommand::PlaceBuilding { building, position } => {
                self.place_building(building, position);
            }
            SessionCommand::TrainUnit { building, unit } => {
                self.train_unit(building, unit);
            }
            SessionCommand::CancelTraining(building) => self.cancel_training(building),
        }
    }

    /// Territory id under `position` if the player owns it.
    fn player_territory_at(&self, position: Vec3) -> Option<String> {
        let player = self.campaign.player();
        self.campaign
            .map()
            .territory_at(position)
            .filter(|t| t.owner() == Some(player))
            .map(|t| t.id.clone())
    }

    /// Charge the player, take a territory slot and start construction.
    fn place_building(&mut self, building_type: BuildingType, position: Vec3) -> bool {
        let data = BuildingData::preset(building_type);
        let player = self.campaign.player();
        let Some(territory) = self.player_territory_at(position) else {
            tracing::warn!(?building_type, "can only build inside own territory");
            return false;
        };
        if !self.campaign.factions().can_afford(player, &data.cost) {
            tracing::warn!(?building_type, "cannot afford building");
            return false;
        }
        if !self
            .campaign
            .map_mut()
            .register_building(&territory, &data.display_name)
        {
            tracing::warn!(?building_type, %territory, "no building slot");
            return false;
        }
        if !self.campaign.factions_mut().deduct(player, &data.cost) {
            self.campaign
                .map_mut()
                .remove_building(&territory, &data.display_name);
            return false;
        }
        self.battlefield.place_building(data, player, position);
        true
    }

    /// Owner of `building` if it belongs to the player.
    fn player_building(&self, building: Entity) -> Option<FactionId> {
        let faction = self.battlefield.building(building)?.faction;
        (faction == self.campaign.player()).then_some(faction)
    }

    fn train_unit(&mut self, building: Entity, unit_type: UnitType) -> bool {
        let Some(data) = UnitData::preset(unit_type) else {
            tracing::warn!(?unit_type, "unit type cannot be trained");
            return false;
        };
        let Some(faction) = self.player_building(building) else {
            tracing::warn!("training needs one of the player's buildings");
            return false;
        };
        if !self.battlefield.can_train(building, unit_type) {
            tracing::warn!(?unit_type, "building cannot train this unit now");
            return false;
        }
        if !self.campaign.factions_mut().deduct(faction, &data.cost) {
            tracing::warn!(?unit_type, "cannot afford unit");
            return false;
        }
        self.battlefield.train_unit(building, data)
    }

    fn cancel_training(&mut self, building: Entity) {
        let Some(faction) = self.player_building(building) else {
            tracing::warn!("cancel needs one of the player's buildings");
            return;
        };
        if let Some(unit) = self.battlefield.cancel_training(building) {
            self.campaign
                .factions_mut()
                .modify_resources(faction, &unit.cost);
        }
    }

    /// Forward building events; a destroyed building frees its territory slot.
    fn collect_building_events(&mut self) {
        for event in self.battlefield.drain_building_events() {
            if let BuildingEvent::Destroyed { building } = event {
                self.free_building_slot(building);
            }
            self.events.push(SessionEvent::Building(event));
        }
    }

    fn free_building_slot(&mut self, id: BuildingId) {
        let Some(entity) = self.battlefield.building_entity(id) else {
            return;
        };
        let Some(position) = self.battlefield.position(entity) else {
            return;
        };
        let Some(name) = self
            .battlefield
            .building(entity)
            .map(|b| b.data.display_name.clone())
        else {
            return;
        };
        let territory = self
            .campaign
            .map()
            .territory_at(position)
            .map(|t| t.id.clone());
        if let Some(territory) = territory {
            self.campaign.map_mut().remove_building(&territory, &name);
        }
    }

    fn possess(&mut self, unit: Entity) {
        let alive = self.battlefield.combatant(unit).is_some_and(|u| u.is_alive());
        if !alive {
            tracing::warn!("cannot possess a missing or dead unit");
            return;
        }
        self.release();
        self.battlefield.set_possessed(unit, true);
        self.camera.focus_on_unit(unit);
        self.possessed = Some(unit);
    }

    fn release(&mut self) {
        if let Some(unit) = self.possessed.take() {
            self.battlefield.set_possessed(unit, false);
        }
    }

    fn collect_campaign_events(&mut self) {
        self.events.extend(
            self.campaign
                .map_mut()
                .drain_events()
                .into_iter()
                .map(SessionEvent::Territory),
        );
        self.events.extend(
            self.campaign
                .drain_events()
                .into_iter()
                .map(SessionEvent::Campaign),
        );
    }

    fn snapshot(&mut self) -> SessionSnapshot {
        let player = self.campaign.player();
        let living_units = FactionId::ALL
            .iter()
            .map(|f| (*f, self.battlefield.living_units(*f)))
            .filter(|(_, n)| *n > 0)
            .collect();
        let presence = self.battlefield.unit_presence();
        let contested = self
            .campaign
            .map()
            .contested(&presence)
            .into_iter()
            .map(str::to_string)
            .collect();

        SessionSnapshot {
            tick: self.tick,
            zoom: self.camera.zoom(),
            zoom_level: self.camera.zoom_level(),
            phase: self.game_mode.phase(),
            turn: self.campaign.current_turn(),
            status: self.campaign.status(),
            player,
            player_resources: self
                .campaign
                .factions()
                .resources(player)
                .copied()
                .unwrap_or_default(),
            player_territories: self.campaign.map().territory_count(player),
            living_units,
            player_buildings: self.battlefield.standing_buildings(player),
            contested,
            events: std::mem::take(&mut self.events),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imperium_core::events::CampaignEvent;

    #[test]
    fn test_unknown_player_faction_rejected() {
        let result = Session::new(GameConfig::default(), FactionId::Britannia);
        assert!(matches!(result, Err(Error::UnknownFaction(FactionId::Britannia))));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = GameConfig::default();
        config.campaign.max_turns = 0;
        assert!(matches!(
            Session::new(config, FactionId::Rome),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_initial_snapshot() {
        let mut session = Session::new(GameConfig::default(), FactionId::Rome).unwrap();
        let snap = session.step();
        assert_eq!(snap.tick, 1);
        assert_eq!(snap.turn, 1);
        assert_eq!(snap.player_territories, 1);
        assert!(snap.living_units.is_empty());
        assert_eq!(
            snap.events,
            vec![SessionEvent::Campaign(CampaignEvent::Started {
                faction: FactionId::Rome
            })]
        );
        assert!(session.step().events.is_empty());
        assert_eq!(session.campaign().player(), FactionId::Rome);
    }
}
