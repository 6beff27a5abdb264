//! Tunable configuration, grouped per subsystem.
//!
//! Every field defaults to the matching constant, and every section is
//! `#[serde(default)]`, so a JSON file only needs the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::{Error, Result};

/// Camera anchors and easing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub initial_zoom: f32,
    /// Exponential easing rate. Zero or negative snaps instantly.
    pub zoom_interp_speed: f32,
    pub focus_follow_speed: f32,
    /// Arm length at each zoom level, World first.
    pub heights: [f32; 5],
    /// Pitch at each zoom level, World first.
    pub pitches: [f32; 5],
    pub world_fov: f32,
    pub first_person_fov: f32,
    pub world_pan_speed: f32,
    pub city_pan_speed: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            initial_zoom: INITIAL_ZOOM,
            zoom_interp_speed: ZOOM_INTERP_SPEED,
            focus_follow_speed: FOCUS_FOLLOW_SPEED,
            heights: CAMERA_HEIGHTS,
            pitches: CAMERA_PITCHES,
            world_fov: WORLD_VIEW_FOV,
            first_person_fov: FIRST_PERSON_FOV,
            world_pan_speed: WORLD_PAN_SPEED,
            city_pan_speed: CITY_PAN_SPEED,
        }
    }
}

/// Combat bookkeeping rates and costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    pub base_attack_cooldown: f32,
    pub attack_stamina_cost: f32,
    pub dodge_stamina_cost: f32,
    pub pilum_stamina_cost: f32,
    pub stamina_regen_rate: f32,
    pub block_defense_bonus: f32,
    pub corpse_lifetime: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            base_attack_cooldown: BASE_ATTACK_COOLDOWN,
            attack_stamina_cost: ATTACK_STAMINA_COST,
            dodge_stamina_cost: DODGE_STAMINA_COST,
            pilum_stamina_cost: PILUM_STAMINA_COST,
            stamina_regen_rate: STAMINA_REGEN_RATE,
            block_defense_bonus: BLOCK_DEFENSE_BONUS,
            corpse_lifetime: CORPSE_LIFETIME,
        }
    }
}

/// Turn cap, victory thresholds and AI income.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignConfig {
    pub max_turns: u32,
    pub conquest_victory_territories: usize,
    pub economic_victory_gold: i32,
    pub ai_gold_per_territory: i32,
    pub ai_food_per_territory: i32,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            max_turns: MAX_TURNS,
            conquest_victory_territories: CONQUEST_VICTORY_TERRITORIES,
            economic_victory_gold: ECONOMIC_VICTORY_GOLD,
            ai_gold_per_territory: AI_GOLD_PER_TERRITORY,
            ai_food_per_territory: AI_FOOD_PER_TERRITORY,
        }
    }
}

/// Complete configuration of a game session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub camera: CameraConfig,
    pub combat: CombatConfig,
    pub campaign: CampaignConfig,
}

impl GameConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let config = Self::from_json(&json)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        let cam = &self.camera;
        let finite = cam
            .heights
            .iter()
            .chain(cam.pitches.iter())
            .chain([
                &cam.initial_zoom,
                &cam.zoom_interp_speed,
                &cam.focus_follow_speed,
                &cam.world_fov,
                &cam.first_person_fov,
                &cam.world_pan_speed,
                &cam.city_pan_speed,
            ])
            .all(|v| v.is_finite());
        if !finite {
            return Err(Error::InvalidConfig("camera values must be finite".into()));
        }
        if !(ZOOM_MIN..=ZOOM_MAX).contains(&cam.initial_zoom) {
            return Err(Error::InvalidConfig(format!(
                "initial_zoom {} outside [{ZOOM_MIN}, {ZOOM_MAX}]",
                cam.initial_zoom
            )));
        }

        let combat = &self.combat;
        let costs = [
            ("base_attack_cooldown", combat.base_attack_cooldown),
            ("attack_stamina_cost", combat.attack_stamina_cost),
            ("dodge_stamina_cost", combat.dodge_stamina_cost),
            ("pilum_stamina_cost", combat.pilum_stamina_cost),
            ("stamina_regen_rate", combat.stamina_regen_rate),
            ("block_defense_bonus", combat.block_defense_bonus),
            ("corpse_lifetime", combat.corpse_lifetime),
        ];
        for (name, value) in costs {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if combat.base_attack_cooldown <= 0.0 {
            return Err(Error::InvalidConfig(
                "base_attack_cooldown must be positive".into(),
            ));
        }

        let campaign = &self.campaign;
        if campaign.max_turns == 0 {
            return Err(Error::InvalidConfig("max_turns must be at least 1".into()));
        }
        if campaign.ai_gold_per_territory < 0 || campaign.ai_food_per_territory < 0 {
            return Err(Error::InvalidConfig("AI income must be non-negative".into()));
        }
        Ok(())
    }
}
