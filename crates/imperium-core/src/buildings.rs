//! Building stat blocks.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{BuildingCategory, BuildingType, UnitType};
use crate::resources::Resources;

/// Stable handle of a building, used in events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BuildingId(pub u64);

/// Everything needed to place a building of a given type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingData {
    pub building_type: BuildingType,
    pub category: BuildingCategory,
    pub display_name: String,
    pub description: String,
    pub cost: Resources,
    /// Seconds from placement to completion.
    pub construction_time: f32,
    pub max_health: i32,
    /// Flat reduction of every hit.
    pub armor: i32,
    /// Unit types a completed building can train. Empty for non-military.
    pub trainable_units: Vec<UnitType>,
    /// Units that can wait behind the one in training.
    pub max_training_queue: usize,
}

impl BuildingData {
    /// Generic stats for `building_type`.
    pub fn new(building_type: BuildingType) -> Self {
        Self {
            building_type,
            category: building_type.category(),
            display_name: building_type.display_name().into(),
            description: String::new(),
            cost: Resources::ZERO,
            construction_time: BUILDING_CONSTRUCTION_TIME,
            max_health: BUILDING_MAX_HEALTH,
            armor: BUILDING_ARMOR,
            trainable_units: Vec::new(),
            max_training_queue: 0,
        }
    }

    /// Trains the Roman line infantry.
    pub fn barracks() -> Self {
        Self {
            description: "Trains infantry units for your armies.".into(),
            cost: Resources {
                gold: 400,
                wood: 200,
                stone: 100,
                ..Resources::ZERO
            },
            max_health: 1500,
            trainable_units: vec![UnitType::Legionary, UnitType::Velites, UnitType::Triarii],
            max_training_queue: MAX_TRAINING_QUEUE,
            ..Self::new(BuildingType::Barracks)
        }
    }

    /// Catalogue entry for `building_type`.
    pub fn preset(building_type: BuildingType) -> Self {
        match building_type {
            BuildingType::Barracks => Self::barracks(),
            other => Self::new(other),
        }
    }

    pub fn can_train(&self, unit_type: UnitType) -> bool {
        self.trainable_units.contains(&unit_type)
    }
}
