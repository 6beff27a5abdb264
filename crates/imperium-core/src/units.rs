//! Unit stat blocks and the unit catalogue.

use serde::{Deserialize, Serialize};

use crate::enums::{UnitCategory, UnitType};
use crate::resources::Resources;

/// Stable handle of a unit, used in events and saves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u64);

/// Base combat stats of a unit type.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitStats {
    pub max_health: i32,
    pub melee_attack: i32,
    pub ranged_attack: i32,
    pub melee_defense: i32,
    pub ranged_defense: i32,
    /// Flat reduction applied after the defense multiplier.
    pub armor: i32,
    /// Walk speed (cm/s).
    pub speed: f32,
    pub morale: i32,
    /// Maximum stamina.
    pub stamina: f32,
    /// Divides the attack cooldown.
    pub attack_speed: f32,
    /// Scales the blocking defense bonus.
    pub block_strength: f32,
    /// Scales the dodge launch.
    pub dodge_speed: f32,
}

impl Default for UnitStats {
    fn default() -> Self {
        Self {
            max_health: 100,
            melee_attack: 10,
            ranged_attack: 0,
            melee_defense: 8,
            ranged_defense: 5,
            armor: 3,
            speed: 300.0,
            morale: 50,
            stamina: 100.0,
            attack_speed: 1.0,
            block_strength: 1.0,
            dodge_speed: 1.0,
        }
    }
}

/// Everything needed to spawn a unit of a given type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitData {
    pub unit_type: UnitType,
    pub category: UnitCategory,
    pub display_name: String,
    pub description: String,
    pub stats: UnitStats,
    /// Training cost.
    pub cost: Resources,
    pub training_time: f32,
    /// Reach of a melee attack (cm).
    pub attack_range: f32,
    pub can_use_ranged: bool,
    pub has_shield: bool,
    pub primary_weapon: Option<String>,
    pub secondary_weapon: Option<String>,
}

impl Default for UnitData {
    fn default() -> Self {
        Self {
            unit_type: UnitType::None,
            category: UnitCategory::Infantry,
            display_name: String::new(),
            description: String::new(),
            stats: UnitStats::default(),
            cost: Resources::gold_food(100, 50),
            training_time: 10.0,
            attack_range: 150.0,
            can_use_ranged: false,
            has_shield: true,
            primary_weapon: None,
            secondary_weapon: None,
        }
    }
}

impl UnitData {
    /// Heavy infantry with gladius, pilum and scutum.
    pub fn legionary() -> Self {
        Self {
            unit_type: UnitType::Legionary,
            category: UnitCategory::Infantry,
            display_name: "Legionary".into(),
            description: "The disciplined backbone of the Roman army. Armed with gladius, pilum, and scutum.".into(),
            stats: UnitStats {
                max_health: 120,
                melee_attack: 12,
                ranged_attack: 8,
                melee_defense: 10,
                ranged_defense: 8,
                armor: 5,
                speed: 280.0,
                morale: 60,
                stamina: 100.0,
                attack_speed: 1.0,
                block_strength: 1.2,
                dodge_speed: 1.0,
            },
            cost: Resources::gold_food(150, 50),
            training_time: 15.0,
            attack_range: 150.0,
            can_use_ranged: true,
            has_shield: true,
            primary_weapon: Some("Gladius".into()),
            secondary_weapon: Some("Pilum".into()),
        }
    }

    /// Light skirmishers with javelins and a small round shield.
    pub fn velites() -> Self {
        Self {
            unit_type: UnitType::Velites,
            display_name: "Velites".into(),
            description: "Young, lightly armed skirmishers who open the battle with javelins.".into(),
            stats: UnitStats {
                max_health: 80,
                melee_attack: 8,
                ranged_attack: 10,
                melee_defense: 5,
                ranged_defense: 4,
                armor: 1,
                speed: 340.0,
                morale: 40,
                block_strength: 0.6,
                ..UnitStats::default()
            },
            cost: Resources::gold_food(80, 40),
            training_time: 8.0,
            can_use_ranged: true,
            primary_weapon: Some("Javelin".into()),
            secondary_weapon: Some("Gladius".into()),
            ..Self::default()
        }
    }

    /// Veteran spearmen holding the last line.
    pub fn triarii() -> Self {
        Self {
            unit_type: UnitType::Triarii,
            display_name: "Triarii".into(),
            description: "Battle-hardened veterans; when it comes to the triarii, the battle is at its last.".into(),
            stats: UnitStats {
                max_health: 140,
                melee_attack: 14,
                melee_defense: 14,
                ranged_defense: 10,
                armor: 6,
                speed: 250.0,
                morale: 75,
                block_strength: 1.3,
                ..UnitStats::default()
            },
            cost: Resources {
                gold: 200,
                food: 60,
                iron: 20,
                ..Resources::ZERO
            },
            training_time: 20.0,
            attack_range: 200.0,
            primary_weapon: Some("Hasta".into()),
            ..Self::default()
        }
    }

    /// Catalogue entry for a trainable unit type.
    pub fn preset(unit_type: UnitType) -> Option<Self> {
        match unit_type {
            UnitType::Legionary => Some(Self::legionary()),
            UnitType::Velites => Some(Self::velites()),
            UnitType::Triarii => Some(Self::triarii()),
            _ => None,
        }
    }
}
