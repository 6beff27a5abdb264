use std::io::Write;

use crate::config::GameConfig;
use crate::constants::*;
use crate::enums::*;
use crate::error::Error;
use crate::events::{CameraEvent, CampaignEvent, CombatEvent};
use crate::units::{UnitData, UnitId};

#[test]
fn test_zoom_bands_are_ordered() {
    for pair in ZOOM_BANDS.windows(2) {
        assert!(pair[0] < pair[1], "band boundaries must increase");
    }
    assert_eq!(ZOOM_BANDS[0], ZOOM_MIN);
    assert_eq!(ZOOM_BANDS[5], ZOOM_MAX);
}

#[test]
fn test_zoom_level_index_matches_band_order() {
    for (i, level) in ZoomLevel::ALL.iter().enumerate() {
        assert_eq!(level.index(), i);
    }
}

#[test]
fn test_campaign_outcome_serde() {
    let variants = vec![
        CampaignOutcome::Victory(VictoryCondition::Conquest),
        CampaignOutcome::Victory(VictoryCondition::Economic),
        CampaignOutcome::Defeat,
        CampaignOutcome::Draw,
    ];
    for v in variants {
        let json = serde_json::to_string(&v).unwrap();
        let back: CampaignOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}

#[test]
fn test_events_are_tagged() {
    let event = CameraEvent::ZoomLevelChanged {
        old: ZoomLevel::Territory,
        new: ZoomLevel::City,
    };
    let json = serde_json::to_string(&event).unwrap();
    assert!(json.contains("\"type\":\"ZoomLevelChanged\""));

    let event = CombatEvent::Damaged {
        unit: UnitId(3),
        amount: 7.5,
        source: None,
    };
    let back: CombatEvent = serde_json::from_str(&serde_json::to_string(&event).unwrap()).unwrap();
    assert_eq!(back, event);

    let event = CampaignEvent::Victory {
        faction: FactionId::Rome,
        condition: VictoryCondition::Economic,
    };
    let back: CampaignEvent = serde_json::from_str(&serde_json::to_string(&event).unwrap()).unwrap();
    assert_eq!(back, event);
}

#[test]
fn test_faction_from_str() {
    assert_eq!("rome".parse::<FactionId>(), Ok(FactionId::Rome));
    assert_eq!("CARTHAGE".parse::<FactionId>(), Ok(FactionId::Carthage));
    assert!("atlantis".parse::<FactionId>().is_err());
}

#[test]
fn test_legionary_preset() {
    let data = UnitData::legionary();
    assert_eq!(data.unit_type, UnitType::Legionary);
    assert_eq!(data.stats.max_health, 120);
    assert_eq!(data.stats.armor, 5);
    assert!(data.has_shield);
    assert_eq!(data.cost.gold, 150);
}

#[test]
fn test_default_config_is_valid() {
    let config = GameConfig::default();
    config.validate().unwrap();
    assert_eq!(config.camera.heights, CAMERA_HEIGHTS);
    assert_eq!(config.campaign.max_turns, MAX_TURNS);
}

#[test]
fn test_partial_config_overrides_only_named_fields() {
    let config = GameConfig::from_json(r#"{ "campaign": { "max_turns": 12 } }"#).unwrap();
    assert_eq!(config.campaign.max_turns, 12);
    assert_eq!(
        config.campaign.economic_victory_gold,
        ECONOMIC_VICTORY_GOLD
    );
    assert_eq!(config.camera.zoom_interp_speed, ZOOM_INTERP_SPEED);
}

#[test]
fn test_config_rejects_bad_values() {
    let err = GameConfig::from_json(r#"{ "camera": { "initial_zoom": 1.5 } }"#).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));

    let err = GameConfig::from_json(r#"{ "combat": { "stamina_regen_rate": -1.0 } }"#).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));

    let mut config = GameConfig::default();
    config.combat.base_attack_cooldown = 0.0;
    assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

    let err = GameConfig::from_json(r#"{ "campaign": { "max_turns": 0 } }"#).unwrap_err();
    assert!(matches!(err, Error::InvalidConfig(_)));

    let err = GameConfig::from_json("{ not json").unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn test_config_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "combat": {{ "base_attack_cooldown": 0.5 }} }}"#).unwrap();
    let config = GameConfig::load(file.path()).unwrap();
    assert_eq!(config.combat.base_attack_cooldown, 0.5);

    let missing = file.path().with_extension("missing");
    let err = GameConfig::load(&missing).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
}
