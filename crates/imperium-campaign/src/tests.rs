//! Tests for the campaign turn loop and victory evaluation.

use glam::Vec3;
use imperium_core::config::CampaignConfig;
use imperium_core::enums::*;
use imperium_core::events::CampaignEvent;

use crate::campaign::{Campaign, CampaignStatus};
use crate::faction::FactionManager;
use crate::territory::Territory;
use crate::world_map::WorldMap;

fn started(config: CampaignConfig) -> Campaign {
    let mut campaign = Campaign::new(config);
    assert!(campaign.start(FactionId::Rome));
    campaign.drain_events();
    campaign
}

fn gold(campaign: &Campaign, faction: FactionId) -> i32 {
    campaign.factions().resources(faction).unwrap().gold
}

// ---- Lifecycle ----

#[test]
fn test_turn_ignored_before_start() {
    let mut campaign = Campaign::default();
    assert_eq!(campaign.status(), CampaignStatus::NotStarted);
    assert!(!campaign.process_turn());
    assert_eq!(campaign.current_turn(), 1);
    assert_eq!(gold(&campaign, FactionId::Rome), 1100);
    assert!(campaign.drain_events().is_empty());
}

#[test]
fn test_start_preconditions() {
    let mut campaign = Campaign::default();
    assert!(!campaign.start(FactionId::Egypt), "not in this campaign");
    assert_eq!(campaign.status(), CampaignStatus::NotStarted);

    assert!(campaign.start(FactionId::Carthage));
    assert_eq!(campaign.player(), FactionId::Carthage);
    assert!(!campaign.start(FactionId::Rome), "already active");
    assert_eq!(
        campaign.drain_events(),
        vec![CampaignEvent::Started {
            faction: FactionId::Carthage
        }]
    );
}

#[test]
fn test_ended_campaign_cannot_restart() {
    let mut campaign = started(CampaignConfig {
        max_turns: 1,
        ..Default::default()
    });
    campaign.process_turn();
    assert_eq!(campaign.outcome(), Some(CampaignOutcome::Draw));
    campaign.drain_events();

    assert!(!campaign.start(FactionId::Rome));
    assert_eq!(campaign.current_turn(), 2, "turn never moves back");
    assert_eq!(campaign.outcome(), Some(CampaignOutcome::Draw));
    assert!(campaign.drain_events().is_empty());
}

// ---- Turn processing ----

#[test]
fn test_one_turn_of_production_and_ai_income() {
    let mut campaign = started(CampaignConfig::default());
    assert!(campaign.process_turn());

    // Rome: settled territory yields 150 gold / 80 food, no AI income.
    let rome = campaign.factions().resources(FactionId::Rome).unwrap();
    assert_eq!((rome.gold, rome.food), (1250, 580));
    // Carthage: settled Africa plus 100 gold / 50 food AI income.
    let carthage = campaign.factions().resources(FactionId::Carthage).unwrap();
    assert_eq!((carthage.gold, carthage.food), (1550, 630));
    // Gaul: bare territory plus AI income.
    assert_eq!(gold(&campaign, FactionId::Gaul), 1050);
    // Other counters untouched.
    assert_eq!(campaign.factions().resources(FactionId::Gaul).unwrap().iron, 200);

    assert_eq!(campaign.current_turn(), 2);
    assert_eq!(
        campaign.drain_events(),
        vec![CampaignEvent::TurnProcessed { turn: 2 }]
    );
}

#[test]
fn test_three_territories_yield_150_gold() {
    let mut map = WorldMap::new(1_000.0);
    for (i, id) in ["A", "B", "C"].into_iter().enumerate() {
        let mut t = Territory::new(id, id, TerrainType::Plains, Vec3::new(i as f32 * 5_000.0, 0.0, 0.0));
        t.set_owner(Some(FactionId::Rome));
        map.add_territory(t);
    }
    let mut campaign = Campaign::with_world(CampaignConfig::default(), FactionManager::default(), map);
    campaign.start(FactionId::Rome);

    let before = gold(&campaign, FactionId::Rome);
    campaign.process_turn();
    assert_eq!(gold(&campaign, FactionId::Rome) - before, 150);
}

#[test]
fn test_economic_victory_sees_this_turns_production() {
    let mut campaign = started(CampaignConfig {
        economic_victory_gold: 1250,
        ..Default::default()
    });
    assert!(!campaign.check_victory_condition(FactionId::Rome, VictoryCondition::Economic));

    assert!(campaign.process_turn());
    assert_eq!(
        campaign.status(),
        CampaignStatus::Ended(CampaignOutcome::Victory(VictoryCondition::Economic))
    );
    assert!(campaign.has_player_won());
    assert!(!campaign.has_player_lost());
    assert_eq!(
        campaign.drain_events(),
        vec![
            CampaignEvent::Victory {
                faction: FactionId::Rome,
                condition: VictoryCondition::Economic
            },
            CampaignEvent::TurnProcessed { turn: 2 },
        ]
    );
}

#[test]
fn test_ended_campaign_is_frozen() {
    let mut campaign = started(CampaignConfig {
        economic_victory_gold: 0,
        ..Default::default()
    });
    campaign.process_turn();
    let snapshot = campaign.clone();

    for _ in 0..5 {
        assert!(!campaign.process_turn());
    }
    assert_eq!(campaign.current_turn(), 2);
    assert_eq!(campaign.factions(), snapshot.factions());
}

#[test]
fn test_conquest_checked_before_economic() {
    let mut campaign = started(CampaignConfig {
        economic_victory_gold: 0,
        ..Default::default()
    });
    for id in ["Alps", "Greece", "Hispania", "Macedonia", "Sicily", "Egypt"] {
        assert!(campaign.map_mut().set_owner(id, Some(FactionId::Rome)));
    }
    assert_eq!(campaign.map().territory_count(FactionId::Rome), 7);

    campaign.process_turn();
    assert_eq!(
        campaign.outcome(),
        Some(CampaignOutcome::Victory(VictoryCondition::Conquest))
    );
}

#[test]
fn test_losing_last_territory_is_defeat() {
    let mut campaign = started(CampaignConfig::default());
    campaign.map_mut().set_owner("Rome", Some(FactionId::Carthage));
    campaign.process_turn();

    assert!(campaign.has_player_lost());
    assert!(campaign
        .drain_events()
        .contains(&CampaignEvent::Defeat {
            faction: FactionId::Rome
        }));
    // Carthage took the yield of both settled territories.
    assert_eq!(gold(&campaign, FactionId::Carthage), 1300 + 150 + 150 + 200);
}

#[test]
fn test_turn_limit_forces_draw() {
    let mut campaign = started(CampaignConfig {
        max_turns: 3,
        ..Default::default()
    });
    for _ in 0..3 {
        assert!(campaign.process_turn());
    }
    assert_eq!(campaign.current_turn(), 4);
    assert_eq!(campaign.status(), CampaignStatus::Ended(CampaignOutcome::Draw));
    assert!(!campaign.has_player_won() && !campaign.has_player_lost());

    let events = campaign.drain_events();
    assert_eq!(events.last(), Some(&CampaignEvent::TurnLimitReached { turn: 4 }));
    assert!(!campaign.process_turn());
}

#[test]
fn test_ai_income_uses_config() {
    let mut campaign = started(CampaignConfig {
        ai_gold_per_territory: 0,
        ai_food_per_territory: 0,
        ..Default::default()
    });
    campaign.process_turn();
    assert_eq!(gold(&campaign, FactionId::Gaul), 950);
}

// ---- Victory queries ----

#[test]
fn test_diplomatic_victory_query() {
    let mut campaign = started(CampaignConfig::default());
    assert!(!campaign.check_victory_condition(FactionId::Rome, VictoryCondition::Diplomatic));

    let factions = campaign.factions_mut();
    factions.set_status(FactionId::Rome, FactionId::Carthage, DiplomaticStatus::Allied);
    assert!(!campaign.check_victory_condition(FactionId::Rome, VictoryCondition::Diplomatic));
    campaign
        .factions_mut()
        .set_status(FactionId::Gaul, FactionId::Rome, DiplomaticStatus::Allied);
    assert!(campaign.check_victory_condition(FactionId::Rome, VictoryCondition::Diplomatic));

    // Not part of the per-turn evaluation.
    campaign.process_turn();
    assert!(campaign.is_active());
}

#[test]
fn test_conquest_query_for_any_faction() {
    let campaign = started(CampaignConfig {
        conquest_victory_territories: 1,
        ..Default::default()
    });
    assert!(campaign.check_victory_condition(FactionId::Gaul, VictoryCondition::Conquest));
    assert!(!campaign.check_victory_condition(FactionId::Egypt, VictoryCondition::Conquest));
    assert!(!campaign.check_victory_condition(FactionId::Egypt, VictoryCondition::Economic));
}

#[test]
fn test_campaign_serde_roundtrip_keeps_state() {
    let mut campaign = started(CampaignConfig::default());
    campaign.process_turn();
    campaign.drain_events();
    let json = serde_json::to_string(&campaign).unwrap();
    let restored: Campaign = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, campaign);
}
