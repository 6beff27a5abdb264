//! Scripted scenario used by the `imperium` binary: a barracks and its
//! garrison, a seeded skirmish, then a run of strategic turns.

use glam::Vec3;
use hecs::Entity;
use imperium_core::enums::{BuildingType, DiplomaticStatus, FactionId, UnitType};
use imperium_core::events::BuildingEvent;
use imperium_core::units::UnitData;
use rand::Rng;

use crate::game_loop::Session;
use crate::state::{SessionCommand, SessionEvent, SessionSnapshot};

/// The faction the player is most hostile to, if any other exists.
pub fn pick_enemy(session: &Session) -> Option<FactionId> {
    let campaign = session.campaign();
    let player = campaign.player();
    let factions = campaign.factions();
    factions
        .ids()
        .filter(|id| *id != player)
        .min_by_key(|id| match factions.status(player, *id) {
            DiplomaticStatus::War => 0,
            DiplomaticStatus::Hostile => 1,
            DiplomaticStatus::Neutral => 2,
            DiplomaticStatus::Friendly => 3,
            DiplomaticStatus::Allied => 4,
        })
}

fn warband() -> UnitData {
    UnitData {
        unit_type: UnitType::Triarii,
        display_name: "Warrior".into(),
        ..UnitData::default()
    }
}

/// Build a barracks at `site` and train up to `count` legionaries there.
/// Stops early once the treasury runs dry and nothing is left in training.
/// Returns the trained units.
pub fn raise_garrison(session: &mut Session, site: Vec3, count: usize, max_ticks: u64) -> Vec<Entity> {
    session.queue_command(SessionCommand::PlaceBuilding {
        building: BuildingType::Barracks,
        position: site,
    });
    let snapshot = session.step();
    let barracks = snapshot.events.iter().find_map(|event| match event {
        SessionEvent::Building(BuildingEvent::ConstructionStarted { building, .. }) => {
            session.battlefield().building_entity(*building)
        }
        _ => None,
    });
    let Some(barracks) = barracks else {
        tracing::warn!("no barracks, no garrison");
        return Vec::new();
    };

    let player = session.campaign().player();
    let cost = UnitData::legionary().cost;
    let mut queued = 0;
    let mut trained = Vec::new();
    for _ in 0..max_ticks {
        let affordable = session.campaign().factions().can_afford(player, &cost);
        if queued < count
            && affordable
            && session.battlefield().can_train(barracks, UnitType::Legionary)
        {
            session.queue_command(SessionCommand::TrainUnit {
                building: barracks,
                unit: UnitType::Legionary,
            });
        }
        let snapshot = session.step();
        for event in &snapshot.events {
            match event {
                SessionEvent::Building(BuildingEvent::TrainingQueued { .. }) => queued += 1,
                SessionEvent::Building(BuildingEvent::UnitTrained { unit, .. }) => {
                    trained.extend(session.battlefield().entity_of(*unit));
                }
                _ => {}
            }
        }
        if trained.len() >= count || (trained.len() == queued && !affordable) {
            break;
        }
    }
    tracing::info!(trained = trained.len(), "garrison raised");
    trained
}

/// Spawn two lines facing each other near `centre`, jittered by `rng`.
/// Returns (player units, enemy units).
pub fn deploy_skirmish(
    session: &mut Session,
    rng: &mut impl Rng,
    enemy: FactionId,
    per_side: usize,
    centre: Vec3,
) -> (Vec<Entity>, Vec<Entity>) {
    let player = session.campaign().player();
    let field = session.battlefield_mut();
    let mut line = |data: fn() -> UnitData, faction, offset_x: f32| -> Vec<Entity> {
        (0..per_side)
            .map(|i| {
                let jitter = Vec3::new(rng.gen_range(-50.0..50.0), rng.gen_range(-50.0..50.0), 0.0);
                let slot = Vec3::new(offset_x, i as f32 * 200.0, 0.0);
                field.spawn_unit(data(), faction, centre + slot + jitter)
            })
            .collect()
    };
    let ours = line(UnitData::legionary, player, -600.0);
    let theirs = line(warband, enemy, 600.0);
    tracing::info!(?player, ?enemy, per_side, "skirmish deployed");
    (ours, theirs)
}

/// Order every unit in `attackers` to engage its nearest living defender.
pub fn order_charge(session: &mut Session, attackers: &[Entity], defenders: &[Entity]) {
    let field = session.battlefield();
    let orders: Vec<SessionCommand> = attackers
        .iter()
        .filter_map(|&unit| {
            let from = field.position(unit)?;
            let target = defenders
                .iter()
                .filter(|&&d| field.combatant(d).is_some_and(|c| c.is_alive()))
                .filter_map(|&d| field.position(d).map(|p| (d, p.distance(from))))
                .min_by(|a, b| a.1.total_cmp(&b.1))?
                .0;
            Some(SessionCommand::AttackUnit { unit, target })
        })
        .collect();
    session.queue_commands(orders);
}

/// Run until one side has no living units or `max_ticks` pass, re-issuing
/// charge orders every second. Returns the last snapshot.
pub fn fight(
    session: &mut Session,
    ours: &[Entity],
    theirs: &[Entity],
    max_ticks: u64,
) -> SessionSnapshot {
    let mut snapshot = session.step();
    for tick in 0..max_ticks {
        if tick % 60 == 0 {
            order_charge(session, ours, theirs);
            order_charge(session, theirs, ours);
        }
        snapshot = session.step();
        let sides = snapshot.living_units.len();
        if sides < 2 {
            break;
        }
    }
    snapshot
}

/// Zoom out to the strategic map and end up to `turns` turns.
pub fn play_turns(session: &mut Session, turns: u32) -> SessionSnapshot {
    session.queue_command(SessionCommand::SetZoom(0.1));
    let mut snapshot = session.step();
    for _ in 0..turns {
        if !session.campaign().is_active() {
            break;
        }
        session.queue_command(SessionCommand::EndTurn);
        snapshot = session.step();
    }
    snapshot
}
