//! Per-tick battlefield systems, run in order by `Battlefield::tick`.

use std::collections::HashMap;

use glam::Vec3;
use hecs::{Entity, World};
use imperium_core::constants::{MOVE_ACCEPTANCE_RADIUS, TRAINING_SPAWN_OFFSET};
use imperium_core::enums::{FactionId, UnitStance};
use imperium_core::units::UnitData;

use super::components::{Corpse, Orders, Position};
use crate::building::{Building, TrainingQueue};
use crate::combat::Combatant;

/// Something a building finished during a tick.
#[derive(Debug, Clone)]
pub enum BuildingProgress {
    Completed(Entity),
    Trained {
        building: Entity,
        unit: UnitData,
        spawn_at: Vec3,
        faction: FactionId,
    },
}

/// Walk `from` toward `to` by at most `step`.
pub fn step_toward(from: Vec3, to: Vec3, step: f32) -> Vec3 {
    let offset = to - from;
    let distance = offset.length();
    if distance <= step || distance <= f32::EPSILON {
        to
    } else {
        from + offset / distance * step
    }
}

/// Execute standing orders for every living, non-possessed unit.
///
/// Units with a live target close in and, once within reach, request an
/// attack. Units with only a destination walk toward it and drop the order on
/// arrival. Returns the attack requests as (attacker, target) pairs; the
/// caller resolves them so that cooldown, stamina and friendly-fire rules
/// apply uniformly.
pub fn run_orders(world: &mut World, dt: f32) -> Vec<(Entity, Entity)> {
    let targets: HashMap<Entity, Vec3> = world
        .query_mut::<(&Position, &Combatant)>()
        .into_iter()
        .filter(|(_, (_, unit))| unit.is_alive())
        .map(|(entity, (pos, _))| (entity, pos.0))
        .collect();

    let mut attacks = Vec::new();
    for (entity, (pos, unit, orders)) in
        world.query_mut::<(&mut Position, &Combatant, &mut Orders)>()
    {
        if !unit.is_alive() || unit.is_possessed() {
            continue;
        }
        let can_move = unit.stance != UnitStance::StandGround;
        let step = unit.move_speed() * dt;

        if let Some(target) = orders.target {
            let Some(&target_pos) = targets.get(&target) else {
                orders.target = None;
                continue;
            };
            if pos.0.distance(target_pos) <= unit.data.attack_range {
                attacks.push((entity, target));
            } else if can_move {
                // Stop at the edge of reach rather than on top of the target.
                let reach = (target_pos - pos.0).normalize_or_zero() * unit.data.attack_range * 0.9;
                pos.0 = step_toward(pos.0, target_pos - reach, step);
            }
            continue;
        }

        if let Some(destination) = orders.destination {
            if can_move {
                pos.0 = step_toward(pos.0, destination, step);
            }
            if pos.0.distance(destination) <= MOVE_ACCEPTANCE_RADIUS {
                orders.destination = None;
            }
        }
    }
    attacks
}

/// Advance cooldowns and stamina of every unit.
pub fn tick_combatants(world: &mut World, dt: f32) {
    for (_entity, unit) in world.query_mut::<&mut Combatant>() {
        unit.tick(dt);
    }
}

/// Advance construction sites, then training at completed buildings.
pub fn advance_buildings(world: &mut World, dt: f32) -> Vec<BuildingProgress> {
    let mut progress = Vec::new();
    for (entity, (pos, building, queue)) in
        world.query_mut::<(&Position, &mut Building, Option<&mut TrainingQueue>)>()
    {
        if building.advance_construction(dt) {
            progress.push(BuildingProgress::Completed(entity));
            continue;
        }
        if !building.is_complete() {
            continue;
        }
        if let Some(unit) = queue.and_then(|q| q.advance(dt)) {
            progress.push(BuildingProgress::Trained {
                building: entity,
                unit,
                spawn_at: pos.0 + Vec3::from(TRAINING_SPAWN_OFFSET),
                faction: building.faction,
            });
        }
    }
    progress
}

/// Count down corpse timers and collect the ones that expired.
pub fn expire_corpses(world: &mut World, dt: f32, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    for (entity, corpse) in world.query_mut::<&mut Corpse>() {
        corpse.remaining -= dt;
        if corpse.remaining <= 0.0 {
            despawn_buffer.push(entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_toward_stops_at_goal() {
        let from = Vec3::ZERO;
        let to = Vec3::new(100.0, 0.0, 0.0);
        assert_eq!(step_toward(from, to, 30.0), Vec3::new(30.0, 0.0, 0.0));
        assert_eq!(step_toward(from, to, 500.0), to);
        assert_eq!(step_toward(to, to, 10.0), to);
    }
}
