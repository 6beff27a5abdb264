//! Battlefield: the tactical layer's units on a `hecs` world.
//!
//! `Battlefield` owns the ECS world, accepts RTS orders and direct combat
//! actions, and runs the per-tick systems. Headless; the driver decides when
//! to tick and forwards the drained `CombatEvent`s.

pub mod components;
pub mod systems;

use glam::{Vec2, Vec3};
use hecs::{Entity, World};
use imperium_core::buildings::{BuildingData, BuildingId};
use imperium_core::config::CombatConfig;
use imperium_core::enums::{FactionId, UnitStance, UnitType};
use imperium_core::events::{BuildingEvent, CombatEvent};
use imperium_core::units::{UnitData, UnitId};

use self::components::{Corpse, Orders, Position};
use self::systems::BuildingProgress;
use crate::building::{Building, StructureDamage, TrainingQueue};
use crate::combat::{Combatant, DamageReport, LegionaryKit};

pub struct Battlefield {
    world: World,
    rules: CombatConfig,
    events: Vec<CombatEvent>,
    building_events: Vec<BuildingEvent>,
    despawn_buffer: Vec<Entity>,
}

impl Default for Battlefield {
    fn default() -> Self {
        Self::new(CombatConfig::default())
    }
}

impl Battlefield {
    pub fn new(rules: CombatConfig) -> Self {
        Self {
            world: World::new(),
            rules,
            events: Vec::new(),
            building_events: Vec::new(),
            despawn_buffer: Vec::new(),
        }
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Spawn a unit at full stats. Legionaries get their kit.
    pub fn spawn_unit(&mut self, data: UnitData, faction: FactionId, position: Vec3) -> Entity {
        let is_legionary = data.unit_type == UnitType::Legionary;
        let unit = Combatant::new(data, faction, self.rules.clone());
        let entity = self
            .world
            .spawn((Position(position), unit, Orders::default()));
        if is_legionary {
            // Freshly spawned, cannot fail.
            let _ = self.world.insert_one(entity, LegionaryKit::default());
        }
        tracing::debug!(unit = self.unit_id(entity).0, ?faction, "unit spawned");
        entity
    }

    pub fn unit_id(&self, entity: Entity) -> UnitId {
        UnitId(entity.to_bits().get())
    }

    /// Resolve a building id back to its entity.
    pub fn building_entity(&self, id: BuildingId) -> Option<Entity> {
        Entity::from_bits(id.0).filter(|e| self.world.get::<&Building>(*e).is_ok())
    }

    /// Resolve a unit id back to a live entity.
    pub fn entity_of(&self, id: UnitId) -> Option<Entity> {
        Entity::from_bits(id.0).filter(|e| self.world.contains(*e))
    }

    pub fn combatant(&self, entity: Entity) -> Option<hecs::Ref<'_, Combatant>> {
        self.world.get::<&Combatant>(entity).ok()
    }

    pub fn position(&self, entity: Entity) -> Option<Vec3> {
        self.world.get::<&Position>(entity).ok().map(|p| p.0)
    }

    pub fn kit(&self, entity: Entity) -> Option<LegionaryKit> {
        self.world.get::<&LegionaryKit>(entity).ok().map(|k| *k)
    }

    pub fn orders(&self, entity: Entity) -> Option<Orders> {
        self.world.get::<&Orders>(entity).ok().map(|o| *o)
    }

    pub fn unit_count(&self) -> usize {
        self.world.query::<&Combatant>().iter().count()
    }

    /// Living units of one faction.
    pub fn living_units(&self, faction: FactionId) -> usize {
        self.world
            .query::<&Combatant>()
            .iter()
            .filter(|(_, unit)| unit.faction == faction && unit.is_alive())
            .count()
    }

    /// Location and faction of every living unit, for territory presence checks.
    pub fn unit_presence(&self) -> Vec<(Vec3, FactionId)> {
        self.world
            .query::<(&Position, &Combatant)>()
            .iter()
            .filter(|(_, (_, unit))| unit.is_alive())
            .map(|(_, (pos, unit))| (pos.0, unit.faction))
            .collect()
    }

    /// Apply a hit to `target`. Returns `None` for a missing or dead target.
    pub fn take_damage(
        &mut self,
        target: Entity,
        amount: f32,
        source: Option<Entity>,
        is_ranged: bool,
    ) -> Option<DamageReport> {
        let report = {
            let unit = self.world.query_one_mut::<&mut Combatant>(target).ok()?;
            unit.take_damage(amount, is_ranged)?
        };

        let id = self.unit_id(target);
        let source = source.map(|s| self.unit_id(s));
        self.events.push(CombatEvent::Damaged {
            unit: id,
            amount: report.damage,
            source,
        });
        tracing::debug!(unit = id.0, damage = report.damage, health = report.remaining_health, "unit damaged");

        if report.killed {
            self.events.push(CombatEvent::Died { unit: id });
            tracing::info!(unit = id.0, "unit died");
            let _ = self.world.insert_one(
                target,
                Corpse {
                    remaining: self.rules.corpse_lifetime,
                },
            );
            if let Ok(orders) = self.world.query_one_mut::<&mut Orders>(target) {
                *orders = Orders::default();
            }
        }
        Some(report)
    }

    /// Melee attack from `attacker` on `target`. Rejected for friendly fire,
    /// dead or missing units, out-of-reach targets, cooldown and stamina.
    pub fn attack(&mut self, attacker: Entity, target: Entity) -> Option<DamageReport> {
        let reach = self.combatant(attacker)?.data.attack_range;
        self.check_engagement(attacker, target, reach)?;
        let raw = self
            .world
            .query_one_mut::<&mut Combatant>(attacker)
            .ok()?
            .attack()?;
        self.take_damage(target, raw, Some(attacker), false)
    }

    /// Throw a pilum from a legionary at `target`.
    pub fn throw_pilum(&mut self, attacker: Entity, target: Entity) -> Option<DamageReport> {
        let range = self.kit(attacker)?.pilum_range;
        self.check_engagement(attacker, target, range)?;
        let raw = {
            let (unit, kit) = self
                .world
                .query_one_mut::<(&mut Combatant, &mut LegionaryKit)>(attacker)
                .ok()?;
            kit.throw_pilum(unit)?
        };
        self.take_damage(target, raw, Some(attacker), true)
    }

    /// Common preconditions of an attack: two distinct living units of
    /// different factions within `range` of each other.
    fn check_engagement(&self, attacker: Entity, target: Entity, range: f32) -> Option<()> {
        if attacker == target {
            return None;
        }
        let (a_faction, a_alive) = self.combatant(attacker).map(|u| (u.faction, u.is_alive()))?;
        let (t_faction, t_alive) = self.combatant(target).map(|u| (u.faction, u.is_alive()))?;
        if !a_alive || !t_alive {
            return None;
        }
        if a_faction == t_faction {
            tracing::warn!(
                attacker = self.unit_id(attacker).0,
                target = self.unit_id(target).0,
                "friendly fire rejected"
            );
            return None;
        }
        let distance = self.position(attacker)?.distance(self.position(target)?);
        if distance > range {
            tracing::debug!(distance, range, "target out of reach");
            return None;
        }
        Some(())
    }

    pub fn start_block(&mut self, entity: Entity) -> bool {
        self.world
            .query_one_mut::<&mut Combatant>(entity)
            .map(|u| u.start_block())
            .unwrap_or(false)
    }

    pub fn stop_block(&mut self, entity: Entity) {
        if let Ok(unit) = self.world.query_one_mut::<&mut Combatant>(entity) {
            unit.stop_block();
        }
    }

    /// Dodge in a local direction. Returns the launch velocity.
    pub fn dodge(&mut self, entity: Entity, direction: Vec2) -> Option<Vec3> {
        self.world
            .query_one_mut::<&mut Combatant>(entity)
            .ok()?
            .dodge(direction)
    }

    /// Enter or leave testudo. False if the unit has no kit or nothing changed.
    pub fn set_testudo(&mut self, entity: Entity, active: bool) -> bool {
        let Ok((unit, kit)) = self
            .world
            .query_one_mut::<(&mut Combatant, &mut LegionaryKit)>(entity)
        else {
            return false;
        };
        if active {
            kit.activate_testudo(unit)
        } else {
            kit.deactivate_testudo(unit)
        }
    }

    pub fn command_move_to(&mut self, entity: Entity, destination: Vec3) {
        self.with_orders(entity, |orders, _| {
            orders.destination = Some(destination);
            orders.target = None;
        });
    }

    /// Order `entity` to engage `target`. Rejected unless the target is a
    /// different, living unit of another faction.
    pub fn command_attack(&mut self, entity: Entity, target: Entity) -> bool {
        let hostile = entity != target
            && match (self.combatant(entity), self.combatant(target)) {
                (Some(unit), Some(enemy)) => enemy.is_alive() && enemy.faction != unit.faction,
                _ => false,
            };
        if !hostile {
            tracing::warn!(
                unit = self.unit_id(entity).0,
                target = self.unit_id(target).0,
                "attack order needs a living enemy target"
            );
            return false;
        }
        let mut accepted = false;
        self.with_orders(entity, |orders, _| {
            orders.target = Some(target);
            orders.destination = None;
            accepted = true;
        });
        accepted
    }

    pub fn command_stop(&mut self, entity: Entity) {
        self.with_orders(entity, |orders, _| *orders = Orders::default());
    }

    /// Stop and stand ground.
    pub fn command_hold(&mut self, entity: Entity) {
        self.with_orders(entity, |orders, unit| {
            *orders = Orders::default();
            unit.stance = UnitStance::StandGround;
        });
    }

    pub fn set_stance(&mut self, entity: Entity, stance: UnitStance) {
        self.with_orders(entity, |_, unit| unit.stance = stance);
    }

    /// Hand a unit to the player. Its standing orders are suspended.
    pub fn set_possessed(&mut self, entity: Entity, possessed: bool) {
        self.with_orders(entity, |_, unit| unit.set_possessed(possessed));
    }

    fn with_orders(&mut self, entity: Entity, f: impl FnOnce(&mut Orders, &mut Combatant)) {
        let id = self.unit_id(entity);
        match self
            .world
            .query_one_mut::<(&mut Orders, &mut Combatant)>(entity)
        {
            Ok((orders, unit)) if unit.is_alive() => f(orders, unit),
            _ => tracing::warn!(unit = id.0, "order ignored for missing or dead unit"),
        }
    }

    pub fn building_id(&self, entity: Entity) -> BuildingId {
        BuildingId(entity.to_bits().get())
    }

    pub fn building(&self, entity: Entity) -> Option<hecs::Ref<'_, Building>> {
        self.world.get::<&Building>(entity).ok()
    }

    pub fn training(&self, entity: Entity) -> Option<hecs::Ref<'_, TrainingQueue>> {
        self.world.get::<&TrainingQueue>(entity).ok()
    }

    /// Buildings of `faction` that are not destroyed.
    pub fn standing_buildings(&self, faction: FactionId) -> usize {
        self.world
            .query::<&Building>()
            .iter()
            .filter(|(_, b)| b.faction == faction && !b.is_destroyed())
            .count()
    }

    /// Place a building and start construction. Buildings that can train
    /// units get a training queue.
    pub fn place_building(&mut self, data: BuildingData, faction: FactionId, position: Vec3) -> Entity {
        let building_type = data.building_type;
        let queue = (!data.trainable_units.is_empty())
            .then(|| TrainingQueue::new(data.max_training_queue));
        let mut building = Building::new(data, faction);
        building.start_construction();

        let entity = self.world.spawn((Position(position), building));
        if let Some(queue) = queue {
            // Freshly spawned, cannot fail.
            let _ = self.world.insert_one(entity, queue);
        }
        let id = self.building_id(entity);
        self.building_events.push(BuildingEvent::ConstructionStarted {
            building: id,
            building_type,
            faction,
        });
        tracing::info!(building = id.0, ?building_type, ?faction, "construction started");
        entity
    }

    /// Whether `building` would accept a `unit_type` trainee right now.
    pub fn can_train(&self, building: Entity, unit_type: UnitType) -> bool {
        let Ok(mut query) = self
            .world
            .query_one::<(&Building, &TrainingQueue)>(building)
        else {
            return false;
        };
        let ready = query.get().is_some_and(|(b, queue)| {
            b.is_complete() && b.data.can_train(unit_type) && !queue.is_full()
        });
        ready
    }

    /// Queue `unit` for training. Cost is the caller's business.
    pub fn train_unit(&mut self, building: Entity, unit: UnitData) -> bool {
        let unit_type = unit.unit_type;
        if !self.can_train(building, unit_type) {
            tracing::warn!(building = self.building_id(building).0, ?unit_type, "training rejected");
            return false;
        }
        let queued = self
            .world
            .query_one_mut::<&mut TrainingQueue>(building)
            .is_ok_and(|queue| queue.enqueue(unit));
        if queued {
            self.building_events.push(BuildingEvent::TrainingQueued {
                building: self.building_id(building),
                unit_type,
            });
        }
        queued
    }

    /// Stop the unit in training; the next queued one starts. Returns the
    /// dropped unit so its cost can be refunded.
    pub fn cancel_training(&mut self, building: Entity) -> Option<UnitData> {
        let cancelled = self
            .world
            .query_one_mut::<&mut TrainingQueue>(building)
            .ok()?
            .cancel()?;
        self.building_events.push(BuildingEvent::TrainingCancelled {
            building: self.building_id(building),
            unit_type: cancelled.unit_type,
        });
        Some(cancelled)
    }

    /// Hit a building. A destroyed building loses its training queue.
    pub fn damage_building(&mut self, building: Entity, amount: f32) -> Option<StructureDamage> {
        let (hit, lost) = {
            let (b, queue) = self
                .world
                .query_one_mut::<(&mut Building, Option<&mut TrainingQueue>)>(building)
                .ok()?;
            let hit = b.take_damage(amount)?;
            let lost = match queue {
                Some(queue) if hit.destroyed => queue.clear().len(),
                _ => 0,
            };
            (hit, lost)
        };

        let id = self.building_id(building);
        self.building_events.push(BuildingEvent::Damaged {
            building: id,
            amount: hit.damage,
        });
        if hit.destroyed {
            self.building_events.push(BuildingEvent::Destroyed { building: id });
            tracing::info!(building = id.0, lost_trainees = lost, "building destroyed");
        }
        Some(hit)
    }

    pub fn repair_building(&mut self, building: Entity, amount: f32) -> bool {
        self.world
            .query_one_mut::<&mut Building>(building)
            .is_ok_and(|b| b.repair(amount))
    }

    /// Advance the battlefield by `dt` seconds: orders and movement, queued
    /// attacks, cooldowns and stamina, construction and training, then
    /// corpse removal.
    pub fn tick(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        let attacks = systems::run_orders(&mut self.world, dt);
        for (attacker, target) in attacks {
            self.attack(attacker, target);
        }
        systems::tick_combatants(&mut self.world, dt);

        for progress in systems::advance_buildings(&mut self.world, dt) {
            match progress {
                BuildingProgress::Completed(entity) => {
                    let id = self.building_id(entity);
                    self.building_events
                        .push(BuildingEvent::ConstructionComplete { building: id });
                    tracing::info!(building = id.0, "construction complete");
                }
                BuildingProgress::Trained {
                    building,
                    unit,
                    spawn_at,
                    faction,
                } => {
                    let unit_type = unit.unit_type;
                    let entity = self.spawn_unit(unit, faction, spawn_at);
                    self.building_events.push(BuildingEvent::UnitTrained {
                        building: self.building_id(building),
                        unit: self.unit_id(entity),
                        unit_type,
                    });
                }
            }
        }

        systems::expire_corpses(&mut self.world, dt, &mut self.despawn_buffer);
        let mut expired = std::mem::take(&mut self.despawn_buffer);
        for entity in expired.drain(..) {
            let id = self.unit_id(entity);
            if self.world.despawn(entity).is_ok() {
                self.events.push(CombatEvent::Despawned { unit: id });
                tracing::debug!(unit = id.0, "corpse removed");
            }
        }
        self.despawn_buffer = expired;
    }

    /// Take all buffered events.
    pub fn drain_events(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn drain_building_events(&mut self) -> Vec<BuildingEvent> {
        std::mem::take(&mut self.building_events)
    }
}
