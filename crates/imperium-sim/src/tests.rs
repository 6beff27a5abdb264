//! Tests for the zoom camera, the combat model and the battlefield systems.

use glam::{Vec2, Vec3};
use imperium_core::buildings::BuildingData;
use imperium_core::config::{CameraConfig, CombatConfig};
use imperium_core::constants::*;
use imperium_core::enums::*;
use imperium_core::events::{BuildingEvent, CameraEvent, CombatEvent};
use imperium_core::units::UnitData;
use proptest::prelude::*;

use crate::battlefield::Battlefield;
use crate::camera::zoom::{game_phase_at, zoom_level_at, CameraProfile};
use crate::camera::SeamlessZoomCamera;
use crate::combat::Combatant;

fn no_focus(_: hecs::Entity) -> Option<Vec3> {
    None
}

fn run_camera(camera: &mut SeamlessZoomCamera, ticks: usize) {
    for _ in 0..ticks {
        camera.tick(DT, no_focus);
    }
}

// ---- Zoom bands ----

#[test]
fn test_band_curves_meet_at_boundaries() {
    let profile = CameraProfile::default();
    for boundary in &ZOOM_BANDS[1..5] {
        let below = profile.pose_at(boundary - 1e-5);
        let at = profile.pose_at(*boundary);
        let above = profile.pose_at(boundary + 1e-5);
        for (a, b, c) in [
            (below.arm_length, at.arm_length, above.arm_length),
            (below.pitch, at.pitch, above.pitch),
            (below.fov, at.fov, above.fov),
        ] {
            assert!((a - b).abs() < 5.0, "jump below {boundary}: {a} vs {b}");
            assert!((c - b).abs() < 5.0, "jump above {boundary}: {c} vs {b}");
        }
    }
}

proptest! {
    #[test]
    fn prop_phase_and_level_monotonic(a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(game_phase_at(lo) <= game_phase_at(hi));
        prop_assert!(zoom_level_at(lo) <= zoom_level_at(hi));
    }

    #[test]
    fn prop_pose_continuous(z in 0.0f32..0.999, eps in 0.0f32..1e-4) {
        let profile = CameraProfile::default();
        let a = profile.pose_at(z);
        let b = profile.pose_at(z + eps);
        // Steepest segment is World->Territory height: 30000 over 0.2.
        prop_assert!((a.arm_length - b.arm_length).abs() <= 150_000.0 * eps + 0.5);
        prop_assert!((a.pitch - b.pitch).abs() <= 150.0 * eps + 1e-3);
        prop_assert!((a.fov - b.fov).abs() <= 30.0 * eps + 1e-3);
    }

    #[test]
    fn prop_camera_zoom_stays_in_range(targets in proptest::collection::vec(-2.0f32..3.0, 1..8)) {
        let mut camera = SeamlessZoomCamera::default();
        for target in targets {
            camera.set_target_zoom(target);
            for _ in 0..20 {
                camera.tick(DT, no_focus);
                prop_assert!((ZOOM_MIN..=ZOOM_MAX).contains(&camera.zoom()));
            }
        }
    }
}

// ---- Camera ----

#[test]
fn test_camera_initial_state() {
    let camera = SeamlessZoomCamera::default();
    assert_eq!(camera.zoom(), INITIAL_ZOOM);
    assert_eq!(camera.zoom_level(), ZoomLevel::Territory);
    assert_eq!(camera.game_phase(), GamePhase::Strategic);
    assert!(camera.focus().is_none());
}

#[test]
fn test_camera_eases_and_reports_each_level() {
    let mut camera = SeamlessZoomCamera::default();
    camera.set_target_zoom(0.9);
    camera.tick(DT, no_focus);
    let first = camera.zoom();
    assert!(first > INITIAL_ZOOM && first < 0.9, "eases, does not jump");

    run_camera(&mut camera, 600);
    assert_eq!(camera.zoom(), 0.9, "snaps onto the target once close");
    assert_eq!(camera.zoom_level(), ZoomLevel::FirstPerson);

    let events = camera.drain_events();
    assert_eq!(
        events,
        vec![
            CameraEvent::ZoomLevelChanged {
                old: ZoomLevel::Territory,
                new: ZoomLevel::City
            },
            CameraEvent::ZoomLevelChanged {
                old: ZoomLevel::City,
                new: ZoomLevel::Ground
            },
            CameraEvent::ZoomLevelChanged {
                old: ZoomLevel::Ground,
                new: ZoomLevel::FirstPerson
            },
        ]
    );
    assert!(camera.drain_events().is_empty());
}

#[test]
fn test_camera_no_event_within_level() {
    let mut camera = SeamlessZoomCamera::default();
    camera.set_target_zoom(0.35);
    run_camera(&mut camera, 300);
    assert!(camera.drain_events().is_empty());
}

#[test]
fn test_camera_zero_interp_speed_snaps() {
    let config = CameraConfig {
        zoom_interp_speed: 0.0,
        ..Default::default()
    };
    let mut camera = SeamlessZoomCamera::new(&config);
    camera.set_target_zoom(0.7);
    camera.tick(DT, no_focus);
    assert_eq!(camera.zoom(), 0.7);
    assert_eq!(camera.game_phase(), GamePhase::Combat);
}

#[test]
fn test_camera_clamps_external_input() {
    let mut camera = SeamlessZoomCamera::default();
    camera.set_target_zoom(1.5);
    assert_eq!(camera.target_zoom(), 1.0);
    camera.set_target_zoom(-0.5);
    assert_eq!(camera.target_zoom(), 0.0);
    camera.set_target_zoom(f32::NAN);
    assert_eq!(camera.target_zoom(), 0.0, "non-finite input ignored");

    camera.set_zoom(7.0);
    assert_eq!(camera.zoom(), 1.0);
    assert!((camera.pose().fov - FIRST_PERSON_FOV).abs() < 1e-3);
}

#[test]
fn test_camera_pan_speed_and_first_person_lock() {
    let mut camera = SeamlessZoomCamera::default();
    camera.set_zoom(0.0);
    camera.pan(Vec2::new(0.0, 1.0), 1.0);
    assert_eq!(camera.location(), Vec3::new(WORLD_PAN_SPEED, 0.0, 0.0));

    camera.set_zoom(1.0);
    camera.pan(Vec2::new(1.0, 0.0), 1.0);
    assert_eq!(camera.location(), Vec3::new(WORLD_PAN_SPEED, 0.0, 0.0));
}

#[test]
fn test_camera_focus_follows_and_clears() {
    let mut world = hecs::World::new();
    let unit = world.spawn((1u8,));
    let mut camera = SeamlessZoomCamera::default();

    camera.focus_on(Vec3::new(500.0, 500.0, 0.0));
    assert_eq!(camera.location(), Vec3::new(500.0, 500.0, 0.0));

    camera.focus_on_unit(unit);
    let target = Vec3::new(1000.0, 0.0, 0.0);
    for _ in 0..600 {
        camera.tick(DT, |_| Some(target));
    }
    assert!(camera.location().distance(target) < 1.0);

    camera.tick(DT, no_focus);
    assert!(camera.focus().is_none());

    camera.focus_on_unit(unit);
    camera.pan(Vec2::Y, DT);
    assert!(camera.focus().is_none(), "panning drops the focus");
}

// ---- Combat ----

#[test]
fn test_damage_formula_examples() {
    let mut data = UnitData::default();
    data.stats.melee_defense = 0;
    data.stats.armor = 0;
    let mut unit = Combatant::new(data.clone(), FactionId::Rome, CombatConfig::default());
    assert_eq!(unit.take_damage(10.0, false).unwrap().damage, 10.0);

    data.stats.armor = 5;
    let mut armored = Combatant::new(data, FactionId::Rome, CombatConfig::default());
    let report = armored.take_damage(1.0, false).unwrap();
    assert_eq!(report.damage, MIN_DAMAGE);
    assert_eq!(armored.health(), 99);
}

#[test]
fn test_dead_unit_ignores_damage() {
    let mut unit = Combatant::new(UnitData::default(), FactionId::Gaul, CombatConfig::default());
    let report = unit.take_damage(1_000.0, false).unwrap();
    assert!(report.killed);
    assert_eq!(unit.health(), 0);
    assert!(!unit.is_alive());

    assert!(unit.take_damage(50.0, false).is_none());
    assert_eq!(unit.health(), 0);
    assert!(unit.attack().is_none());
    assert!(!unit.start_block());
}

#[test]
fn test_morale_floors_at_zero() {
    let mut data = UnitData::default();
    data.stats.max_health = 10_000;
    data.stats.morale = 5;
    let mut unit = Combatant::new(data, FactionId::Rome, CombatConfig::default());
    unit.take_damage(500.0, false);
    assert_eq!(unit.morale(), 0);
    assert!(unit.is_alive());
}

// ---- Battlefield ----

fn skirmish() -> (Battlefield, hecs::Entity, hecs::Entity) {
    let mut field = Battlefield::default();
    let legionary = field.spawn_unit(UnitData::legionary(), FactionId::Rome, Vec3::ZERO);
    let warrior = field.spawn_unit(
        UnitData::default(),
        FactionId::Gaul,
        Vec3::new(100.0, 0.0, 0.0),
    );
    (field, legionary, warrior)
}

#[test]
fn test_melee_attack_applies_mitigated_damage() {
    let (mut field, legionary, warrior) = skirmish();
    let report = field.attack(legionary, warrior).unwrap();
    // 12 * 100 / 108 - 3
    assert!((report.damage - 8.111).abs() < 1e-2);
    assert_eq!(field.combatant(warrior).unwrap().health(), 92);

    let events = field.drain_events();
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        CombatEvent::Damaged { source: Some(src), .. } if src == field.unit_id(legionary)
    ));

    assert!(field.attack(legionary, warrior).is_none(), "cooldown");
}

#[test]
fn test_friendly_fire_and_range_rejected() {
    let (mut field, legionary, warrior) = skirmish();
    let ally = field.spawn_unit(UnitData::legionary(), FactionId::Rome, Vec3::new(50.0, 0.0, 0.0));
    assert!(field.attack(legionary, ally).is_none());
    assert!(field.attack(legionary, legionary).is_none());

    let far = field.spawn_unit(UnitData::default(), FactionId::Gaul, Vec3::new(5_000.0, 0.0, 0.0));
    assert!(field.attack(legionary, far).is_none());
    assert!(field.throw_pilum(legionary, far).is_none());
    assert!(field.throw_pilum(warrior, legionary).is_none(), "no kit");

    assert_eq!(field.combatant(legionary).unwrap().stamina(), 100.0);
    assert!(field.drain_events().is_empty());
}

#[test]
fn test_pilum_volley_and_testudo() {
    let mut field = Battlefield::default();
    let thrower = field.spawn_unit(UnitData::legionary(), FactionId::Rome, Vec3::ZERO);
    let target = field.spawn_unit(
        UnitData::legionary(),
        FactionId::Carthage,
        Vec3::new(1_500.0, 0.0, 0.0),
    );

    // 25 * 100 / 108 - 5 = 18.15
    field.throw_pilum(thrower, target).unwrap();
    assert_eq!(field.combatant(target).unwrap().health(), 102);

    assert!(field.set_testudo(target, true));
    assert!(!field.set_testudo(target, true));
    // 25 * 100 / 128 - 5 = 14.53
    field.throw_pilum(thrower, target).unwrap();
    assert_eq!(field.combatant(target).unwrap().health(), 87);

    assert!(field.throw_pilum(thrower, target).is_none(), "out of pila");
    assert_eq!(field.kit(thrower).unwrap().pila(), 0);
}

#[test]
fn test_death_emitted_once_and_corpse_despawns() {
    let (mut field, legionary, warrior) = skirmish();
    field.take_damage(warrior, 10_000.0, Some(legionary), false).unwrap();
    assert!(field.take_damage(warrior, 10.0, None, false).is_none());

    let deaths = field
        .drain_events()
        .into_iter()
        .filter(|e| matches!(e, CombatEvent::Died { .. }))
        .count();
    assert_eq!(deaths, 1);
    assert_eq!(field.living_units(FactionId::Gaul), 0);
    assert_eq!(field.unit_presence().len(), 1);

    for _ in 0..(CORPSE_LIFETIME * TICK_RATE as f32) as usize + 2 {
        field.tick(DT);
    }
    assert!(field.combatant(warrior).is_none());
    assert_eq!(field.unit_count(), 1);
    assert!(field
        .drain_events()
        .iter()
        .any(|e| matches!(e, CombatEvent::Despawned { .. })));
}

#[test]
fn test_ordered_attack_closes_and_strikes() {
    let mut field = Battlefield::default();
    let legionary = field.spawn_unit(UnitData::legionary(), FactionId::Rome, Vec3::ZERO);
    let warrior = field.spawn_unit(
        UnitData::default(),
        FactionId::Gaul,
        Vec3::new(1_000.0, 0.0, 0.0),
    );
    field.command_attack(legionary, warrior);

    for _ in 0..600 {
        field.tick(DT);
    }

    let pos = field.position(legionary).unwrap();
    assert!(pos.distance(Vec3::new(1_000.0, 0.0, 0.0)) <= 150.0);
    let health = field.combatant(warrior).unwrap().health();
    assert!(health < 100, "warrior should have been hit, health {health}");
    assert!(field
        .drain_events()
        .iter()
        .all(|e| matches!(e, CombatEvent::Damaged { .. })));
}

#[test]
fn test_move_order_arrives() {
    let (mut field, legionary, _) = skirmish();
    let goal = Vec3::new(0.0, 1_000.0, 0.0);
    field.command_move_to(legionary, goal);
    for _ in 0..300 {
        field.tick(DT);
    }
    assert!(field.position(legionary).unwrap().distance(goal) <= MOVE_ACCEPTANCE_RADIUS);
    assert!(field.orders(legionary).unwrap().destination.is_none());
}

#[test]
fn test_possessed_and_holding_units_ignore_movement() {
    let (mut field, legionary, warrior) = skirmish();
    field.command_move_to(legionary, Vec3::new(0.0, 2_000.0, 0.0));
    field.set_possessed(legionary, true);

    field.command_hold(warrior);
    field.command_attack(warrior, legionary);
    let far = field.spawn_unit(UnitData::default(), FactionId::Gaul, Vec3::new(-3_000.0, 0.0, 0.0));
    field.command_attack(far, legionary);
    field.command_hold(far);
    field.command_attack(far, legionary);

    for _ in 0..60 {
        field.tick(DT);
    }
    assert_eq!(field.position(legionary).unwrap(), Vec3::ZERO);
    assert_eq!(field.position(far).unwrap(), Vec3::new(-3_000.0, 0.0, 0.0));
    // Standing ground still strikes what is in reach.
    assert!(field.combatant(legionary).unwrap().health() < 120);
}

#[test]
fn test_blocking_through_battlefield() {
    let (mut field, legionary, warrior) = skirmish();
    assert!(field.start_block(legionary));
    let report = field.attack(warrior, legionary).unwrap();
    // 10 * 100 / (100 + 10 + 24) - 5 = 2.46
    assert!((report.damage - 2.463).abs() < 1e-2);
    field.stop_block(legionary);
    assert!(!field.combatant(legionary).unwrap().is_blocking());

    let launch = field.dodge(legionary, Vec2::X).unwrap();
    assert_eq!(launch.z, DODGE_LIFT);
}

#[test]
fn test_attack_order_needs_living_enemy() {
    let (mut field, legionary, warrior) = skirmish();
    let ally = field.spawn_unit(UnitData::legionary(), FactionId::Rome, Vec3::new(50.0, 0.0, 0.0));
    assert!(!field.command_attack(legionary, ally));
    assert!(!field.command_attack(legionary, legionary));
    assert!(field.orders(legionary).unwrap().target.is_none());

    for _ in 0..60 {
        field.tick(DT);
    }
    assert_eq!(field.combatant(ally).unwrap().health(), 120);
    assert!(field.drain_events().is_empty());

    field.take_damage(warrior, 10_000.0, None, false);
    assert!(!field.command_attack(legionary, warrior), "dead target");

    let other = field.spawn_unit(UnitData::default(), FactionId::Gaul, Vec3::new(0.0, 100.0, 0.0));
    assert!(field.command_attack(legionary, other));
    assert_eq!(field.orders(legionary).unwrap().target, Some(other));
}

// ---- Buildings ----

#[test]
fn test_barracks_builds_then_trains() {
    let mut field = Battlefield::default();
    let barracks = field.place_building(BuildingData::barracks(), FactionId::Rome, Vec3::ZERO);
    assert_eq!(field.building(barracks).unwrap().state(), BuildingState::Constructing);
    assert!(!field.can_train(barracks, UnitType::Legionary), "under construction");
    assert!(!field.train_unit(barracks, UnitData::legionary()));

    for _ in 0..30 * TICK_RATE + 2 {
        field.tick(DT);
    }
    assert!(field.building(barracks).unwrap().is_complete());
    assert!(!field.can_train(barracks, UnitType::Equites), "not trained here");
    assert!(field.train_unit(barracks, UnitData::velites()));
    assert!(field.train_unit(barracks, UnitData::legionary()));

    let events = field.drain_building_events();
    assert_eq!(events.len(), 4);
    assert!(matches!(events[0], BuildingEvent::ConstructionStarted { .. }));
    assert!(matches!(events[1], BuildingEvent::ConstructionComplete { .. }));
    assert_eq!(field.unit_count(), 0);

    for _ in 0..8 * TICK_RATE + 2 {
        field.tick(DT);
    }
    assert_eq!(field.living_units(FactionId::Rome), 1);
    let events = field.drain_building_events();
    assert_eq!(events.len(), 1);
    let BuildingEvent::UnitTrained { unit, unit_type, .. } = events[0] else {
        panic!("expected a trained unit, got {events:?}");
    };
    assert_eq!(unit_type, UnitType::Velites);
    let trainee = field.entity_of(unit).unwrap();
    assert_eq!(field.position(trainee).unwrap(), Vec3::new(300.0, 0.0, 0.0));
    assert_eq!(field.training(barracks).unwrap().current().unwrap().unit_type, UnitType::Legionary);
}

#[test]
fn test_damaged_barracks_pauses_and_destroyed_drops_queue() {
    let mut data = BuildingData::barracks();
    data.construction_time = 0.0;
    let mut field = Battlefield::default();
    let barracks = field.place_building(data, FactionId::Rome, Vec3::ZERO);
    field.tick(DT);
    assert!(field.train_unit(barracks, UnitData::legionary()));

    let hit = field.damage_building(barracks, 805.0).unwrap();
    assert_eq!(hit.remaining_health, 700);
    assert_eq!(field.building(barracks).unwrap().state(), BuildingState::Damaged);
    assert!(!field.can_train(barracks, UnitType::Legionary));
    field.tick(1.0);
    assert_eq!(field.training(barracks).unwrap().progress(), 0.0);

    assert!(field.repair_building(barracks, 500.0));
    assert!(field.building(barracks).unwrap().is_complete());

    assert!(field.damage_building(barracks, 5_000.0).unwrap().destroyed);
    assert!(field.damage_building(barracks, 10.0).is_none());
    assert!(!field.training(barracks).unwrap().is_training());
    assert_eq!(field.standing_buildings(FactionId::Rome), 0);
    let destroyed = field
        .drain_building_events()
        .into_iter()
        .filter(|e| matches!(e, BuildingEvent::Destroyed { .. }))
        .count();
    assert_eq!(destroyed, 1);
    assert_eq!(field.unit_count(), 0);
}
