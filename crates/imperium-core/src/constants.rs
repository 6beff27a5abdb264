//! Simulation constants and tuning parameters.
//!
//! Distances are in centimetres (1 unit = 1 cm), angles in degrees,
//! times in seconds.

/// Fixed tick rate of the headless driver (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Zoom bands ---

pub const ZOOM_MIN: f32 = 0.0;
pub const ZOOM_WORLD_MAX: f32 = 0.2;
pub const ZOOM_TERRITORY_MAX: f32 = 0.4;
pub const ZOOM_CITY_MAX: f32 = 0.6;
pub const ZOOM_GROUND_MAX: f32 = 0.8;
pub const ZOOM_MAX: f32 = 1.0;

/// Band boundaries, lowest first. Band `i` spans `[ZOOM_BANDS[i], ZOOM_BANDS[i + 1]]`.
pub const ZOOM_BANDS: [f32; 6] = [
    ZOOM_MIN,
    ZOOM_WORLD_MAX,
    ZOOM_TERRITORY_MAX,
    ZOOM_CITY_MAX,
    ZOOM_GROUND_MAX,
    ZOOM_MAX,
];

/// Zoom value a fresh camera starts at (territory view).
pub const INITIAL_ZOOM: f32 = 0.3;

/// Exponential easing rate for zoom and camera pose (1/s).
pub const ZOOM_INTERP_SPEED: f32 = 3.0;

/// Distance below which eased zoom snaps onto its target.
pub const ZOOM_SNAP_TOLERANCE: f32 = 0.001;

/// Easing rate used when following a focused unit (1/s).
pub const FOCUS_FOLLOW_SPEED: f32 = 5.0;

// --- Camera anchors (World, Territory, City, Ground, FirstPerson) ---

/// Camera arm length per zoom level: 500 m, 200 m, 50 m, 5 m, eye level.
pub const CAMERA_HEIGHTS: [f32; 5] = [50_000.0, 20_000.0, 5_000.0, 500.0, 180.0];

/// Camera pitch per zoom level, from almost straight down to horizontal.
pub const CAMERA_PITCHES: [f32; 5] = [-85.0, -75.0, -60.0, -30.0, 0.0];

pub const WORLD_VIEW_FOV: f32 = 60.0;
pub const FIRST_PERSON_FOV: f32 = 90.0;

/// Pan speed fully zoomed out (cm/s).
pub const WORLD_PAN_SPEED: f32 = 10_000.0;

/// Pan speed fully zoomed in (cm/s).
pub const CITY_PAN_SPEED: f32 = 2_000.0;

// --- Combat ---

/// Defense scale in the damage multiplier `scale / (scale + defense)`.
pub const DEFENSE_SCALE: f32 = 100.0;

/// Minimum damage of any hit that lands.
pub const MIN_DAMAGE: f32 = 1.0;

/// Fraction of final damage that is also lost as morale.
pub const MORALE_LOSS_FACTOR: f32 = 0.1;

/// Melee defense added while blocking, scaled by block strength.
pub const BLOCK_DEFENSE_BONUS: f32 = 20.0;

/// Movement speed multiplier while blocking.
pub const BLOCK_SPEED_FACTOR: f32 = 0.5;

pub const ATTACK_STAMINA_COST: f32 = 10.0;
pub const DODGE_STAMINA_COST: f32 = 20.0;
pub const PILUM_STAMINA_COST: f32 = 15.0;

/// Stamina regenerated per second while idle.
pub const STAMINA_REGEN_RATE: f32 = 10.0;

/// Attack cooldown before the attack speed multiplier is applied.
pub const BASE_ATTACK_COOLDOWN: f32 = 1.0;

/// Horizontal dodge launch speed, scaled by dodge speed.
pub const DODGE_IMPULSE: f32 = 500.0;

/// Upward component of a dodge launch.
pub const DODGE_LIFT: f32 = 100.0;

/// Seconds a dead unit stays on the field before despawn.
pub const CORPSE_LIFETIME: f32 = 5.0;

/// Distance at which a move order counts as arrived.
pub const MOVE_ACCEPTANCE_RADIUS: f32 = 50.0;

pub const MELEE_RANGE: f32 = 200.0;
pub const RANGED_MAX_DISTANCE: f32 = 5_000.0;

// --- Legionary ---

pub const TESTUDO_MELEE_DEFENSE_BONUS: i32 = 10;
pub const TESTUDO_RANGED_DEFENSE_BONUS: i32 = 20;
pub const TESTUDO_SPEED_FACTOR: f32 = 0.3;
pub const LEGIONARY_MAX_PILA: u32 = 2;
pub const PILUM_DAMAGE: f32 = 25.0;
pub const PILUM_RANGE: f32 = 2_000.0;

// --- Campaign ---

pub const MAX_TURNS: u32 = 100;

/// Territories the player must hold for a conquest victory (7 of 9).
pub const CONQUEST_VICTORY_TERRITORIES: usize = 7;

pub const ECONOMIC_VICTORY_GOLD: i32 = 10_000;

pub const AI_GOLD_PER_TERRITORY: i32 = 100;
pub const AI_FOOD_PER_TERRITORY: i32 = 50;

// --- Territories ---

/// Edge length of a map territory (100 m).
pub const TERRITORY_SIZE: f32 = 10_000.0;

/// Centre distance under which two territories are adjacent (allows diagonals).
pub const TERRITORY_ADJACENCY_FACTOR: f32 = 1.5;

pub const TERRITORY_BASE_GOLD: i32 = 50;
pub const TERRITORY_BASE_FOOD: i32 = 30;

pub const SETTLEMENT_GOLD_BONUS: i32 = 100;
pub const SETTLEMENT_FOOD_BONUS: i32 = 50;
pub const SETTLEMENT_START_POPULATION: i32 = 100;
pub const MAX_BUILDING_SLOTS: usize = 10;

// --- Buildings ---

pub const BUILDING_CONSTRUCTION_TIME: f32 = 30.0;
pub const BUILDING_MAX_HEALTH: i32 = 1_000;
pub const BUILDING_ARMOR: i32 = 5;

/// Health fraction below which a completed building counts as damaged.
pub const BUILDING_DAMAGED_THRESHOLD: f32 = 0.5;

/// Units that may wait behind the one in training.
pub const MAX_TRAINING_QUEUE: usize = 5;

/// Where trained units appear, relative to their building (cm).
pub const TRAINING_SPAWN_OFFSET: [f32; 3] = [300.0, 0.0, 0.0];
