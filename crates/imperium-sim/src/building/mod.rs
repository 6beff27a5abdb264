//! Placed buildings: construction, structural damage and repair.
//! Military buildings also carry a `TrainingQueue`.

pub mod barracks;

use imperium_core::buildings::BuildingData;
use imperium_core::constants::BUILDING_DAMAGED_THRESHOLD;
use imperium_core::enums::{BuildingState, FactionId};
use serde::{Deserialize, Serialize};

pub use barracks::TrainingQueue;

/// Outcome of a hit on a standing building.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StructureDamage {
    /// Damage after armor, before rounding.
    pub damage: f32,
    pub remaining_health: i32,
    /// True only on the hit that destroyed the building.
    pub destroyed: bool,
}

/// A building on the field, owned by one faction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub data: BuildingData,
    pub faction: FactionId,
    state: BuildingState,
    /// Construction progress in [0, 1].
    progress: f32,
    health: i32,
}

impl Building {
    /// A building being placed, at full health.
    pub fn new(data: BuildingData, faction: FactionId) -> Self {
        Self {
            health: data.max_health,
            data,
            faction,
            state: BuildingState::Placing,
            progress: 0.0,
        }
    }

    pub fn state(&self) -> BuildingState {
        self.state
    }

    pub fn construction_progress(&self) -> f32 {
        self.progress
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn health_percent(&self) -> f32 {
        self.health as f32 / self.data.max_health.max(1) as f32
    }

    /// Fully built and not damaged.
    pub fn is_complete(&self) -> bool {
        self.state == BuildingState::Complete
    }

    pub fn is_destroyed(&self) -> bool {
        self.state == BuildingState::Destroyed
    }

    /// Leave placement and start building. False unless still placing.
    pub fn start_construction(&mut self) -> bool {
        if self.state != BuildingState::Placing {
            return false;
        }
        self.state = BuildingState::Constructing;
        self.progress = 0.0;
        true
    }

    /// Advance construction by `dt` seconds. Returns true on the call that
    /// completes it. A non-positive construction time completes at once.
    pub fn advance_construction(&mut self, dt: f32) -> bool {
        if self.state != BuildingState::Constructing {
            return false;
        }
        let time = self.data.construction_time;
        self.progress = if time > 0.0 {
            self.progress + dt.max(0.0) / time
        } else {
            1.0
        };
        if self.progress < 1.0 {
            return false;
        }
        self.progress = 1.0;
        self.state = BuildingState::Complete;
        true
    }

    /// Apply a hit: `max(0, damage - armor)`. Returns `None` once destroyed.
    ///
    /// A completed building that falls below half health becomes damaged; a
    /// site under construction keeps building.
    pub fn take_damage(&mut self, amount: f32) -> Option<StructureDamage> {
        if self.is_destroyed() {
            return None;
        }
        let damage = (amount - self.data.armor as f32).max(0.0);
        self.health = (self.health - damage.round() as i32).max(0);

        let destroyed = self.health == 0;
        if destroyed {
            self.state = BuildingState::Destroyed;
        } else if self.state == BuildingState::Complete
            && self.health_percent() < BUILDING_DAMAGED_THRESHOLD
        {
            self.state = BuildingState::Damaged;
        }
        Some(StructureDamage {
            damage,
            remaining_health: self.health,
            destroyed,
        })
    }

    /// Restore health up to max. A damaged building above half health is
    /// complete again. False if destroyed.
    pub fn repair(&mut self, amount: f32) -> bool {
        if self.is_destroyed() {
            return false;
        }
        self.health = (self.health + amount.max(0.0).round() as i32).min(self.data.max_health);
        if self.state == BuildingState::Damaged && self.health > self.data.max_health / 2 {
            self.state = BuildingState::Complete;
        }
        true
    }
}
