//! Faction resource ledger.

use serde::{Deserialize, Serialize};

use crate::enums::ResourceType;

/// A bundle of the six resource counters. Used both as a faction's pool and
/// as a cost or production delta.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    pub gold: i32,
    pub food: i32,
    pub iron: i32,
    pub wood: i32,
    pub stone: i32,
    pub population: i32,
}

impl Resources {
    pub const ZERO: Resources = Resources {
        gold: 0,
        food: 0,
        iron: 0,
        wood: 0,
        stone: 0,
        population: 0,
    };

    /// Pool every faction starts a campaign with, before economy bonuses.
    pub fn starting() -> Self {
        Self {
            gold: 1000,
            food: 500,
            iron: 200,
            wood: 300,
            stone: 200,
            population: 100,
        }
    }

    /// Gold and food only, the common shape of costs and income.
    pub fn gold_food(gold: i32, food: i32) -> Self {
        Self {
            gold,
            food,
            ..Self::ZERO
        }
    }

    pub fn get(&self, kind: ResourceType) -> i32 {
        match kind {
            ResourceType::Gold => self.gold,
            ResourceType::Food => self.food,
            ResourceType::Iron => self.iron,
            ResourceType::Wood => self.wood,
            ResourceType::Stone => self.stone,
            ResourceType::Population => self.population,
        }
    }

    pub fn get_mut(&mut self, kind: ResourceType) -> &mut i32 {
        match kind {
            ResourceType::Gold => &mut self.gold,
            ResourceType::Food => &mut self.food,
            ResourceType::Iron => &mut self.iron,
            ResourceType::Wood => &mut self.wood,
            ResourceType::Stone => &mut self.stone,
            ResourceType::Population => &mut self.population,
        }
    }

    /// True if every counter covers the matching counter of `cost`.
    pub fn can_afford(&self, cost: &Resources) -> bool {
        self.gold >= cost.gold
            && self.food >= cost.food
            && self.iron >= cost.iron
            && self.wood >= cost.wood
            && self.stone >= cost.stone
            && self.population >= cost.population
    }

    /// Deduct `cost` if it is affordable. Either every counter is reduced or
    /// none is.
    pub fn try_spend(&mut self, cost: &Resources) -> bool {
        if !self.can_afford(cost) {
            return false;
        }
        self.gold -= cost.gold;
        self.food -= cost.food;
        self.iron -= cost.iron;
        self.wood -= cost.wood;
        self.stone -= cost.stone;
        self.population -= cost.population;
        true
    }

    /// Add a production or income delta.
    pub fn add(&mut self, delta: &Resources) {
        self.gold += delta.gold;
        self.food += delta.food;
        self.iron += delta.iron;
        self.wood += delta.wood;
        self.stone += delta.stone;
        self.population += delta.population;
    }

    /// Multiply every counter by `n`.
    pub fn scaled(&self, n: i32) -> Resources {
        Resources {
            gold: self.gold * n,
            food: self.food * n,
            iron: self.iron * n,
            wood: self.wood * n,
            stone: self.stone * n,
            population: self.population * n,
        }
    }
}

impl std::ops::Add for Resources {
    type Output = Resources;

    fn add(mut self, rhs: Resources) -> Resources {
        Resources::add(&mut self, &rhs);
        self
    }
}

impl std::ops::AddAssign for Resources {
    fn add_assign(&mut self, rhs: Resources) {
        Resources::add(self, &rhs);
    }
}
