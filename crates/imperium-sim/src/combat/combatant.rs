//! A single fighting unit's mutable combat state.

use glam::{Vec2, Vec3};
use imperium_core::config::CombatConfig;
use imperium_core::constants::{
    BLOCK_SPEED_FACTOR, DODGE_IMPULSE, DODGE_LIFT, MORALE_LOSS_FACTOR,
};
use imperium_core::enums::{FactionId, FormationType, UnitStance};
use imperium_core::units::UnitData;
use serde::{Deserialize, Serialize};

use super::damage;

/// Result of a hit that landed on a living unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DamageReport {
    /// Damage after mitigation, before rounding.
    pub damage: f32,
    /// Health actually removed.
    pub health_lost: i32,
    pub remaining_health: i32,
    /// True only on the hit that killed the unit.
    pub killed: bool,
}

/// Combat state of one unit. Created at full stats; dead is terminal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Combatant {
    pub data: UnitData,
    pub faction: FactionId,
    pub stance: UnitStance,
    rules: CombatConfig,
    health: i32,
    stamina: f32,
    morale: i32,
    dead: bool,
    blocking: bool,
    attacking: bool,
    cooldown_remaining: f32,
    possessed: bool,
    formation: FormationType,
    melee_defense_bonus: i32,
    ranged_defense_bonus: i32,
    formation_speed_factor: f32,
}

impl Combatant {
    pub fn new(data: UnitData, faction: FactionId, rules: CombatConfig) -> Self {
        Self {
            health: data.stats.max_health,
            stamina: data.stats.stamina,
            morale: data.stats.morale,
            data,
            faction,
            stance: UnitStance::default(),
            rules,
            dead: false,
            blocking: false,
            attacking: false,
            cooldown_remaining: 0.0,
            possessed: false,
            formation: FormationType::None,
            melee_defense_bonus: 0,
            ranged_defense_bonus: 0,
            formation_speed_factor: 1.0,
        }
    }

    pub fn is_alive(&self) -> bool {
        !self.dead
    }

    pub fn health(&self) -> i32 {
        self.health
    }

    pub fn stamina(&self) -> f32 {
        self.stamina
    }

    pub fn morale(&self) -> i32 {
        self.morale
    }

    pub fn is_blocking(&self) -> bool {
        self.blocking
    }

    pub fn is_attacking(&self) -> bool {
        self.attacking
    }

    pub fn cooldown_remaining(&self) -> f32 {
        self.cooldown_remaining
    }

    pub fn is_possessed(&self) -> bool {
        self.possessed
    }

    pub fn formation(&self) -> FormationType {
        self.formation
    }

    pub fn health_percent(&self) -> f32 {
        self.health as f32 / self.data.stats.max_health.max(1) as f32
    }

    pub fn stamina_percent(&self) -> f32 {
        if self.data.stats.stamina <= 0.0 {
            return 0.0;
        }
        self.stamina / self.data.stats.stamina
    }

    /// Hand the unit to the player (FPS) or back to its orders.
    pub fn set_possessed(&mut self, possessed: bool) {
        self.possessed = possessed;
    }

    /// Defense against a hit. Blocking only helps against melee.
    pub fn effective_defense(&self, is_ranged: bool) -> f32 {
        let stats = &self.data.stats;
        let mut defense = if is_ranged {
            (stats.ranged_defense + self.ranged_defense_bonus) as f32
        } else {
            (stats.melee_defense + self.melee_defense_bonus) as f32
        };
        if self.blocking && !is_ranged {
            defense += self.rules.block_defense_bonus * stats.block_strength;
        }
        defense
    }

    /// Apply a hit. Returns `None` if the unit was already dead.
    pub fn take_damage(&mut self, raw: f32, is_ranged: bool) -> Option<DamageReport> {
        if self.dead {
            return None;
        }

        let final_damage = damage::mitigate(
            raw,
            self.effective_defense(is_ranged),
            self.data.stats.armor as f32,
        );
        let before = self.health;
        self.health = (self.health - final_damage.round() as i32).max(0);
        self.morale = (self.morale - (final_damage * MORALE_LOSS_FACTOR).round() as i32).max(0);

        let killed = self.health == 0;
        if killed {
            self.dead = true;
            self.blocking = false;
            self.attacking = false;
        }

        Some(DamageReport {
            damage: final_damage,
            health_lost: before - self.health,
            remaining_health: self.health,
            killed,
        })
    }

    /// Start a melee swing. Returns the raw damage of the swing, or `None`
    /// if dead, on cooldown or short of stamina.
    pub fn attack(&mut self) -> Option<f32> {
        if self.dead || self.cooldown_remaining > 0.0 {
            return None;
        }
        if !self.spend_stamina(self.rules.attack_stamina_cost) {
            return None;
        }
        self.attacking = true;
        self.cooldown_remaining = self.attack_cooldown();
        Some(self.data.stats.melee_attack as f32)
    }

    /// Full cooldown of one swing: base cooldown over attack speed.
    /// A non-positive or non-finite attack speed counts as 1.
    pub fn attack_cooldown(&self) -> f32 {
        let speed = self.data.stats.attack_speed;
        let speed = if speed.is_finite() && speed > 0.0 { speed } else { 1.0 };
        self.rules.base_attack_cooldown / speed
    }

    /// Raise the shield. Requires a living unit with a shield.
    pub fn start_block(&mut self) -> bool {
        if self.dead || !self.data.has_shield {
            return false;
        }
        self.blocking = true;
        true
    }

    pub fn stop_block(&mut self) {
        self.blocking = false;
    }

    /// Dodge in a local direction (`x` right, `y` forward). Returns the launch
    /// velocity, or `None` when dead or short of stamina.
    pub fn dodge(&mut self, direction: Vec2) -> Option<Vec3> {
        if self.dead || !self.spend_stamina(self.rules.dodge_stamina_cost) {
            return None;
        }
        let planar = direction.normalize_or_zero() * DODGE_IMPULSE * self.data.stats.dodge_speed;
        Some(Vec3::new(planar.y, planar.x, DODGE_LIFT))
    }

    /// Current walk speed after blocking and formation penalties.
    pub fn move_speed(&self) -> f32 {
        let mut factor = self.formation_speed_factor;
        if self.blocking {
            factor = factor.min(BLOCK_SPEED_FACTOR);
        }
        self.data.stats.speed * factor
    }

    /// Per-tick bookkeeping: count down the attack cooldown, then regenerate
    /// stamina if neither blocking nor mid-attack.
    pub fn tick(&mut self, dt: f32) {
        let dt = dt.max(0.0);
        if self.cooldown_remaining > 0.0 {
            self.cooldown_remaining = (self.cooldown_remaining - dt).max(0.0);
        }
        if self.cooldown_remaining <= 0.0 {
            self.attacking = false;
        }

        if !self.dead && !self.blocking && !self.attacking {
            self.stamina =
                (self.stamina + self.rules.stamina_regen_rate * dt).min(self.data.stats.stamina);
        }
    }

    /// Spend stamina if enough is available.
    pub(crate) fn spend_stamina(&mut self, cost: f32) -> bool {
        if self.stamina < cost {
            return false;
        }
        self.stamina -= cost;
        true
    }

    pub(crate) fn pilum_stamina_cost(&self) -> f32 {
        self.rules.pilum_stamina_cost
    }

    /// Enter or leave a formation with its defense and speed modifiers.
    pub(crate) fn set_formation(
        &mut self,
        formation: FormationType,
        melee_bonus: i32,
        ranged_bonus: i32,
        speed_factor: f32,
    ) {
        self.formation = formation;
        self.melee_defense_bonus = melee_bonus;
        self.ranged_defense_bonus = ranged_bonus;
        self.formation_speed_factor = speed_factor;
    }
}
