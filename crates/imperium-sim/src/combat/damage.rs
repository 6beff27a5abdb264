//! Damage mitigation formula.

use imperium_core::constants::{DEFENSE_SCALE, MIN_DAMAGE};

/// Fraction of raw damage that gets through `defense`.
///
/// Defense has no upper bound, so stacked bonuses push the multiplier
/// toward zero. Negative defense is treated as zero.
pub fn damage_multiplier(defense: f32) -> f32 {
    DEFENSE_SCALE / (DEFENSE_SCALE + defense.max(0.0))
}

/// Final damage of a hit: `max(1, raw * multiplier - armor)`.
pub fn mitigate(raw: f32, defense: f32, armor: f32) -> f32 {
    (raw * damage_multiplier(defense) - armor).max(MIN_DAMAGE)
}
