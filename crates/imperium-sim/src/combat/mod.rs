//! Unit combat model: damage mitigation, stamina, cooldowns and the
//! legionary's special abilities. Plain data, driven by the battlefield.

pub mod combatant;
pub mod damage;
pub mod legionary;

pub use combatant::{Combatant, DamageReport};
pub use legionary::LegionaryKit;
