//! Strategic layer of IMPERIUM: factions and diplomacy, territories on the
//! world map, the turn-based campaign evaluator and save slots.

pub mod campaign;
pub mod faction;
pub mod persistence;
pub mod territory;
pub mod world_map;

pub use campaign::{Campaign, CampaignStatus};
pub use faction::FactionManager;
pub use world_map::WorldMap;

#[cfg(test)]
mod tests;
