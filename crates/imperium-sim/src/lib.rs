//! Real-time simulation for IMPERIUM.
//!
//! The seamless zoom camera that drives the game phase, and the unit
//! combat model and buildings running on a hecs world. Every update takes
//! an explicit elapsed time, so a run is deterministic given the same inputs.

pub mod battlefield;
pub mod building;
pub mod camera;
pub mod combat;

pub use battlefield::Battlefield;
pub use camera::SeamlessZoomCamera;
pub use imperium_core as core;

#[cfg(test)]
mod tests;
