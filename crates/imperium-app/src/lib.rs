//! IMPERIUM session layer.
//!
//! Wires the camera, the battlefield and the campaign together behind a
//! single fixed-step driver, and hosts the game phase controller.

pub mod demo;
pub mod game_loop;
pub mod game_mode;
pub mod state;

pub use game_loop::Session;
pub use game_mode::GameMode;
pub use imperium_core as core;
