//! Simulation core for a six-stage vertical shooter.
//!
//! Everything here is deterministic given the intents, the clock readings and
//! the random source passed in; window, keyboard, drawing and file plumbing
//! stay in the binary.

pub mod clock;
pub mod collision;
pub mod config;
pub mod constants;
pub mod entities;
pub mod error;
pub mod input;
pub mod run_state;
pub mod score;
pub mod screen;
pub mod sprites;
pub mod stage;
pub mod stages;
