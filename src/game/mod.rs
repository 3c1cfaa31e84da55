//! Core rules of the game
//!
//! Nothing in here touches the terminal, so the same engine drives human
//! play, the autopilot and headless simulation.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

pub use action::{Action, Direction};
pub use config::{GameConfig, RoundPolicy};
pub use engine::{GameEngine, StepResult};
pub use state::{GameState, Position, RoundEnd, Snake};
