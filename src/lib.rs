//! grid_snake - the classic snake game in a terminal
//!
//! - `game`: rules and state, free of any I/O
//! - `session`: consecutive rounds, buffered input, pause and restart
//! - `autopilot`: a greedy computer player
//! - `render` / `input`: ratatui drawing and crossterm key mapping
//! - `modes`: play, watch and headless simulate front ends

pub mod autopilot;
pub mod error;
pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod scores;
pub mod session;
