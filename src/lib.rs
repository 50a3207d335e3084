//! Snake Arcade - terminal Snake with classic and adventure modes
//!
//! This library provides:
//! - Core game logic (game module)
//! - Menu / playing / game-over state machine (session module)
//! - Best score per mode persisted as JSON (scores module)
//! - TUI rendering and the async terminal loop (render, runner modules)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod render;
pub mod runner;
pub mod scores;
pub mod session;
