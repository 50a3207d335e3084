//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The terminal front end drives it one tick at a time and only reads the state back.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{Boundary, Difficulty, GameConfig, GameMode};
pub use engine::{random_empty_cell, GameEngine, StepInfo, StepResult};
pub use state::{CollisionType, GameState, Position, Snake};
