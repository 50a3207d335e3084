use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Largest accepted grid side, in cells
pub const MAX_GRID_SIDE: usize = 200;
/// Largest accepted score per food
pub const MAX_FOOD_REWARD: u32 = 1_000;
/// Largest accepted tick floor, in milliseconds
pub const MAX_TICK_FLOOR_MS: u64 = 1_000;

/// How the grid edges behave
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Leaving the grid kills the snake
    Bounded,
    /// Leaving the grid re-enters from the opposite edge
    Wrapping,
}

/// Rule set selected from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameMode {
    /// Walls are lethal, no obstacles
    #[default]
    Classic,
    /// Edges wrap, every eaten food leaves an obstacle behind
    Adventure,
}

impl GameMode {
    pub fn boundary(&self) -> Boundary {
        match self {
            GameMode::Classic => Boundary::Bounded,
            GameMode::Adventure => Boundary::Wrapping,
        }
    }

    pub fn grows_obstacles(&self) -> bool {
        matches!(self, GameMode::Adventure)
    }

    /// Stable key used in the high-score file
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Adventure => "adventure",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            GameMode::Classic => GameMode::Adventure,
            GameMode::Adventure => GameMode::Classic,
        }
    }

    pub fn prev(&self) -> Self {
        // Two modes, so stepping back is the same as stepping forward
        self.next()
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameMode::Classic => write!(f, "Classic"),
            GameMode::Adventure => write!(f, "Adventure"),
        }
    }
}

/// Starting speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Tick interval a fresh game starts with
    pub fn initial_interval(&self) -> Duration {
        match self {
            Difficulty::Easy => Duration::from_millis(250),
            Difficulty::Medium => Duration::from_millis(120),
            Difficulty::Hard => Duration::from_millis(70),
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Medium,
            Difficulty::Medium => Difficulty::Hard,
            Difficulty::Hard => Difficulty::Easy,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Difficulty::Easy => Difficulty::Hard,
            Difficulty::Medium => Difficulty::Easy,
            Difficulty::Hard => Difficulty::Medium,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "Easy"),
            Difficulty::Medium => write!(f, "Medium"),
            Difficulty::Hard => write!(f, "Hard"),
        }
    }
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    pub mode: GameMode,
    pub difficulty: Difficulty,

    /// Points awarded per food
    pub food_reward: u32,
    /// How much the tick interval shrinks per food, in milliseconds
    pub speed_step_ms: u64,
    /// Floor for the tick interval, in milliseconds
    pub min_tick_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 25,
            grid_height: 25,
            initial_snake_length: 4,
            mode: GameMode::Classic,
            difficulty: Difficulty::Easy,
            food_reward: 10,
            speed_step_ms: 5,
            min_tick_interval_ms: 40,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn initial_interval(&self) -> Duration {
        self.difficulty
            .initial_interval()
            .max(self.min_tick_interval())
    }

    pub fn speed_step(&self) -> Duration {
        Duration::from_millis(self.speed_step_ms)
    }

    pub fn min_tick_interval(&self) -> Duration {
        Duration::from_millis(self.min_tick_interval_ms)
    }

    /// Interval after one more food, never below the floor
    pub fn faster(&self, current: Duration) -> Duration {
        current
            .saturating_sub(self.speed_step())
            .max(self.min_tick_interval())
    }

    /// Clamp values that would make the board unusable
    pub fn sanitized(mut self) -> Self {
        self.grid_width = self.grid_width.clamp(5, MAX_GRID_SIDE);
        self.grid_height = self.grid_height.clamp(5, MAX_GRID_SIDE);
        self.initial_snake_length = self
            .initial_snake_length
            .clamp(1, self.grid_width / 2);
        self.food_reward = self.food_reward.min(MAX_FOOD_REWARD);
        self.min_tick_interval_ms = self.min_tick_interval_ms.clamp(1, MAX_TICK_FLOOR_MS);
        self
    }
}
