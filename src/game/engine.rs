use std::collections::HashSet;

use super::{
    action::{Action, Direction},
    config::GameConfig,
    state::{CollisionType, GameState, Position, Snake},
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::debug;

/// Information about a step
#[derive(Debug, Clone, PartialEq)]
pub struct StepInfo {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Type of collision if one occurred
    pub collision_type: Option<CollisionType>,
    /// Cells that became obstacles at the end of this step
    pub new_obstacles: Vec<Position>,
    /// No free cell was left for the next food
    pub board_filled: bool,
}

impl StepInfo {
    fn quiet() -> Self {
        Self {
            ate_food: false,
            collision_type: None,
            new_obstacles: Vec::new(),
            board_filled: false,
        }
    }
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Points gained this step
    pub score_delta: u32,
    /// Whether the game has terminated
    pub terminated: bool,
    /// Additional information about the step
    pub info: StepInfo,
}

impl StepResult {
    fn dead(collision_type: CollisionType) -> Self {
        Self {
            score_delta: 0,
            terminated: true,
            info: StepInfo {
                collision_type: Some(collision_type),
                ..StepInfo::quiet()
            },
        }
    }
}

/// Sample uniformly random cells until one is outside `exclusion`.
///
/// Returns `None` when every cell of the grid is excluded.
pub fn random_empty_cell<R: Rng + ?Sized>(
    rng: &mut R,
    width: usize,
    height: usize,
    exclusion: &HashSet<Position>,
) -> Option<Position> {
    let in_grid = |p: &&Position| {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < width && (p.y as usize) < height
    };
    if width == 0 || height == 0 || exclusion.iter().filter(in_grid).count() >= width * height {
        return None;
    }

    loop {
        let x = rng.gen_range(0..width) as i32;
        let y = rng.gen_range(0..height) as i32;
        let pos = Position::new(x, y);

        if !exclusion.contains(&pos) {
            return Some(pos);
        }
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self {
            config: config.sanitized(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Engine with a reproducible food sequence
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config: config.sanitized(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Swap the configuration used by the next `reset`
    pub fn reconfigure(&mut self, config: GameConfig) {
        self.config = config.sanitized();
    }

    /// Build a fresh session for the configured mode and difficulty
    pub fn reset(&mut self) -> GameState {
        let head_x = (self.config.grid_width / 2) as i32;
        let head_y = (self.config.grid_height * 3 / 4) as i32;

        let snake = Snake::new(
            Position::new(head_x, head_y),
            Direction::Right,
            self.config.initial_snake_length,
        );

        let occupied: HashSet<Position> = snake.body.iter().copied().collect();
        // A sanitized grid always has room next to a fresh snake
        let food = random_empty_cell(
            &mut self.rng,
            self.config.grid_width,
            self.config.grid_height,
            &occupied,
        )
        .unwrap_or(Position::new(0, 0));

        GameState::new(snake, food, self.config.grid_width, self.config.grid_height)
            .with_mode(self.config.mode)
            .with_interval(self.config.initial_interval())
    }

    /// Run one tick using whatever direction the player latched
    pub fn tick(&mut self, state: &mut GameState) -> StepResult {
        let action = Action::from(state.take_pending_direction());
        self.step(state, action)
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if !state.is_alive {
            return StepResult {
                score_delta: 0,
                terminated: true,
                info: StepInfo::quiet(),
            };
        }
        state.pending_direction = None;

        if let Action::Move(new_direction) = action {
            if !state.snake.direction.is_opposite(new_direction) {
                state.snake.direction = new_direction;
            }
        }

        state.steps = state.steps.saturating_add(1);

        let new_head = match state.next_head() {
            Some(pos) => pos,
            None => return self.kill(state, CollisionType::Wall),
        };

        if let Some(collision_type) = self.check_collision(state, new_head) {
            return self.kill(state, collision_type);
        }

        let ate_food = new_head == state.food;
        state.snake.advance_to(new_head, ate_food);

        let mut result = StepResult {
            score_delta: 0,
            terminated: false,
            info: StepInfo {
                ate_food,
                ..StepInfo::quiet()
            },
        };

        if ate_food {
            let eaten = state.food;
            state.score = state.score.saturating_add(self.config.food_reward);
            state.foods_eaten = state.foods_eaten.saturating_add(1);
            state.tick_interval = self.config.faster(state.tick_interval);
            result.score_delta = self.config.food_reward;

            if state.mode.grows_obstacles()
                && !state.is_obstacle(eaten)
                && !state.pending_obstacles.contains(&eaten)
            {
                state.pending_obstacles.push(eaten);
            }

            debug!(
                score = state.score,
                interval_ms = state.tick_interval.as_millis() as u64,
                "food eaten at ({}, {})",
                eaten.x,
                eaten.y
            );

            match random_empty_cell(
                &mut self.rng,
                state.grid_width,
                state.grid_height,
                &state.occupied_cells(),
            ) {
                Some(pos) => state.food = pos,
                None => {
                    debug!(length = state.snake.len(), "board filled");
                    state.is_alive = false;
                    result.terminated = true;
                    result.info.board_filled = true;
                }
            }
        }

        result.info.new_obstacles = Self::commit_obstacles(state);
        result
    }

    /// Turn pending obstacle cells lethal once the body has moved off them
    fn commit_obstacles(state: &mut GameState) -> Vec<Position> {
        let mut committed = Vec::new();
        let pending = std::mem::take(&mut state.pending_obstacles);

        for pos in pending {
            if state.is_occupied_by_snake(pos) {
                state.pending_obstacles.push(pos);
            } else if state.obstacles.insert(pos) {
                committed.push(pos);
            }
        }

        committed
    }

    fn kill(&self, state: &mut GameState, collision_type: CollisionType) -> StepResult {
        state.is_alive = false;
        debug!(?collision_type, score = state.score, "snake died");
        StepResult::dead(collision_type)
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<CollisionType> {
        if state.is_occupied_by_snake(pos) {
            return Some(CollisionType::SelfCollision);
        }

        if state.is_obstacle(pos) {
            return Some(CollisionType::Obstacle);
        }

        None
    }
}
