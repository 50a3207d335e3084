use std::collections::HashSet;
use std::time::Duration;

use super::action::Direction;
use super::config::{Boundary, GameMode};

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Fold the position back onto a width x height torus
    pub fn wrapped(&self, width: usize, height: usize) -> Self {
        Self {
            x: self.x.rem_euclid(width as i32),
            y: self.y.rem_euclid(height as i32),
        }
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self { body, direction }
    }

    /// Build a snake from explicit segments, head first.
    ///
    /// Returns `None` for an empty body.
    pub fn from_body(body: Vec<Position>, direction: Direction) -> Option<Self> {
        if body.is_empty() {
            return None;
        }
        Some(Self { body, direction })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Push a new head, dropping the tail unless growing
    pub fn advance_to(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Type of collision that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit a wall
    Wall,
    /// Snake hit itself
    SelfCollision,
    /// Snake hit an obstacle left by earlier food
    Obstacle,
}

/// One live game: everything a tick reads or writes
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    /// Lethal cells, only ever grown in obstacle modes
    pub obstacles: HashSet<Position>,
    /// Eaten food cells waiting for the body to clear before turning lethal
    pub pending_obstacles: Vec<Position>,
    pub grid_width: usize,
    pub grid_height: usize,
    pub mode: GameMode,
    pub score: u32,
    pub steps: u32,
    pub foods_eaten: u32,
    pub tick_interval: Duration,
    pub is_alive: bool,
    /// Direction latched since the last tick
    pub pending_direction: Option<Direction>,
}

impl GameState {
    /// Create a new game state
    pub fn new(snake: Snake, food: Position, grid_width: usize, grid_height: usize) -> Self {
        Self {
            snake,
            food,
            obstacles: HashSet::new(),
            pending_obstacles: Vec::new(),
            grid_width,
            grid_height,
            mode: GameMode::default(),
            score: 0,
            steps: 0,
            foods_eaten: 0,
            tick_interval: Duration::from_millis(250),
            is_alive: true,
            pending_direction: None,
        }
    }

    pub fn with_mode(mut self, mode: GameMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.contains(pos)
    }

    pub fn is_obstacle(&self, pos: Position) -> bool {
        self.obstacles.contains(&pos)
    }

    /// Where the head would land next, after applying the boundary rule.
    ///
    /// `None` means the snake left a bounded grid.
    pub fn next_head(&self) -> Option<Position> {
        let raw = self.snake.head().moved_in_direction(self.snake.direction);
        match self.mode.boundary() {
            Boundary::Bounded => self.is_in_bounds(raw).then_some(raw),
            Boundary::Wrapping => Some(raw.wrapped(self.grid_width, self.grid_height)),
        }
    }

    /// Cells food must never be placed on
    pub fn occupied_cells(&self) -> HashSet<Position> {
        self.snake
            .body
            .iter()
            .chain(self.obstacles.iter())
            .chain(self.pending_obstacles.iter())
            .copied()
            .collect()
    }

    /// Latch a direction change for the next tick.
    ///
    /// At most one change is accepted per tick; a reversal or a repeat of
    /// the current heading is ignored. Returns whether the request was kept.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if !self.is_alive || self.pending_direction.is_some() {
            return false;
        }
        let current = self.snake.direction;
        if direction == current || current.is_opposite(direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    /// Hand over the latched direction and clear the latch
    pub fn take_pending_direction(&mut self) -> Option<Direction> {
        self.pending_direction.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_at(head: Position, direction: Direction) -> GameState {
        GameState::new(Snake::new(head, direction, 3), Position::new(0, 0), 10, 10)
    }

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_by(0, 1), Position::new(5, 6));
        assert_eq!(pos.moved_by(0, -1), Position::new(5, 4));
    }

    #[test]
    fn test_position_wrapping() {
        assert_eq!(Position::new(10, 3).wrapped(10, 10), Position::new(0, 3));
        assert_eq!(Position::new(-1, 3).wrapped(10, 10), Position::new(9, 3));
        assert_eq!(Position::new(4, -1).wrapped(10, 8), Position::new(4, 7));
        assert_eq!(Position::new(4, 8).wrapped(10, 8), Position::new(4, 0));
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(5, 5));
        assert_eq!(snake.body[1], Position::new(4, 5));
        assert_eq!(snake.tail(), Position::new(3, 5));
    }

    #[test]
    fn test_snake_from_body() {
        assert!(Snake::from_body(Vec::new(), Direction::Up).is_none());

        let snake = Snake::from_body(vec![Position::new(2, 2), Position::new(2, 3)], Direction::Up)
            .unwrap();
        assert_eq!(snake.head(), Position::new(2, 2));
        assert_eq!(snake.tail(), Position::new(2, 3));
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::new(Position::new(5, 5), Direction::Right, 3);

        snake.advance_to(Position::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Position::new(6, 5));
        assert_eq!(snake.tail(), Position::new(4, 5));

        snake.advance_to(Position::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Position::new(4, 5));
    }

    #[test]
    fn test_bounds_checking() {
        let state = state_at(Position::new(5, 5), Direction::Right);

        assert!(state.is_in_bounds(Position::new(0, 0)));
        assert!(state.is_in_bounds(Position::new(9, 9)));
        assert!(!state.is_in_bounds(Position::new(-1, 0)));
        assert!(!state.is_in_bounds(Position::new(10, 0)));
        assert!(!state.is_in_bounds(Position::new(0, 10)));
    }

    #[test]
    fn test_next_head_per_boundary() {
        let bounded = state_at(Position::new(9, 4), Direction::Right);
        assert_eq!(bounded.next_head(), None);

        let wrapping = state_at(Position::new(9, 4), Direction::Right).with_mode(GameMode::Adventure);
        assert_eq!(wrapping.next_head(), Some(Position::new(0, 4)));

        let up = state_at(Position::new(2, 0), Direction::Up).with_mode(GameMode::Adventure);
        assert_eq!(up.next_head(), Some(Position::new(2, 9)));
    }

    #[test]
    fn test_direction_latch() {
        let mut state = state_at(Position::new(5, 5), Direction::Right);

        assert!(!state.request_direction(Direction::Left));
        assert!(!state.request_direction(Direction::Right));
        assert!(state.request_direction(Direction::Up));
        // Second change in the same tick is dropped
        assert!(!state.request_direction(Direction::Down));
        assert_eq!(state.take_pending_direction(), Some(Direction::Up));
        assert_eq!(state.take_pending_direction(), None);
    }

    #[test]
    fn test_occupied_cells_include_obstacles() {
        let mut state = state_at(Position::new(5, 5), Direction::Right);
        state.obstacles.insert(Position::new(1, 1));
        state.pending_obstacles.push(Position::new(2, 2));

        let occupied = state.occupied_cells();
        assert_eq!(occupied.len(), 5);
        assert!(occupied.contains(&Position::new(1, 1)));
        assert!(occupied.contains(&Position::new(2, 2)));
        assert!(occupied.contains(&Position::new(3, 5)));
    }
}
