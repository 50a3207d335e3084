use std::collections::HashSet;
use std::time::Duration;

use rand::{rngs::StdRng, Rng, SeedableRng};
use snake_arcade::game::{
    Action, CollisionType, Difficulty, Direction, GameConfig, GameEngine, GameMode, GameState,
    Position, Snake,
};
use snake_arcade::scores::HighScores;

fn engine(mode: GameMode) -> GameEngine {
    GameEngine::with_seed(GameConfig::default().with_mode(mode), 2024)
}

#[test]
fn eating_food_after_eight_ticks_on_default_board() {
    let mut engine = engine(GameMode::Classic);
    let mut state = engine.reset();

    assert_eq!(
        state.snake.body,
        vec![
            Position::new(12, 18),
            Position::new(11, 18),
            Position::new(10, 18),
            Position::new(9, 18),
        ]
    );
    state.food = Position::new(20, 18);

    for tick in 1..=8 {
        let result = engine.tick(&mut state);
        assert!(!result.terminated);
        assert_eq!(result.info.ate_food, tick == 8);
    }

    assert_eq!(state.snake.head(), Position::new(20, 18));
    assert_eq!(state.score, 10);
    assert_eq!(state.snake.len(), 5);
    assert!(!state.is_occupied_by_snake(state.food));
    assert!(state.is_in_bounds(state.food));
}

#[test]
fn eaten_food_turns_into_lethal_obstacle_in_adventure() {
    let mut engine = engine(GameMode::Adventure);
    let mut state = engine.reset();
    state.food = Position::new(20, 18);

    for _ in 0..8 {
        engine.tick(&mut state);
    }
    assert_eq!(state.score, 10);
    // Keep the next food off row 18
    state.food = Position::new(0, 0);

    // The tail clears (20,18) after five more ticks
    for _ in 0..4 {
        engine.tick(&mut state);
    }
    assert!(!state.is_obstacle(Position::new(20, 18)));
    engine.tick(&mut state);
    assert!(state.is_obstacle(Position::new(20, 18)));

    // Wrap all the way around the 25-wide board back into it
    for _ in 0..19 {
        let result = engine.tick(&mut state);
        assert!(!result.terminated);
    }
    let score_before = state.score;
    let result = engine.tick(&mut state);

    assert!(result.terminated);
    assert_eq!(result.info.collision_type, Some(CollisionType::Obstacle));
    assert!(!state.is_alive);
    assert_eq!(state.score, score_before);
}

#[test]
fn bounded_mode_dies_on_every_edge() {
    let cases = [
        (Position::new(24, 5), Direction::Right),
        (Position::new(0, 5), Direction::Left),
        (Position::new(5, 0), Direction::Up),
        (Position::new(5, 24), Direction::Down),
    ];

    for (head, direction) in cases {
        let mut engine = engine(GameMode::Classic);
        let snake = Snake::from_body(vec![head], direction).unwrap();
        let mut state = GameState::new(snake, Position::new(12, 12), 25, 25);

        let result = engine.step(&mut state, Action::Continue);

        assert!(result.terminated, "{direction:?} edge should be lethal");
        assert_eq!(result.info.collision_type, Some(CollisionType::Wall));
        assert_eq!(state.score, 0);
        assert_eq!(state.food, Position::new(12, 12));
        assert_eq!(state.snake.head(), head);
    }
}

#[test]
fn wrapping_mode_reenters_from_opposite_edge() {
    let cases = [
        (Position::new(24, 5), Direction::Right, Position::new(0, 5)),
        (Position::new(0, 5), Direction::Left, Position::new(24, 5)),
        (Position::new(5, 0), Direction::Up, Position::new(5, 24)),
        (Position::new(5, 24), Direction::Down, Position::new(5, 0)),
    ];

    for (head, direction, expected) in cases {
        let mut engine = engine(GameMode::Adventure);
        let snake = Snake::from_body(vec![head], direction).unwrap();
        let mut state =
            GameState::new(snake, Position::new(12, 12), 25, 25).with_mode(GameMode::Adventure);

        let result = engine.step(&mut state, Action::Continue);

        assert!(!result.terminated);
        assert_eq!(state.snake.head(), expected);
    }
}

#[test]
fn reversal_requests_never_change_direction() {
    let mut engine = engine(GameMode::Classic);
    let mut state = engine.reset();
    state.food = Position::new(0, 0);

    for turn in [Direction::Up, Direction::Left, Direction::Down] {
        let before = state.snake.direction;
        assert!(!state.request_direction(before.opposite()));
        engine.step(&mut state, Action::Move(before.opposite()));
        assert_eq!(state.snake.direction, before);

        engine.step(&mut state, Action::Move(turn));
        assert_eq!(state.snake.direction, turn);
    }
}

#[test]
fn random_play_keeps_invariants() {
    let mut rng = StdRng::seed_from_u64(99);
    let directions = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    for mode in [GameMode::Classic, GameMode::Adventure] {
        let mut engine = GameEngine::with_seed(GameConfig::small().with_mode(mode), 5);
        let mut state = engine.reset();

        for _ in 0..2000 {
            if rng.gen_bool(0.3) {
                state.request_direction(directions[rng.gen_range(0..4)]);
            }

            let len_before = state.snake.len();
            let result = engine.tick(&mut state);

            if result.terminated {
                state = engine.reset();
                continue;
            }

            let grown = usize::from(result.info.ate_food);
            assert_eq!(state.snake.len(), len_before + grown);

            let cells: HashSet<Position> = state.snake.body.iter().copied().collect();
            assert_eq!(cells.len(), state.snake.len(), "segments must be distinct");
            assert!(state.snake.body.iter().all(|p| state.is_in_bounds(*p)));

            assert!(!state.is_occupied_by_snake(state.food));
            assert!(!state.is_obstacle(state.food));
            assert!(!state.pending_obstacles.contains(&state.food));
        }
    }
}

#[test]
fn tick_interval_shrinks_to_floor() {
    let config = GameConfig::default()
        .with_mode(GameMode::Adventure)
        .with_difficulty(Difficulty::Hard);
    let mut engine = GameEngine::with_seed(config, 2024);
    let mut state = engine.reset();
    assert_eq!(state.tick_interval, Duration::from_millis(70));

    // Feed the snake straight ahead along row 18
    let mut last = state.tick_interval;
    for _ in 0..8 {
        state.food = state.snake.head().moved_in_direction(state.snake.direction);
        let result = engine.tick(&mut state);
        assert!(result.info.ate_food);
        assert!(!result.terminated);
        assert!(state.tick_interval <= last);
        last = state.tick_interval;
    }

    assert_eq!(state.foods_eaten, 8);
    assert_eq!(state.snake.head(), Position::new(20, 18));
    assert_eq!(state.tick_interval, Duration::from_millis(40));
    assert_eq!(state.tick_interval, engine.config().min_tick_interval());
}

#[test]
fn best_score_recording_is_idempotent_on_disk() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("best.json");

    let mut scores = HighScores::load(&path);
    assert!(scores.record_if_better(GameMode::Adventure, 90));
    assert!(!scores.record_if_better(GameMode::Adventure, 90));

    let reloaded = HighScores::load(&path);
    assert_eq!(reloaded.get_best(GameMode::Adventure), 90);
    assert_eq!(reloaded.get_best(GameMode::Classic), 0);
}
