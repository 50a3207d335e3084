//! Screen state machine: Menu -> Playing -> GameOver -> {Playing | Menu}
//!
//! Every input and timer tick arrives as an [`AppEvent`]. The current
//! [`Screen`] owns the live game, so leaving a screen drops its session.

use std::time::Duration;

use tracing::info;

use crate::game::{CollisionType, Direction, GameConfig, GameEngine, GameState};
use crate::input::KeyAction;
use crate::metrics::GameMetrics;
use crate::render::Theme;
use crate::scores::HighScores;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyAction),
    Tick,
}

/// Rows of the start menu, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Start,
    Mode,
    Difficulty,
    Theme,
    Quit,
}

impl MenuItem {
    pub const ALL: [MenuItem; 5] = [
        MenuItem::Start,
        MenuItem::Mode,
        MenuItem::Difficulty,
        MenuItem::Theme,
        MenuItem::Quit,
    ];
}

/// How the last game ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSummary {
    pub score: u32,
    pub best: u32,
    pub new_best: bool,
    pub collision: Option<CollisionType>,
    pub board_filled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Menu,
    Playing { session: GameState, paused: bool },
    GameOver { session: GameState, summary: GameSummary },
}

impl Screen {
    pub fn session(&self) -> Option<&GameState> {
        match self {
            Screen::Menu => None,
            Screen::Playing { session, .. } | Screen::GameOver { session, .. } => Some(session),
        }
    }
}

pub struct App {
    screen: Screen,
    engine: GameEngine,
    config: GameConfig,
    theme: Theme,
    menu_cursor: usize,
    scores: HighScores,
    metrics: GameMetrics,
    should_quit: bool,
}

impl App {
    pub fn new(config: GameConfig, theme: Theme, scores: HighScores) -> Self {
        Self::with_engine(GameEngine::new(config.clone()), config, theme, scores)
    }

    pub fn with_engine(
        engine: GameEngine,
        config: GameConfig,
        theme: Theme,
        scores: HighScores,
    ) -> Self {
        Self {
            screen: Screen::Menu,
            engine,
            config,
            theme,
            menu_cursor: 0,
            scores,
            metrics: GameMetrics::new(),
            should_quit: false,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn selected_item(&self) -> MenuItem {
        MenuItem::ALL[self.menu_cursor]
    }

    pub fn scores(&self) -> &HighScores {
        &self.scores
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }

    pub fn metrics_mut(&mut self) -> &mut GameMetrics {
        &mut self.metrics
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Period the scheduler should tick at, `None` when nothing is running
    pub fn tick_interval(&self) -> Option<Duration> {
        match &self.screen {
            Screen::Playing {
                session,
                paused: false,
            } => Some(session.tick_interval),
            _ => None,
        }
    }

    pub fn handle(&mut self, event: AppEvent) {
        if event == AppEvent::Key(KeyAction::Quit) {
            self.should_quit = true;
            return;
        }

        let screen = std::mem::replace(&mut self.screen, Screen::Menu);
        self.screen = match screen {
            Screen::Menu => self.on_menu(event),
            Screen::Playing { session, paused } => self.on_playing(session, paused, event),
            Screen::GameOver { session, summary } => self.on_game_over(session, summary, event),
        };
    }

    fn on_menu(&mut self, event: AppEvent) -> Screen {
        let AppEvent::Key(key) = event else {
            return Screen::Menu;
        };

        let len = MenuItem::ALL.len();
        match key {
            KeyAction::Steer(Direction::Up) => {
                self.menu_cursor = (self.menu_cursor + len - 1) % len;
            }
            KeyAction::Steer(Direction::Down) => {
                self.menu_cursor = (self.menu_cursor + 1) % len;
            }
            KeyAction::Steer(Direction::Left) => self.cycle_selected(false),
            KeyAction::Steer(Direction::Right) => self.cycle_selected(true),
            KeyAction::Confirm => match self.selected_item() {
                MenuItem::Start => return self.start_game(),
                MenuItem::Quit => self.should_quit = true,
                _ => self.cycle_selected(true),
            },
            KeyAction::Back
            | KeyAction::Pause
            | KeyAction::Restart
            | KeyAction::Quit
            | KeyAction::None => {}
        }

        Screen::Menu
    }

    fn on_playing(&mut self, mut session: GameState, paused: bool, event: AppEvent) -> Screen {
        match event {
            AppEvent::Tick if !paused => {
                let result = self.engine.tick(&mut session);
                if result.terminated {
                    let summary = self.finish(
                        &session,
                        result.info.collision_type,
                        result.info.board_filled,
                    );
                    return Screen::GameOver { session, summary };
                }
            }
            AppEvent::Tick => {}
            AppEvent::Key(KeyAction::Steer(direction)) if !paused => {
                session.request_direction(direction);
            }
            AppEvent::Key(KeyAction::Pause) => {
                if paused {
                    self.metrics.on_resume();
                } else {
                    self.metrics.on_pause();
                }
                return Screen::Playing {
                    session,
                    paused: !paused,
                };
            }
            AppEvent::Key(KeyAction::Restart) => return self.start_game(),
            AppEvent::Key(KeyAction::Back) => {
                info!(score = session.score, "game abandoned");
                self.metrics.on_pause();
                return Screen::Menu;
            }
            AppEvent::Key(_) => {}
        }

        Screen::Playing { session, paused }
    }

    fn on_game_over(
        &mut self,
        session: GameState,
        summary: GameSummary,
        event: AppEvent,
    ) -> Screen {
        match event {
            AppEvent::Key(KeyAction::Confirm) | AppEvent::Key(KeyAction::Restart) => {
                self.start_game()
            }
            AppEvent::Key(KeyAction::Back) => Screen::Menu,
            _ => Screen::GameOver { session, summary },
        }
    }

    fn start_game(&mut self) -> Screen {
        self.engine.reconfigure(self.config.clone());
        let session = self.engine.reset();
        self.metrics.on_game_start();

        info!(
            mode = self.config.mode.as_str(),
            difficulty = %self.config.difficulty,
            width = session.grid_width,
            height = session.grid_height,
            "game started"
        );

        Screen::Playing {
            session,
            paused: false,
        }
    }

    fn finish(
        &mut self,
        session: &GameState,
        collision: Option<CollisionType>,
        board_filled: bool,
    ) -> GameSummary {
        self.metrics.on_game_over();

        let new_best = self.scores.record_if_better(session.mode, session.score);
        let best = self.scores.get_best(session.mode);

        info!(
            mode = session.mode.as_str(),
            score = session.score,
            steps = session.steps,
            ?collision,
            new_best,
            "game over"
        );

        GameSummary {
            score: session.score,
            best,
            new_best,
            collision,
            board_filled,
        }
    }

    fn cycle_selected(&mut self, forward: bool) {
        match self.selected_item() {
            MenuItem::Mode => {
                self.config.mode = if forward {
                    self.config.mode.next()
                } else {
                    self.config.mode.prev()
                };
            }
            MenuItem::Difficulty => {
                self.config.difficulty = if forward {
                    self.config.difficulty.next()
                } else {
                    self.config.difficulty.prev()
                };
            }
            MenuItem::Theme => {
                self.theme = if forward {
                    self.theme.next()
                } else {
                    self.theme.prev()
                };
            }
            MenuItem::Start | MenuItem::Quit => {}
        }
    }
}
