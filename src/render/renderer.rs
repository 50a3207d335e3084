use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::game::{Boundary, CollisionType, GameState, Position};
use crate::session::{App, GameSummary, MenuItem, Screen};

use super::theme::Palette;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, app: &App) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let palette = app.theme().palette();

        frame.render_widget(self.render_stats(app, &palette), chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        match app.screen() {
            Screen::Menu => frame.render_widget(self.render_menu(app, &palette), game_area),
            Screen::Playing { session, paused } => {
                frame.render_widget(self.render_grid(session, *paused, &palette), game_area)
            }
            Screen::GameOver { summary, .. } => {
                frame.render_widget(self.render_game_over(summary), game_area)
            }
        }

        frame.render_widget(self.render_controls(app.screen()), chunks[2]);
    }

    fn render_menu(&self, app: &App, palette: &Palette) -> Paragraph<'_> {
        let config = app.config();
        let mut lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(
                    "Snake ",
                    Style::default()
                        .fg(palette.head)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    "Game",
                    Style::default()
                        .fg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
        ];

        for item in MenuItem::ALL {
            let label = match item {
                MenuItem::Start => "Start Game".to_string(),
                MenuItem::Mode => format!("Mode: < {} >", config.mode),
                MenuItem::Difficulty => format!("Difficulty: < {} >", config.difficulty),
                MenuItem::Theme => format!("Theme: < {} >", app.theme()),
                MenuItem::Quit => "Quit".to_string(),
            };

            let line = if item == app.selected_item() {
                Line::from(Span::styled(
                    format!("> {label} <"),
                    Style::default()
                        .fg(Color::Black)
                        .bg(palette.accent)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::styled(label, Style::default().fg(Color::Gray)))
            };
            lines.push(line);
            lines.push(Line::from(""));
        }

        lines.push(Line::from(vec![
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                app.scores().get_best(config.mode).to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
        ]));

        Paragraph::new(lines).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(palette.border)),
        )
    }

    fn render_grid(&self, state: &GameState, paused: bool, palette: &Palette) -> Paragraph<'_> {
        let mut lines = Vec::new();
        let head = state.snake.head();

        for y in 0..state.grid_height {
            let mut spans = Vec::new();

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == head {
                    Span::styled(
                        "■ ",
                        Style::default()
                            .fg(palette.head)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.is_occupied_by_snake(pos) {
                    Span::styled("□ ", Style::default().fg(palette.body))
                } else if state.is_obstacle(pos) {
                    Span::styled("▓▓", Style::default().fg(palette.obstacle))
                } else if pos == state.food {
                    Span::styled(
                        "O ",
                        Style::default()
                            .fg(palette.food)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(palette.empty))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        // Thin edges for a board the snake can pass through
        let border_type = match state.mode.boundary() {
            Boundary::Bounded => BorderType::Double,
            Boundary::Wrapping => BorderType::Plain,
        };
        let title = if paused {
            format!(" {} - PAUSED ", state.mode)
        } else {
            format!(" {} ", state.mode)
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(border_type)
                    .border_style(Style::default().fg(palette.border))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, app: &App, palette: &Palette) -> Paragraph<'_> {
        let mut spans = Vec::new();

        if let Some(state) = app.screen().session() {
            spans.extend([
                Span::styled("Score: ", Style::default().fg(palette.accent)),
                Span::styled(
                    state.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Best: ", Style::default().fg(palette.accent)),
                Span::styled(
                    app.scores().get_best(state.mode).to_string(),
                    Style::default().fg(Color::White),
                ),
                Span::raw("    "),
                Span::styled("Speed: ", Style::default().fg(palette.accent)),
                Span::styled(
                    format!("{}ms", state.tick_interval.as_millis()),
                    Style::default().fg(Color::White),
                ),
                Span::raw("    "),
                Span::styled("Time: ", Style::default().fg(palette.accent)),
                Span::styled(app.metrics().format_time(), Style::default().fg(Color::White)),
            ]);
        } else {
            spans.extend([
                Span::styled("Games played: ", Style::default().fg(palette.accent)),
                Span::styled(
                    app.metrics().games_played.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]);
        }

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }

    fn render_game_over(&self, summary: &GameSummary) -> Paragraph<'_> {
        let cause = match (summary.board_filled, summary.collision) {
            (true, _) => "The board is full!",
            (_, Some(CollisionType::Wall)) => "Hit the wall",
            (_, Some(CollisionType::SelfCollision)) => "Bit your own tail",
            (_, Some(CollisionType::Obstacle)) => "Crashed into an obstacle",
            (false, None) => "",
        };

        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(cause, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Your Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    summary.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(vec![
                Span::styled("Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(summary.best.to_string(), Style::default().fg(Color::White)),
            ]),
        ];

        if summary.new_best {
            text.push(Line::from(Span::styled(
                "New best score!",
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )));
        }

        text.extend([
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart, ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "M",
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" for menu or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ]);

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self, screen: &Screen) -> Paragraph<'_> {
        let spans = match screen {
            Screen::Menu => vec![
                Span::styled("↑↓", Style::default().fg(Color::Cyan)),
                Span::raw(" select | "),
                Span::styled("←→", Style::default().fg(Color::Cyan)),
                Span::raw(" change | "),
                Span::styled("Enter", Style::default().fg(Color::Green)),
                Span::raw(" confirm | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ],
            Screen::Playing { .. } => vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" to move | "),
                Span::styled("Space", Style::default().fg(Color::Cyan)),
                Span::raw(" pause | "),
                Span::styled("Esc", Style::default().fg(Color::Cyan)),
                Span::raw(" menu | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ],
            Screen::GameOver { .. } => vec![
                Span::styled("Enter", Style::default().fg(Color::Green)),
                Span::raw(" restart | "),
                Span::styled("M", Style::default().fg(Color::Cyan)),
                Span::raw(" menu | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" to quit"),
            ],
        };

        Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
