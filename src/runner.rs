//! Terminal front end: owns the screen and feeds key presses and ticks to [`App`]

use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::{interval, interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

use crate::input::InputHandler;
use crate::render::Renderer;
use crate::session::{App, AppEvent};

/// Timer period while no game is running; its ticks are never delivered
const IDLE_PERIOD: Duration = Duration::from_secs(3600);

pub struct TerminalRunner {
    app: App,
    renderer: Renderer,
    input_handler: InputHandler,
}

impl TerminalRunner {
    pub fn new(app: App) -> Self {
        Self {
            app,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!("terminal ready");

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut period = self.app.tick_interval();
        let mut tick_timer = Self::tick_timer(period);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            let ticking = period.is_some();

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(e)) => return Err(e).context("Failed to read terminal event"),
                        None => break,
                    }
                }

                // Game logic tick
                _ = tick_timer.tick(), if ticking => {
                    self.app.handle(AppEvent::Tick);
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.app.metrics_mut().update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.app);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    break;
                }
            }

            if self.app.should_quit() {
                break;
            }

            // Speed-ups, pauses and screen changes all show up as a new period
            let next = self.app.tick_interval();
            if next != period {
                debug!(?next, "re-arming tick timer");
                period = next;
                tick_timer = Self::tick_timer(period);
            }
        }

        info!("leaving game loop");
        Ok(())
    }

    /// A timer whose first tick is one full period away
    fn tick_timer(period: Option<Duration>) -> Interval {
        let period = period.unwrap_or(IDLE_PERIOD);
        let mut timer = interval_at(Instant::now() + period, period);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        timer
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            self.app.handle(AppEvent::Key(action));
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
