use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::{Duration, Instant};
use tokio::time::{interval_at, Interval};

use crate::game::{GameConfig, GameSession, Phase};
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;
use crate::storage::HighScoreStore;

/// The running application: one game session wired to the terminal.
///
/// Everything runs on a single thread. Two periodic cadences (the game tick
/// at the session's current interval, the elapsed-time timer at one second)
/// plus input events and core-timer deadlines all feed the same select loop,
/// so each tick runs to completion before anything else touches the state.
pub struct App {
    session: GameSession,
    renderer: Renderer,
    input_handler: InputHandler,
    store: HighScoreStore,
    should_quit: bool,
    rearm_timers: bool,
}

impl App {
    pub fn new(config: GameConfig, store: HighScoreStore) -> Self {
        let high_score = store.load();

        Self {
            session: GameSession::new(config, high_score),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            store,
            should_quit: false,
            rearm_timers: false,
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

        // Run event loop with cleanup
        let result = self.run_event_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_interval = self.session.tick_interval();
        let mut tick_timer = periodic(tick_interval);
        let mut second_timer = periodic(Duration::from_secs(1));

        // Initial frame (start overlay)
        terminal
            .draw(|frame| self.renderer.render(frame, &self.session))
            .context("Failed to draw frame")?;

        loop {
            let deadline = self.session.next_wakeup();

            tokio::select! {
                // Terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.on_tick()?;
                }

                // Elapsed game time, once per second
                _ = second_timer.tick() => {
                    self.session.on_second(Instant::now());
                }

                // Special-food expiry / boost revert
                _ = wait_for_deadline(deadline) => {
                    self.session.handle_due_timers(Instant::now());
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }

            // Re-arm the periodic timers after a start/restart so the first
            // tick lands a full interval after the transition, or whenever
            // the speed controller changed the tick interval.
            let current = self.session.tick_interval();
            if self.rearm_timers {
                self.rearm_timers = false;
                tick_interval = current;
                tick_timer = periodic(tick_interval);
                second_timer = periodic(Duration::from_secs(1));
            } else if current != tick_interval {
                tick_interval = current;
                tick_timer = periodic(tick_interval);
            }

            terminal
                .draw(|frame| self.renderer.render(frame, &self.session))
                .context("Failed to draw frame")?;
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => {
                    self.session.request_direction(direction);
                }
                KeyAction::Start => {
                    if self.session.phase() != Phase::Running {
                        self.session.start();
                        self.rearm_timers = true;
                    }
                }
                KeyAction::Restart => {
                    if self.session.phase() == Phase::GameOver {
                        self.session.start();
                        self.rearm_timers = true;
                    }
                }
                KeyAction::Quit => {
                    self.should_quit = true;
                }
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn on_tick(&mut self) -> Result<()> {
        let outcome = self.session.step(Instant::now());

        if let Some(high_score) = outcome.new_high_score {
            self.store
                .save(high_score)
                .context("Failed to persist high score")?;
        }

        Ok(())
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

/// A periodic timer whose first tick lands one full period from now
/// (tokio's `interval` fires immediately on creation, which would
/// double-step the snake every time the speed changes).
fn periodic(period: Duration) -> Interval {
    interval_at(tokio::time::Instant::now() + period, period)
}

/// Sleep until the session's next core-timer deadline, or forever if none
/// is pending (a later select iteration picks up newly armed deadlines).
async fn wait_for_deadline(deadline: Option<Instant>) {
    match deadline {
        Some(at) => tokio::time::sleep_until(at.into()).await,
        None => std::future::pending().await,
    }
}
