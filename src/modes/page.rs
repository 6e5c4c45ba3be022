use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEvent, KeyEventKind,
        MouseEvent,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::{Stream, StreamExt};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    layout::Rect,
};
use std::io::{self, Stderr, stderr};
use tokio::time::{MissedTickBehavior, interval};

use crate::game::{GameConfig, GameEngine, GameState, StepOutcome};
use crate::input::{InputHandler, KeyAction, SwipeTracker};
use crate::render::Renderer;

type Term = Terminal<CrosstermBackend<Stderr>>;

/// Holds the terminal in raw/alternate-screen/mouse-capture mode.
///
/// Dropping the guard restores the terminal, whichever way the page exits.
struct TerminalGuard {
    terminal: Term,
}

impl TerminalGuard {
    fn acquire() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        if let Err(err) = execute!(stderr, EnterAlternateScreen, EnableMouseCapture) {
            restore(&mut stderr);
            return Err(err).context("Failed to enter alternate screen");
        }

        let mut terminal = match Terminal::new(CrosstermBackend::new(stderr)) {
            Ok(terminal) => terminal,
            Err(err) => {
                restore(&mut std::io::stderr());
                return Err(err).context("Failed to create terminal");
            }
        };

        if let Err(err) = terminal.hide_cursor().and_then(|()| terminal.clear()) {
            restore(terminal.backend_mut());
            return Err(err).context("Failed to prepare terminal");
        }

        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        restore(self.terminal.backend_mut());
        if let Err(err) = self.terminal.show_cursor() {
            tracing::warn!(error = %err, "failed to show cursor");
        }
    }
}

/// Undo raw mode, mouse capture, and the alternate screen
fn restore(out: &mut impl std::io::Write) {
    if let Err(err) = disable_raw_mode() {
        tracing::warn!(error = %err, "failed to disable raw mode");
    }
    if let Err(err) = execute!(out, DisableMouseCapture, LeaveAlternateScreen) {
        tracing::warn!(error = %err, "failed to leave alternate screen");
    }
}

/// The "coming soon" page with its Snake board
pub struct PageMode {
    engine: GameEngine,
    state: GameState,
    renderer: Renderer,
    input_handler: InputHandler,
    swipe: SwipeTracker,
    board: Rect,
    ticks: u64,
    should_quit: bool,
}

impl PageMode {
    pub fn new(config: GameConfig) -> Self {
        let renderer = Renderer::new(&config);
        let engine = GameEngine::new(config);
        let state = engine.reset();

        Self {
            engine,
            state,
            renderer,
            input_handler: InputHandler::new(),
            swipe: SwipeTracker::new(),
            board: Rect::default(),
            ticks: 0,
            should_quit: false,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Ticks that reached the engine so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub async fn run(&mut self) -> Result<()> {
        tracing::info!(
            tile_count = self.engine.config().tile_count,
            tick_ms = self.engine.config().tick_interval_ms,
            "page started"
        );

        let mut guard = TerminalGuard::acquire()?;
        let result = self
            .run_loop(&mut guard.terminal, EventStream::new())
            .await;
        drop(guard);

        tracing::info!(
            ticks = self.ticks,
            length = self.state.snake.len(),
            game_over = self.state.is_game_over(),
            "page closed"
        );
        result
    }

    /// Multiplex terminal events, ticks, and ctrl_c until quit or the event source ends
    async fn run_loop<B, S>(&mut self, terminal: &mut Terminal<B>, mut events: S) -> Result<()>
    where
        B: Backend,
        S: Stream<Item = io::Result<Event>> + Unpin,
    {
        let mut tick_timer = interval(self.engine.config().tick_interval());
        tick_timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick of an interval fires immediately; skip it so the
        // snake sits one full interval at its starting cell
        tick_timer.tick().await;

        self.draw(terminal)?;

        loop {
            tokio::select! {
                maybe_event = events.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event, terminal)?,
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                _ = tick_timer.tick(), if self.state.is_running() => {
                    self.update_game();
                    self.draw(terminal)?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        let completed = terminal
            .draw(|frame| self.renderer.render(frame, &self.state))
            .context("Failed to draw frame")?;
        self.board = self.renderer.board_area(completed.area);
        Ok(())
    }

    fn handle_event<B: Backend>(
        &mut self,
        event: Event,
        terminal: &mut Terminal<B>,
    ) -> Result<()> {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(_, _) => self.draw(terminal)?,
            _ => {}
        }

        Ok(())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Only process key press events, not release
        if key.kind != KeyEventKind::Press {
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Steer(direction) => {
                self.state.steer(direction);
            }
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if let Some(direction) = self.swipe.handle_mouse_event(mouse, self.board) {
            self.state.steer(direction);
        }
    }

    fn update_game(&mut self) {
        self.ticks += 1;
        match self.engine.step(&mut self.state) {
            StepOutcome::Ate { new_food } => {
                tracing::debug!(
                    length = self.state.snake.len(),
                    food_x = new_food.x,
                    food_y = new_food.y,
                    "food eaten"
                );
            }
            StepOutcome::Collided(collision) => {
                let head = self.state.snake.head();
                tracing::info!(
                    ?collision,
                    head_x = head.x,
                    head_y = head.y,
                    length = self.state.snake.len(),
                    "game over"
                );
            }
            StepOutcome::Moved | StepOutcome::Halted => {}
        }
    }
}
