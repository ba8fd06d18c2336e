use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info};

use crate::game::{Command, GameConfig, Phase, SnakeEngine, TickEvent};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

use super::clock::TickClock;

pub struct HumanMode {
    engine: SnakeEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    outcome: Option<TickEvent>,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Self {
        Self {
            engine: SnakeEngine::new(config),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            outcome: None,
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

        info!(grid = ?self.engine.grid(), "session started");

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            games_played = self.metrics.games_played,
            best_length = self.metrics.best_length,
            fruit_eaten = self.metrics.fruit_eaten,
            "session ended"
        );

        result
    }

    /// Single task owning the engine: input, ticks and frames never interleave
    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut clock = TickClock::new(self.engine.config().tick_interval());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick, only while running
                _ = clock.tick(), if clock.is_armed() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update(self.engine.is_running());
                    let state = self.engine.snapshot();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &state, &self.metrics, self.outcome);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            clock.sync(self.engine.phase());

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            match self.input_handler.handle_key_event(key) {
                KeyAction::GameCommand(command) => self.apply_command(command),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn apply_command(&mut self, command: Command) {
        let before = self.engine.phase();

        if command == Command::Reset {
            self.reset_game();
            return;
        }
        self.engine.apply(command);

        let after = self.engine.phase();
        if before == Phase::Idle && after == Phase::Running {
            self.metrics.on_game_start();
            info!("game started");
        } else if before != after {
            debug!(from = ?before, to = ?after, "phase change");
        }
    }

    fn update_game(&mut self) {
        let Some(event) = self.engine.tick() else {
            return;
        };

        let length = self.engine.snake_len();
        match event {
            TickEvent::FruitEaten => self.metrics.on_fruit_eaten(length),
            TickEvent::Moved => {}
            TickEvent::WallCollision | TickEvent::SelfCollision | TickEvent::BoardFull => {
                self.metrics.on_game_over(length);
                self.outcome = Some(event);
                info!(?event, length, "game over");
            }
        }
    }

    fn reset_game(&mut self) {
        self.engine.reset();
        self.metrics.on_game_start();
        self.outcome = None;
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
