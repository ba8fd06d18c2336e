use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::{
    config::GameConfig,
    grid::{Cell, Grid},
    heading::{Command, Heading, Turn},
    state::{GameState, Phase, Snake},
};

/// What a single effective tick did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickEvent {
    /// Head advanced, tail followed
    Moved,
    /// Head landed on the fruit; the snake grew and a new fruit was placed
    FruitEaten,
    /// Next head would leave the grid
    WallCollision,
    /// Next head would land on the body
    SelfCollision,
    /// The snake ate the last fruit and now covers every cell
    BoardFull,
}

impl TickEvent {
    /// Whether this event ended the game
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            TickEvent::WallCollision | TickEvent::SelfCollision | TickEvent::BoardFull
        )
    }
}

/// The game engine that owns the state and handles all game logic.
///
/// Every mutation goes through a method taking `&mut self`, so callers that
/// share an engine between input and timer sources must serialize access.
/// Commands issued in the wrong phase are ignored rather than rejected.
pub struct SnakeEngine<R = StdRng> {
    config: GameConfig,
    grid: Grid,
    initial_snake: Snake,
    initial_fruit: Option<Cell>,
    snake: Snake,
    heading: Heading,
    fruit: Option<Cell>,
    phase: Phase,
    ticks: u32,
    rng: R,
}

impl SnakeEngine<StdRng> {
    /// Create a new engine, seeding fruit placement from `config.seed` or entropy
    pub fn new(config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> SnakeEngine<R> {
    /// Create an engine drawing fruit positions from `rng`.
    ///
    /// `config` must pass [`GameConfig::validate`].
    pub fn with_rng(config: GameConfig, mut rng: R) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid config: {:?}", config.validate());

        let grid = config.grid();
        let initial_snake = config.initial_snake();
        let initial_fruit = spawn_fruit(&mut rng, grid, &initial_snake);
        let heading = config.initial_heading;

        Self {
            config,
            grid,
            snake: initial_snake.clone(),
            initial_snake,
            initial_fruit,
            heading,
            fruit: initial_fruit,
            phase: Phase::Idle,
            ticks: 0,
            rng,
        }
    }

    /// Restore the starting snake, heading and fruit; the game waits for a play command
    pub fn reset(&mut self) {
        self.snake = self.initial_snake.clone();
        self.heading = self.config.initial_heading;
        self.fruit = self.initial_fruit;
        self.phase = Phase::Idle;
        self.ticks = 0;
        debug!(grid = ?self.grid, "game reset");
    }

    /// Idle and Paused start running, Running pauses, Over stays over
    pub fn toggle_pause(&mut self) -> Phase {
        let next = match self.phase {
            Phase::Idle | Phase::Paused => Phase::Running,
            Phase::Running => Phase::Paused,
            Phase::Over => Phase::Over,
        };
        if next != self.phase {
            debug!(from = ?self.phase, to = ?next, "phase change");
            self.phase = next;
        }
        self.phase
    }

    /// Rotate the heading one step. Only a running snake can be steered.
    ///
    /// Returns whether the heading changed.
    pub fn turn(&mut self, turn: Turn) -> bool {
        if self.phase != Phase::Running {
            return false;
        }
        self.heading = self.heading.turned(turn);
        debug!(?turn, heading = ?self.heading, "turn");
        true
    }

    pub fn turn_left(&mut self) -> bool {
        self.turn(Turn::Left)
    }

    pub fn turn_right(&mut self) -> bool {
        self.turn(Turn::Right)
    }

    /// Dispatch a logical input command
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::TurnLeft => {
                self.turn_left();
            }
            Command::TurnRight => {
                self.turn_right();
            }
            Command::PauseToggle => {
                self.toggle_pause();
            }
            Command::Reset => self.reset(),
        }
    }

    /// Advance the game by one step.
    ///
    /// Returns `None` unless the game is running. Collisions leave the snake
    /// where it was and end the game.
    pub fn tick(&mut self) -> Option<TickEvent> {
        if self.phase != Phase::Running {
            return None;
        }
        self.ticks += 1;

        let next_head = self.grid.advance(self.snake.head(), self.heading);

        if !self.grid.in_bounds(next_head) {
            return Some(self.end(TickEvent::WallCollision));
        }

        // The tail has not moved yet, so stepping onto it counts as a hit
        if self.snake.occupies(next_head) {
            return Some(self.end(TickEvent::SelfCollision));
        }

        let ate_fruit = self.fruit == Some(next_head);
        self.snake.advance_to(next_head, ate_fruit);

        if !ate_fruit {
            return Some(TickEvent::Moved);
        }

        self.fruit = spawn_fruit(&mut self.rng, self.grid, &self.snake);
        match self.fruit {
            Some(fruit) => {
                debug!(length = self.snake.len(), ?fruit, "fruit eaten");
                Some(TickEvent::FruitEaten)
            }
            None => Some(self.end(TickEvent::BoardFull)),
        }
    }

    fn end(&mut self, event: TickEvent) -> TickEvent {
        self.phase = Phase::Over;
        debug!(?event, length = self.snake.len(), ticks = self.ticks, "game over");
        event
    }

    /// Owned copy of the current state
    pub fn snapshot(&self) -> GameState {
        GameState {
            snake: self.snake.clone(),
            heading: self.heading,
            fruit: self.fruit,
            phase: self.phase,
            grid: self.grid,
            ticks: self.ticks,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[cfg(test)]
    pub(crate) fn force_fruit(&mut self, cell: Cell) {
        assert!(!self.snake.occupies(cell));
        self.fruit = Some(cell);
    }
}

/// Pick a free cell uniformly at random, or `None` if the snake covers the grid.
///
/// Draws random cells until one is free while at most half the board is
/// taken; past that, samples from the list of free cells directly.
fn spawn_fruit<R: Rng>(rng: &mut R, grid: Grid, snake: &Snake) -> Option<Cell> {
    let area = grid.area();
    if snake.len() >= area {
        return None;
    }

    if snake.len() * 2 <= area {
        loop {
            let x = rng.gen_range(0..grid.width) as i32;
            let y = rng.gen_range(0..grid.height) as i32;
            let cell = Cell::new(x, y);

            if !snake.occupies(cell) {
                return Some(cell);
            }
        }
    }

    let occupied: HashSet<Cell> = snake.body.iter().copied().collect();
    let free: Vec<Cell> = grid.cells().filter(|cell| !occupied.contains(cell)).collect();
    free.choose(rng).copied()
}
