use super::grid::{Cell, Grid};
use super::heading::Heading;

/// The snake body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Cell>,
}

impl Snake {
    /// Create a straight snake of `length` cells trailing behind `head`
    pub fn new(head: Cell, heading: Heading, length: usize) -> Self {
        let mut body = vec![head];

        let (dx, dy) = heading.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self { body }
    }

    pub fn from_cells(body: Vec<Cell>) -> Self {
        Self { body }
    }

    /// Get the head position
    pub fn head(&self) -> Cell {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    /// True if any segment, head and tail included, occupies `cell`
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Put a new head in front. Keeps the tail when `grow` is set.
    pub fn advance_to(&mut self, new_head: Cell, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Lifecycle phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Waiting for the first play command
    Idle,
    Running,
    Paused,
    /// Terminal until reset
    Over,
}

impl Phase {
    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Idle => "Ready",
            Phase::Running => "Running",
            Phase::Paused => "Paused",
            Phase::Over => "Game Over",
        }
    }
}

/// Snapshot of a game.
///
/// Always an owned copy handed out by the engine; mutating it never
/// affects the running game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub snake: Snake,
    pub heading: Heading,
    /// `None` only once the snake fills the whole grid
    pub fruit: Option<Cell>,
    pub phase: Phase,
    pub grid: Grid,
    /// Effective ticks since the last reset
    pub ticks: u32,
}

impl GameState {
    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, cell: Cell) -> bool {
        self.snake.occupies(cell)
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }
}
