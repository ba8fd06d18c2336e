use std::collections::HashSet;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::grid::{Cell, Grid};
use super::heading::Heading;
use super::state::Snake;

/// Construction-time misconfiguration the host must reject before building an engine
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },
    #[error("initial snake has no cells")]
    EmptySnake,
    #[error("initial snake cell ({x}, {y}) lies outside the grid")]
    SnakeOutOfBounds { x: i32, y: i32 },
    #[error("initial snake occupies ({x}, {y}) more than once")]
    SnakeOverlaps { x: i32, y: i32 },
    #[error("initial snake segments {index} and {next} are not adjacent")]
    SnakeNotContiguous { index: usize, next: usize },
    #[error("initial snake fills the grid, leaving no room for fruit")]
    NoRoomForFruit,
    #[error("tick interval must be greater than zero")]
    ZeroTickInterval,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Scheduler period between ticks
    pub tick_interval_ms: u64,
    /// Heading at start and after every reset
    pub initial_heading: Heading,
    /// Explicit starting body, head first. Defaults to one cell at the grid center.
    pub initial_snake: Option<Vec<Cell>>,
    /// Seed for fruit placement; entropy when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 84,
            grid_height: 48,
            tick_interval_ms: 125,
            initial_heading: Heading::North,
            initial_snake: None,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    pub fn with_initial_snake(mut self, body: Vec<Cell>, heading: Heading) -> Self {
        self.initial_snake = Some(body);
        self.initial_heading = heading;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_tick_interval_ms(mut self, millis: u64) -> Self {
        self.tick_interval_ms = millis;
        self
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {:?}", path))
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.grid_width, self.grid_height)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// The snake every game starts with
    pub fn initial_snake(&self) -> Snake {
        match &self.initial_snake {
            Some(body) => Snake::from_cells(body.clone()),
            None => Snake::new(self.grid().center(), self.initial_heading, 1),
        }
    }

    /// Check the preconditions the engine relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::ZeroTickInterval);
        }

        let grid = self.grid();
        let snake = self.initial_snake();
        if snake.is_empty() {
            return Err(ConfigError::EmptySnake);
        }

        let mut seen = HashSet::with_capacity(snake.len());
        for cell in &snake.body {
            if !grid.in_bounds(*cell) {
                return Err(ConfigError::SnakeOutOfBounds { x: cell.x, y: cell.y });
            }
            if !seen.insert(*cell) {
                return Err(ConfigError::SnakeOverlaps { x: cell.x, y: cell.y });
            }
        }

        for (index, pair) in snake.body.windows(2).enumerate() {
            if !pair[0].is_adjacent(pair[1]) {
                return Err(ConfigError::SnakeNotContiguous {
                    index,
                    next: index + 1,
                });
            }
        }

        if snake.len() >= grid.area() {
            return Err(ConfigError::NoRoomForFruit);
        }

        Ok(())
    }
}
