//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Terminal front ends and headless drivers both sit on top of [`SnakeEngine`].

pub mod config;
pub mod engine;
pub mod grid;
pub mod heading;
pub mod state;

// Re-export commonly used types
pub use config::{ConfigError, GameConfig};
pub use engine::{SnakeEngine, TickEvent};
pub use grid::{Cell, Grid};
pub use heading::{Command, Heading, Turn};
pub use state::{GameState, Phase, Snake};
