//! Grid Snake - a tick-driven snake engine with a terminal front end
//!
//! This library provides:
//! - Core game logic (game module): grid model, snake engine, configuration
//! - Keyboard mapping to engine commands (input module)
//! - TUI rendering of engine snapshots (render module)
//! - Per-session statistics (metrics module)
//! - Interactive and headless drivers (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
