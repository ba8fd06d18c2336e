//! Headless mode: drives the engine without a terminal
//!
//! A simple autopilot reads engine snapshots and issues turn commands, the
//! same way the keyboard would. Ticks run back to back with no clock, and the
//! game is restarted whenever it ends. Useful for smoke runs and soak tests.

use tracing::info;

use crate::game::{Command, GameConfig, GameState, Phase, SnakeEngine, TickEvent, Turn};

/// Totals gathered over a headless run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessReport {
    pub ticks: u64,
    pub games_finished: u32,
    pub fruit_eaten: u32,
    pub best_length: usize,
    pub wall_collisions: u32,
    pub self_collisions: u32,
    pub boards_filled: u32,
}

pub struct HeadlessMode {
    engine: SnakeEngine,
    ticks: u64,
}

impl HeadlessMode {
    pub fn new(config: GameConfig, ticks: u64) -> Self {
        Self {
            engine: SnakeEngine::new(config),
            ticks,
        }
    }

    pub fn run(&mut self) -> HeadlessReport {
        let mut report = HeadlessReport {
            best_length: self.engine.snake_len(),
            ..Default::default()
        };

        self.engine.apply(Command::PauseToggle);

        for _ in 0..self.ticks {
            if let Some(turn) = choose_turn(&self.engine.snapshot()) {
                self.engine.apply(turn.into());
            }

            let Some(event) = self.engine.tick() else {
                break;
            };
            report.ticks += 1;
            report.best_length = report.best_length.max(self.engine.snake_len());

            match event {
                TickEvent::Moved => continue,
                TickEvent::FruitEaten => {
                    report.fruit_eaten += 1;
                    continue;
                }
                TickEvent::WallCollision => report.wall_collisions += 1,
                TickEvent::SelfCollision => report.self_collisions += 1,
                TickEvent::BoardFull => {
                    report.fruit_eaten += 1;
                    report.boards_filled += 1;
                }
            }

            report.games_finished += 1;
            self.engine.apply(Command::Reset);
            self.engine.apply(Command::PauseToggle);
        }

        info!(
            ticks = report.ticks,
            games = report.games_finished,
            fruit = report.fruit_eaten,
            best_length = report.best_length,
            walls = report.wall_collisions,
            bites = report.self_collisions,
            "headless run completed"
        );

        report
    }

    pub fn phase(&self) -> Phase {
        self.engine.phase()
    }
}

/// Greedy autopilot: among the safe moves, the one that ends closest to the fruit.
///
/// `None` keeps the current heading. With no safe move it goes straight.
fn choose_turn(state: &GameState) -> Option<Turn> {
    let head = state.snake.head();
    let target = state.fruit?;

    [None, Some(Turn::Left), Some(Turn::Right)]
        .into_iter()
        .filter_map(|turn| {
            let heading = match turn {
                Some(turn) => state.heading.turned(turn),
                None => state.heading,
            };
            let next = state.grid.advance(head, heading);
            let safe = state.grid.in_bounds(next) && !state.snake.occupies(next);
            safe.then(|| {
                let distance = (next.x - target.x).abs() + (next.y - target.y).abs();
                (distance, turn)
            })
        })
        .min_by_key(|(distance, _)| *distance)
        .and_then(|(_, turn)| turn)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Cell, Grid, Heading, Snake};

    fn state(body: &[(i32, i32)], heading: Heading, fruit: (i32, i32)) -> GameState {
        GameState {
            snake: Snake::from_cells(body.iter().map(|&c| Cell::from(c)).collect()),
            heading,
            fruit: Some(Cell::from(fruit)),
            phase: Phase::Running,
            grid: Grid::new(10, 10),
            ticks: 0,
        }
    }

    #[test]
    fn test_autopilot_turns_toward_fruit() {
        let s = state(&[(5, 5)], Heading::North, (9, 5));
        assert_eq!(choose_turn(&s), Some(Turn::Right));

        let s = state(&[(5, 5)], Heading::North, (5, 9));
        assert_eq!(choose_turn(&s), None);
    }

    #[test]
    fn test_autopilot_avoids_wall() {
        // Heading into the top wall with the fruit straight behind
        let s = state(&[(5, 9), (5, 8)], Heading::North, (5, 0));
        assert!(choose_turn(&s).is_some());
    }

    #[test]
    fn test_headless_run_counts_ticks() {
        let config = GameConfig::small().with_seed(11);
        let mut mode = HeadlessMode::new(config, 2_000);
        let report = mode.run();

        assert_eq!(report.ticks, 2_000);
        assert!(report.best_length >= 1);
        assert_eq!(
            report.games_finished,
            report.wall_collisions + report.self_collisions + report.boards_filled
        );
        assert_eq!(mode.phase(), Phase::Running);
    }

    #[test]
    fn test_headless_run_is_deterministic_with_seed() {
        let config = GameConfig::small().with_seed(99);
        let a = HeadlessMode::new(config.clone(), 1_000).run();
        let b = HeadlessMode::new(config, 1_000).run();
        assert_eq!(a, b);
    }
}
