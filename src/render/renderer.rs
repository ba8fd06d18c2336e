use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{Cell, GameState, Phase, TickEvent};
use crate::metrics::GameMetrics;

pub const HEAD_GLYPH: &str = "■";
pub const BODY_GLYPH: &str = "█";
pub const FRUIT_GLYPH: &str = "●";
pub const EMPTY_GLYPH: &str = "·";

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw one frame. `outcome` is the event that ended the game, if any.
    pub fn render(
        &self,
        frame: &mut Frame,
        state: &GameState,
        metrics: &GameMetrics,
        outcome: Option<TickEvent>,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(state, metrics);
        frame.render_widget(stats, chunks[0]);

        // Grid plus its border, centered in the game area
        let game_area = centered(
            chunks[1],
            state.grid.width as u16 + 2,
            state.grid.height as u16 + 2,
        );

        if state.phase == Phase::Over {
            let game_over = self.render_game_over(state, metrics, outcome);
            frame.render_widget(game_over, chunks[1]);
        } else {
            let grid = self.render_grid(state);
            frame.render_widget(grid, game_area);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, state: &GameState) -> Paragraph<'_> {
        let mut lines = Vec::with_capacity(state.grid.height);
        let head = state.snake.head();

        // North is up, so the highest row is drawn first
        for y in (0..state.grid.height as i32).rev() {
            let mut spans = Vec::with_capacity(state.grid.width);

            for x in 0..state.grid.width as i32 {
                let cell = Cell::new(x, y);

                let span = if cell == head {
                    Span::styled(
                        HEAD_GLYPH,
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.is_occupied_by_snake(cell) {
                    Span::styled(BODY_GLYPH, Style::default().fg(Color::Green))
                } else if state.fruit == Some(cell) {
                    Span::styled(
                        FRUIT_GLYPH,
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(EMPTY_GLYPH, Style::default().fg(Color::DarkGray))
                };

                spans.push(span);
            }

            lines.push(Line::from(spans));
        }

        let border_color = match state.phase {
            Phase::Idle | Phase::Paused => Color::Yellow,
            _ => Color::White,
        };

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(border_color))
                .title(" Snake "),
        )
    }

    fn render_stats(&self, state: &GameState, metrics: &GameMetrics) -> Paragraph<'_> {
        let status = match state.phase {
            Phase::Idle => Span::styled(
                "Ready - press Space to play",
                Style::default().fg(Color::Yellow),
            ),
            Phase::Paused => Span::styled(
                "Paused",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            phase => Span::styled(phase.as_str(), Style::default().fg(Color::Gray)),
        };

        let text = vec![
            Line::from(status),
            Line::from(vec![
                Span::styled("Length: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.snake.len().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Heading: ", Style::default().fg(Color::Yellow)),
                Span::styled(state.heading.as_str(), Style::default().fg(Color::White)),
                Span::raw("    "),
                Span::styled("Ticks: ", Style::default().fg(Color::Yellow)),
                Span::styled(state.ticks.to_string(), Style::default().fg(Color::White)),
                Span::raw("    "),
                Span::styled("Time: ", Style::default().fg(Color::Yellow)),
                Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
                Span::raw("    "),
                Span::styled("Best: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.best_length.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(
        &self,
        state: &GameState,
        metrics: &GameMetrics,
        outcome: Option<TickEvent>,
    ) -> Paragraph<'_> {
        let (headline, color) = match outcome {
            Some(TickEvent::BoardFull) => ("BOARD FULL - YOU WIN", Color::Green),
            _ => ("GAME OVER", Color::Red),
        };
        let cause = match outcome {
            Some(TickEvent::WallCollision) => "Hit the wall",
            Some(TickEvent::SelfCollision) => "Bit your own tail",
            Some(TickEvent::BoardFull) => "Every cell is snake",
            _ => "",
        };

        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                headline,
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(cause, Style::default().fg(Color::Gray))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Length: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    state.snake.len().to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("    "),
                Span::styled("Games: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    metrics.games_played.to_string(),
                    Style::default().fg(Color::White),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to reset or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("←→", Style::default().fg(Color::Cyan)),
            Span::raw(" turn | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" play/pause | "),
            Span::styled("Enter", Style::default().fg(Color::Cyan)),
            Span::raw(" reset | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// A `width` x `height` rect centered in `area`, clipped to fit
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{GameConfig, Heading, SnakeEngine};
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(state: &GameState, outcome: Option<TickEvent>) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let renderer = Renderer::new();
        let metrics = GameMetrics::new();
        terminal
            .draw(|frame| renderer.render(frame, state, &metrics, outcome))
            .unwrap();

        let buffer = terminal.backend().buffer();
        (0..buffer.area.height)
            .map(|y| {
                (0..buffer.area.width)
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect::<String>()
            })
            .collect()
    }

    fn count(rows: &[String], glyph: &str) -> usize {
        rows.iter().map(|row| row.matches(glyph).count()).sum()
    }

    #[test]
    fn test_draws_snake_and_fruit() {
        let config = GameConfig::small().with_initial_snake(
            vec![Cell::new(5, 5), Cell::new(5, 4), Cell::new(5, 3)],
            Heading::North,
        );
        let engine = SnakeEngine::new(config);
        let rows = draw(&engine.snapshot(), None);

        assert_eq!(count(&rows, HEAD_GLYPH), 1);
        assert_eq!(count(&rows, BODY_GLYPH), 2);
        assert_eq!(count(&rows, FRUIT_GLYPH), 1);
        assert_eq!(count(&rows, EMPTY_GLYPH), 100 - 3 - 1);
    }

    #[test]
    fn test_north_is_drawn_up() {
        let config = GameConfig::small()
            .with_initial_snake(vec![Cell::new(5, 6), Cell::new(5, 5)], Heading::North);
        let engine = SnakeEngine::new(config);
        let rows = draw(&engine.snapshot(), None);

        let head_row = rows.iter().position(|r| r.contains(HEAD_GLYPH)).unwrap();
        let body_row = rows.iter().position(|r| r.contains(BODY_GLYPH)).unwrap();
        assert_eq!(head_row + 1, body_row);
    }

    #[test]
    fn test_idle_and_paused_status() {
        let mut engine = SnakeEngine::new(GameConfig::small());
        let rows = draw(&engine.snapshot(), None);
        assert!(rows.iter().any(|r| r.contains("press Space")));

        engine.toggle_pause();
        engine.toggle_pause();
        let rows = draw(&engine.snapshot(), None);
        assert!(rows.iter().any(|r| r.contains("Paused")));
    }

    #[test]
    fn test_game_over_screen() {
        let config = GameConfig::small().with_initial_snake(vec![Cell::new(0, 5)], Heading::West);
        let mut engine = SnakeEngine::new(config);
        engine.toggle_pause();
        let outcome = engine.tick();
        let rows = draw(&engine.snapshot(), outcome);

        assert!(rows.iter().any(|r| r.contains("GAME OVER")));
        assert!(rows.iter().any(|r| r.contains("Hit the wall")));
        assert_eq!(count(&rows, HEAD_GLYPH), 0);
    }

    #[test]
    fn test_centered_clips_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        assert_eq!(centered(area, 10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(centered(area, 40, 40), area);
    }
}
