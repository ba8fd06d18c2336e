use std::time::{Duration, Instant};

/// Session statistics for the header bar. Lives in memory only.
pub struct GameMetrics {
    last_update: Instant,
    /// Time spent running in the current game; paused time is not counted
    pub elapsed_time: Duration,
    pub best_length: usize,
    pub games_played: u32,
    pub fruit_eaten: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            last_update: Instant::now(),
            elapsed_time: Duration::ZERO,
            best_length: 0,
            games_played: 0,
            fruit_eaten: 0,
        }
    }

    pub fn update(&mut self, running: bool) {
        let now = Instant::now();
        if running {
            self.elapsed_time += now.duration_since(self.last_update);
        }
        self.last_update = now;
    }

    pub fn on_game_start(&mut self) {
        self.last_update = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_fruit_eaten(&mut self, length: usize) {
        self.fruit_eaten += 1;
        self.best_length = self.best_length.max(length);
    }

    pub fn on_game_over(&mut self, final_length: usize) {
        self.games_played += 1;
        self.best_length = self.best_length.max(final_length);
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}
