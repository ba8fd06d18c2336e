use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval};
use tracing::debug;

use crate::game::Phase;

/// Fixed-rate tick source that only runs while the game does.
///
/// Armed on the transition into [`Phase::Running`] and disarmed on any
/// transition out of it. Callers gate the tick future on [`TickClock::is_armed`].
pub struct TickClock {
    interval: Interval,
    period: Duration,
    armed: bool,
}

impl TickClock {
    /// Must be called inside a tokio runtime
    pub fn new(period: Duration) -> Self {
        let mut interval = interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            interval,
            period,
            armed: false,
        }
    }

    /// Follow the engine phase. Returns true if the clock was armed or disarmed.
    pub fn sync(&mut self, phase: Phase) -> bool {
        let should_run = phase == Phase::Running;
        if should_run == self.armed {
            return false;
        }

        if should_run {
            // First tick lands one full period after play starts
            self.interval.reset();
        }
        self.armed = should_run;
        debug!(armed = self.armed, period_ms = self.period.as_millis() as u64, "tick clock");
        true
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub async fn tick(&mut self) -> Instant {
        self.interval.tick().await
    }
}
