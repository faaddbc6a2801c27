use std::time::{Duration, Instant};

pub const PROGRESS_WIDTH: usize = 10;
const PROGRESS_FILLED: char = '■';
const PROGRESS_EMPTY: char = '·';
const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Time since the last keypress or refresh, measured against the refresh
/// interval. Every method takes `now` so callers control the time source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshClock {
    last_activity: Instant,
    interval: Duration,
}

impl RefreshClock {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self {
            last_activity: now,
            interval: interval.max(MIN_INTERVAL),
        }
    }

    #[cfg(test)]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval.max(MIN_INTERVAL);
    }

    pub fn reset(&mut self, now: Instant) {
        self.last_activity = now;
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.last_activity)
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.interval.saturating_sub(self.elapsed(now))
    }

    pub fn is_due(&self, now: Instant) -> bool {
        self.elapsed(now) >= self.interval
    }

    /// Fraction of the interval that has passed, clamped to `[0, 1]`.
    pub fn progress(&self, now: Instant) -> f64 {
        let ratio = self.elapsed(now).as_secs_f64() / self.interval.as_secs_f64();
        ratio.clamp(0.0, 1.0)
    }
}

pub fn progress_bar(progress: f64, width: usize) -> String {
    let filled = ((progress.clamp(0.0, 1.0) * width as f64).floor() as usize).min(width);
    std::iter::repeat_n(PROGRESS_FILLED, filled)
        .chain(std::iter::repeat_n(PROGRESS_EMPTY, width - filled))
        .collect()
}
