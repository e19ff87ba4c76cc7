use chrono::Timelike;
use std::time::{Duration, Instant};

/// Wall-clock text refreshed on a fixed interval.
#[derive(Debug, Clone)]
pub struct Clock {
    pub text: String,
    pub interval: Duration,
    last_tick: Option<Instant>,
}

impl Clock {
    pub fn new(interval: Duration) -> Self {
        Self {
            text: String::new(),
            interval,
            last_tick: None,
        }
    }

    /// Refreshes the text if this is the first tick or `interval` has elapsed.
    /// Returns true when the text was re-rendered.
    pub fn tick<T: Timelike>(&mut self, now: Instant, local_time: impl FnOnce() -> T) -> bool {
        let due = match self.last_tick {
            None => true,
            Some(last) => now.duration_since(last) >= self.interval,
        };
        if due {
            self.text = format_clock(&local_time());
            self.last_tick = Some(now);
        }
        due
    }

    /// Time left until the next refresh is due.
    pub fn until_next_tick(&self, now: Instant) -> Duration {
        match self.last_tick {
            None => Duration::ZERO,
            Some(last) => self.interval.saturating_sub(now.duration_since(last)),
        }
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

/// Zero-padded `HH:MM`.
pub fn format_clock(time: &impl Timelike) -> String {
    format!("{:02}:{:02}", time.hour(), time.minute())
}
