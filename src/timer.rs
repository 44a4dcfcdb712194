use std::time::Duration;

// Frame-time driven timers. Nothing here reads a clock; callers feed the
// elapsed time of each frame.

const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Repeating timer.
#[derive(Debug, Clone)]
pub struct Interval {
    period: Duration,
    elapsed: Duration,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Self { period: period.max(MIN_PERIOD), elapsed: Duration::ZERO }
    }

    /// Returns how many periods completed during `dt`.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        self.elapsed += dt;
        let mut fired = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            fired += 1;
        }
        fired
    }
}

/// One-shot timer.
#[derive(Debug, Clone)]
pub struct Timeout {
    remaining: Duration,
}

impl Timeout {
    pub fn new(after: Duration) -> Self {
        Self { remaining: after }
    }

    /// `Some(overshoot)` once expired: the part of `dt` left after expiry.
    pub fn advance(&mut self, dt: Duration) -> Option<Duration> {
        if dt >= self.remaining {
            let overshoot = dt - self.remaining;
            self.remaining = Duration::ZERO;
            Some(overshoot)
        } else {
            self.remaining -= dt;
            None
        }
    }
}
