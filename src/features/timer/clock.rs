//! Tick sources that drive a timer.
//!
//! The engine never reads a clock itself. A tick source decides when the
//! next one-second tick is due, so tests can substitute virtual time.

use std::time::{Duration, Instant};

/// Something that produces timer ticks.
#[cfg_attr(test, mockall::automock)]
pub trait TickSource {
    /// Consume one due tick, if any.
    fn poll_tick(&mut self) -> bool;

    /// Time until the next tick is due.
    fn until_next(&self) -> Duration;

    /// Drop anything pending and restart the cadence from now.
    fn reset(&mut self);
}

/// Wall-clock ticker with a fixed period.
///
/// Ticks missed while the process was not polling (suspended terminal,
/// sleeping laptop) are not replayed: a late poll yields a single tick and the
/// cadence restarts from that moment.
#[derive(Debug, Clone)]
pub struct IntervalTicker {
    period: Duration,
    next: Instant,
}

impl IntervalTicker {
    /// Create a ticker whose first tick is one period from now.
    #[must_use]
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next: Instant::now() + period,
        }
    }
}

impl TickSource for IntervalTicker {
    fn poll_tick(&mut self) -> bool {
        let now = Instant::now();
        if now < self.next {
            return false;
        }

        let late = now - self.next;
        self.next = if late < self.period {
            self.next + self.period
        } else {
            now + self.period
        };
        true
    }

    fn until_next(&self) -> Duration {
        self.next.saturating_duration_since(Instant::now())
    }

    fn reset(&mut self) {
        self.next = Instant::now() + self.period;
    }
}

/// Virtual ticker advanced by hand.
#[derive(Debug, Clone, Default)]
pub struct ManualTicker {
    pending: u32,
}

impl ManualTicker {
    /// Create a ticker with nothing pending.
    #[must_use]
    pub const fn new() -> Self {
        Self { pending: 0 }
    }

    /// Queue `ticks` more ticks.
    pub fn advance(&mut self, ticks: u32) {
        self.pending = self.pending.saturating_add(ticks);
    }

    /// Ticks queued but not yet consumed.
    #[must_use]
    pub const fn pending(&self) -> u32 {
        self.pending
    }
}

impl TickSource for ManualTicker {
    fn poll_tick(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }

    fn until_next(&self) -> Duration {
        if self.pending > 0 {
            Duration::ZERO
        } else {
            Duration::MAX
        }
    }

    fn reset(&mut self) {
        self.pending = 0;
    }
}
