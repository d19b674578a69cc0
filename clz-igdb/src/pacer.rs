use std::time::Duration;

/// Sleep-based pacing between successive catalog requests.
///
/// The first call goes out immediately; every later call first sleeps for
/// the interval. One pacer is shared across all phases of a run.
#[derive(Debug, Clone)]
pub struct Pacer {
    interval: Duration,
    calls: usize,
    waits: usize,
}

impl Pacer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            calls: 0,
            waits: 0,
        }
    }

    /// Block until the next request may be sent, then record it.
    pub fn wait(&mut self) {
        if self.calls > 0 {
            if !self.interval.is_zero() {
                std::thread::sleep(self.interval);
            }
            self.waits += 1;
        }
        self.calls += 1;
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Number of requests released so far.
    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Number of times a request was held back by the interval.
    pub fn waits(&self) -> usize {
        self.waits
    }
}
