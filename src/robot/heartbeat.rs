//! Heartbeat expiry timer
//!
//! The controller periodically sends a `HEARTBEAT` command carrying the
//! interval it promises plus its measured latency. The robot arms this
//! timer for that interval (plus its own allowed latency) on every fresh
//! heartbeat; when the timer runs out the connection is considered lost.

use std::time::{Duration, Instant};

/// One-shot monotonic timer
///
/// `check_expired` reports an expiry at most once per `start`, so the
/// expiry callback fires exactly once per lost connection.
pub(crate) struct Timer {
    started: Option<Instant>,
    duration: Duration,
    armed: bool,
}

impl Timer {
    pub fn new() -> Self {
        Self {
            started: None,
            duration: Duration::ZERO,
            armed: false,
        }
    }

    /// Arm the timer for `seconds` from now
    pub fn start(&mut self, seconds: f32) {
        self.started = Some(Instant::now());
        self.duration = Duration::from_secs_f32(seconds.max(0.0));
        self.armed = true;
    }

    /// True once when the armed interval has run out; disarms
    pub fn check_expired(&mut self) -> bool {
        if !self.armed {
            return false;
        }
        match self.started {
            Some(started) if started.elapsed() > self.duration => {
                self.armed = false;
                true
            }
            _ => false,
        }
    }

    /// Seconds since the timer was last started
    pub fn elapsed(&self) -> f32 {
        self.started
            .map(|started| started.elapsed().as_secs_f32())
            .unwrap_or(0.0)
    }
}
